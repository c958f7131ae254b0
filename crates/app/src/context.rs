//! Configuration context shared by every event and wrapper.

use crate::action::LoggedAction;
use crate::event::Event;
use crate::operation::LoggedOperation;
use autolog_config::{AutoLogConfig, AutoLogLevel};
use autolog_ports::LoggerPort;
use autolog_shared::Fields;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Logger sink plus configuration, passed explicitly to events and wrappers.
///
/// Cloning is cheap; clones share the sink and the resolved mute list.
#[derive(Clone)]
pub struct AutoLog {
    logger: Arc<dyn LoggerPort>,
    config: Arc<AutoLogConfig>,
    muted_fields: Arc<[Box<str>]>,
}

impl AutoLog {
    /// Build a context from a sink and an explicit config.
    #[must_use]
    pub fn new(logger: Arc<dyn LoggerPort>, config: AutoLogConfig) -> Self {
        let muted_fields = config.muted_fields().into();
        Self {
            logger,
            config: Arc::new(config),
            muted_fields,
        }
    }

    /// Build a context with the default config.
    #[must_use]
    pub fn with_logger(logger: Arc<dyn LoggerPort>) -> Self {
        Self::new(logger, AutoLogConfig::default())
    }

    /// Same sink, different config.
    #[must_use]
    pub fn reconfigure(&self, config: AutoLogConfig) -> Self {
        Self::new(Arc::clone(&self.logger), config)
    }

    /// Same config, different sink.
    #[must_use]
    pub fn with_sink(&self, logger: Arc<dyn LoggerPort>) -> Self {
        Self {
            logger,
            config: Arc::clone(&self.config),
            muted_fields: Arc::clone(&self.muted_fields),
        }
    }

    /// Record sink.
    #[must_use]
    pub fn logger(&self) -> &dyn LoggerPort {
        self.logger.as_ref()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &AutoLogConfig {
        &self.config
    }

    /// Active verbosity level.
    #[must_use]
    pub fn level(&self) -> AutoLogLevel {
        self.config.level
    }

    /// Effective muted field names.
    #[must_use]
    pub fn muted_fields(&self) -> &[Box<str>] {
        &self.muted_fields
    }

    /// Create an event from raw metadata.
    #[must_use]
    pub fn event(&self, meta: Fields) -> Event {
        Event::create(self, meta)
    }

    /// Wrap a single-step function under an explicit action name.
    #[must_use]
    pub fn action<F>(&self, name: impl Into<Arc<str>>, function: F) -> LoggedAction<F> {
        LoggedAction::new(self.clone(), name, function)
    }

    /// Wrap several functions, each named by its key.
    pub fn actions<I, K, F>(&self, functions: I) -> BTreeMap<String, LoggedAction<F>>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
    {
        functions
            .into_iter()
            .map(|(name, function)| {
                let name = name.into();
                let wrapped = self.action(name.as_str(), function);
                (name, wrapped)
            })
            .collect()
    }

    /// Wrap a request handler under an explicit operation name.
    #[must_use]
    pub fn operation<H>(&self, name: impl Into<Arc<str>>, handler: H) -> LoggedOperation<H> {
        LoggedOperation::new(self.clone(), name, handler)
    }

    /// Wrap several handlers, each named by its key.
    pub fn operations<I, K, H>(&self, handlers: I) -> BTreeMap<String, LoggedOperation<H>>
    where
        I: IntoIterator<Item = (K, H)>,
        K: Into<String>,
    {
        handlers
            .into_iter()
            .map(|(name, handler)| {
                let name = name.into();
                let wrapped = self.operation(name.as_str(), handler);
                (name, wrapped)
            })
            .collect()
    }
}

impl std::fmt::Debug for AutoLog {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AutoLog")
            .field("config", &self.config)
            .field("muted_fields", &self.muted_fields)
            .finish_non_exhaustive()
    }
}
