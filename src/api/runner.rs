//! Engine facade and builder.
//!
//! A [`Shunt`] owns its operative registry and configuration; there is no
//! process-wide state. Operatives can be added at any time through a shared
//! reference; runs already in flight resolve names at dispatch time.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::config::{EngineConfig, ErrorPolicy};
use crate::core::dispatcher::Dispatcher;
use crate::core::event_bus::{EventEmitter, EventSender};
use crate::core::group_runner::{GroupReport, GroupRunner};
use crate::core::sequence_runner::{SequenceReport, SequenceRunner};
use crate::core::sink::ResultSink;
use crate::domain::model::{OpDescriptor, OpResult, SequenceGroup};
use crate::operatives::{Operative, OperativeRegistry};

/// Operation dispatch and sequencing engine.
pub struct Shunt {
    registry: Arc<RwLock<OperativeRegistry>>,
    config: EngineConfig,
    events: EventEmitter,
}

impl Shunt {
    /// Engine with default configuration and no operatives.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ShuntBuilder {
        ShuntBuilder {
            registry: OperativeRegistry::new(),
            config: EngineConfig::default(),
            event_sender: None,
        }
    }

    /// Register `operative` under `name`, replacing any previous one.
    pub fn add_operative(&self, name: &str, operative: impl Operative + 'static) -> &Self {
        self.add_shared_operative(name, Arc::new(operative))
    }

    pub fn add_shared_operative(&self, name: &str, operative: Arc<dyn Operative>) -> &Self {
        self.registry.write().register(name, operative);
        self
    }

    pub fn operative_exists(&self, name: &str) -> bool {
        self.registry.read().exists(name)
    }

    pub fn operative_names(&self) -> Vec<String> {
        self.registry.read().registered_names()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.registry.clone())
    }

    pub fn sequence_runner(&self) -> SequenceRunner {
        SequenceRunner::new(
            self.dispatcher(),
            self.config.error_policy,
            self.events.clone(),
        )
    }

    pub fn group_runner(&self) -> GroupRunner {
        GroupRunner::new(
            self.sequence_runner(),
            self.config.concurrency_limit(),
            self.events.clone(),
        )
    }

    /// Dispatch a single descriptor outside of any sequence.
    pub async fn dispatch(
        &self,
        descriptor: &OpDescriptor,
        previous: Option<&OpResult>,
    ) -> OpResult {
        self.dispatcher().dispatch(descriptor, previous).await
    }

    /// Run one sequence, writing its results to `sink`. The sink is not
    /// ended; the returned future resolving signals the sequence is done.
    pub async fn run_sequence(
        &self,
        ops: &[OpDescriptor],
        sequence_number: usize,
        sink: &dyn ResultSink,
    ) -> SequenceReport {
        self.sequence_runner()
            .run(ops, sequence_number, sink)
            .await
    }

    /// Run all sequences of `group` concurrently and end `sink` once they
    /// are all done.
    pub async fn run_sequence_group(
        &self,
        group: SequenceGroup,
        sink: Arc<dyn ResultSink>,
    ) -> GroupReport {
        self.group_runner().run(group, sink).await
    }
}

impl Default for Shunt {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`Shunt`].
pub struct ShuntBuilder {
    registry: OperativeRegistry,
    config: EngineConfig,
    event_sender: Option<EventSender>,
}

impl ShuntBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Receive [`ShuntEvent`](crate::core::event_bus::ShuntEvent)s from every run.
    pub fn event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    pub fn operative(mut self, name: &str, operative: impl Operative + 'static) -> Self {
        self.registry.register(name, Arc::new(operative));
        self
    }

    pub fn build(self) -> Shunt {
        Shunt {
            registry: Arc::new(RwLock::new(self.registry)),
            config: self.config,
            events: EventEmitter::new(self.event_sender),
        }
    }
}
