// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event contract emitted by the Assignment Store and other components.
//!
//! The emitter is a black-box interface: callers push events into it, it
//! never calls back into the store, avoiding a cyclic dependency between
//! storage and whatever consumes its events.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::id::PaneIndex;

/// A webhook-shaped event describing a state change somewhere in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub kind: String,
    pub session: String,
    pub pane_index: PaneIndex,
    pub agent_type: String,
    pub message: String,
    #[serde(default)]
    pub details: HashMap<String, String>,
}

impl WebhookEvent {
    pub fn new(
        kind: impl Into<String>,
        session: impl Into<String>,
        pane_index: PaneIndex,
        agent_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            session: session.into(),
            pane_index,
            agent_type: agent_type.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Pluggable sink for `WebhookEvent`s. The core exposes a process-wide default
/// (see [`default_emitter`] / [`set_default_emitter`]) but callers are free to
/// construct and pass their own.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: WebhookEvent);
}

/// An emitter that records events in memory, for tests and for the CLI's
/// `--dry-run` surfaces.
#[derive(Default)]
pub struct RecordingEventEmitter {
    events: Mutex<Vec<WebhookEvent>>,
}

impl RecordingEventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WebhookEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventEmitter for RecordingEventEmitter {
    fn emit(&self, event: WebhookEvent) {
        tracing::debug!(kind = %event.kind, session = %event.session, "event emitted");
        self.events.lock().push(event);
    }
}

/// An emitter that discards every event. Used as the fallback default so
/// that constructing a store never requires wiring a real sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventEmitter;

impl EventEmitter for NoOpEventEmitter {
    fn emit(&self, event: WebhookEvent) {
        tracing::trace!(kind = %event.kind, session = %event.session, "event discarded (no-op emitter)");
    }
}

static DEFAULT_EMITTER: Mutex<Option<Arc<dyn EventEmitter>>> = Mutex::new(None);

/// Returns the process-wide default emitter, installing [`NoOpEventEmitter`]
/// on first use.
pub fn default_emitter() -> Arc<dyn EventEmitter> {
    let mut guard = DEFAULT_EMITTER.lock();
    guard
        .get_or_insert_with(|| Arc::new(NoOpEventEmitter) as Arc<dyn EventEmitter>)
        .clone()
}

/// Swaps the process-wide default emitter. Intended for test setup and for
/// the CLI to install a real webhook sink at startup.
pub fn set_default_emitter(emitter: Arc<dyn EventEmitter>) {
    *DEFAULT_EMITTER.lock() = Some(emitter);
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
