use super::*;
use serial_test::serial;

#[test]
fn recording_emitter_collects_events() {
    let emitter = RecordingEventEmitter::new();
    emitter.emit(WebhookEvent::new("bead_assigned", "s1", PaneIndex(1), "claude", "assigned"));
    emitter.emit(WebhookEvent::new("agent_busy", "s1", PaneIndex(1), "claude", "working"));
    let events = emitter.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, "bead_assigned");
}

#[test]
fn recording_emitter_clear_is_idempotent() {
    let emitter = RecordingEventEmitter::new();
    emitter.emit(WebhookEvent::new("bead_assigned", "s1", PaneIndex(1), "claude", "assigned"));
    emitter.clear();
    emitter.clear();
    assert!(emitter.events().is_empty());
}

#[test]
fn webhook_event_with_detail_builds_map() {
    let event = WebhookEvent::new("agent_error", "s1", PaneIndex(2), "codex", "boom")
        .with_detail("fail_reason", "compile error");
    assert_eq!(event.details.get("fail_reason").map(String::as_str), Some("compile error"));
}

#[test]
#[serial]
fn default_emitter_swap_is_observable() {
    let emitter = Arc::new(RecordingEventEmitter::new());
    set_default_emitter(emitter.clone());
    default_emitter().emit(WebhookEvent::new("bead_assigned", "s1", PaneIndex(1), "claude", "assigned"));
    assert_eq!(emitter.events().len(), 1);
    // Restore a no-op so later tests in this process aren't affected.
    set_default_emitter(Arc::new(NoOpEventEmitter));
}
