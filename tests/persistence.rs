use std::sync::Arc;

use guardian::{
    models::{ControlCommand, EventLogEntry, UnlockStatus},
    persistence::{EventLog, FileStateStore, StateKey, StateStore, StatusRepository},
    test_helpers::{AlarmStatusBuilder, create_test_file_store},
};

#[tokio::test]
async fn test_event_log_keeps_newest_fifty() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());
    let log = EventLog::new(store);

    for i in 0..55 {
        log.append(EventLogEntry::now(format!("event {i}"), "test", "normal")).await.unwrap();
    }

    let raw: Vec<EventLogEntry> =
        serde_json::from_slice(&std::fs::read(&paths.event_log).unwrap()).unwrap();
    assert_eq!(raw.len(), 50);
    assert_eq!(raw[0].event, "event 54");
    assert_eq!(raw[49].event, "event 5");
}

#[tokio::test]
async fn test_event_log_is_shared_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = create_test_file_store(dir.path());
    let store: Arc<dyn StateStore> = store;

    // The relay and the dashboard each hold their own log over the same files.
    let relay_log = EventLog::new(store.clone());
    let dashboard_log = EventLog::new(store);
    relay_log.append(EventLogEntry::now("Discord unlock by alice", "unlock", "success")).await.unwrap();
    dashboard_log.append(EventLogEntry::now("Web unlock attempt", "unlock", "failed")).await.unwrap();

    let entries = relay_log.entries().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].event, "Web unlock attempt");
}

#[tokio::test]
async fn test_write_replaces_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());

    store.write(StateKey::ControlCommand, b"test_alarm".to_vec()).await.unwrap();
    store.write(StateKey::ControlCommand, b"reset".to_vec()).await.unwrap();

    assert_eq!(std::fs::read_to_string(&paths.control_command).unwrap(), "reset");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());

    store.write(StateKey::AlertQueue, b"{}".to_vec()).await.unwrap();
    store.delete(StateKey::AlertQueue).await.unwrap();
    store.delete(StateKey::AlertQueue).await.unwrap();

    assert!(!paths.alert_queue.exists());
    assert!(store.read(StateKey::AlertQueue).await.unwrap().is_none());
}

#[tokio::test]
async fn test_controller_written_alarm_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());
    let alarm = AlarmStatusBuilder::new()
        .active(guardian::models::AlertKind::MotionDetected, 0.5)
        .build();
    std::fs::write(&paths.alarm_status, serde_json::to_vec(&alarm).unwrap()).unwrap();

    let statuses = StatusRepository::new(store);

    assert_eq!(statuses.alarm_status().await, alarm);
}

#[tokio::test]
async fn test_missing_and_corrupt_records_default() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());
    std::fs::write(&paths.unlock_status, b"{\"remote_unlocked\": ").unwrap();

    let statuses = StatusRepository::new(store);

    assert_eq!(statuses.unlock_status().await, UnlockStatus::default());
    assert!(!statuses.alarm_status().await.active);
}

#[tokio::test]
async fn test_control_command_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = guardian::config::StateFilesConfig::in_dir(dir.path());
    let statuses = StatusRepository::new(Arc::new(FileStateStore::new(paths.clone())));

    statuses.write_control_command(ControlCommand::MuteAlarm).await.unwrap();

    assert_eq!(std::fs::read_to_string(&paths.control_command).unwrap(), "mute_alarm");
}

#[tokio::test]
async fn test_append_keeps_entries_with_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());
    std::fs::write(
        &paths.event_log,
        br#"[{"time":"2025/01/09 14:25:05","event":"a","status":"success","type":"unlock"},
            {"time":"2025/01/09 14:20:00","event":"b","status":"normal"}]"#,
    )
    .unwrap();

    EventLog::new(store).append(EventLogEntry::now("c", "test", "normal")).await.unwrap();

    let raw: Vec<EventLogEntry> =
        serde_json::from_slice(&std::fs::read(&paths.event_log).unwrap()).unwrap();
    let events: Vec<_> = raw.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(events, ["c", "a", "b"]);
}

#[tokio::test]
async fn test_append_leaves_undecodable_log_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (store, paths) = create_test_file_store(dir.path());
    std::fs::write(&paths.event_log, b"[{\"event\": ").unwrap();

    let result = EventLog::new(store).append(EventLogEntry::now("c", "test", "normal")).await;

    assert!(result.is_err());
    assert_eq!(std::fs::read(&paths.event_log).unwrap(), b"[{\"event\": ");
}
