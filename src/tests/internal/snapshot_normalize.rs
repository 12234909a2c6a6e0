//! 进度载荷归一化测试：状态串解析、进度钳制、缺省字段。

use crate::progress::{OverallProgress, ProgressStatus};
use crate::raw_json::progress::RawProgressPayload;

#[test]
fn status_parsing_covers_known_values() {
    assert_eq!(ProgressStatus::parse("idle"), ProgressStatus::Idle);
    assert_eq!(ProgressStatus::parse("not_started"), ProgressStatus::Idle);
    assert_eq!(ProgressStatus::parse(""), ProgressStatus::Idle);
    assert_eq!(ProgressStatus::parse("starting"), ProgressStatus::Starting);
    assert_eq!(ProgressStatus::parse("Fetching"), ProgressStatus::Fetching);
    assert_eq!(
        ProgressStatus::parse("DOWNLOADING"),
        ProgressStatus::Downloading
    );
    assert_eq!(ProgressStatus::parse("complete"), ProgressStatus::Complete);
    assert_eq!(
        ProgressStatus::parse("Completed"),
        ProgressStatus::Completed
    );
    assert_eq!(ProgressStatus::parse("error"), ProgressStatus::Error);
}

#[test]
fn unknown_status_survives_as_other() {
    let status = ProgressStatus::parse("re-encoding");
    assert_eq!(status, ProgressStatus::Other("re-encoding".to_string()));
    assert_eq!(status.as_str(), "re-encoding");
    assert!(!status.is_finished());
}

#[test]
fn progress_is_clamped_at_the_boundary() {
    let payload: RawProgressPayload = serde_json::from_str(
        r#"{"overall":{"status":"downloading","progress":133.7}}"#,
    )
    .unwrap();
    assert_eq!(payload.normalize().overall.progress, 100.0);

    let payload: RawProgressPayload = serde_json::from_str(
        r#"{"overall":{"progress":-5},"files":{"a.mp4":{"progress":250}}}"#,
    )
    .unwrap();
    let snapshot = payload.normalize();
    assert_eq!(snapshot.overall.progress, 0.0);
    assert_eq!(snapshot.files["a.mp4"].progress, 100.0);
}

#[test]
fn missing_fields_take_defaults() {
    let payload: RawProgressPayload = serde_json::from_str("{}").unwrap();
    let snapshot = payload.normalize();
    assert_eq!(snapshot.overall.status, ProgressStatus::Idle);
    assert_eq!(snapshot.overall.progress, 0.0);
    assert!(snapshot.overall.total.is_none());
    assert!(snapshot.files.is_empty());
}

#[test]
fn full_payload_normalizes_every_field() {
    let payload: RawProgressPayload = serde_json::from_str(
        r#"{
            "overall": {
                "status": "downloading",
                "progress": 62.5,
                "total": 8,
                "downloaded": 5,
                "message": "5/8 files"
            },
            "files": {
                "x.mp4": {"status": "downloading", "progress": 31},
                "y.jpg": {"status": "complete", "progress": 100}
            }
        }"#,
    )
    .unwrap();
    let snapshot = payload.normalize();
    assert_eq!(snapshot.overall.status, ProgressStatus::Downloading);
    assert_eq!(snapshot.overall.progress, 62.5);
    assert_eq!(snapshot.overall.total, Some(8));
    assert_eq!(snapshot.overall.downloaded, Some(5));
    assert_eq!(snapshot.overall.message.as_deref(), Some("5/8 files"));
    assert_eq!(snapshot.files.len(), 2);
    assert_eq!(snapshot.files["y.jpg"].status, "complete");
}

#[test]
fn terminal_condition_matches_threshold() {
    let mut overall = OverallProgress {
        status: ProgressStatus::Downloading,
        progress: 98.9,
        ..Default::default()
    };
    assert!(!overall.is_terminal());

    overall.progress = 99.0;
    assert!(overall.is_terminal());

    overall.progress = 10.0;
    overall.status = ProgressStatus::Complete;
    assert!(overall.is_terminal());
    overall.status = ProgressStatus::Completed;
    assert!(overall.is_terminal());
}
