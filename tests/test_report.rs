//! End-to-end report generation: a short match driven through the
//! controller, mirrored to the store, then rendered as CSV.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use refwatch::controller::MatchController;
use refwatch::report::MatchReport;
use refwatch::score::{ScoreDelta, Team};
use refwatch::session::{MatchSession, MemoryStore, SessionPatch, SessionStore};

use common::{sample_pre_match, short_settings};

async fn play_full_match(store: &Arc<MemoryStore>) -> uuid::Uuid {
    let session = store
        .create(MatchSession::new(sample_pre_match(), Utc::now()))
        .await
        .unwrap();

    let mut controller = MatchController::new(short_settings())
        .with_teams("Riverside FC", "Harbour Town")
        .with_mirror(Arc::clone(store) as Arc<dyn SessionStore>, session.id);

    let now = Utc::now();
    controller.request_start(now);
    controller.confirm(now).await.unwrap();
    for _ in 0..3 {
        controller.tick(now).await;
    }

    // A goal at 00:04, then a 3-second pause
    for _ in 0..4 {
        controller.tick(now).await;
    }
    controller
        .request_score(Team::Home, ScoreDelta::Increase, now)
        .unwrap();
    controller.confirm(now).await.unwrap();

    controller.request_pause(now);
    controller.confirm(now).await.unwrap();
    let resumed = now + Duration::seconds(3);
    controller.request_start(resumed);
    controller.confirm(resumed).await.unwrap();

    // Run out the first half (6 regulation + 3 stoppage seconds)
    for _ in 0..9 {
        controller.tick(now).await;
    }

    // Second half, one away goal, no pauses
    controller.request_start(now);
    controller.confirm(now).await.unwrap();
    for _ in 0..3 {
        controller.tick(now).await;
    }
    controller
        .request_score(Team::Away, ScoreDelta::Increase, now)
        .unwrap();
    controller.confirm(now).await.unwrap();
    for _ in 0..10 {
        controller.tick(now).await;
    }

    session.id
}

#[tokio::test]
async fn test_mirrored_match_renders_summary() {
    let store = Arc::new(MemoryStore::new());
    let id = play_full_match(&store).await;

    // Referee adds post-match notes before generating the report
    store
        .update(
            id,
            SessionPatch {
                post_match_notes: Some("Floodlight flicker in the 60th minute.".to_string()),
                ..SessionPatch::default()
            },
        )
        .await
        .unwrap();

    let session = store.get(id).await.unwrap();
    let settings = short_settings();
    let report = MatchReport::new(&session, &settings).unwrap();
    let csv = report.summary_csv(Utc::now());

    assert!(csv.contains("Final Score,1-1"));
    assert!(csv.contains("First Half Stoppage,00:03"));
    assert!(csv.contains("Second Half Stoppage,00:00"));
    assert!(csv.contains("Total Stoppage,00:03"));
    // 20 regulation + 3 stoppage seconds
    assert!(csv.contains("Total Match Duration,00:00:23"));
    assert!(csv.contains("Post-Match Notes,Floodlight flicker in the 60th minute."));
}

#[tokio::test]
async fn test_mirrored_match_renders_event_log() {
    let store = Arc::new(MemoryStore::new());
    let id = play_full_match(&store).await;

    let session = store.get(id).await.unwrap();
    let settings = short_settings();
    let report = MatchReport::new(&session, &settings).unwrap();
    let csv = report.event_log_csv();

    assert!(csv.contains("Match,Riverside FC vs Harbour Town"));
    assert!(csv.contains("Event,Match Time,Timestamp,Duration,Notes"));
    for label in [
        "Match Start",
        "Timer Pause",
        "Timer Resume",
        "First Half End",
        "Stoppage Time End",
        "Half-Time",
        "Second Half Start",
        "Second Half End",
        "Match Complete",
    ] {
        assert!(csv.contains(label), "missing event {label}");
    }
    // Both goals are in the merged log with post-commit score pairs
    assert!(csv.contains("Riverside FC (1-0)"));
    assert!(csv.contains("Harbour Town (1-1)"));
}

#[tokio::test]
async fn test_report_refused_before_full_time() {
    let store = Arc::new(MemoryStore::new());
    let session = store
        .create(MatchSession::new(sample_pre_match(), Utc::now()))
        .await
        .unwrap();

    let settings = short_settings();
    let fetched = store.get(session.id).await.unwrap();
    assert!(MatchReport::new(&fetched, &settings).is_err());
}
