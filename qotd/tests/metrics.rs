//! Checks that pick slots record the expected metrics and labels.

#![cfg(feature = "metrics")]

mod common;

use chrono::{DateTime, TimeDelta, Utc};
use common::SpySource;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};
use qotd::DailyPick;

type SnapshotEntry = (
    CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
);

fn at(day: i64, hour: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(day) + TimeDelta::hours(hour)
}

fn has_label(key: &CompositeKey, name: &str, value: &str) -> bool {
    key.key()
        .labels()
        .any(|label| label.key() == name && label.value() == value)
}

/// Sum of counter `name` over entries carrying every label in `labels`.
fn counter(entries: &[SnapshotEntry], name: &str, labels: &[(&str, &str)]) -> u64 {
    entries
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| labels.iter().all(|(k, v)| has_label(key, k, v)))
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => *count,
            _ => 0,
        })
        .sum()
}

/// Number of samples recorded into histogram `name` for `slot`.
fn histogram_count(entries: &[SnapshotEntry], name: &str, slot: &str) -> usize {
    entries
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
        .filter(|(key, _, _, _)| has_label(key, "slot", slot))
        .map(|(_, _, _, value)| match value {
            DebugValue::Histogram(samples) => samples.len(),
            _ => 0,
        })
        .sum()
}

/// Runs `body` on a current-thread runtime with a local recorder installed.
fn record<F, Fut>(body: F) -> Vec<SnapshotEntry>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    metrics::with_local_recorder(&recorder, || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(body());
    });
    snapshotter.snapshot().into_vec()
}

#[test]
fn test_hits_and_misses_are_counted_per_slot() {
    let entries = record(|| async {
        let qod = DailyPick::builder(SpySource::new(["a", "b", "c"])).build();
        qod.pick_at(at(1, 0)).await.unwrap();
        qod.pick_at(at(1, 1)).await.unwrap();
        qod.pick_at(at(1, 2)).await.unwrap();
        qod.pick_at(at(2, 0)).await.unwrap();
    });

    let slot = [("slot", "qod")];
    assert_eq!(counter(&entries, "qotd_pick_hit_total", &slot), 2);
    assert_eq!(counter(&entries, "qotd_pick_miss_total", &slot), 2);
    assert_eq!(
        counter(
            &entries,
            "qotd_pick_miss_total",
            &[("slot", "qod"), ("reason", "cold")]
        ),
        1
    );
    assert_eq!(
        counter(
            &entries,
            "qotd_pick_miss_total",
            &[("slot", "qod"), ("reason", "rollover")]
        ),
        1
    );
    assert_eq!(counter(&entries, "qotd_refresh_total", &slot), 2);
    assert_eq!(histogram_count(&entries, "qotd_refresh_candidates", "qod"), 2);
    assert_eq!(
        histogram_count(&entries, "qotd_refresh_duration_seconds", "qod"),
        2
    );
}

#[test]
fn test_removed_pick_is_counted_as_removed() {
    let entries = record(|| async {
        let source = SpySource::new(["a"]);
        let qod = DailyPick::builder(source.clone()).label("motd").build();
        qod.pick_at(at(1, 0)).await.unwrap();
        source.clear();
        source.push("b");
        qod.pick_at(at(1, 1)).await.unwrap();
    });

    assert_eq!(
        counter(
            &entries,
            "qotd_pick_miss_total",
            &[("slot", "motd"), ("reason", "removed")]
        ),
        1
    );
    assert_eq!(counter(&entries, "qotd_pick_hit_total", &[("slot", "motd")]), 0);
}

#[test]
fn test_empty_source_is_counted() {
    let entries = record(|| async {
        let qod = DailyPick::builder(SpySource::<&str>::new([]))
            .label("empty")
            .build();
        assert!(qod.pick_at(at(1, 0)).await.is_err());
        assert!(qod.pick_at(at(1, 1)).await.is_err());
    });

    let slot = [("slot", "empty")];
    assert_eq!(counter(&entries, "qotd_pick_empty_total", &slot), 2);
    assert_eq!(counter(&entries, "qotd_refresh_total", &slot), 0);
}
