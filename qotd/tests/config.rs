use std::time::Duration;

use pretty_assertions::assert_eq;
use qotd::{ConfigError, DailyPick, DayWindow, PickConfig, WindowOffset, WindowError};
use qotd_memory::QuoteStore;

#[test]
fn test_empty_document_uses_defaults() {
    let config: PickConfig = serde_saphyr::from_str("{}").expect("failed to deserialize");
    assert_eq!(config, PickConfig::default());
    assert_eq!(config.label.as_str(), "qod");
    assert_eq!(config.window().unwrap(), DayWindow::UTC_DAYS);
}

#[test]
fn test_full_config_deserialize() {
    let yaml = r#"
label: motd
day_length: 12h
offset:
  west: 5h
seed: 42
"#;

    let config: PickConfig = serde_saphyr::from_str(yaml).expect("failed to deserialize");
    assert_eq!(config.label.as_str(), "motd");
    assert_eq!(config.day_length, Duration::from_secs(12 * 60 * 60));
    assert_eq!(
        config.offset,
        Some(WindowOffset::West(Duration::from_secs(5 * 60 * 60)))
    );
    assert_eq!(config.seed, Some(42));

    let window = config.window().unwrap();
    assert_eq!(window.length(), Duration::from_secs(12 * 60 * 60));
    assert_eq!(window.offset_millis(), -5 * 60 * 60 * 1000);
}

#[test]
fn test_east_offset() {
    let yaml = r#"
offset:
  east: 2h 30m
"#;
    let config: PickConfig = serde_saphyr::from_str(yaml).expect("failed to deserialize");
    assert_eq!(
        config.window().unwrap().offset_millis(),
        (2 * 60 + 30) * 60 * 1000
    );
}

#[test]
fn test_zero_day_length_is_rejected() {
    let config: PickConfig =
        serde_saphyr::from_str("day_length: 0s").expect("failed to deserialize");
    assert_eq!(
        config.window(),
        Err(ConfigError::Window(WindowError::ZeroLength))
    );

    let error = DailyPick::from_config(QuoteStore::new(), &config).unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid day window: day window length must be at least one millisecond"
    );
}

#[test]
fn test_unparsable_duration_fails() {
    let result: Result<PickConfig, _> = serde_saphyr::from_str("day_length: often");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_seeded_config_is_reproducible() {
    let config = PickConfig {
        seed: Some(7),
        ..PickConfig::default()
    };

    let store = QuoteStore::new();
    for n in 0..25 {
        store.add_quote(format!("quote number {n}")).unwrap();
    }

    let left = DailyPick::from_config(store.clone(), &config).unwrap();
    let right = DailyPick::from_config(store, &config).unwrap();
    let now = chrono::Utc::now();
    assert_eq!(
        left.pick_at(now).await.unwrap(),
        right.pick_at(now).await.unwrap()
    );
    assert_eq!(left.label().as_str(), "qod");
}

#[test]
fn test_config_yaml_round_trip() {
    let config = PickConfig {
        offset: Some(WindowOffset::East(Duration::from_secs(3600))),
        seed: Some(1),
        ..PickConfig::default()
    };
    let yaml = serde_saphyr::to_string(&config).expect("failed to serialize");
    let back: PickConfig = serde_saphyr::from_str(&yaml).expect("failed to deserialize");
    assert_eq!(back, config);
}
