//! JSON configuration loading.
//!
//! Run with: cargo test -p cardpop-presentation --features serde

#![cfg(feature = "serde")]

use std::time::Duration;

use cardpop_core::geometry::Insets;
use cardpop_presentation::{PopoverConfig, SourceDirection};

#[test]
fn partial_json_fills_defaults() {
    let config: PopoverConfig =
        serde_json::from_str(r#"{ "source_direction": "left", "dismiss_label": "Close" }"#)
            .expect("valid config");
    assert_eq!(config.source_direction, Some(SourceDirection::Left));
    assert_eq!(config.effective_dismiss_label(), Some("Close"));
    assert_eq!(config.transition_duration, Duration::from_millis(380));
    assert_eq!(config.content_insets, Insets::new(14.0, 44.0));
    assert!(config.prefers_blurred_background);
}

#[test]
fn durations_are_seconds() {
    let config: PopoverConfig = serde_json::from_str(
        r#"{ "transition_duration": 0.25, "frame_update_duration": 1.5 }"#,
    )
    .expect("valid config");
    assert_eq!(config.transition_duration, Duration::from_millis(250));
    assert_eq!(config.frame_update_duration, Duration::from_millis(1500));

    let json = serde_json::to_value(&config).expect("serializable");
    assert_eq!(json["transition_duration"], 0.25);
}

#[test]
fn negative_duration_rejected() {
    let err = serde_json::from_str::<PopoverConfig>(r#"{ "transition_duration": -1.0 }"#);
    assert!(err.is_err());
}

#[test]
fn zero_duration_parses_but_fails_validation() {
    let config: PopoverConfig =
        serde_json::from_str(r#"{ "transition_duration": 0.0 }"#).expect("parses");
    assert!(config.validate().is_err());
}

#[test]
fn null_direction_means_fade() {
    let config: PopoverConfig =
        serde_json::from_str(r#"{ "source_direction": null }"#).expect("valid config");
    assert_eq!(config.source_direction, None);
}
