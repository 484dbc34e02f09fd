#![cfg(feature = "serde")]

//! Settings loaded from disk reach the controller and animators a delegate
//! hands out.

use std::io::Write;
use std::time::Duration;

use cardpop::config::{load_config, load_config_or_default};
use cardpop::prelude::*;
use cardpop::{ChromePhase, DegradationAction, TransitionAnimator};

fn write_config(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write config");
    file
}

#[test]
fn loaded_settings_reach_the_controller() {
    let file = write_config(
        r#"{
            "source_direction": "bottom",
            "transition_duration": 0.25,
            "dismiss_label": "Done",
            "prefers_blurred_background": false,
            "prefers_dimmed_presenting_view": true
        }"#,
    );
    let config = load_config(file.path()).expect("valid config");
    let mut delegate = CardPopoverPresentation::from_config(config).expect("valid config");

    let controller = delegate.presentation_controller();
    assert_eq!(controller.phase(), ChromePhase::Detached);
    assert!(!controller.prefers_blurred_background());
    assert!(controller.prefers_dimmed_presenting_view());
    assert_eq!(controller.affordance().dismiss_label(), Some("Done"));

    let animator: &mut TransitionAnimator = delegate.animator_for_dismissing();
    assert_eq!(animator.transition_duration(), Duration::from_millis(250));
    assert_eq!(delegate.source_direction(), Some(SourceDirection::Bottom));
}

#[test]
fn invalid_file_degrades_to_defaults() {
    let file = write_config(r#"{ "transition_duration": "slow" }"#);
    let (config, err) = load_config_or_default(file.path()).expect("recoverable");
    assert_eq!(config, PopoverConfig::default());

    let err = err.expect("reported");
    assert_eq!(err.error_type(), "load");
    assert_eq!(err.degradation(), DegradationAction::UseDefaults);
}

#[test]
fn zero_duration_file_is_rejected_then_defaulted() {
    let file = write_config(r#"{ "transition_duration": 0 }"#);
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let (config, _) = load_config_or_default(file.path()).expect("recoverable");
    assert!(!config.transition_duration.is_zero());
}
