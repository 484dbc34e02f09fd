#![forbid(unsafe_code)]

//! Scripted scenarios.
//!
//! [`replay_example`] reproduces the sample app: present a table from the
//! left; two seconds in, flip the entrance edge to the right, toggle the
//! backdrop blur and add a button to the strip; then tap the backdrop so
//! the card leaves to the right.

use std::time::Duration;

use cardpop::{
    AffordanceButton, ButtonId, CardPopoverPresentation, ConfigError, ContainerView, Point,
    PopoverConfig, Rect, Size, SourceDirection,
};

use crate::host::{SimContainer, SimContent};
use crate::stage::{FRAME, Stage};
use crate::trace::{StagePhase, TraceRecorder};

/// Delay before the sample app changes its presentation settings.
pub const SETTINGS_CHANGE_DELAY: Duration = Duration::from_secs(2);

/// Upper bound on ticks spent waiting for animations to settle.
const SETTLE_BUDGET: usize = 600;

/// The sample app's configuration.
pub fn example_config() -> PopoverConfig {
    PopoverConfig::default().source_direction(Some(SourceDirection::Left))
}

/// What a replay observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Ticks run in total.
    pub ticks: usize,
    /// Card frame once presented.
    pub presented_frame: Option<Rect>,
    /// Card frame after the strip gained a button.
    pub frame_with_strip: Option<Rect>,
    /// Backdrop blur after the toggle.
    pub blur_after_toggle: f64,
    /// Entrance edge the dismissal used.
    pub dismissed_toward: Option<SourceDirection>,
    /// Stage phase at the end.
    pub final_phase: StagePhase,
    /// Stage time elapsed.
    pub elapsed: Duration,
}

/// Replay the sample app on a fresh stage.
pub fn replay_example(
    config: PopoverConfig,
    trace: TraceRecorder,
) -> Result<(Stage<CardPopoverPresentation>, ReplaySummary), ConfigError> {
    let delegate = CardPopoverPresentation::from_config(config)?;
    let mut stage = Stage::new(delegate, SimContainer::default(), SimContent::new(Size::ZERO))
        .with_trace(trace);
    let mut ticks = 0;

    stage.present();
    ticks += stage.run_for(SETTINGS_CHANGE_DELAY, FRAME);
    let presented_frame = stage.card_frame();

    stage.note("changing presentation settings");
    let flipped = stage
        .delegate()
        .source_direction()
        .map(|_| SourceDirection::Right);
    stage.delegate_mut().set_source_direction(flipped);
    if let Some(controller) = stage.controller_mut() {
        let blurred = controller.prefers_blurred_background();
        controller.set_prefers_blurred_background(!blurred);
        controller.add_button(AffordanceButton::custom(ButtonId(1), "More"));
    }
    ticks += stage.run_until_idle(FRAME, SETTLE_BUDGET);
    let frame_with_strip = stage.card_frame();
    let blur_after_toggle = stage
        .controller()
        .map_or(0.0, |c| c.backdrop().appearance().blur);

    // Backdrop tap just under the top of the safe area, clear of the card.
    let safe = stage.container().safe_area();
    let tap = Point::new(safe.mid_x(), safe.min_y() + 2.0);
    stage.tap(tap);
    let dismissed_toward = stage.delegate().source_direction();
    ticks += stage.run_until_idle(FRAME, SETTLE_BUDGET);

    let summary = ReplaySummary {
        ticks,
        presented_frame,
        frame_with_strip,
        blur_after_toggle,
        dismissed_toward,
        final_phase: stage.phase(),
        elapsed: stage.clock(),
    };
    tracing::info!(
        ticks = summary.ticks,
        final_phase = ?summary.final_phase,
        "example replay finished"
    );
    Ok((stage, summary))
}
