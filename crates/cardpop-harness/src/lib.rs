#![forbid(unsafe_code)]

//! Headless host for CardPop.
//!
//! Stands in for a UI toolkit so presentations can run without a screen:
//!
//! - [`host`]: simulated container, content, coordinator and context.
//! - [`stage`]: the orchestrator that calls the hooks in host order.
//! - [`trace`]: JSONL event trace of everything a stage did.
//! - [`scenario`]: scripted replays, including the sample app.

pub mod host;
pub mod scenario;
pub mod stage;
pub mod trace;

pub use host::{ContentFlags, SimContainer, SimContent, SimContext, SimCoordinator};
pub use scenario::{ReplaySummary, example_config, replay_example};
pub use stage::{FRAME, Stage};
pub use trace::{StagePhase, TraceEvent, TraceRecord, TraceRecorder};
