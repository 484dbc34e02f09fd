#![forbid(unsafe_code)]

//! Stage event trace.
//!
//! Every stage operation appends a [`TraceEvent`]; the trace serializes to
//! JSONL, one object per line, with the stage clock in milliseconds:
//!
//! ```text
//! {"t_ms":0.0,"event":"present_began","final_frame":{...},"duration_ms":380.0}
//! {"t_ms":16.667,"event":"frame","phase":"presenting",...}
//! ```

use std::io::{self, Write};

use cardpop::presentation::host::ChromeAppearance;
use cardpop::presentation::surface::VisualState;
use cardpop::{Point, PresentationAction, Rect, Size, TransitionOutcome};
use serde::Serialize;

/// Where the stage is in a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePhase {
    /// Nothing presented.
    #[default]
    Idle,
    Presenting,
    Presented,
    Dismissing,
}

/// One recorded stage event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    PresentBegan {
        final_frame: Rect,
        duration_ms: f64,
    },
    DismissBegan {
        /// Visual state the dismissal starts from.
        from: Option<VisualState>,
        duration_ms: f64,
    },
    Cancelled { phase: StagePhase },
    /// One display tick while something animates.
    Frame {
        phase: StagePhase,
        card: Option<Rect>,
        visual: Option<VisualState>,
        chrome: ChromeAppearance,
    },
    TransitionEnded {
        phase: StagePhase,
        outcome: TransitionOutcome,
    },
    Layout { card: Option<Rect> },
    ContentSizeChanged { preferred: Size },
    Tap {
        point: Point,
        action: Option<PresentationAction>,
    },
    Note { message: String },
}

impl TraceEvent {
    /// Short name, matching the `event` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PresentBegan { .. } => "present_began",
            Self::DismissBegan { .. } => "dismiss_began",
            Self::Cancelled { .. } => "cancelled",
            Self::Frame { .. } => "frame",
            Self::TransitionEnded { .. } => "transition_ended",
            Self::Layout { .. } => "layout",
            Self::ContentSizeChanged { .. } => "content_size_changed",
            Self::Tap { .. } => "tap",
            Self::Note { .. } => "note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub t_ms: f64,
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// Append-only list of stage events.
#[derive(Debug, Clone)]
pub struct TraceRecorder {
    records: Vec<TraceRecord>,
    record_frames: bool,
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TraceRecorder {
    /// With `record_frames` off, per-tick [`TraceEvent::Frame`]s are dropped.
    pub fn new(record_frames: bool) -> Self {
        Self {
            records: Vec::new(),
            record_frames,
        }
    }

    pub fn record(&mut self, t_ms: f64, event: TraceEvent) {
        if !self.record_frames && matches!(event, TraceEvent::Frame { .. }) {
            return;
        }
        self.records.push(TraceRecord { t_ms, event });
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Events of one kind, in order.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a TraceRecord> + 'a {
        self.records.iter().filter(move |r| r.event.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record as one JSON line.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> io::Result<()> {
        for record in &self.records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// The whole trace as a JSONL string.
    pub fn to_jsonl(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec only fails if serialization does, and every
        // event serializes.
        if self.write_jsonl(&mut buf).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
