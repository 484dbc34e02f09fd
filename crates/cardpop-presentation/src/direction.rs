#![forbid(unsafe_code)]

//! Source-edge direction policy.
//!
//! Maps the edge a card enters from to the transform and opacity it starts
//! at. A directed entrance starts partially visible and slides in by
//! [`INITIAL_OFFSET`]; an undirected one fades in from invisible without
//! moving.
//!
//! | direction | axis       | offset      | opacity |
//! |-----------|------------|-------------|---------|
//! | `Top`     | vertical   | (0, -16)    | 0.4     |
//! | `Left`    | horizontal | (-16, 0)    | 0.4     |
//! | `Bottom`  | vertical   | (0, +16)    | 0.4     |
//! | `Right`   | horizontal | (+16, 0)    | 0.4     |
//! | none      | -          | (0, 0)      | 0.0     |

use cardpop_core::geometry::{Axis, Translation};

use crate::surface::VisualState;

/// Distance the card travels during a directed entrance or exit.
pub const INITIAL_OFFSET: f64 = 16.0;

/// Starting opacity of a directed entrance.
pub const INITIAL_OPACITY: f64 = 0.4;

/// The edge a card enters from (and leaves toward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceDirection {
    Top,
    Left,
    Bottom,
    Right,
}

impl SourceDirection {
    /// All directions, in edge order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];

    /// Axis the card moves along.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Sign of the starting offset along [`axis`](Self::axis).
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }

    /// Translation of `magnitude` points toward this edge.
    pub fn translation(self, magnitude: f64) -> Translation {
        let offset = self.sign() * magnitude;
        match self.axis() {
            Axis::Horizontal => Translation::new(offset, 0.0),
            Axis::Vertical => Translation::new(0.0, offset),
        }
    }

    /// Parse a direction name (`top`, `left`, `bottom`, `right`), accepting
    /// the `from_` prefix and any case.
    pub fn parse(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let bare = lowered
            .strip_prefix("from_")
            .or_else(|| lowered.strip_prefix("from"))
            .unwrap_or(lowered.as_str());
        match bare {
            "top" => Some(Self::Top),
            "left" => Some(Self::Left),
            "bottom" => Some(Self::Bottom),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Transform the card starts from when presenting (and returns to when
/// dismissing).
pub fn initial_translation(direction: Option<SourceDirection>) -> Translation {
    direction.map_or(Translation::IDENTITY, |d| d.translation(INITIAL_OFFSET))
}

/// Opacity the card starts from when presenting.
pub fn initial_opacity(direction: Option<SourceDirection>) -> f64 {
    if direction.is_some() {
        INITIAL_OPACITY
    } else {
        0.0
    }
}

/// Visual state at the start of a presentation.
pub fn entrance_state(direction: Option<SourceDirection>) -> VisualState {
    VisualState::new(initial_translation(direction), initial_opacity(direction))
}

/// Visual state at the end of a dismissal: back at the entrance offset,
/// fully transparent.
pub fn exit_state(direction: Option<SourceDirection>) -> VisualState {
    VisualState::new(initial_translation(direction), 0.0)
}
