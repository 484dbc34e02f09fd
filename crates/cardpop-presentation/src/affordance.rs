#![forbid(unsafe_code)]

//! Button strip under the card.
//!
//! A horizontal row of capsule buttons pinned to the bottom of the safe
//! area, centered horizontally. It holds the optional dismiss button plus
//! any custom buttons the app adds. The strip is never wider than the safe
//! area minus the side insets; wider content scrolls horizontally.
//!
//! While visible, the strip (grown vertically by the bottom spacing) is an
//! obstruction the card frame is fitted around.

use cardpop_core::geometry::{Point, Rect, Size};

use crate::fitter::Obstruction;

/// Height of a capsule button.
pub const BUTTON_HEIGHT: f64 = 44.0;

/// Horizontal padding on each side of a button title.
pub const BUTTON_PADDING: f64 = 20.0;

/// Approximate advance width of one title character.
const GLYPH_WIDTH: f64 = 9.0;

/// Gap between adjacent buttons.
pub const BUTTON_SPACING: f64 = 8.0;

/// Distance between the strip and the bottom of the safe area.
pub const BOTTOM_SPACING: f64 = 24.0;

/// Identifier of an app-supplied button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonId(pub u32);

/// What tapping a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ButtonRole {
    /// Requests dismissal of the presented card.
    Dismiss,
    /// Reported back to the app.
    Custom(ButtonId),
}

/// A capsule button in the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordanceButton {
    title: String,
    size: Size,
    role: ButtonRole,
}

impl AffordanceButton {
    /// A button sized from its title.
    pub fn new(title: impl Into<String>, role: ButtonRole) -> Self {
        let title = title.into();
        let size = estimated_size(&title);
        Self { title, size, role }
    }

    /// The dismiss button.
    pub fn dismiss(title: impl Into<String>) -> Self {
        Self::new(title, ButtonRole::Dismiss)
    }

    /// An app button reported back as [`ButtonRole::Custom`].
    pub fn custom(id: ButtonId, title: impl Into<String>) -> Self {
        Self::new(title, ButtonRole::Custom(id))
    }

    /// Override the estimated size with one measured by the host.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Size::new(size.width.max(0.0), size.height.max(0.0));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn role(&self) -> ButtonRole {
        self.role
    }
}

fn estimated_size(title: &str) -> Size {
    let glyphs = title.chars().count() as f64;
    let width = (glyphs * GLYPH_WIDTH + BUTTON_PADDING * 2.0).max(BUTTON_HEIGHT);
    Size::new(width, BUTTON_HEIGHT)
}

/// The button strip.
#[derive(Debug, Clone)]
pub struct DismissAffordance {
    buttons: Vec<AffordanceButton>,
    frame: Rect,
    alpha: f64,
    scroll_offset: f64,
}

impl Default for DismissAffordance {
    fn default() -> Self {
        Self::new()
    }
}

impl DismissAffordance {
    /// An empty, hidden strip.
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            frame: Rect::ZERO,
            alpha: 1.0,
            scroll_offset: 0.0,
        }
    }

    /// Set the dismiss button's title. `None` or an empty title removes it.
    ///
    /// The dismiss button always sits first in the strip.
    pub fn set_dismiss_label(&mut self, label: Option<&str>) {
        self.buttons.retain(|b| b.role != ButtonRole::Dismiss);
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            self.buttons.insert(0, AffordanceButton::dismiss(label));
        }
    }

    /// Title of the dismiss button, if present.
    pub fn dismiss_label(&self) -> Option<&str> {
        self.buttons
            .iter()
            .find(|b| b.role == ButtonRole::Dismiss)
            .map(AffordanceButton::title)
    }

    /// Append a button. A second dismiss button replaces the first.
    pub fn add_button(&mut self, button: AffordanceButton) {
        if button.role == ButtonRole::Dismiss {
            self.buttons.retain(|b| b.role != ButtonRole::Dismiss);
            self.buttons.insert(0, button);
        } else {
            self.buttons.push(button);
        }
    }

    /// Remove the button with `role`. Returns whether one was removed.
    pub fn remove_button(&mut self, role: ButtonRole) -> bool {
        let before = self.buttons.len();
        self.buttons.retain(|b| b.role != role);
        self.buttons.len() != before
    }

    pub fn buttons(&self) -> &[AffordanceButton] {
        &self.buttons
    }

    /// Hidden when there is nothing to show.
    pub fn is_hidden(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Visible strip frame in container coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Width of all buttons laid end to end.
    pub fn content_width(&self) -> f64 {
        let widths: f64 = self.buttons.iter().map(|b| b.size.width).sum();
        let gaps = self.buttons.len().saturating_sub(1) as f64 * BUTTON_SPACING;
        widths + gaps
    }

    fn content_height(&self) -> f64 {
        self.buttons
            .iter()
            .map(|b| b.size.height)
            .fold(0.0, f64::max)
    }

    /// Pin the strip to the bottom of `safe_area`, centered, at most
    /// `safe_area.width - 2 * side_inset` wide.
    pub fn layout(&mut self, safe_area: Rect, side_inset: f64) {
        if self.is_hidden() {
            self.frame = Rect::ZERO;
            self.scroll_offset = 0.0;
            return;
        }
        let max_width = (safe_area.width - side_inset * 2.0).max(0.0);
        let width = self.content_width().min(max_width);
        let height = self.content_height();
        self.frame = Rect::new(
            safe_area.mid_x() - width / 2.0,
            safe_area.max_y() - BOTTOM_SPACING - height,
            width,
            height,
        );
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Current horizontal scroll position.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// How far the strip can scroll.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_width() - self.frame.width).max(0.0)
    }

    /// Scroll by `dx`, clamped to the content. Returns the new offset.
    pub fn scroll_by(&mut self, dx: f64) -> f64 {
        self.scroll_offset = (self.scroll_offset + dx).clamp(0.0, self.max_scroll_offset());
        self.scroll_offset
    }

    /// Each button's frame in container coordinates, after scrolling.
    ///
    /// Frames of buttons scrolled out of view lie outside [`frame`](Self::frame).
    pub fn button_frames(&self) -> impl Iterator<Item = (ButtonRole, Rect)> + '_ {
        let height = self.frame.height;
        let mut x = self.frame.x - self.scroll_offset;
        self.buttons.iter().map(move |button| {
            let rect = Rect::new(
                x,
                self.frame.y + (height - button.size.height) / 2.0,
                button.size.width,
                button.size.height,
            );
            x += button.size.width + BUTTON_SPACING;
            (button.role, rect)
        })
    }

    /// Button under `point`, if the strip is showing and the point is
    /// inside the visible part of the strip.
    pub fn hit_test(&self, point: Point) -> Option<ButtonRole> {
        if self.is_hidden() || self.alpha <= 0.0 || !self.frame.contains_point(point) {
            return None;
        }
        self.button_frames()
            .find(|(_, rect)| rect.contains_point(point))
            .map(|(role, _)| role)
    }

    /// The region the card must stay clear of, or `None` when hidden.
    pub fn obstruction(&self) -> Option<Obstruction> {
        (!self.is_hidden()).then(|| Obstruction::vertical(self.frame, BOTTOM_SPACING))
    }
}
