//! Read-only progress display.

use cinder_ui_core::Color;

use crate::event::{UiEvent, UiEventKind};
use crate::widget::tree::WidgetTree;
use crate::widget::WidgetId;

/// State for a progress bar. Purely display; accepts no input.
#[derive(Debug, Clone)]
pub struct ProgressBarState {
    /// Lower bound of the range.
    pub minimum: i32,
    /// Upper bound of the range.
    pub maximum: i32,
    value: i32,
    /// Fill color for the completed portion.
    pub fill_color: Color,
    /// Whether to draw a percentage caption over the bar.
    pub show_text: bool,
}

impl Default for ProgressBarState {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 100,
            value: 0,
            fill_color: Color::from_rgb8(90, 160, 90),
            show_text: true,
        }
    }
}

impl ProgressBarState {
    /// Current value, always within `[minimum, maximum]`.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Set the range, re-clamping the current value into it.
    pub fn set_range(&mut self, minimum: i32, maximum: i32) {
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self.value = self.value.clamp(self.minimum, self.maximum);
    }

    /// Store the nearest in-range value. Returns whether it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped == self.value {
            return false;
        }
        self.value = clamped;
        true
    }

    /// Completed fraction in 0..1.
    pub fn fraction(&self) -> f32 {
        let span = self.maximum - self.minimum;
        if span <= 0 {
            return 0.0;
        }
        (self.value - self.minimum) as f32 / span as f32
    }
}

impl WidgetTree {
    /// Set a progress bar's value, clamped to its range. Emits
    /// [`UiEventKind::ValueChanged`] once when the stored value changes.
    pub fn set_progress_value(&mut self, id: WidgetId, value: i32) {
        let changed = match self.get_mut(id).and_then(|w| match &mut w.kind {
            crate::widget::WidgetKind::ProgressBar(state) => Some(state.set_value(value)),
            _ => None,
        }) {
            Some(changed) => changed,
            None => return,
        };
        if changed {
            let stored = self
                .get(id)
                .and_then(|w| w.as_progress_bar())
                .map(|s| s.value())
                .unwrap_or(value);
            self.push_event(UiEvent::new(id, UiEventKind::ValueChanged(stored)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    #[test]
    fn test_value_clamps_to_range() {
        let mut state = ProgressBarState::default();
        assert!(state.set_value(150));
        assert_eq!(state.value(), 100);
        // Already at the bound: no change reported
        assert!(!state.set_value(200));
        assert!(state.set_value(-5));
        assert_eq!(state.value(), 0);
    }

    #[test]
    fn test_fraction() {
        let mut state = ProgressBarState::default();
        state.set_range(0, 200);
        state.set_value(50);
        assert!((state.fraction() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tree_setter_emits_once() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let bar = tree.spawn(root, Widget::progress_bar());

        tree.set_progress_value(bar, 250);
        let events = tree.take_events();
        assert_eq!(events, vec![UiEvent::new(bar, UiEventKind::ValueChanged(100))]);

        // Same clamped value again: silent
        tree.set_progress_value(bar, 999);
        assert!(tree.take_events().is_empty());
    }
}
