//! Trait abstraction for form fields to enable mocking in tests

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};
use serde_json::Value;

/// A single named field owned by a form.
///
/// Required methods cover the data contract: name, current value, validity.
/// Everything else has a no-op default, so a field only opts into the
/// capabilities it supports: value application, drawing, and the form's
/// reset/clear/before-submit fan-outs silently skip fields that keep the
/// defaults.
#[cfg_attr(test, mockall::automock)]
pub trait FieldView {
    /// Field name, used as the key (or nested path) in aggregated data
    fn name(&self) -> &str;

    /// Current value as JSON
    fn value(&self) -> Value;

    /// Whether the current value passes the field's own validation
    fn is_valid(&self) -> bool;

    /// Replace the current value, e.g. from the form's starting values
    fn set_value(&mut self, value: Value) {
        let _ = value;
    }

    /// Draw the field into the given area
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let _ = (area, buf);
    }

    /// Rows the field wants when the form lays fields out vertically
    fn height(&self) -> u16 {
        3
    }

    /// Handle a key event, returning true if the field consumed it
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let _ = key;
        false
    }

    /// Give or take keyboard focus
    fn set_focused(&mut self, focused: bool) {
        let _ = focused;
    }

    /// Whether the field currently has focus
    fn is_focused(&self) -> bool {
        false
    }

    /// Last-minute normalization before the form aggregates submit data
    fn before_submit(&mut self) {}

    /// Restore the initial value, for fields that track one
    fn reset(&mut self) {}

    /// Drop the value entirely, for fields that support emptiness
    fn clear(&mut self) {}

    /// Release any resources when the field leaves a form
    fn detach(&mut self) {}
}
