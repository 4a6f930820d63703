//! Boolean checkbox-style field

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use serde_json::Value;

use crate::field::FieldView;

/// On/off field flipped with the space key. Always valid.
#[derive(Debug, Clone)]
pub struct ToggleField {
    name: String,
    label: String,
    value: bool,
    initial: bool,
    focused: bool,
}

impl ToggleField {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: false,
            initial: false,
            focused: false,
        }
    }

    /// Start checked or unchecked, which also becomes the reset target
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = value;
        self.initial = value;
        self
    }

    pub fn toggle(&mut self) {
        self.value = !self.value;
    }

    pub fn is_on(&self) -> bool {
        self.value
    }
}

impl FieldView for ToggleField {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        Value::Bool(self.value)
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn set_value(&mut self, value: Value) {
        match value {
            Value::Bool(b) => self.value = b,
            Value::Null => self.value = false,
            _ => {}
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let marker = if self.value { "[x]" } else { "[ ]" };
        let content = Paragraph::new(Line::from(vec![
            Span::styled(marker, style),
            Span::raw(" "),
            Span::styled(self.label.clone(), style),
        ]));

        let block = Block::default().borders(Borders::ALL).border_style(style);
        content.block(block).render(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char(' ') {
            self.toggle();
            return true;
        }
        false
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn reset(&mut self) {
        self.value = self.initial;
    }

    fn clear(&mut self) {
        self.value = false;
    }
}
