//! Single- and multi-line text input field

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use serde_json::Value;

use crate::field::FieldView;

/// Free-text input with optional required/validator checks.
///
/// The value aggregates as a JSON string under the field's name. A field
/// built with `.trim()` trims surrounding whitespace just before submission.
pub struct TextField {
    name: String,
    label: String,
    value: String,
    initial: String,
    multiline: bool,
    required: bool,
    trim_on_submit: bool,
    focused: bool,
    validator: Option<Box<dyn Fn(&str) -> bool>>,
}

impl TextField {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            initial: String::new(),
            multiline: false,
            required: false,
            trim_on_submit: false,
            focused: false,
            validator: None,
        }
    }

    /// Start with a value, which also becomes the reset target
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.initial = self.value.clone();
        self
    }

    /// Accept Enter as a newline and render several rows tall
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Treat an empty value as invalid
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Trim surrounding whitespace before submission
    pub fn trim(mut self) -> Self {
        self.trim_on_submit = true;
        self
    }

    /// Custom validity check run against non-empty values
    pub fn validator(mut self, validator: impl Fn(&str) -> bool + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Append a character to the value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn text(&self) -> &str {
        &self.value
    }
}

impl FieldView for TextField {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn is_valid(&self) -> bool {
        if self.value.is_empty() {
            return !self.required;
        }
        match &self.validator {
            Some(validator) => validator(&self.value),
            None => true,
        }
    }

    fn set_value(&mut self, value: Value) {
        self.value = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let text_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else if !self.is_valid() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let display_value = if self.value.is_empty() && !self.focused {
            "(empty)".to_string()
        } else {
            self.value.clone()
        };

        let cursor = if self.focused { "▌" } else { "" };

        let content = if self.multiline {
            let mut lines: Vec<Line> = display_value
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect();
            if self.focused {
                if let Some(last) = lines.last_mut() {
                    last.spans
                        .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
                } else {
                    lines.push(Line::from(Span::styled(
                        cursor,
                        Style::default().fg(Color::Cyan),
                    )));
                }
            }
            Paragraph::new(lines)
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled(display_value, text_style),
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
            ]))
        };

        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(border_style);

        content.wrap(Wrap { trim: false }).block(block).render(area, buf);
    }

    fn height(&self) -> u16 {
        if self.multiline {
            6
        } else {
            3
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.push_char(c);
                true
            }
            KeyCode::Backspace => {
                self.pop_char();
                true
            }
            KeyCode::Enter if self.multiline => {
                self.push_char('\n');
                true
            }
            _ => false,
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn before_submit(&mut self) {
        if self.trim_on_submit {
            self.value = self.value.trim().to_string();
        }
    }

    fn reset(&mut self) {
        self.value = self.initial.clone();
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("multiline", &self.multiline)
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
