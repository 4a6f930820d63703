//! Construction options for form views

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Map, Value};

use crate::field::FieldView;
use crate::platform;

/// Called when the form's overall validity changes
pub type ValidCallback = Box<dyn FnMut(bool)>;

/// Called with the aggregated data when a submission goes through
pub type SubmitCallback = Box<dyn FnMut(Value)>;

/// Called with the field name and field after any single-field update
pub type ChangeCallback = Box<dyn FnMut(&str, &dyn FieldView)>;

/// Transforms aggregated data before it is handed out
pub type CleanFn = Box<dyn Fn(Value) -> Value>;

/// Produces fields at construction time, for callers that want to build
/// them late rather than pass a ready list
pub type FieldsFn = Box<dyn FnOnce() -> Vec<Box<dyn FieldView>>>;

/// Key combination that triggers submission while the form is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl SubmitBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether a key event carries this binding's code and modifiers
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers.contains(self.modifiers)
    }
}

impl Default for SubmitBinding {
    fn default() -> Self {
        Self::new(KeyCode::Char('s'), platform::SUBMIT_MODIFIER)
    }
}

/// Everything a form can be configured with at construction time.
///
/// All fields are public so the struct can be built literally, but the
/// chained setters read better when most options keep their defaults.
pub struct FormOptions {
    /// Initial fields, registered in order
    pub fields: Vec<Box<dyn FieldView>>,
    /// Deferred field producer, resolved once at construction and
    /// registered after `fields`
    pub fields_fn: Option<FieldsFn>,
    /// Starting values applied to fields by name on first mount
    pub values: Option<Map<String, Value>>,
    /// Domain object the form edits, carried for the host's benefit
    pub model: Option<Value>,
    pub valid_callback: Option<ValidCallback>,
    pub submit_callback: Option<SubmitCallback>,
    pub change_callback: Option<ChangeCallback>,
    /// Post-aggregation hook applied to every `data()` result
    pub clean: Option<CleanFn>,
    /// Swallow submissions and emit the data ourselves (default true)
    pub prevent_default: bool,
    /// Lay the fields out and draw them in `draw()` (default true)
    pub auto_append: bool,
    /// Mount immediately during construction (default false)
    pub auto_render: bool,
    pub submit_binding: SubmitBinding,
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: impl FieldView + 'static) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    pub fn fields_fn(
        mut self,
        fields: impl FnOnce() -> Vec<Box<dyn FieldView>> + 'static,
    ) -> Self {
        self.fields_fn = Some(Box::new(fields));
        self
    }

    pub fn values(mut self, values: Map<String, Value>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn model(mut self, model: Value) -> Self {
        self.model = Some(model);
        self
    }

    pub fn on_valid(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.valid_callback = Some(Box::new(callback));
        self
    }

    pub fn on_submit(mut self, callback: impl FnMut(Value) + 'static) -> Self {
        self.submit_callback = Some(Box::new(callback));
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&str, &dyn FieldView) + 'static) -> Self {
        self.change_callback = Some(Box::new(callback));
        self
    }

    pub fn clean(mut self, clean: impl Fn(Value) -> Value + 'static) -> Self {
        self.clean = Some(Box::new(clean));
        self
    }

    pub fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    pub fn auto_append(mut self, auto: bool) -> Self {
        self.auto_append = auto;
        self
    }

    pub fn auto_render(mut self, auto: bool) -> Self {
        self.auto_render = auto;
        self
    }

    pub fn submit_binding(mut self, binding: SubmitBinding) -> Self {
        self.submit_binding = binding;
        self
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            fields_fn: None,
            values: None,
            model: None,
            valid_callback: None,
            submit_callback: None,
            change_callback: None,
            clean: None,
            prevent_default: true,
            auto_append: true,
            auto_render: false,
            submit_binding: SubmitBinding::default(),
        }
    }
}

impl fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("fields", &self.fields.len())
            .field("fields_fn", &self.fields_fn.is_some())
            .field("values", &self.values)
            .field("model", &self.model)
            .field("valid_callback", &self.valid_callback.is_some())
            .field("submit_callback", &self.submit_callback.is_some())
            .field("change_callback", &self.change_callback.is_some())
            .field("clean", &self.clean.is_some())
            .field("prevent_default", &self.prevent_default)
            .field("auto_append", &self.auto_append)
            .field("auto_render", &self.auto_render)
            .field("submit_binding", &self.submit_binding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TextField;

    mod defaults {
        use super::*;

        #[test]
        fn test_prevent_default_and_auto_append_on() {
            let options = FormOptions::default();
            assert!(options.prevent_default);
            assert!(options.auto_append);
            assert!(!options.auto_render);
        }

        #[test]
        fn test_no_fields_or_callbacks() {
            let options = FormOptions::default();
            assert!(options.fields.is_empty());
            assert!(options.values.is_none());
            assert!(options.valid_callback.is_none());
            assert!(options.submit_callback.is_none());
        }
    }

    mod builder {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_setters_chain() {
            let options = FormOptions::new()
                .field(TextField::new("email", "Email"))
                .prevent_default(false)
                .auto_append(false)
                .on_submit(|_data| {});

            assert_eq!(options.fields.len(), 1);
            assert!(!options.prevent_default);
            assert!(!options.auto_append);
            assert!(options.submit_callback.is_some());
        }

        #[test]
        fn test_debug_reports_callback_presence() {
            let options = FormOptions::new().on_valid(|_| {});
            let rendered = format!("{options:?}");
            assert!(rendered.contains("valid_callback: true"));
            assert!(rendered.contains("submit_callback: false"));
        }
    }

    mod binding {
        use super::*;

        #[test]
        fn test_matches_exact_combination() {
            let binding = SubmitBinding::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
            let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
            assert!(binding.matches(&key));
        }

        #[test]
        fn test_extra_modifiers_still_match() {
            let binding = SubmitBinding::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
            let key = KeyEvent::new(
                KeyCode::Char('s'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            );
            assert!(binding.matches(&key));
        }

        #[test]
        fn test_wrong_code_does_not_match() {
            let binding = SubmitBinding::default();
            let key = KeyEvent::new(KeyCode::Char('x'), platform::SUBMIT_MODIFIER);
            assert!(!binding.matches(&key));
        }

        #[test]
        fn test_missing_modifier_does_not_match() {
            let binding = SubmitBinding::default();
            let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
            assert!(!binding.matches(&key));
        }
    }
}
