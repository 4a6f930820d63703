//! Form aggregation over a set of field views

use std::fmt;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::FormError;
use crate::field::FieldView;
use crate::options::{
    ChangeCallback, CleanFn, FormOptions, SubmitBinding, SubmitCallback, ValidCallback,
};
use crate::path;
use crate::registry::FieldRegistry;

/// What the host should do with a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form swallowed the attempt, either because it was invalid or
    /// because it intercepted the submission and emitted the data itself
    Suppressed,
    /// The form is valid and interception is off, so the host carries the
    /// submission forward however it sees fit
    Passthrough,
}

/// Aggregates independently rendered field views into one form.
///
/// The form owns its fields, merges their values into a single nested JSON
/// object, tracks aggregate validity, and intercepts submission while
/// mounted. Hosts mutate a field through `get_field_mut` (or `set_value`)
/// and then notify the form with `update`.
pub struct FormView {
    registry: FieldRegistry,
    model: Option<Value>,
    starting_values: Option<Map<String, Value>>,
    valid: Option<bool>,
    mounted: bool,
    prevent_default: bool,
    auto_append: bool,
    submit_binding: SubmitBinding,
    valid_callback: Option<ValidCallback>,
    submit_callback: Option<SubmitCallback>,
    change_callback: Option<ChangeCallback>,
    clean: Option<CleanFn>,
}

impl FormView {
    /// Build a form from options, registering the configured fields in
    /// order. Fails only when `auto_render` mounts immediately and a
    /// starting value names an unknown field.
    pub fn new(options: FormOptions) -> Result<Self, FormError> {
        let FormOptions {
            fields,
            fields_fn,
            values,
            model,
            valid_callback,
            submit_callback,
            change_callback,
            clean,
            prevent_default,
            auto_append,
            auto_render,
            submit_binding,
        } = options;

        let deferred = fields_fn.map(|build| build()).unwrap_or_default();
        let mut registry = FieldRegistry::new();
        for field in fields.into_iter().chain(deferred) {
            if let Some(displaced) = registry.insert(field) {
                tracing::debug!("field {:?} replaced at construction", displaced.name());
            }
        }

        let mut form = Self {
            registry,
            model,
            starting_values: values,
            valid: None,
            mounted: false,
            prevent_default,
            auto_append,
            submit_binding,
            valid_callback,
            submit_callback,
            change_callback,
            clean,
        };

        if auto_render {
            form.mount()?;
        }
        Ok(form)
    }

    /// Register a field, displacing any previous holder of the name.
    ///
    /// The displaced field is returned to the caller undetached. Aggregate
    /// validity is not recomputed; it stays as last evaluated until the
    /// next `update`, `check_valid`, or submission.
    pub fn add_field(&mut self, field: Box<dyn FieldView>) -> Option<Box<dyn FieldView>> {
        let name = field.name().to_string();
        let displaced = self.registry.insert(field);
        if displaced.is_some() {
            tracing::debug!("field {name:?} replaced");
        } else {
            tracing::debug!("field {name:?} added");
        }
        displaced
    }

    /// Look up a field by name
    pub fn get_field(&self, name: &str) -> Option<&dyn FieldView> {
        self.registry.get(name)
    }

    /// Look up a field by name for mutation
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut (dyn FieldView + 'static)> {
        self.registry.get_mut(name)
    }

    /// Look up a field by name, failing if the form does not hold it
    pub fn require_field(&self, name: &str) -> Result<&dyn FieldView, FormError> {
        self.registry
            .get(name)
            .ok_or_else(|| FormError::not_found(name))
    }

    /// Mutable strict lookup
    pub fn require_field_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut (dyn FieldView + 'static), FormError> {
        self.registry
            .get_mut(name)
            .ok_or_else(|| FormError::not_found(name))
    }

    /// Remove a field by name, detaching it first. Missing names are a
    /// silent no-op.
    pub fn remove_field(&mut self, name: &str) -> Option<Box<dyn FieldView>> {
        let mut field = self.registry.remove(name)?;
        field.detach();
        tracing::debug!("field {name:?} removed");
        Some(field)
    }

    /// Remove a field by name, failing if the form does not hold it
    pub fn take_field(&mut self, name: &str) -> Result<Box<dyn FieldView>, FormError> {
        self.remove_field(name)
            .ok_or_else(|| FormError::not_found(name))
    }

    /// Names of the registered fields, in order
    pub fn field_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    /// Aggregate every field's current value into one nested JSON object.
    ///
    /// Recomputed from live field state on every call. A name ending in the
    /// literal suffix `[]` is stored verbatim under that exact key; any
    /// other name is expanded as a dot/bracket path. The `clean` transform
    /// runs on the fresh result each time.
    pub fn data(&self) -> Value {
        let mut data = Map::new();
        for field in self.registry.iter() {
            let name = field.name();
            if name.ends_with("[]") {
                data.insert(name.to_string(), field.value());
            } else {
                path::assign(&mut data, name, field.value());
            }
        }
        let data = Value::Object(data);
        match &self.clean {
            Some(clean) => clean(data),
            None => data,
        }
    }

    /// Aggregate and deserialize into a typed value
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data())
    }

    /// Current value of a single field
    pub fn value(&self, name: &str) -> Result<Value, FormError> {
        Ok(self.require_field(name)?.value())
    }

    /// Set a single field's value and run the update flow for it
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        self.require_field_mut(name)?.set_value(value);
        self.update(name);
        Ok(())
    }

    /// Apply many values by name, in the map's iteration order.
    ///
    /// Strict per entry: stops at the first unknown name, leaving earlier
    /// assignments applied.
    pub fn set_values(&mut self, values: Map<String, Value>) -> Result<(), FormError> {
        for (name, value) in values {
            self.set_value(&name, value)?;
        }
        Ok(())
    }

    /// Last computed aggregate validity; false when not yet evaluated
    pub fn is_valid(&self) -> bool {
        self.valid.unwrap_or(false)
    }

    /// Recompute aggregate validity across every field and store it
    pub fn check_valid(&mut self) -> bool {
        let now_valid = self.registry.iter().all(|field| field.is_valid());
        self.set_valid(now_valid);
        now_valid
    }

    /// React to a single field's change.
    ///
    /// Fires the change callback with the field, then settles validity: an
    /// invalid field decides the aggregate verdict by itself, while a valid
    /// one proves nothing about its siblings, so the full recheck runs.
    pub fn update(&mut self, name: &str) {
        let Some(field) = self.registry.get(name) else {
            tracing::debug!("update for unknown field {name:?} ignored");
            return;
        };
        let field_valid = field.is_valid();
        if let Some(callback) = &mut self.change_callback {
            callback(name, field);
        }
        if field_valid {
            self.check_valid();
        } else {
            self.set_valid(false);
        }
    }

    /// Run every field's pre-submit hook in order
    pub fn before_submit(&mut self) {
        for field in self.registry.iter_mut() {
            field.before_submit();
        }
    }

    /// Run a submission attempt end to end.
    ///
    /// Pre-submit hooks run first, then validity is rechecked across the
    /// whole form regardless of the stored verdict. An invalid form swallows
    /// the attempt without emitting anything.
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        self.before_submit();
        if !self.check_valid() {
            tracing::debug!("submission suppressed, form invalid");
            return SubmitOutcome::Suppressed;
        }
        if self.prevent_default {
            tracing::debug!("submission intercepted");
            let data = self.data();
            if let Some(callback) = &mut self.submit_callback {
                callback(data);
            }
            return SubmitOutcome::Suppressed;
        }
        tracing::debug!("submission passed through");
        SubmitOutcome::Passthrough
    }

    /// Offer a key event to the form's submit binding.
    ///
    /// Returns `None` while unmounted or for any key other than the
    /// binding; otherwise runs the submission and reports the outcome.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SubmitOutcome> {
        if !self.mounted || !self.submit_binding.matches(&key) {
            return None;
        }
        Some(self.handle_submit())
    }

    /// Attach the form: apply starting values once, activate submission
    /// interception, then evaluate validity.
    ///
    /// Mounting an already mounted form is a no-op. The stored verdict is
    /// cleared silently before the evaluation, so the valid callback always
    /// fires with the fresh verdict, even when it is still false.
    pub fn mount(&mut self) -> Result<(), FormError> {
        if self.mounted {
            return Ok(());
        }
        if let Some(values) = self.starting_values.take() {
            self.set_values(values)?;
        }
        self.mounted = true;
        self.valid = None;
        self.check_valid();
        tracing::debug!("form mounted");
        Ok(())
    }

    /// Detach the form: deactivate submission interception first, then
    /// drain the registry, detaching every field.
    pub fn teardown(&mut self) {
        self.mounted = false;
        let fields = self.registry.drain();
        let count = fields.len();
        for mut field in fields {
            field.detach();
        }
        tracing::debug!("form torn down, {count} fields detached");
    }

    /// Lay the fields out vertically by their height hints and draw each
    /// into its slice. Does nothing when `auto_append` is off; the host
    /// then places and draws fields itself.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if !self.auto_append {
            return;
        }
        let constraints: Vec<Constraint> = self
            .registry
            .iter()
            .map(|field| Constraint::Length(field.height()))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let buf = frame.buffer_mut();
        for (field, chunk) in self.registry.iter_mut().zip(chunks.iter()) {
            field.render(*chunk, buf);
        }
    }

    /// Restore every field's initial value
    pub fn reset(&mut self) {
        for field in self.registry.iter_mut() {
            field.reset();
        }
    }

    /// Empty every field that supports clearing
    pub fn clear(&mut self) {
        for field in self.registry.iter_mut() {
            field.clear();
        }
    }

    /// Domain object the form was constructed with, if any
    pub fn model(&self) -> Option<&Value> {
        self.model.as_ref()
    }

    /// Whether submission interception is currently active
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Store a new validity verdict, firing the valid callback on change
    fn set_valid(&mut self, now_valid: bool) {
        let changed = self.valid != Some(now_valid);
        self.valid = Some(now_valid);
        if changed {
            tracing::debug!("form validity now {now_valid}");
            if let Some(callback) = &mut self.valid_callback {
                callback(now_valid);
            }
        }
    }
}

impl fmt::Debug for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormView")
            .field("registry", &self.registry)
            .field("valid", &self.valid)
            .field("mounted", &self.mounted)
            .field("prevent_default", &self.prevent_default)
            .field("auto_append", &self.auto_append)
            .field("submit_binding", &self.submit_binding)
            .finish()
    }
}
