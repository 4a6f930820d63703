//! Ordered, name-keyed collection of form fields

use std::fmt;

use crate::field::FieldView;

/// Fields in insertion order with unique names.
///
/// Re-inserting a name displaces the old field and appends the new one at
/// the end, so insertion order always reflects the most recent add.
#[derive(Default)]
pub struct FieldRegistry {
    fields: Vec<Box<dyn FieldView>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, returning the previous holder of the name if any
    pub fn insert(&mut self, field: Box<dyn FieldView>) -> Option<Box<dyn FieldView>> {
        debug_assert!(!field.name().is_empty(), "field name must not be empty");
        let displaced = self
            .fields
            .iter()
            .position(|existing| existing.name() == field.name())
            .map(|pos| self.fields.remove(pos));
        self.fields.push(field);
        displaced
    }

    /// Remove a field by name, returning it if present
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn FieldView>> {
        let pos = self.fields.iter().position(|field| field.name() == name)?;
        Some(self.fields.remove(pos))
    }

    pub fn get(&self, name: &str) -> Option<&dyn FieldView> {
        self.fields
            .iter()
            .find(|field| field.name() == name)
            .map(Box::as_ref)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn FieldView + 'static)> {
        self.fields
            .iter_mut()
            .find(|field| field.name() == name)
            .map(Box::as_mut)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &dyn FieldView> {
        self.fields.iter().map(Box::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn FieldView + 'static)> {
        self.fields.iter_mut().map(Box::as_mut)
    }

    /// Field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name())
    }

    /// Remove and return every field, oldest first
    pub fn drain(&mut self) -> Vec<Box<dyn FieldView>> {
        self.fields.drain(..).collect()
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
