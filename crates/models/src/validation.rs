use std::collections::BTreeMap;

use serde::Serialize;

/// Ordered `field -> message` map of constraint violations.
///
/// Only the first violation per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0.entry(field.to_string()).or_insert_with(|| message.to_string());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

    pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn is_blank(s: &str) -> bool { s.trim().is_empty() }

pub fn not_blank(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if is_blank(value) {
        errors.add(field, message);
    }
}

pub fn max_chars(errors: &mut FieldErrors, field: &str, value: &str, max: usize, message: &str) {
    if value.chars().count() > max {
        errors.add(field, message);
    }
}
