//! Form state shared between a form and its fields

use super::schema::{Schema, ValidationErrors};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FormInner {
    values: BTreeMap<String, String>,
    errors: ValidationErrors,
}

/// Values and validation errors of one form.
///
/// Cloning yields another handle to the same form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    inner: Arc<Mutex<FormInner>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form pre-filled with `values`
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let form = Self::new();
        {
            let mut inner = form.lock();
            for (name, value) in values {
                inner.values.insert(name.into(), value.into());
            }
        }
        form
    }

    /// Current value of a field
    pub fn value(&self, name: &str) -> Option<String> {
        self.lock().values.get(name).cloned()
    }

    /// Set or clear a field, dropping its validation error
    pub fn set_value(&self, name: &str, value: Option<String>) {
        let mut inner = self.lock();
        match value {
            Some(value) => {
                inner.values.insert(name.to_string(), value);
            }
            None => {
                inner.values.remove(name);
            }
        }
        inner.errors.remove(name);
    }

    /// Snapshot of every value
    pub fn values(&self) -> BTreeMap<String, String> {
        self.lock().values.clone()
    }

    /// Validation error of a field, from the last validation
    pub fn error(&self, name: &str) -> Option<String> {
        self.lock().errors.get(name).map(str::to_string)
    }

    /// Validation errors from the last validation
    pub fn errors(&self) -> ValidationErrors {
        self.lock().errors.clone()
    }

    /// Validate against `schema`, keeping the outcome as the form's errors
    pub fn validate(&self, schema: &Schema) -> Result<BTreeMap<String, String>, ValidationErrors> {
        let mut inner = self.lock();
        match schema.validate(&inner.values) {
            Ok(()) => {
                inner.errors = ValidationErrors::default();
                Ok(inner.values.clone())
            }
            Err(errors) => {
                inner.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Remove every value and error
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.values.clear();
        inner.errors = ValidationErrors::default();
    }

    /// Handle through which a single field reads and writes its value
    pub fn binding(&self, name: impl Into<String>) -> FieldBinding {
        FieldBinding {
            name: name.into(),
            form: self.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One field's view of a [`FormState`]
#[derive(Debug, Clone)]
pub struct FieldBinding {
    name: String,
    form: FormState,
}

impl FieldBinding {
    /// Name of the bound field
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value
    pub fn value(&self) -> Option<String> {
        self.form.value(&self.name)
    }

    /// Report a new value to the form
    pub fn on_change(&self, value: Option<String>) {
        self.form.set_value(&self.name, value);
    }

    /// Validation error of the field
    pub fn error(&self) -> Option<String> {
        self.form.error(&self.name)
    }
}
