//! Autocomplete fields for lookup-backed form inputs
//!
//! A field debounces the typed text, queries the lookup behind its source and
//! writes the chosen option's id into the owning form.

mod field;

pub use field::{AutocompleteField, FieldConfig, FieldContext, FieldStatus, FieldView};

#[cfg(test)]
pub(crate) use field::tests::FakeLookup;
