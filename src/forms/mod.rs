//! Forms of the console screens
//!
//! [`FormState`] holds the values of a screen, [`Schema`] validates them on
//! submit, and the detail view-models tie both to the screen's autocomplete
//! fields and its create endpoint.

pub mod entity;
mod schema;
mod state;
pub mod work_order;

pub use entity::EntityDetail;
pub use schema::{Rule, Schema, ValidationErrors};
pub use state::{FieldBinding, FormState};
pub use work_order::WorkOrderDetail;

use crate::autocomplete::AutocompleteField;
use crate::network::ApiError;
use thiserror::Error;

/// Why a form could not be saved
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Puts fields in the loading look until dropped
pub(crate) struct Saving<'a> {
    fields: Vec<&'a AutocompleteField>,
}

impl<'a> Saving<'a> {
    pub(crate) fn start(fields: impl IntoIterator<Item = &'a AutocompleteField>) -> Self {
        let fields: Vec<_> = fields.into_iter().collect();
        for field in &fields {
            field.set_external_loading(true);
        }
        Self { fields }
    }
}

impl Drop for Saving<'_> {
    fn drop(&mut self) {
        for field in &self.fields {
            field.set_external_loading(false);
        }
    }
}

/// Value of `name`, or an empty string
pub(crate) fn take_value(values: &mut std::collections::BTreeMap<String, String>, name: &str) -> String {
    values.remove(name).map(|v| v.trim().to_string()).unwrap_or_default()
}
