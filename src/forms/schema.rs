//! Declarative validation rules for forms

use std::collections::BTreeMap;
use std::fmt;

/// A single check applied to a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and not blank
    Required(&'static str),
    /// Value must have at least this many characters
    MinLength(usize, &'static str),
}

impl Rule {
    /// Check `value`, returning the rule's message on failure
    fn check(&self, value: Option<&str>) -> Option<&'static str> {
        let value = value.map(str::trim).unwrap_or("");
        match self {
            Rule::Required(message) if value.is_empty() => Some(*message),
            Rule::MinLength(min, message) if value.chars().count() < *min => Some(*message),
            _ => None,
        }
    }
}

/// Rules of every field of a form
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its rules, checked in order
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }

    /// Names of the fields the schema knows, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Validate `values`, reporting the first failing rule of each field
    pub fn validate(&self, values: &BTreeMap<String, String>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for (name, rules) in &self.fields {
            let value = values.get(*name).map(String::as_str);
            if let Some(message) = rules.iter().find_map(|rule| rule.check(value)) {
                errors.insert(*name, message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub(crate) fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.errors.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
