//! Request validation against an explicit per-field schema.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

pub const NOT_BLANK: &str = "This value should not be blank.";
pub const ALREADY_USED: &str = "This value is already used.";
pub const NOT_A_STRING: &str = "This value should be of type string.";
pub const EXTRA_FIELD: &str = "This form should not contain extra fields.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    NotBlank,
    MaxLength(usize),
    /// Checked against the store through a [`UniquenessCheck`].
    Unique,
}

/// One accepted body field. All fields are strings; absent means null.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

impl FieldRule {
    fn has(&self, constraint: Constraint) -> bool {
        self.constraints.contains(&constraint)
    }
}

/// Failing fields mapped to their messages, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Looks up which record, if any, already holds a value for a unique field.
#[async_trait]
pub trait UniquenessCheck: Send + Sync {
    async fn holder_of(&self, field: &str, value: &str) -> Result<Option<i64>, AppError>;
}

/// Bound field values after trimming. Blank strings bind as `None`.
#[derive(Debug, Default)]
pub struct Submission(HashMap<&'static str, Option<String>>);

impl Submission {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|v| v.as_deref())
    }

    pub fn take(&mut self, field: &str) -> Option<String> {
        self.0.remove(field).flatten()
    }
}

pub struct Validator;

impl Validator {
    /// Bind body fields against rules and run the stateless constraints.
    /// Fields not named by any rule are reported as extra fields.
    pub fn bind(body: &Map<String, Value>, rules: &[FieldRule]) -> (Submission, FieldErrors) {
        let mut errors = FieldErrors::new();
        for key in body.keys() {
            if !rules.iter().any(|r| r.field == key) {
                errors.add(key, EXTRA_FIELD);
            }
        }

        let mut values = HashMap::new();
        for rule in rules {
            let value = match body.get(rule.field) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
                Some(_) => {
                    errors.add(rule.field, NOT_A_STRING);
                    values.insert(rule.field, None);
                    continue;
                }
            };
            for constraint in rule.constraints {
                match (constraint, value.as_deref()) {
                    (Constraint::NotBlank, None) => errors.add(rule.field, NOT_BLANK),
                    (Constraint::MaxLength(max), Some(s)) if s.chars().count() > *max => errors.add(
                        rule.field,
                        format!(
                            "This value is too long. It should have {} characters or less.",
                            max
                        ),
                    ),
                    _ => {}
                }
            }
            values.insert(rule.field, value);
        }
        (Submission(values), errors)
    }

    /// Bind, then check unique fields that passed every other constraint.
    /// `current_id` is the record being replaced, which may keep its own values.
    pub async fn submit(
        body: &Map<String, Value>,
        rules: &[FieldRule],
        current_id: Option<i64>,
        unique: &dyn UniquenessCheck,
    ) -> Result<Submission, AppError> {
        let (submission, mut errors) = Self::bind(body, rules);
        for rule in rules.iter().filter(|r| r.has(Constraint::Unique)) {
            if errors.has(rule.field) {
                continue;
            }
            let Some(value) = submission.get(rule.field) else {
                continue;
            };
            if let Some(holder) = unique.holder_of(rule.field, value).await? {
                if Some(holder) != current_id {
                    errors.add(rule.field, ALREADY_USED);
                }
            }
        }
        if errors.is_empty() {
            Ok(submission)
        } else {
            tracing::debug!(?errors, "submission rejected");
            Err(AppError::Validation(errors))
        }
    }
}
