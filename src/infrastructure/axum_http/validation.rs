use serde_json::Value;
use std::fmt;
use thiserror::Error;
use validator::ValidationErrorsKind;

use crate::domain::value_objects::{
    deliveries::{CreateDeliveryRequest, UpdateDeliveryRequest},
    required::{REQUIRED_RULE, RequiredFields},
};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub value: Value,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            // Shortest form: a missing number renders as `0`, not `0.0`.
            Value::Number(number) => match number.as_f64() {
                Some(float) => float.to_string(),
                None => number.to_string(),
            },
            other => other.to_string(),
        };

        write!(
            f,
            "[{}]: '{}' | must satisfy rule '{}'",
            self.field, value, self.rule
        )
    }
}

/// Joins violations into the cause string of a bad-request error.
pub fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidatorError {
    /// The declared rules do not line up with what the rule engine reports.
    #[error("validator misconfigured: {0}")]
    Misconfigured(String),
}

/// Checks request shapes against their declared `required` rules.
///
/// Built once at startup and handed to the handlers.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RequestValidator;

impl RequestValidator {
    /// Fails when any request shape's rules are inconsistent with its
    /// declared field list.
    pub fn new() -> Result<Self, ValidatorError> {
        let validator = Self;
        validator.self_check::<CreateDeliveryRequest>()?;
        validator.self_check::<UpdateDeliveryRequest>()?;
        Ok(validator)
    }

    /// Empty list means valid. Violations follow `T::FIELDS` order.
    pub fn validate<T: RequiredFields>(
        &self,
        request: &T,
    ) -> Result<Vec<FieldViolation>, ValidatorError> {
        let errors = match request.validate() {
            Ok(()) => return Ok(Vec::new()),
            Err(errors) => errors,
        };

        let mut violations = Vec::new();
        for (field, kind) in errors.errors() {
            let field = field.to_string();
            let field_errors = match kind {
                ValidationErrorsKind::Field(field_errors) => field_errors,
                _ => {
                    return Err(ValidatorError::Misconfigured(format!(
                        "unexpected nested errors on field '{field}'"
                    )));
                }
            };

            if !T::FIELDS.contains(&field.as_str()) {
                return Err(ValidatorError::Misconfigured(format!(
                    "field '{field}' is validated but not declared"
                )));
            }

            for error in field_errors {
                violations.push(FieldViolation {
                    field: field.clone(),
                    rule: error.code.to_string(),
                    value: error.params.get("value").cloned().unwrap_or(Value::Null),
                });
            }
        }

        violations.sort_by_key(|violation| {
            T::FIELDS
                .iter()
                .position(|declared| *declared == violation.field)
        });

        Ok(violations)
    }

    fn self_check<T: RequiredFields + Default>(&self) -> Result<(), ValidatorError> {
        let violations = self.validate(&T::default())?;
        let reported: Vec<&str> = violations
            .iter()
            .map(|violation| violation.field.as_str())
            .collect();

        if reported != T::FIELDS {
            return Err(ValidatorError::Misconfigured(format!(
                "{} declares {:?} but rules cover {:?}",
                std::any::type_name::<T>(),
                T::FIELDS,
                reported
            )));
        }

        if let Some(violation) = violations.iter().find(|v| v.rule != REQUIRED_RULE) {
            return Err(ValidatorError::Misconfigured(format!(
                "unsupported rule '{}' on field '{}'",
                violation.rule, violation.field
            )));
        }

        Ok(())
    }
}
