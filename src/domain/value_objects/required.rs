use serde::Serialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const REQUIRED_RULE: &str = "required";

/// A request shape whose fields are checked by the `required` rule.
///
/// `FIELDS` lists the JSON field names in declaration order; violations are
/// reported in this order.
pub trait RequiredFields: Validate {
    const FIELDS: &'static [&'static str];
}

/// Values the `required` rule understands: a zero number or an empty string
/// counts as missing.
pub trait RequiredValue: Serialize {
    fn is_missing(&self) -> bool;
}

impl RequiredValue for str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl RequiredValue for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl RequiredValue for f64 {
    fn is_missing(&self) -> bool {
        *self == 0.0
    }
}

impl<T: RequiredValue + ?Sized> RequiredValue for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

/// Custom `validator` rule behind `#[validate(custom(function = "required"))]`.
/// The offending value is kept under the `value` param.
pub fn required<T: RequiredValue>(value: T) -> Result<(), ValidationError> {
    if !value.is_missing() {
        return Ok(());
    }

    let mut error = ValidationError::new(REQUIRED_RULE);
    error.add_param(Cow::from("value"), &value);
    Err(error)
}
