//! Contact message records and the schema incoming payloads are checked against

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::validation::ValidationErrors;

pub const CREATED_MESSAGE: &str = "Contact message received successfully!";

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

/// A stored contact message. Never mutated after the store hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A payload that passed the schema; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewContactMessage {
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub name: String,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: String,

    #[validate(length(max = 5000, message = "Ensure this field has no more than 5000 characters."))]
    pub message: String,
}

/// Response envelope for a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageCreated {
    pub message: String,
    pub data: ContactMessage,
}

impl ContactMessageCreated {
    pub fn new(data: ContactMessage) -> Self {
        Self {
            message: CREATED_MESSAGE.to_string(),
            data,
        }
    }
}

pub struct ContactMessageSchema;

impl ContactMessageSchema {
    pub const FIELDS: [&'static str; 3] = ["name", "email", "message"];

    /// Checks a decoded request body. Unknown keys are ignored.
    pub fn validate_value(body: &Value) -> Result<NewContactMessage, ValidationErrors> {
        match body {
            Value::Object(fields) => Self::validate(fields),
            other => Err(ValidationErrors::single(
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(other)
                ),
            )),
        }
    }

    pub fn validate(fields: &Map<String, Value>) -> Result<NewContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = read_text(fields, "name", &mut errors);
        let email = read_text(fields, "email", &mut errors);
        let message = read_text(fields, "message", &mut errors);

        let candidate = NewContactMessage {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
        };

        if let Err(reported) = candidate.validate() {
            errors.merge_validator_errors(reported);
        }

        errors.into_result().map(|_| candidate)
    }
}

fn read_text(fields: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    let text = match fields.get(field) {
        None => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NOT_NULL);
            return None;
        }
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            return None;
        }
    };

    if text.is_empty() {
        errors.add(field, NOT_BLANK);
        return None;
    }

    Some(text)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
