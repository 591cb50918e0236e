//! Field Validator: sanitizes submitted string fields and accumulates every
//! failure so a single response can report all of them.

use std::collections::HashSet;

use ammonia::Builder;
use serde_json::{Map, Value};

use crate::errors::AppError;

pub(crate) const BODY_NOT_OBJECT: &str = "request body must be a JSON object";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    Required,
    /// Absent fields are skipped and leave the target unchanged.
    Optional,
}

#[derive(Debug, Default)]
pub(crate) struct FieldValidator {
    errors: Vec<String>,
}

impl FieldValidator {
    /// Validates `field` in `data`.
    ///
    /// Returns the trimmed, sanitized value when present. A missing required
    /// field yields `Some("")` alongside its error so callers always get a
    /// string back; a missing optional field yields `None`.
    pub(crate) fn check(
        &mut self,
        data: &Map<String, Value>,
        field: &str,
        presence: Presence,
    ) -> Option<String> {
        match data.get(field) {
            Some(Value::String(raw)) => {
                let value = sanitize(raw);
                if value.is_empty() {
                    self.errors
                        .push(format!("required '{field}' parameter is blank"));
                }
                Some(value)
            }
            Some(_) => {
                self.errors
                    .push(format!("'{field}' parameter must be a string"));
                Some(String::new())
            }
            None if presence == Presence::Required => {
                self.errors
                    .push(format!("required '{field}' parameter is missing"));
                Some(String::new())
            }
            None => None,
        }
    }

    pub(crate) fn proceed(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `Ok` when every checked field passed, otherwise a 400 carrying all errors.
    pub(crate) fn finish(self) -> Result<(), AppError> {
        if self.proceed() {
            Ok(())
        } else {
            Err(AppError::BadRequest(self.errors))
        }
    }
}

/// Strips markup and trims. Every tag is removed; `script`/`style` lose their
/// content too. Entities are decoded before re-escaping, so cleaning a value
/// that was already cleaned returns it unchanged.
pub(crate) fn sanitize(value: &str) -> String {
    Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(value.trim())
        .to_string()
        .trim()
        .to_string()
}

/// Parses a request body into the field map the validator works on.
pub(crate) fn parse_fields(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::BadRequest(vec![BODY_NOT_OBJECT.to_string()])),
    }
}
