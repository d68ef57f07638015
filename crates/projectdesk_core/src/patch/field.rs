//! Tri-state patch slots and typed readers over a JSON patch payload.
//!
//! # Invariants
//! - A key absent from the payload always yields an unset slot.
//! - JSON `null` is only accepted for clearable fields.
//! - Unrecognized keys are never inspected.

use crate::model::enum_codec::{accepted_values, decode, CodecEnum};
use crate::model::error::{DomainError, DomainResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Patch slot for a clearable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    /// Key omitted: leave the entity field unchanged.
    Unset,
    /// Key present as `null`: clear the entity field.
    Null,
    /// Key present with a value: assign it.
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> PatchField<T> {
    /// Whether the key appeared in the payload at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// `None` for unset; otherwise the new field value (`Some(None)` clears).
    pub fn to_update(&self) -> Option<Option<T>>
    where
        T: Clone,
    {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Value(value) => Some(Some(value.clone())),
        }
    }
}

impl<T> From<Option<T>> for PatchField<T> {
    /// `Some(v)` sets, `None` clears.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        }
    }
}

/// Read-only view over a patch payload object.
pub(crate) struct Payload<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Payload<'a> {
    pub(crate) fn from_value(value: &'a Value) -> DomainResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(DomainError::invalid_input(
                "patch payload must be a JSON object",
            )),
        }
    }

    /// Reads a field that may be omitted but never nulled.
    pub(crate) fn required<T>(
        &self,
        key: &'static str,
        parse: fn(&'static str, &Value) -> DomainResult<T>,
    ) -> DomainResult<Option<T>> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(Value::Null) => Err(DomainError::invalid_input(format!(
                "{key} must not be null"
            ))),
            Some(value) => parse(key, value).map(Some),
        }
    }

    /// Reads a field where `null` means "clear".
    pub(crate) fn clearable<T>(
        &self,
        key: &'static str,
        parse: fn(&'static str, &Value) -> DomainResult<T>,
    ) -> DomainResult<PatchField<T>> {
        match self.fields.get(key) {
            None => Ok(PatchField::Unset),
            Some(Value::Null) => Ok(PatchField::Null),
            Some(value) => parse(key, value).map(PatchField::Value),
        }
    }
}

pub(crate) fn parse_string(key: &'static str, value: &Value) -> DomainResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DomainError::invalid_input(format!("{key} must be a string")))
}

/// Strict `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(key: &'static str, value: &Value) -> DomainResult<NaiveDate> {
    let invalid = || {
        DomainError::invalid_input(format!(
            "{key} must be a valid date in ISO format (yyyy-MM-dd)"
        ))
    };
    let raw = value.as_str().ok_or_else(invalid)?;
    if !ISO_DATE_RE.is_match(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

pub(crate) fn parse_enum<E: CodecEnum>(key: &'static str, value: &Value) -> DomainResult<E> {
    let invalid = || {
        DomainError::invalid_input(format!(
            "{key} must be one of {}",
            accepted_values::<E>()
        ))
    };
    let raw = value.as_str().ok_or_else(invalid)?;
    decode::<E>(raw).map_err(|_| invalid())
}

/// Integer identifier given as a JSON integer or a decimal string.
pub(crate) fn parse_id(key: &'static str, value: &Value) -> DomainResult<i64> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| DomainError::invalid_input(format!("{key} must be an integer")))
}
