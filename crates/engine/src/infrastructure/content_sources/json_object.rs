//! Field-reading rules for content definitions.

use std::str::FromStr;

use anatomy_domain::DomainError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::LoadError;

const UNKNOWN_ID: &str = "<unknown>";

/// One content definition, with the provenance needed for error reports.
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    fields: &'a Map<String, Value>,
    src: &'a str,
    kind: &'static str,
    id: &'a str,
}

impl<'a> JsonObject<'a> {
    pub fn new(value: &'a Value, src: &'a str) -> Result<Self, LoadError> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                src,
                kind: "record",
                id: UNKNOWN_ID,
            }),
            _ => Err(LoadError::NotAnObject {
                src: src.to_string(),
            }),
        }
    }

    /// Attaches the record kind and id used in subsequent error reports.
    pub fn for_record(self, kind: &'static str, id: &'a str) -> Self {
        Self { kind, id, ..self }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    /// The record kind named by `"type"`, if any.
    pub fn record_type(&self) -> Option<&'a str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// Reads an optional string field. Present but non-string is an error.
    pub fn get_string(&self, key: &str) -> Result<Option<&'a str>, LoadError> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(key, format!("expected a string, found {}", other))),
        }
    }

    /// Reads a mandatory field into `out`.
    ///
    /// When the record was already loaded the field becomes optional and an
    /// absent key leaves `out` untouched. Returns whether a value was read.
    pub fn mandatory<T: DeserializeOwned>(
        &self,
        was_loaded: bool,
        key: &str,
        out: &mut T,
    ) -> Result<bool, LoadError> {
        match self.fields.get(key) {
            Some(value) => {
                *out = <T as Deserialize>::deserialize(value)
                    .map_err(|e| self.invalid(key, e.to_string()))?;
                Ok(true)
            }
            None if was_loaded => Ok(false),
            None => Err(self.missing(key)),
        }
    }

    /// Like [`JsonObject::mandatory`] for string-keyed enums.
    ///
    /// Unrecognized values are hard errors carrying the enum's parse error.
    pub fn mandatory_enum<E>(
        &self,
        was_loaded: bool,
        key: &str,
        out: &mut E,
    ) -> Result<bool, LoadError>
    where
        E: FromStr<Err = DomainError>,
    {
        let mut raw = String::new();
        if !self.mandatory(was_loaded, key, &mut raw)? {
            return Ok(false);
        }
        *out = raw.parse().map_err(|error| LoadError::InvalidEnum {
            kind: self.kind,
            id: self.id.to_string(),
            key: key.to_string(),
            error,
            src: self.src.to_string(),
        })?;
        Ok(true)
    }

    fn missing(&self, key: &str) -> LoadError {
        LoadError::MissingField {
            kind: self.kind,
            id: self.id.to_string(),
            key: key.to_string(),
            src: self.src.to_string(),
        }
    }

    fn invalid(&self, key: &str, reason: String) -> LoadError {
        LoadError::InvalidField {
            kind: self.kind,
            id: self.id.to_string(),
            key: key.to_string(),
            reason,
            src: self.src.to_string(),
        }
    }
}
