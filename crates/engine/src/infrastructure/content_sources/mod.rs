//! Content source implementations.
//!
//! Content is read from directories of JSON files. Each file holds one object
//! or an array of objects, and each object names its record kind in `"type"`.
//! [`JsonObject`] supplies the field-reading rules shared by every record kind.

pub mod directory;
pub mod json_object;

use std::path::PathBuf;

use anatomy_domain::DomainError;
use thiserror::Error;

pub use directory::DirectorySource;
pub use json_object::JsonObject;

/// Errors raised while loading a single content record or file.
///
/// A load error aborts the record (or file) it concerns, never the batch.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{kind} {id}: missing mandatory field \"{key}\" (from {src})")]
    MissingField {
        kind: &'static str,
        id: String,
        key: String,
        src: String,
    },

    #[error("{kind} {id}: invalid value for \"{key}\": {reason} (from {src})")]
    InvalidField {
        kind: &'static str,
        id: String,
        key: String,
        reason: String,
        src: String,
    },

    #[error("{kind} {id}: invalid value for \"{key}\": {error} (from {src})")]
    InvalidEnum {
        kind: &'static str,
        id: String,
        key: String,
        error: DomainError,
        src: String,
    },

    #[error("expected a JSON object (from {src})")]
    NotAnObject { src: String },

    #[error("{kind} id \"{id}\" is reserved for the null record (from {src})")]
    ReservedId {
        kind: &'static str,
        id: String,
        src: String,
    },

    #[error("{kind} {id}: copy-from target \"{base}\" is not loaded (from {src})")]
    UnknownCopyFrom {
        kind: &'static str,
        id: String,
        base: String,
        src: String,
    },

    #[error("{kind} registry is finalized; reset before loading {id}")]
    Frozen { kind: &'static str, id: String },

    #[error("failed to read {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse {}: {error}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}
