//! Load content use case.
//!
//! Walks every source in order, loads each `"type": "body_part"` definition,
//! then finalizes the registry and runs the consistency checks. A broken file
//! or record is collected into the report and the rest of the batch carries on.

use anatomy_domain::{BodyPartId, ConsistencyIssue};
use serde_json::Value;

use crate::entities::BodyParts;
use crate::infrastructure::content_sources::{DirectorySource, JsonObject, LoadError};

/// Record kind handled by this loader.
pub const BODY_PART_TYPE: &str = "body_part";

/// Outcome of a full content load.
#[derive(Debug, Default)]
pub struct ContentLoadReport {
    /// Ids loaded, in load order (a record overridden by a mod appears twice).
    pub loaded: Vec<BodyPartId>,
    /// Definitions of other record kinds that were passed over.
    pub skipped: usize,
    pub errors: Vec<LoadError>,
    pub issues: Vec<ConsistencyIssue>,
}

impl ContentLoadReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.issues.is_empty()
    }
}

pub struct LoadContent {
    sources: Vec<DirectorySource>,
}

impl LoadContent {
    pub fn new(sources: Vec<DirectorySource>) -> Self {
        Self { sources }
    }

    pub fn execute(&self, body_parts: &mut BodyParts) -> ContentLoadReport {
        let mut report = ContentLoadReport::default();

        for source in &self.sources {
            tracing::info!(
                source = source.tag(),
                path = %source.root().display(),
                "Loading content source"
            );
            let files = match source.json_files() {
                Ok(files) => files,
                Err(e) => {
                    tracing::error!(
                        source = source.tag(),
                        error = %e,
                        "Failed to list content files"
                    );
                    report.errors.push(e);
                    continue;
                }
            };
            for path in files {
                match source.read(&path) {
                    Ok(value) => load_value(&value, source.tag(), body_parts, &mut report),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read content file");
                        report.errors.push(e);
                    }
                }
            }
        }

        body_parts.finalize_all();
        report.issues = body_parts.check_consistency();

        tracing::info!(
            loaded = report.loaded.len(),
            registered = body_parts.factory().len(),
            skipped = report.skipped,
            errors = report.errors.len(),
            issues = report.issues.len(),
            "Body part content loaded"
        );
        report
    }
}

/// Loads one parsed file: a single definition or an array of them.
pub fn load_value(
    value: &Value,
    src: &str,
    body_parts: &mut BodyParts,
    report: &mut ContentLoadReport,
) {
    match value {
        Value::Array(items) => {
            for item in items {
                load_definition(item, src, body_parts, report);
            }
        }
        other => load_definition(other, src, body_parts, report),
    }
}

fn load_definition(
    value: &Value,
    src: &str,
    body_parts: &mut BodyParts,
    report: &mut ContentLoadReport,
) {
    let jo = match JsonObject::new(value, src) {
        Ok(jo) => jo,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed content definition");
            report.errors.push(e);
            return;
        }
    };
    if jo.record_type() != Some(BODY_PART_TYPE) {
        tracing::debug!(kind = ?jo.record_type(), src, "Skipping definition of another type");
        report.skipped += 1;
        return;
    }
    match body_parts.load_bp(&jo) {
        Ok(id) => report.loaded.push(id),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load body part");
            report.errors.push(e);
        }
    }
}
