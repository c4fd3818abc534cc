//! Body part entity - One loadable part of a creature's anatomy
//!
//! Records are populated from content definitions. Relationships to other
//! parts (`main_part`, `opposite_part`) are stored as identifiers and resolved
//! through a [`BodyPartLookup`] when needed, so self references and
//! left/right cycles need no ownership between records.

use serde::Serialize;

use crate::ids::{BodyPartId, ContentKind};
use crate::value_objects::{BodyPartToken, ConsistencyIssue, Side};

/// A body part loaded from content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPart {
    pub id: BodyPartId,
    /// Key into the fixed legacy token table (e.g. "ARM_L")
    pub legacy_id: String,
    /// Resolved from `legacy_id` at load time; the sentinel when unmapped
    pub token: BodyPartToken,
    pub name: String,
    pub heading_singular: String,
    pub heading_plural: String,
    pub encumbrance_text: String,
    /// Weight for random hit selection
    pub hit_size: f32,
    /// Part this one rolls up to for aggregate effects (hand -> arm)
    pub main_part: BodyPartId,
    /// Mirrored counterpart; self when unmirrored
    pub opposite_part: BodyPartId,
    pub part_side: Side,
    /// Whether a definition has been applied to this record
    pub was_loaded: bool,
}

impl ContentKind for BodyPart {
    const KIND: &'static str = "body part";
    const NULL_ID: &'static str = "num_bp";
}

/// Read access to the loaded body parts, as needed by consistency checks
pub trait BodyPartLookup {
    /// True iff `id` names a loaded record
    fn is_valid(&self, id: &BodyPartId) -> bool;

    /// The record for `id`, or the null record when `id` is not loaded
    fn obj(&self, id: &BodyPartId) -> &BodyPart;
}

impl BodyPart {
    /// The placeholder returned for lookups that miss
    pub fn null() -> Self {
        Self {
            id: BodyPartId::null(),
            legacy_id: BodyPartToken::NumBp.legacy_id().to_string(),
            token: BodyPartToken::NumBp,
            name: String::new(),
            heading_singular: String::new(),
            heading_plural: String::new(),
            encumbrance_text: String::new(),
            hit_size: 0.0,
            main_part: BodyPartId::null(),
            opposite_part: BodyPartId::null(),
            part_side: Side::Both,
            was_loaded: false,
        }
    }

    /// An unloaded record carrying only its identifier
    pub fn new(id: BodyPartId) -> Self {
        Self {
            id,
            ..Self::null()
        }
    }

    pub fn is_null(&self) -> bool {
        self.id.is_null()
    }

    pub fn with_legacy_id(mut self, legacy_id: &str, token: BodyPartToken) -> Self {
        self.legacy_id = legacy_id.to_string();
        self.token = token;
        self
    }

    pub fn with_main_part(mut self, main_part: impl Into<BodyPartId>) -> Self {
        self.main_part = main_part.into();
        self
    }

    pub fn with_opposite_part(mut self, opposite_part: impl Into<BodyPartId>) -> Self {
        self.opposite_part = opposite_part.into();
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.part_side = side;
        self
    }

    pub fn with_hit_size(mut self, hit_size: f32) -> Self {
        self.hit_size = hit_size;
        self
    }

    /// Validates this record against everything else that was loaded.
    ///
    /// Returns every problem found; nothing here is fatal.
    pub fn check(&self, lookup: &impl BodyPartLookup) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        if self.token.is_sentinel() {
            if !self.is_null() {
                issues.push(ConsistencyIssue::UnmappedToken {
                    id: self.id.clone(),
                    legacy_id: self.legacy_id.clone(),
                });
            }
        } else {
            let under_token = lookup.obj(&self.token.body_part_id());
            if under_token.id != self.id {
                issues.push(ConsistencyIssue::DuplicateToken {
                    id: self.id.clone(),
                    token: self.token,
                    mapped_to: under_token.id.clone(),
                });
            }
        }

        if self.is_null() {
            return issues;
        }

        if self.main_part.is_null() {
            issues.push(ConsistencyIssue::UnsetMainPart {
                id: self.id.clone(),
            });
        } else if !lookup.is_valid(&self.main_part) {
            issues.push(ConsistencyIssue::InvalidMainPart {
                id: self.id.clone(),
                main_part: self.main_part.clone(),
            });
        }

        if self.opposite_part.is_null() {
            issues.push(ConsistencyIssue::UnsetOppositePart {
                id: self.id.clone(),
            });
        } else if !lookup.is_valid(&self.opposite_part) {
            issues.push(ConsistencyIssue::InvalidOppositePart {
                id: self.id.clone(),
                opposite_part: self.opposite_part.clone(),
            });
        }

        issues
    }
}

impl Default for BodyPart {
    fn default() -> Self {
        Self::null()
    }
}
