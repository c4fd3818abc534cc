//! Consistency issues found after content loading
//!
//! These are reported, never raised: the registry stays usable with the
//! offending records present.

use serde::Serialize;

use crate::ids::BodyPartId;
use crate::value_objects::BodyPartToken;

/// A single problem found by a consistency pass over loaded body parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyIssue {
    /// Another record answers for this record's token
    DuplicateToken {
        id: BodyPartId,
        token: BodyPartToken,
        mapped_to: BodyPartId,
    },
    /// The record's legacy id did not resolve, so it has no token of its own
    UnmappedToken { id: BodyPartId, legacy_id: String },
    UnsetMainPart { id: BodyPartId },
    UnsetOppositePart { id: BodyPartId },
    InvalidMainPart { id: BodyPartId, main_part: BodyPartId },
    InvalidOppositePart {
        id: BodyPartId,
        opposite_part: BodyPartId,
    },
    /// A legacy token has no loaded record behind it
    MissingMandatoryPart { token: BodyPartToken, id: BodyPartId },
}

impl std::fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateToken {
                id,
                token,
                mapped_to,
            } => write!(
                f,
                "Body part {} has duplicate token {}, mapped to {}",
                id, token, mapped_to
            ),
            Self::UnmappedToken { id, legacy_id } => write!(
                f,
                "Body part {} has unmapped legacy id {}",
                id, legacy_id
            ),
            Self::UnsetMainPart { id } => write!(f, "Body part {} has unset main part", id),
            Self::UnsetOppositePart { id } => {
                write!(f, "Body part {} has unset opposite part", id)
            }
            Self::InvalidMainPart { id, main_part } => {
                write!(f, "Body part {} has invalid main part {}", id, main_part)
            }
            Self::InvalidOppositePart { id, opposite_part } => write!(
                f,
                "Body part {} has invalid opposite part {}",
                id, opposite_part
            ),
            Self::MissingMandatoryPart { id, .. } => {
                write!(f, "Mandatory body part {} was not loaded", id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_records() {
        let issue = ConsistencyIssue::DuplicateToken {
            id: BodyPartId::new("arm_x"),
            token: BodyPartToken::ArmL,
            mapped_to: BodyPartId::new("arm_l"),
        };
        assert_eq!(
            issue.to_string(),
            "Body part arm_x has duplicate token ARM_L, mapped to arm_l"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let issue = ConsistencyIssue::UnsetMainPart {
            id: BodyPartId::new("tail"),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "unset_main_part");
        assert_eq!(json["id"], "tail");
    }
}
