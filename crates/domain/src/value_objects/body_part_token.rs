//! Legacy body part tokens
//!
//! Before body parts were loaded from content files they were a fixed numeric
//! enumeration. Older saves and code paths still speak in these tokens, so the
//! closed set is kept here together with two fixed tables: legacy key to token
//! (hash-mapped) and token to body part identifier (array-indexed).

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::BodyPartId;

/// Historical numeric body part code.
///
/// `NumBp` is the "count" sentinel and doubles as the invalid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyPartToken {
    Torso = 0,
    Head,
    Eyes,
    Mouth,
    ArmL,
    ArmR,
    HandL,
    HandR,
    LegL,
    LegR,
    FootL,
    FootR,
    NumBp,
}

/// Token, legacy key, body part identifier. Indexed by token value.
const TABLE: [(BodyPartToken, &str, &str); BodyPartToken::COUNT + 1] = [
    (BodyPartToken::Torso, "TORSO", "torso"),
    (BodyPartToken::Head, "HEAD", "head"),
    (BodyPartToken::Eyes, "EYES", "eyes"),
    (BodyPartToken::Mouth, "MOUTH", "mouth"),
    (BodyPartToken::ArmL, "ARM_L", "arm_l"),
    (BodyPartToken::ArmR, "ARM_R", "arm_r"),
    (BodyPartToken::HandL, "HAND_L", "hand_l"),
    (BodyPartToken::HandR, "HAND_R", "hand_r"),
    (BodyPartToken::LegL, "LEG_L", "leg_l"),
    (BodyPartToken::LegR, "LEG_R", "leg_r"),
    (BodyPartToken::FootL, "FOOT_L", "foot_l"),
    (BodyPartToken::FootR, "FOOT_R", "foot_r"),
    (BodyPartToken::NumBp, "NUM_BP", "num_bp"),
];

fn legacy_index() -> &'static HashMap<&'static str, BodyPartToken> {
    static INDEX: OnceLock<HashMap<&'static str, BodyPartToken>> = OnceLock::new();
    INDEX.get_or_init(|| TABLE.iter().map(|(token, key, _)| (*key, *token)).collect())
}

impl BodyPartToken {
    /// Number of real body part tokens, excluding the sentinel.
    pub const COUNT: usize = 12;

    /// Every token including the sentinel, in numeric order.
    pub const ALL: [BodyPartToken; BodyPartToken::COUNT + 1] = [
        BodyPartToken::Torso,
        BodyPartToken::Head,
        BodyPartToken::Eyes,
        BodyPartToken::Mouth,
        BodyPartToken::ArmL,
        BodyPartToken::ArmR,
        BodyPartToken::HandL,
        BodyPartToken::HandR,
        BodyPartToken::LegL,
        BodyPartToken::LegR,
        BodyPartToken::FootL,
        BodyPartToken::FootR,
        BodyPartToken::NumBp,
    ];

    /// Real tokens only. Each of these must be backed by loaded content.
    pub fn mandatory() -> &'static [BodyPartToken] {
        &Self::ALL[..Self::COUNT]
    }

    /// Looks up a token by its uppercase legacy key (e.g. `"ARM_L"`).
    pub fn from_legacy_id(legacy_id: &str) -> Result<Self, DomainError> {
        legacy_index()
            .get(legacy_id)
            .copied()
            .ok_or_else(|| DomainError::unknown_legacy_id(legacy_id))
    }

    /// Looks up a token by its numeric value.
    pub fn from_index(index: i64) -> Result<Self, DomainError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| TABLE.get(i))
            .map(|(token, _, _)| *token)
            .ok_or(DomainError::UnknownToken(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_sentinel(self) -> bool {
        self == BodyPartToken::NumBp
    }

    /// The uppercase legacy key for this token.
    pub fn legacy_id(self) -> &'static str {
        TABLE[self.index()].1
    }

    /// Name of the body part record this token stands for.
    pub fn id_str(self) -> &'static str {
        TABLE[self.index()].2
    }

    /// Identifier of the body part record this token stands for.
    pub fn body_part_id(self) -> BodyPartId {
        BodyPartId::new(self.id_str())
    }
}

impl std::fmt::Display for BodyPartToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.legacy_id())
    }
}

impl std::str::FromStr for BodyPartToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_legacy_id(s)
    }
}
