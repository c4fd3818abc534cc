//! Anatomy entity - weighted random hit selection over body parts.

use std::sync::Arc;

use anatomy_domain::{BodyPartId, BodyPartToken};

use crate::entities::body_parts::BodyParts;
use crate::infrastructure::ports::{AnatomyPort, RandomPort};

/// A set of body parts with hit weights snapshotted from their records.
pub struct Anatomy {
    parts: Vec<(BodyPartId, f32)>,
    size_sum: f32,
    random: Arc<dyn RandomPort>,
}

impl Anatomy {
    /// Builds an anatomy from the given part ids. Ids that are not loaded
    /// are reported and left out.
    pub fn new(ids: &[BodyPartId], body_parts: &BodyParts, random: Arc<dyn RandomPort>) -> Self {
        let parts: Vec<(BodyPartId, f32)> = ids
            .iter()
            .filter_map(|id| {
                if !body_parts.is_valid(id) {
                    tracing::warn!(id = %id, "Anatomy references unknown body part");
                    return None;
                }
                Some((id.clone(), body_parts.obj(id).hit_size.max(0.0)))
            })
            .collect();
        let size_sum = parts.iter().map(|(_, size)| size).sum();
        Self {
            parts,
            size_sum,
            random,
        }
    }

    /// The standard humanoid anatomy: every legacy part that is loaded.
    pub fn human(body_parts: &BodyParts, random: Arc<dyn RandomPort>) -> Self {
        let ids: Vec<BodyPartId> = BodyPartToken::mandatory()
            .iter()
            .map(|token| token.body_part_id())
            .filter(|id| body_parts.is_valid(id))
            .collect();
        Self::new(&ids, body_parts, random)
    }

    pub fn parts(&self) -> impl Iterator<Item = &BodyPartId> {
        self.parts.iter().map(|(id, _)| id)
    }

    pub fn size_sum(&self) -> f32 {
        self.size_sum
    }
}

impl AnatomyPort for Anatomy {
    fn random_body_part(&self) -> BodyPartId {
        if self.size_sum <= 0.0 {
            tracing::warn!("Random body part requested from an anatomy with no hit size");
            return BodyPartId::null();
        }
        let mut roll = self.random.gen_float() * self.size_sum;
        for (id, size) in &self.parts {
            if roll < *size {
                return id.clone();
            }
            roll -= size;
        }
        // Float rounding can leave a sliver past the last part
        self.parts
            .iter()
            .rev()
            .find(|(_, size)| *size > 0.0)
            .map(|(id, _)| id.clone())
            .unwrap_or_else(BodyPartId::null)
    }
}
