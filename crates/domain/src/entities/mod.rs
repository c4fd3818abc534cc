//! Domain entities - Core business objects with identity

mod body_part;

pub use body_part::{BodyPart, BodyPartLookup};
