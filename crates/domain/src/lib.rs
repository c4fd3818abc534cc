pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{BodyPart, BodyPartLookup};
pub use error::DomainError;
pub use ids::{BodyPartId, BodyPartIntId, ContentKind, IntId, StringId};
pub use value_objects::{BodyPartToken, ConsistencyIssue, Side};
