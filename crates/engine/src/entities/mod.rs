//! Entity modules - Domain capability encapsulation.
//!
//! Each module wraps operations for a domain entity type.
//! They depend on infrastructure ports and provide the building blocks for use cases.

pub mod anatomy;
pub mod body_parts;

pub use anatomy::Anatomy;
pub use body_parts::BodyParts;
