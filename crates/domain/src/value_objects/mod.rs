//! Value objects - Immutable objects defined by their attributes

mod body_part_token;
mod consistency;
mod side;

pub use body_part_token::BodyPartToken;
pub use consistency::ConsistencyIssue;
pub use side::Side;
