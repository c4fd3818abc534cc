//! Use cases - User story orchestration.
//!
//! Use cases coordinate entities to fulfill a user story.

pub mod content;
