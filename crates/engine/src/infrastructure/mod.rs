//! Infrastructure layer - external dependency implementations.

pub mod content_sources;
pub mod generic_factory;
pub mod ports;
pub mod random;
pub mod settings;
pub mod translation;
