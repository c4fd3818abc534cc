//! Port traits for infrastructure boundaries.
//!
//! Collaborators the registry talks to but does not own. Ports exist for:
//! - Translation (could swap the JSON catalog -> gettext)
//! - Anatomy (the weighted hit model is owned elsewhere in a full game)
//! - Random (for testing)

use anatomy_domain::BodyPartId;

// =============================================================================
// Translation Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait TranslatorPort: Send + Sync {
    /// Translates a plain message.
    fn translate(&self, msgid: &str) -> String;

    /// Picks and translates the singular or plural form for `count`.
    fn translate_plural(&self, singular: &str, plural: &str, count: u64) -> String;

    /// Translates a message within a disambiguating context.
    fn translate_context(&self, context: &str, msgid: &str) -> String;
}

// =============================================================================
// Anatomy Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait AnatomyPort: Send + Sync {
    /// A part chosen at random, weighted by hit size.
    fn random_body_part(&self) -> BodyPartId;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform float in `[0, 1)`.
    fn gen_float(&self) -> f32;
}
