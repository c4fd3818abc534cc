//! Body part entity operations.
//!
//! [`BodyParts`] owns the body part registry and is the bridge between the
//! legacy numeric tokens and the string-keyed records. It is an explicit
//! instance: construct it, load content, finalize, check, and pass it to
//! whatever needs body part data.

use anatomy_domain::{
    BodyPart, BodyPartId, BodyPartIntId, BodyPartLookup, BodyPartToken, ConsistencyIssue,
    StringId,
};

use crate::infrastructure::content_sources::{JsonObject, LoadError};
use crate::infrastructure::generic_factory::{ContentRecord, GenericFactory};
use crate::infrastructure::ports::{AnatomyPort, TranslatorPort};

const ACCUSATIVE_CONTEXT: &str = "bodypart_accusative";

/// Resolves a legacy key, reporting unknown keys and falling back to the
/// sentinel token.
pub fn legacy_id_to_token(legacy_id: &str) -> BodyPartToken {
    BodyPartToken::from_legacy_id(legacy_id).unwrap_or_else(|e| {
        tracing::warn!(legacy_id, error = %e, "Invalid body part legacy id");
        BodyPartToken::NumBp
    })
}

/// Resolves a raw numeric token, reporting out-of-range values and falling
/// back to the sentinel token.
pub fn token_from_index(index: i64) -> BodyPartToken {
    BodyPartToken::from_index(index).unwrap_or_else(|e| {
        tracing::warn!(token = index, error = %e, "Invalid body part token");
        BodyPartToken::NumBp
    })
}

impl ContentRecord for BodyPart {
    type Issue = ConsistencyIssue;

    fn null() -> Self {
        BodyPart::null()
    }

    fn id(&self) -> &StringId<Self> {
        &self.id
    }

    fn set_id(&mut self, id: StringId<Self>) {
        self.id = id;
    }

    fn was_loaded(&self) -> bool {
        self.was_loaded
    }

    fn set_was_loaded(&mut self, was_loaded: bool) {
        self.was_loaded = was_loaded;
    }

    fn load(&mut self, jo: &JsonObject<'_>) -> Result<(), LoadError> {
        let was_loaded = self.was_loaded;

        jo.mandatory(was_loaded, "name", &mut self.name)?;
        jo.mandatory(was_loaded, "heading_singular", &mut self.heading_singular)?;
        jo.mandatory(was_loaded, "heading_plural", &mut self.heading_plural)?;
        jo.mandatory(was_loaded, "encumbrance_text", &mut self.encumbrance_text)?;
        jo.mandatory(was_loaded, "hit_size", &mut self.hit_size)?;

        if jo.mandatory(was_loaded, "legacy_id", &mut self.legacy_id)? {
            self.token = legacy_id_to_token(&self.legacy_id);
        }

        jo.mandatory(was_loaded, "main_part", &mut self.main_part)?;
        jo.mandatory(was_loaded, "opposite_part", &mut self.opposite_part)?;
        jo.mandatory_enum(was_loaded, "side", &mut self.part_side)?;

        Ok(())
    }

    fn check(&self, factory: &GenericFactory<Self>) -> Vec<ConsistencyIssue> {
        BodyPart::check(self, factory)
    }
}

impl BodyPartLookup for GenericFactory<BodyPart> {
    fn is_valid(&self, id: &BodyPartId) -> bool {
        GenericFactory::is_valid(self, id)
    }

    fn obj(&self, id: &BodyPartId) -> &BodyPart {
        GenericFactory::obj(self, id)
    }
}

/// Translated display name.
pub fn display_name(part: &BodyPart, translator: &dyn TranslatorPort) -> String {
    translator.translate(&part.name)
}

/// Translated name in the accusative case.
pub fn display_name_accusative(part: &BodyPart, translator: &dyn TranslatorPort) -> String {
    translator.translate_context(ACCUSATIVE_CONTEXT, &part.name)
}

/// Heading form, singular or plural depending on `count`.
pub fn display_heading(part: &BodyPart, count: u64, translator: &dyn TranslatorPort) -> String {
    translator.translate_plural(&part.heading_singular, &part.heading_plural, count)
}

/// Translated encumbrance text; empty text stays empty.
pub fn display_encumbrance(part: &BodyPart, translator: &dyn TranslatorPort) -> String {
    if part.encumbrance_text.is_empty() {
        String::new()
    } else {
        translator.translate(&part.encumbrance_text)
    }
}

/// The body part registry plus the legacy token layer.
#[derive(Debug, Default)]
pub struct BodyParts {
    factory: GenericFactory<BodyPart>,
}

impl BodyParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(&self) -> &GenericFactory<BodyPart> {
        &self.factory
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn load_bp(&mut self, jo: &JsonObject<'_>) -> Result<BodyPartId, LoadError> {
        self.factory.load(jo)
    }

    pub fn reset(&mut self) {
        self.factory.reset();
    }

    pub fn finalize_all(&mut self) {
        self.factory.finalize();
    }

    /// Per-record checks only.
    pub fn check(&self) -> Vec<ConsistencyIssue> {
        self.factory.check()
    }

    /// Verifies every legacy token is backed by a loaded record, then runs
    /// the per-record checks.
    pub fn check_consistency(&self) -> Vec<ConsistencyIssue> {
        let mut issues: Vec<ConsistencyIssue> = BodyPartToken::mandatory()
            .iter()
            .map(|&token| (token, token.body_part_id()))
            .filter(|(_, id)| !self.factory.is_valid(id))
            .map(|(token, id)| ConsistencyIssue::MissingMandatoryPart { token, id })
            .collect();
        for issue in &issues {
            tracing::warn!("{}", issue);
        }
        issues.extend(self.check());
        issues
    }

    // -------------------------------------------------------------------------
    // Identifier lookups
    // -------------------------------------------------------------------------

    pub fn is_valid(&self, id: &BodyPartId) -> bool {
        self.factory.is_valid(id)
    }

    pub fn obj(&self, id: &BodyPartId) -> &BodyPart {
        self.factory.obj(id)
    }

    pub fn obj_int(&self, id: BodyPartIntId) -> &BodyPart {
        self.factory.obj_int(id)
    }

    /// Registry handle for `id`; the first record's handle when `id` is not loaded.
    pub fn int_id(&self, id: &BodyPartId) -> BodyPartIntId {
        self.factory.convert(id, BodyPartIntId::from_index(0))
    }

    pub fn string_id(&self, id: BodyPartIntId) -> &BodyPartId {
        self.factory.convert_int(id)
    }

    // -------------------------------------------------------------------------
    // Legacy token layer
    // -------------------------------------------------------------------------

    /// Identifier the token stands for.
    pub fn convert_bp(&self, token: BodyPartToken) -> BodyPartId {
        token.body_part_id()
    }

    /// Record the token stands for; the null record if it is not loaded.
    pub fn get_bp(&self, token: BodyPartToken) -> &BodyPart {
        self.factory.obj(&token.body_part_id())
    }

    pub fn get_body_part_token(&self, legacy_id: &str) -> BodyPartToken {
        legacy_id_to_token(legacy_id)
    }

    /// Legacy key of the record behind the token.
    pub fn get_body_part_id(&self, token: BodyPartToken) -> &str {
        &self.get_bp(token).legacy_id
    }

    pub fn mutate_to_main_part(&self, token: BodyPartToken) -> BodyPartToken {
        self.obj(&self.get_bp(token).main_part).token
    }

    pub fn opposite_body_part(&self, token: BodyPartToken) -> BodyPartToken {
        self.obj(&self.get_bp(token).opposite_part).token
    }

    /// Picks a part through the anatomy model, optionally rolled up to its
    /// main part.
    pub fn random_body_part(
        &self,
        main_parts_only: bool,
        anatomy: &dyn AnatomyPort,
    ) -> BodyPartToken {
        let part = self.obj(&anatomy.random_body_part());
        if main_parts_only {
            self.obj(&part.main_part).token
        } else {
            part.token
        }
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    pub fn body_part_name(&self, token: BodyPartToken, translator: &dyn TranslatorPort) -> String {
        display_name(self.get_bp(token), translator)
    }

    pub fn body_part_name_accusative(
        &self,
        token: BodyPartToken,
        translator: &dyn TranslatorPort,
    ) -> String {
        display_name_accusative(self.get_bp(token), translator)
    }

    pub fn body_part_name_as_heading(
        &self,
        token: BodyPartToken,
        count: u64,
        translator: &dyn TranslatorPort,
    ) -> String {
        display_heading(self.get_bp(token), count, translator)
    }

    pub fn encumb_text(&self, token: BodyPartToken, translator: &dyn TranslatorPort) -> String {
        display_encumbrance(self.get_bp(token), translator)
    }
}
