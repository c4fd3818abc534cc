//! Generic content factory.
//!
//! Owns every record of one content kind, keyed by [`StringId`]. The factory
//! drives the content lifecycle:
//!
//! 1. `load` - definitions are inserted or merged into existing records
//! 2. `finalize` - run once after every source is loaded; freezes the factory
//! 3. `check` - each record validates itself against the rest
//! 4. `reset` - drops everything for a reload from scratch
//!
//! Lookups never fail: unknown identifiers resolve to a per-factory null record.

use std::collections::HashMap;
use std::fmt::Display;

use anatomy_domain::{ContentKind, IntId, StringId};

use super::content_sources::{JsonObject, LoadError};

/// A record kind that can live in a [`GenericFactory`].
pub trait ContentRecord: ContentKind + Clone + Sized {
    /// Problem type reported by [`ContentRecord::check`].
    type Issue: Display;

    /// The placeholder returned for lookups that miss.
    fn null() -> Self;

    fn id(&self) -> &StringId<Self>;

    fn set_id(&mut self, id: StringId<Self>);

    fn was_loaded(&self) -> bool;

    fn set_was_loaded(&mut self, was_loaded: bool);

    /// Applies a definition. When `was_loaded()` is true every field is
    /// optional and only present fields overwrite.
    fn load(&mut self, jo: &JsonObject<'_>) -> Result<(), LoadError>;

    /// Post-load hook, run once per record by [`GenericFactory::finalize`].
    fn finalize(&mut self) {}

    fn check(&self, factory: &GenericFactory<Self>) -> Vec<Self::Issue>;
}

/// Authoritative store of all records of kind `T`.
#[derive(Debug)]
pub struct GenericFactory<T: ContentRecord> {
    list: Vec<T>,
    map: HashMap<StringId<T>, IntId<T>>,
    abstracts: HashMap<StringId<T>, T>,
    null_obj: T,
    frozen: bool,
}

impl<T: ContentRecord> Default for GenericFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ContentRecord> GenericFactory<T> {
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            map: HashMap::new(),
            abstracts: HashMap::new(),
            null_obj: T::null(),
            frozen: false,
        }
    }

    /// Loads one definition, inserting a new record or merging into an
    /// existing one with the same id.
    ///
    /// The definition is applied to a copy; on error the stored record is
    /// left exactly as it was.
    pub fn load(&mut self, jo: &JsonObject<'_>) -> Result<StringId<T>, LoadError> {
        let src = jo.src();
        let unnamed = jo.for_record(T::KIND, "<unknown>");
        let (name, is_abstract) = match unnamed.get_string("abstract")? {
            Some(name) => (name, true),
            None => match unnamed.get_string("id")? {
                Some(name) => (name, false),
                None => {
                    return Err(LoadError::MissingField {
                        kind: T::KIND,
                        id: "<unknown>".to_string(),
                        key: "id".to_string(),
                        src: src.to_string(),
                    })
                }
            },
        };
        let id = StringId::<T>::new(name);
        let jo = jo.for_record(T::KIND, name);

        if self.frozen {
            return Err(LoadError::Frozen {
                kind: T::KIND,
                id: name.to_string(),
            });
        }
        if id.is_null() {
            return Err(LoadError::ReservedId {
                kind: T::KIND,
                id: name.to_string(),
                src: src.to_string(),
            });
        }

        let mut def = if let Some(base) = jo.get_string("copy-from")? {
            let base_id = StringId::<T>::new(base);
            let Some(template) = self.find_template(&base_id) else {
                return Err(LoadError::UnknownCopyFrom {
                    kind: T::KIND,
                    id: name.to_string(),
                    base: base.to_string(),
                    src: src.to_string(),
                });
            };
            let mut def = template.clone();
            def.set_id(id.clone());
            def.set_was_loaded(true);
            def
        } else if let Some(existing) = self.find_existing(&id, is_abstract) {
            tracing::debug!(
                kind = T::KIND,
                id = %id,
                src,
                "Merging definition into existing record"
            );
            existing.clone()
        } else {
            let mut def = T::null();
            def.set_id(id.clone());
            def.set_was_loaded(false);
            def
        };

        def.load(&jo)?;
        def.set_was_loaded(true);

        if is_abstract {
            self.abstracts.insert(id.clone(), def);
        } else {
            self.insert(def);
        }
        Ok(id)
    }

    /// Stores a finished record, replacing any record with the same id.
    /// Only reachable through `load`, which has already rejected frozen
    /// factories and the null id.
    fn insert(&mut self, record: T) -> IntId<T> {
        if let Some(&int_id) = self.map.get(record.id()) {
            self.list[int_id.as_usize()] = record;
            return int_id;
        }
        let int_id = IntId::from_index(self.list.len() as u32);
        self.map.insert(record.id().clone(), int_id);
        self.list.push(record);
        int_id
    }

    fn find_existing(&self, id: &StringId<T>, is_abstract: bool) -> Option<&T> {
        if is_abstract {
            self.abstracts.get(id)
        } else {
            self.map.get(id).map(|int_id| &self.list[int_id.as_usize()])
        }
    }

    fn find_template(&self, id: &StringId<T>) -> Option<&T> {
        self.map
            .get(id)
            .map(|int_id| &self.list[int_id.as_usize()])
            .or_else(|| self.abstracts.get(id))
    }

    /// True iff `id` names a loaded (non-abstract) record.
    pub fn is_valid(&self, id: &StringId<T>) -> bool {
        self.map.contains_key(id)
    }

    pub fn is_valid_int(&self, id: IntId<T>) -> bool {
        id.as_usize() < self.list.len()
    }

    /// The record for `id`, or the null record.
    pub fn obj(&self, id: &StringId<T>) -> &T {
        match self.map.get(id) {
            Some(int_id) => &self.list[int_id.as_usize()],
            None => {
                if !id.is_null() {
                    tracing::trace!(kind = T::KIND, id = %id, "Lookup of unknown id");
                }
                &self.null_obj
            }
        }
    }

    /// The record for `id`, or the null record.
    pub fn obj_int(&self, id: IntId<T>) -> &T {
        self.list.get(id.as_usize()).unwrap_or(&self.null_obj)
    }

    /// String id to registry handle; `fallback` when `id` is not loaded.
    pub fn convert(&self, id: &StringId<T>, fallback: IntId<T>) -> IntId<T> {
        self.map.get(id).copied().unwrap_or(fallback)
    }

    /// Registry handle to string id; the null id when `id` is out of range.
    pub fn convert_int(&self, id: IntId<T>) -> &StringId<T> {
        self.obj_int(id).id()
    }

    /// The null record of this factory.
    pub fn null_obj(&self) -> &T {
        &self.null_obj
    }

    /// All loaded records, in load order.
    pub fn all(&self) -> &[T] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Runs every record's finalize hook and freezes the factory.
    pub fn finalize(&mut self) {
        for record in &mut self.list {
            record.finalize();
        }
        self.frozen = true;
        tracing::debug!(kind = T::KIND, count = self.list.len(), "Finalized records");
    }

    /// Runs every record's check, logging and returning what was found.
    pub fn check(&self) -> Vec<T::Issue> {
        let issues: Vec<T::Issue> = self
            .list
            .iter()
            .flat_map(|record| record.check(self))
            .collect();
        for issue in &issues {
            tracing::warn!(kind = T::KIND, "{}", issue);
        }
        issues
    }

    /// Drops every record and template and unfreezes the factory.
    pub fn reset(&mut self) {
        self.list.clear();
        self.map.clear();
        self.abstracts.clear();
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        id: StringId<Widget>,
        color: String,
        size: u32,
        partner: StringId<Widget>,
        was_loaded: bool,
    }

    impl ContentKind for Widget {
        const KIND: &'static str = "widget";
        const NULL_ID: &'static str = "null_widget";
    }

    impl ContentRecord for Widget {
        type Issue = String;

        fn null() -> Self {
            Self {
                id: StringId::null(),
                color: String::new(),
                size: 0,
                partner: StringId::null(),
                was_loaded: false,
            }
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
            jo.mandatory(self.was_loaded, "color", &mut self.color)?;
            jo.mandatory(self.was_loaded, "size", &mut self.size)?;
            jo.mandatory(self.was_loaded, "partner", &mut self.partner)?;
            Ok(())
        }

        fn check(&self, factory: &GenericFactory<Self>) -> Vec<String> {
            if factory.is_valid(&self.partner) {
                Vec::new()
            } else {
                vec![format!("widget {} has invalid partner {}", self.id, self.partner)]
            }
        }
    }

    fn load(
        factory: &mut GenericFactory<Widget>,
        value: Value,
    ) -> Result<StringId<Widget>, LoadError> {
        let jo = JsonObject::new(&value, "test")?;
        factory.load(&jo)
    }

    fn gear() -> Value {
        json!({ "id": "gear", "color": "red", "size": 3, "partner": "cog" })
    }

    fn cog() -> Value {
        json!({ "id": "cog", "color": "blue", "size": 1, "partner": "gear" })
    }

    #[test]
    fn load_inserts_new_records() {
        let mut factory = GenericFactory::<Widget>::new();
        let id = load(&mut factory, gear()).unwrap();

        assert!(factory.is_valid(&id));
        assert_eq!(factory.len(), 1);
        let gear = factory.obj(&id);
        assert_eq!(gear.color, "red");
        assert_eq!(gear.size, 3);
        assert!(gear.was_loaded);
    }

    #[test]
    fn reload_overrides_only_present_fields() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        load(&mut factory, json!({ "id": "gear", "size": 7 })).unwrap();

        assert_eq!(factory.len(), 1);
        let gear = factory.obj(&StringId::new("gear"));
        assert_eq!(gear.size, 7);
        assert_eq!(gear.color, "red");
        assert_eq!(gear.partner.as_str(), "cog");
    }

    #[test]
    fn failed_load_keeps_previous_record() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        let before = factory.obj(&StringId::new("gear")).clone();

        let err = load(&mut factory, json!({ "id": "gear", "size": 9, "color": 4 }));
        assert!(matches!(err, Err(LoadError::InvalidField { .. })));
        assert_eq!(factory.obj(&StringId::new("gear")), &before);
    }

    #[test]
    fn incomplete_new_record_is_not_inserted() {
        let mut factory = GenericFactory::<Widget>::new();
        let err = load(&mut factory, json!({ "id": "gear", "color": "red" }));
        assert!(matches!(err, Err(LoadError::MissingField { ref key, .. }) if key == "size"));
        assert!(!factory.is_valid(&StringId::new("gear")));
        assert!(factory.is_empty());
    }

    #[test]
    fn missing_id_is_a_load_error() {
        let mut factory = GenericFactory::<Widget>::new();
        let err = load(&mut factory, json!({ "color": "red" }));
        assert!(matches!(err, Err(LoadError::MissingField { ref key, .. }) if key == "id"));
    }

    #[test]
    fn null_id_is_reserved() {
        let mut factory = GenericFactory::<Widget>::new();
        let err = load(
            &mut factory,
            json!({ "id": "null_widget", "color": "red", "size": 1, "partner": "cog" }),
        );
        assert!(matches!(err, Err(LoadError::ReservedId { .. })));
        assert!(!factory.is_valid(&StringId::null()));
    }

    #[test]
    fn unknown_ids_resolve_to_the_null_record() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();

        let missing = factory.obj(&StringId::new("sprocket"));
        assert!(missing.id.is_null());
        assert_eq!(missing, factory.null_obj());
        assert_eq!(factory.obj(&StringId::null()), factory.null_obj());
    }

    #[test]
    fn int_ids_round_trip() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        load(&mut factory, cog()).unwrap();
        let fallback = IntId::from_index(0);

        for record in factory.all() {
            let int_id = factory.convert(record.id(), fallback);
            assert_eq!(factory.convert_int(int_id), record.id());
            assert_eq!(factory.obj_int(int_id), record);
        }
        assert_eq!(factory.convert(&StringId::new("sprocket"), fallback), fallback);
        assert!(factory.convert_int(IntId::from_index(99)).is_null());
        assert!(!factory.is_valid_int(IntId::from_index(2)));
    }

    #[test]
    fn copy_from_starts_from_the_template() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        load(
            &mut factory,
            json!({ "id": "big_gear", "copy-from": "gear", "size": 30 }),
        )
        .unwrap();

        let big = factory.obj(&StringId::new("big_gear"));
        assert_eq!(big.size, 30);
        assert_eq!(big.color, "red");
        assert_eq!(factory.obj(&StringId::new("gear")).size, 3);
    }

    #[test]
    fn abstracts_are_templates_only() {
        let mut factory = GenericFactory::<Widget>::new();
        load(
            &mut factory,
            json!({ "abstract": "base_widget", "color": "grey", "size": 2, "partner": "cog" }),
        )
        .unwrap();
        assert!(!factory.is_valid(&StringId::new("base_widget")));

        load(&mut factory, json!({ "id": "cog", "copy-from": "base_widget" })).unwrap();
        assert_eq!(factory.obj(&StringId::new("cog")).color, "grey");
    }

    #[test]
    fn unknown_copy_from_is_a_load_error() {
        let mut factory = GenericFactory::<Widget>::new();
        let err = load(&mut factory, json!({ "id": "cog", "copy-from": "nothing" }));
        assert!(matches!(err, Err(LoadError::UnknownCopyFrom { .. })));
    }

    #[test]
    fn finalize_freezes_until_reset() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        factory.finalize();
        assert!(factory.is_frozen());
        assert!(matches!(load(&mut factory, cog()), Err(LoadError::Frozen { .. })));

        factory.reset();
        assert!(!factory.is_frozen());
        assert!(factory.is_empty());
        assert!(!factory.is_valid(&StringId::new("gear")));
        load(&mut factory, cog()).unwrap();
    }

    #[test]
    fn finalized_factory_never_registers_the_null_id() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        factory.finalize();

        let null = json!({ "id": "null_widget", "color": "red", "size": 1, "partner": "gear" });
        assert!(matches!(load(&mut factory, null), Err(LoadError::Frozen { .. })));
        assert!(!factory.is_valid(&StringId::null()));
        assert!(factory.obj(&StringId::null()).id.is_null());
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn check_collects_issues_from_every_record() {
        let mut factory = GenericFactory::<Widget>::new();
        load(&mut factory, gear()).unwrap();
        factory.finalize();
        assert_eq!(factory.check(), vec!["widget gear has invalid partner cog".to_string()]);

        factory.reset();
        load(&mut factory, gear()).unwrap();
        load(&mut factory, cog()).unwrap();
        factory.finalize();
        assert!(factory.check().is_empty());
    }
}
