//! Typed content identifiers.
//!
//! Content records are named by a [`StringId`]: an interned, immutable string
//! tagged with the record kind it refers to. Registries additionally hand out
//! [`IntId`] handles, dense indices that are cheap to copy and compare.
//!
//! Each kind designates one null identifier (see [`ContentKind::NULL_ID`]).
//! The null id never names a loaded record.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A kind of content record addressable by [`StringId`].
pub trait ContentKind: 'static {
    /// Human-readable kind name used in diagnostics (e.g. "body part").
    const KIND: &'static str;
    /// The designated null identifier for this kind.
    const NULL_ID: &'static str;
}

static INTERNED: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

fn intern(name: &str) -> Arc<str> {
    let pool = INTERNED.get_or_init(|| Mutex::new(HashSet::new()));
    // A poisoned pool still holds valid strings
    let mut pool = pool.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(existing) = pool.get(name) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(name);
    pool.insert(Arc::clone(&interned));
    interned
}

/// Interned string identifier for a content record of kind `T`.
pub struct StringId<T: ContentKind> {
    name: Arc<str>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: ContentKind> StringId<T> {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: intern(name.as_ref()),
            _kind: PhantomData,
        }
    }

    /// The null identifier of kind `T`.
    pub fn null() -> Self {
        Self::new(T::NULL_ID)
    }

    pub fn is_null(&self) -> bool {
        &*self.name == T::NULL_ID
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl<T: ContentKind> Clone for StringId<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _kind: PhantomData,
        }
    }
}

impl<T: ContentKind> Default for StringId<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ContentKind> PartialEq for StringId<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name) || self.name == other.name
    }
}

impl<T: ContentKind> Eq for StringId<T> {}

impl<T: ContentKind> PartialOrd for StringId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ContentKind> Ord for StringId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<T: ContentKind> Hash for StringId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T: ContentKind> fmt::Debug for StringId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringId<{}>({:?})", T::KIND, &*self.name)
    }
}

impl<T: ContentKind> fmt::Display for StringId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T: ContentKind> From<&str> for StringId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T: ContentKind> From<String> for StringId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T: ContentKind> Serialize for StringId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de, T: ContentKind> Deserialize<'de> for StringId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(name))
    }
}

/// Dense index handle into a registry of kind `T`.
///
/// Only meaningful for the registry that issued it, and only until that
/// registry is reset.
pub struct IntId<T: ContentKind> {
    index: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T: ContentKind> IntId<T> {
    pub const fn from_index(index: u32) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub fn as_usize(self) -> usize {
        self.index as usize
    }
}

impl<T: ContentKind> Clone for IntId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ContentKind> Copy for IntId<T> {}

impl<T: ContentKind> PartialEq for IntId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: ContentKind> Eq for IntId<T> {}

impl<T: ContentKind> Hash for IntId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: ContentKind> fmt::Debug for IntId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntId<{}>({})", T::KIND, self.index)
    }
}

/// String identifier of a body part record.
pub type BodyPartId = StringId<crate::entities::BodyPart>;

/// Registry handle of a body part record.
pub type BodyPartIntId = IntId<crate::entities::BodyPart>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl ContentKind for Widget {
        const KIND: &'static str = "widget";
        const NULL_ID: &'static str = "null_widget";
    }

    #[test]
    fn equal_names_share_one_allocation() {
        let a = StringId::<Widget>::new("gear");
        let b = StringId::<Widget>::new(String::from("gear"));
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.name, &b.name));
    }

    #[test]
    fn null_id_is_designated_per_kind() {
        let null = StringId::<Widget>::null();
        assert!(null.is_null());
        assert_eq!(null.as_str(), "null_widget");
        assert_eq!(StringId::<Widget>::default(), null);
        assert!(!StringId::<Widget>::new("gear").is_null());
    }

    #[test]
    fn ordering_follows_the_underlying_string() {
        let mut ids = vec![
            StringId::<Widget>::new("c"),
            StringId::<Widget>::new("a"),
            StringId::<Widget>::new("b"),
        ];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(StringId::<Widget>::new("gear"), 1);
        assert_eq!(map.get(&StringId::new("gear")), Some(&1));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = StringId::<Widget>::new("gear");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gear\"");
        let back: StringId<Widget> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn int_ids_compare_by_index() {
        let a = IntId::<Widget>::from_index(3);
        let b = IntId::<Widget>::from_index(3);
        assert_eq!(a, b);
        assert_eq!(a.as_usize(), 3);
        assert_ne!(a, IntId::from_index(4));
    }
}
