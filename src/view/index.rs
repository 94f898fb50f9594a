//! In-memory view index.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ViewData;

/// Relative view path → extracted view data, in insertion order.
///
/// The serialized form is the content of `views.json` and the value
/// compared on hot updates to decide whether artifacts need rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewIndex {
    views: IndexMap<String, ViewData>,
}

impl ViewIndex {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a view. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, data: ViewData) {
        self.views.insert(key.into(), data);
    }

    /// Remove a view, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ViewData> {
        self.views.shift_remove(key)
    }

    /// Remove `key` and every entry below it when `key` names a directory.
    ///
    /// Returns the removed keys in index order.
    pub fn remove_tree(&mut self, key: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.views.retain(|entry, _| {
            let below = entry == key
                || entry
                    .strip_prefix(key.trim_end_matches(['/', '\\']))
                    .is_some_and(|rest| rest.starts_with(['/', '\\']));
            if below {
                removed.push(entry.clone());
            }
            !below
        });
        removed
    }

    /// Apply a scan result: insert when a view was found, remove otherwise.
    pub fn apply(&mut self, key: &str, data: Option<ViewData>) {
        match data {
            Some(data) => self.insert(key, data),
            None => {
                self.remove(key);
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&ViewData> {
        self.views.get(key)
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ViewData)> {
        self.views.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Compact JSON of the whole index.
    pub fn serialize(&self) -> String {
        // String keys and string fields only, serialization cannot fail.
        serde_json::to_string(&self.views).unwrap_or_else(|_| String::from("{}"))
    }

    /// Parse a `views.json` document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ViewIndex {
        let mut index = ViewIndex::new();
        index.insert("/home/index.tsx", ViewData::new("Home").with_meta("{title: 'Home'}"));
        index.insert("/about.tsx", ViewData::new("About"));
        index
    }

    #[test]
    fn test_serialize_in_insertion_order() {
        assert_eq!(
            sample().serialize(),
            r#"{"/home/index.tsx":{"metaValue":"{title: 'Home'}","defaultName":"Home"},"/about.tsx":{"defaultName":"About"}}"#
        );
    }

    #[test]
    fn test_empty_serializes_to_empty_object() {
        assert_eq!(ViewIndex::new().serialize(), "{}");
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut index = sample();
        index.insert("/home/index.tsx", ViewData::new("Start"));
        let keys: Vec<_> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["/home/index.tsx", "/about.tsx"]);
        assert_eq!(index.get("/home/index.tsx").unwrap().default_name, "Start");
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let mut index = sample();
        index.insert("/contact.tsx", ViewData::new("Contact"));
        index.remove("/home/index.tsx");
        let keys: Vec<_> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["/about.tsx", "/contact.tsx"]);
    }

    #[test]
    fn test_apply_none_removes() {
        let mut index = sample();
        index.apply("/about.tsx", None);
        assert!(index.get("/about.tsx").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_from_json_roundtrips_order() {
        let json = sample().serialize();
        let parsed = ViewIndex::from_json(&json).unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.serialize(), json);
    }

    #[test]
    fn test_clear() {
        let mut index = sample();
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_tree() {
        let mut index = ViewIndex::new();
        index.insert("/sub/a.tsx", ViewData::new("A"));
        index.insert("/subway.tsx", ViewData::new("Subway"));
        index.insert("/sub/deep/b.tsx", ViewData::new("B"));
        index.insert("/home.tsx", ViewData::new("Home"));

        assert_eq!(index.remove_tree("/sub"), ["/sub/a.tsx", "/sub/deep/b.tsx"]);
        let keys: Vec<_> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["/subway.tsx", "/home.tsx"]);

        assert_eq!(index.remove_tree("/home.tsx"), ["/home.tsx"]);
        assert!(index.remove_tree("/missing").is_empty());
    }
}
