use std::collections::{BTreeMap, HashMap};

/// Key under which the resolved root directory is always published.
pub const ROOT_PATH_KEY: &str = "ROOT_PATH";

/// Ordered `key -> value` mapping produced by parsing a `.env` file.
///
/// Iteration follows first-insertion order. Inserting an existing key
/// replaces its value but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ParsedEnvironment {
    entries: Vec<(String, String)>,
    by_key: HashMap<String, usize>,
}

impl ParsedEnvironment {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        if let Some(idx) = self.by_key.get(&key).copied() {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }

        self.by_key.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Returns `true` if `key` has a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// The injected [`ROOT_PATH_KEY`] value, present on anything returned by `parse`.
    pub fn root_path(&self) -> Option<&str> {
        self.get(ROOT_PATH_KEY)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Converts into a sorted map, dropping insertion order.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.entries.into_iter().collect()
    }
}

impl PartialEq for ParsedEnvironment {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ParsedEnvironment {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParsedEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParsedEnvironment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for ParsedEnvironment {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParsedEnvironment {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut env = ParsedEnvironment::new();
        env.insert("A", "1");
        env.insert("B", "2");
        let previous = env.insert("A", "3");

        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(env.len(), 2);
        assert_eq!(env.iter().collect::<Vec<_>>(), vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: ParsedEnvironment = [("A", "1"), ("B", "2")].into_iter().collect();
        let ba: ParsedEnvironment = [("B", "2"), ("A", "1")].into_iter().collect();

        assert_ne!(ab, ba);
        assert_eq!(ab.clone().into_map(), ba.into_map());
        assert_eq!(ab.clone(), ab);
    }

    #[test]
    fn test_root_path_lookup() {
        let env: ParsedEnvironment = [(ROOT_PATH_KEY, "/srv/app")].into_iter().collect();
        assert_eq!(env.root_path(), Some("/srv/app"));
        assert!(ParsedEnvironment::new().root_path().is_none());
    }
}
