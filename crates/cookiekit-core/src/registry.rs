use std::collections::HashMap;

use crate::definition::CookieDefinition;

/// Immutable, ordered mapping from cookie name to [`CookieDefinition`].
///
/// The keyset is closed: accessors only expose the names declared here.
#[derive(Debug, Clone, Default)]
pub struct CookieRegistry {
    entries: Vec<(String, CookieDefinition)>,
    index: HashMap<String, usize>,
}

impl CookieRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up the definition for `name`.
    pub fn definition_for(&self, name: &str) -> Option<&CookieDefinition> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declared names, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CookieDefinition)> {
        self.entries
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories, in order of first declaration.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for (_, definition) in &self.entries {
            if !categories.contains(&definition.category()) {
                categories.push(definition.category());
            }
        }
        categories
    }

    /// Names declared under `category`, in declaration order.
    pub fn keys_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(_, definition)| definition.category() == category)
            .map(|(name, _)| name.as_str())
    }

    fn insert(&mut self, name: String, definition: CookieDefinition) {
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].1 = definition,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, definition));
            }
        }
    }
}

impl<N: Into<String>> FromIterator<(N, CookieDefinition)> for CookieRegistry {
    fn from_iter<I: IntoIterator<Item = (N, CookieDefinition)>>(iter: I) -> Self {
        let mut registry = Self::default();
        for (name, definition) in iter {
            registry.insert(name.into(), definition);
        }
        registry
    }
}

/// Builder for [`CookieRegistry`].
///
/// Defining a name twice replaces the earlier definition in place.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: CookieRegistry,
}

impl RegistryBuilder {
    pub fn define(mut self, name: impl Into<String>, definition: CookieDefinition) -> Self {
        self.registry.insert(name.into(), definition);
        self
    }

    pub fn build(self) -> CookieRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Representation;

    fn sample() -> CookieRegistry {
        CookieRegistry::builder()
            .define("pref", CookieDefinition::structured("ui"))
            .define("session", CookieDefinition::raw("auth"))
            .define("layout", CookieDefinition::structured("ui"))
            .build()
    }

    #[test]
    fn lookup_by_name() {
        let registry = sample();

        assert_eq!(registry.len(), 3);
        assert!(registry.contains("session"));
        assert_eq!(
            registry.definition_for("session").unwrap().representation(),
            Representation::RawString
        );
        assert!(registry.definition_for("missing").is_none());
    }

    #[test]
    fn keys_keep_declaration_order() {
        let registry = sample();
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["pref", "session", "layout"]
        );
    }

    #[test]
    fn redefinition_replaces_in_place() {
        let registry = CookieRegistry::builder()
            .define("a", CookieDefinition::raw("one"))
            .define("b", CookieDefinition::raw("two"))
            .define("a", CookieDefinition::structured("three"))
            .build();

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = registry.definition_for("a").unwrap();
        assert_eq!(a.category(), "three");
        assert_eq!(a.representation(), Representation::Structured);
    }

    #[test]
    fn categories_group_keys() {
        let registry = sample();

        assert_eq!(registry.categories(), vec!["ui", "auth"]);
        assert_eq!(
            registry.keys_in_category("ui").collect::<Vec<_>>(),
            vec!["pref", "layout"]
        );
        assert_eq!(registry.keys_in_category("nope").count(), 0);
    }

    #[test]
    fn collects_from_pairs() {
        let registry: CookieRegistry = [
            ("x", CookieDefinition::raw("c")),
            ("y", CookieDefinition::structured("c")),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(!registry.is_empty());
    }
}
