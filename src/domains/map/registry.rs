use std::collections::HashMap;
use std::collections::HashSet;

/// Id -> display handle for one marker kind.
#[derive(Debug, Clone)]
pub struct MarkerRegistry<H> {
    entries: HashMap<String, H>,
}

impl<H> Default for MarkerRegistry<H> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<H> MarkerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&H> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, handle: H) -> Option<H> {
        self.entries.insert(id.into(), handle)
    }

    pub fn remove(&mut self, id: &str) -> Option<H> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Empties the registry, handing back every handle it held.
    pub fn drain(&mut self) -> Vec<H> {
        self.entries.drain().map(|(_, h)| h).collect()
    }
}
