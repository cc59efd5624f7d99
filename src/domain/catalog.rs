// Catalog domain model
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate catalog key: {0}")]
    DuplicateKey(String),
}

/// One dashboard the run is expected to provision: a logical key, the JSON
/// file it is loaded from, and a human label for logs.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub key: String,
    pub path: PathBuf,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(key: String, path: PathBuf, name: String) -> Self {
        Self { key, path, name }
    }
}

/// The fixed set of dashboards for a run. Ordered, immutable, keys unique.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.key.clone()) {
                return Err(CatalogError::DuplicateKey(entry.key.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str) -> CatalogEntry {
        CatalogEntry::new(
            key.to_string(),
            PathBuf::from(format!("dashboards/{key}.json")),
            key.to_string(),
        )
    }

    #[test]
    fn test_preserves_entry_order() {
        let catalog = Catalog::new(vec![entry("b"), entry("a"), entry("c")]).unwrap();
        let keys: Vec<&str> = catalog.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let result = Catalog::new(vec![entry("a"), entry("b"), entry("a")]);
        assert!(matches!(result, Err(CatalogError::DuplicateKey(key)) if key == "a"));
    }
}
