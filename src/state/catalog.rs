use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::info;

use super::data::Item;
use crate::error::{CatalogError, Result};

/// The Catalog holds every product loaded from the input document.
///
/// Keys keep the order of the document. Records are never added or removed
/// after load; only descriptions change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: IndexMap<String, Item>,
}

impl Catalog {
    /// Parse a catalog document (a JSON object of key -> item)
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let items: IndexMap<String, Item> = serde_json::from_str(raw)?;
        Ok(Catalog { items })
    }

    /// Serialize the whole catalog, keyed identically to the input document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    pub fn get(&self, key: &str) -> Option<&Item> {
        self.items.get(key)
    }

    /// Overwrite a description. Unknown keys are ignored and return `false`.
    pub fn set_description(&mut self, key: &str, text: &str) -> bool {
        match self.items.get_mut(key) {
            Some(item) => {
                item.description = text.to_string();
                true
            }
            None => false,
        }
    }

    /// All items in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(key, item)| (key.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in order of first appearance.
    /// Uncategorised items only show under "all".
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in self.items.values() {
            if !item.category.is_empty() && !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

/// Read and parse the catalog document.
/// Runs on the tokio executor so the window stays responsive.
pub async fn load(path: PathBuf) -> Result<Catalog> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| CatalogError::data_load(&path, e))?;

    let catalog = Catalog::from_json(&raw).map_err(|e| CatalogError::data_load(&path, e))?;

    info!("📦 Loaded {} items from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const SAMPLE: &str = r#"{
        "sofa": {
            "category": "moveis",
            "original_name": "Sofa 3 lugares",
            "images": ["/home/ubuntu/vendas-site/images/sofa_1.jpg", "images/sofa_2.jpg", "images/sofa_3.jpg"],
            "value": 1500,
            "description": "Retratil",
            "link": "https://example.com/sofa"
        },
        "tv": {
            "category": "eletronicos",
            "original_name": "TV 50",
            "images": [],
            "value": 2300.5
        },
        "mesa": {
            "category": "moveis",
            "original_name": "Mesa de jantar",
            "images": ["images/mesa.jpg"]
        }
    }"#;

    pub(crate) fn sample() -> Catalog {
        Catalog::from_json(SAMPLE).unwrap()
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_document_order_is_kept() {
        let catalog = sample();
        let keys: Vec<&str> = catalog.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["sofa", "tv", "mesa"]);
        assert_eq!(catalog.categories(), vec!["moveis", "eletronicos"]);
    }

    #[test]
    fn test_incomplete_record_does_not_fail_document() {
        let catalog = Catalog::from_json(
            r#"{
                "sofa": {"category": "moveis", "original_name": "Sofa"},
                "caixa": {"images": ["images/caixa.jpg"]}
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("caixa").unwrap().original_name, "");
        assert_eq!(catalog.categories(), vec!["moveis"]);
    }

    #[test]
    fn test_set_description() {
        let mut catalog = sample();

        assert!(catalog.set_description("tv", "Smart TV"));
        assert_eq!(catalog.get("tv").unwrap().description, "Smart TV");

        // Clearing is allowed
        assert!(catalog.set_description("sofa", ""));
        assert_eq!(catalog.get("sofa").unwrap().description, "");
    }

    #[test]
    fn test_set_description_unknown_key_is_noop() {
        let mut catalog = sample();
        let before = catalog.clone();

        assert!(!catalog.set_description("geladeira", "nova"));
        assert_eq!(catalog, before);
        assert!(catalog.get("geladeira").is_none());
    }

    #[test]
    fn test_to_json_keeps_all_fields() {
        let catalog = sample();
        let json = catalog.to_json().unwrap();
        let restored = Catalog::from_json(&json).unwrap();

        assert_eq!(catalog, restored);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sofa"]["link"], "https://example.com/sofa");
        assert_eq!(value["sofa"]["images"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = block_on(load(file.path().to_path_buf())).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_missing_file_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = block_on(load(dir.path().join("items_data.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::DataLoad { .. }));
    }

    #[test]
    fn test_load_malformed_document_is_data_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"sofa\": [").unwrap();

        let err = block_on(load(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, CatalogError::DataLoad { .. }));
    }
}
