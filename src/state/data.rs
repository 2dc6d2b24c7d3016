/// Shared data structures for the application state
///
/// These structs represent the product records that flow between
/// the catalog, the stores and the UI layer. Records are immutable
/// once the catalog is loaded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Display value for a spec that does not apply to a product
pub const NOT_APPLICABLE: &str = "N/A";

/// The fixed set of comparable specification fields
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpecKey {
    Display,
    Battery,
    Storage,
    Camera,
    Processor,
    Ram,
}

impl SpecKey {
    /// All spec keys in comparison table order
    pub const ALL: [SpecKey; 6] = [
        SpecKey::Display,
        SpecKey::Battery,
        SpecKey::Storage,
        SpecKey::Camera,
        SpecKey::Processor,
        SpecKey::Ram,
    ];

    /// Human readable row label
    pub fn label(self) -> &'static str {
        match self {
            SpecKey::Display => "Display",
            SpecKey::Battery => "Battery",
            SpecKey::Storage => "Storage",
            SpecKey::Camera => "Camera",
            SpecKey::Processor => "Processor",
            SpecKey::Ram => "RAM",
        }
    }
}

impl fmt::Display for SpecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a single product in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique, stable identifier
    pub id: String,
    /// Display name (e.g., "Pixel 8 Pro")
    pub name: String,
    pub brand: String,
    /// Price as shown to the user, already formatted
    pub price: String,
    /// Image URI
    pub image: String,
    /// Short marketing bullet points, in display order
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specs: BTreeMap<SpecKey, String>,
}

impl Product {
    /// Spec value for `key`, or "N/A" when the record has none
    pub fn spec(&self, key: SpecKey) -> &str {
        self.specs
            .get(&key)
            .map(String::as_str)
            .unwrap_or(NOT_APPLICABLE)
    }
}

/// Check whether a spec value is the "not applicable" sentinel
pub fn is_not_applicable(value: &str) -> bool {
    value == NOT_APPLICABLE
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a product with every spec set to the same value
    pub fn product(id: &str, brand: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("{} {}", brand, id),
            brand: brand.to_string(),
            price: "$999".to_string(),
            image: format!("https://example.com/{}.jpg", id),
            features: Vec::new(),
            specs: SpecKey::ALL
                .iter()
                .map(|key| (*key, "same".to_string()))
                .collect(),
        }
    }

    /// Same as `product`, overriding one spec value
    pub fn product_with_spec(id: &str, key: SpecKey, value: &str) -> Product {
        let mut product = product(id, "Acme");
        product.specs.insert(key, value.to_string());
        product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_spec_reads_as_not_applicable() {
        let mut product = fixtures::product("a", "Acme");
        product.specs.remove(&SpecKey::Camera);

        assert_eq!(product.spec(SpecKey::Camera), NOT_APPLICABLE);
        assert!(is_not_applicable(product.spec(SpecKey::Camera)));
        assert_eq!(product.spec(SpecKey::Ram), "same");
    }

    #[test]
    fn test_specs_deserialize_from_lowercase_keys() {
        let json = r#"{
            "id": "p1",
            "name": "Phone",
            "brand": "Acme",
            "price": "$1",
            "image": "img.jpg",
            "specs": { "battery": "10h", "ram": "8GB" }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.spec(SpecKey::Battery), "10h");
        assert_eq!(product.spec(SpecKey::Ram), "8GB");
        assert_eq!(product.spec(SpecKey::Display), NOT_APPLICABLE);
        assert!(product.features.is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(SpecKey::Ram.label(), "RAM");
        assert_eq!(SpecKey::Display.to_string(), "Display");
    }
}
