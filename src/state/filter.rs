/// Search and brand filtering over the catalog
///
/// Everything here is a pure function of its inputs and is simply
/// recomputed whenever the query or brand changes.

use std::fmt;

use super::catalog::Catalog;
use super::data::Product;

/// Transient filter state driven by the search box and the brand picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free text, matched case-insensitively against name, brand and features
    pub search_query: String,
    /// `None` means every brand
    pub brand_filter: Option<String>,
}

impl FilterCriteria {
    /// Whether any constraint is set
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty() || self.brand_filter.is_some()
    }

    /// Drop both the search text and the brand constraint
    pub fn clear(&mut self) {
        self.search_query.clear();
        self.brand_filter = None;
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_brand(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search_query.is_empty() {
            return true;
        }

        let query = self.search_query.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&query);

        contains(&product.name)
            || contains(&product.brand)
            || product.features.iter().any(|f| contains(f))
    }

    fn matches_brand(&self, product: &Product) -> bool {
        match &self.brand_filter {
            Some(brand) => product.brand == *brand,
            None => true,
        }
    }
}

/// Products matching `criteria`, in catalog order
pub fn filter<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    catalog
        .products()
        .iter()
        .filter(|product| criteria.matches(product))
        .collect()
}

/// "N of M" counter shown next to the filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCount {
    pub shown: usize,
    pub total: usize,
}

impl fmt::Display for ResultCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.shown, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::product;

    fn catalog() -> Catalog {
        let mut phone = product("p1", "Acme");
        phone.name = "Nova One".to_string();
        phone.features = vec!["48MP camera".to_string(), "USB-C".to_string()];

        let mut tablet = product("p2", "Zeta");
        tablet.name = "Slate".to_string();
        tablet.features = vec!["Stylus".to_string()];

        let mut laptop = product("p3", "Acme");
        laptop.name = "Book Pro".to_string();

        Catalog::from_products(vec![phone, tablet, laptop]).unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_catalog_order() {
        let catalog = catalog();
        let result = filter(&catalog, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_query_matches_feature() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            search_query: "cam".to_string(),
            brand_filter: None,
        };

        assert_eq!(ids(&filter(&catalog, &criteria)), vec!["p1"]);
    }

    #[test]
    fn test_query_is_case_insensitive_over_name_and_brand() {
        let catalog = catalog();

        let by_name = FilterCriteria {
            search_query: "SLATE".to_string(),
            brand_filter: None,
        };
        assert_eq!(ids(&filter(&catalog, &by_name)), vec!["p2"]);

        let by_brand = FilterCriteria {
            search_query: "acm".to_string(),
            brand_filter: None,
        };
        assert_eq!(ids(&filter(&catalog, &by_brand)), vec!["p1", "p3"]);
    }

    #[test]
    fn test_brand_filter_is_exact() {
        let catalog = catalog();

        let exact = FilterCriteria {
            search_query: String::new(),
            brand_filter: Some("Acme".to_string()),
        };
        assert_eq!(ids(&filter(&catalog, &exact)), vec!["p1", "p3"]);

        let wrong_case = FilterCriteria {
            search_query: String::new(),
            brand_filter: Some("acme".to_string()),
        };
        assert!(filter(&catalog, &wrong_case).is_empty());
    }

    #[test]
    fn test_query_and_brand_combine() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            search_query: "book".to_string(),
            brand_filter: Some("Zeta".to_string()),
        };
        assert!(filter(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_brands_ignore_active_filter() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            search_query: "slate".to_string(),
            brand_filter: None,
        };

        assert_eq!(filter(&catalog, &criteria).len(), 1);
        assert_eq!(catalog.brands(), vec!["Acme", "Zeta"]);
    }

    #[test]
    fn test_clear() {
        let mut criteria = FilterCriteria {
            search_query: "x".to_string(),
            brand_filter: Some("Acme".to_string()),
        };
        assert!(criteria.is_active());

        criteria.clear();

        assert!(!criteria.is_active());
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_result_count_display() {
        let count = ResultCount { shown: 2, total: 8 };
        assert_eq!(count.to_string(), "2 of 8");
    }
}
