use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Brands shown per category in the compact brand strip.
pub const FEATURED_PER_CATEGORY: usize = 3;

/// Cap on the compact brand strip.
pub const FEATURED_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCategory {
    pub title: String,
    #[serde(default)]
    pub icon: String,
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCatalog {
    pub categories: Vec<BrandCategory>,
}

impl BrandCatalog {
    /// Every brand across all categories, in file order.
    #[must_use]
    pub fn all_brands(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.brands.iter().map(String::as_str))
            .collect()
    }

    /// The first few brands of each category, capped overall.
    #[must_use]
    pub fn featured_brands(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|c| {
                c.brands
                    .iter()
                    .take(FEATURED_PER_CATEGORY)
                    .map(String::as_str)
            })
            .take(FEATURED_LIMIT)
            .collect()
    }
}

/// Load and validate the brand catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brand_catalog(path: &Path) -> Result<BrandCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: BrandCatalog = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &BrandCatalog) -> Result<(), ConfigError> {
    let mut seen_brands = HashSet::new();

    for category in &catalog.categories {
        if category.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category title must be non-empty".to_string(),
            ));
        }

        for brand in &category.brands {
            if brand.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' contains an empty brand name",
                    category.title
                )));
            }

            if !seen_brands.insert(brand.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate brand name: '{brand}' (in category '{}')",
                    category.title
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(title: &str, brands: &[&str]) -> BrandCategory {
        BrandCategory {
            title: title.to_string(),
            icon: String::new(),
            brands: brands.iter().map(|b| (*b).to_string()).collect(),
        }
    }

    #[test]
    fn all_brands_flattens_in_order() {
        let catalog = BrandCatalog {
            categories: vec![category("Boots", &["CUADRA", "TIMBERLAND"]), category("Sport", &["NIKE"])],
        };
        assert_eq!(catalog.all_brands(), vec!["CUADRA", "TIMBERLAND", "NIKE"]);
    }

    #[test]
    fn featured_takes_three_per_category() {
        let catalog = BrandCatalog {
            categories: vec![
                category("A", &["A1", "A2", "A3", "A4"]),
                category("B", &["B1", "B2"]),
            ],
        };
        assert_eq!(catalog.featured_brands(), vec!["A1", "A2", "A3", "B1", "B2"]);
    }

    #[test]
    fn featured_is_capped() {
        let categories = (0..10)
            .map(|i| {
                let names: Vec<String> = (0..5).map(|j| format!("C{i}B{j}")).collect();
                BrandCategory {
                    title: format!("C{i}"),
                    icon: String::new(),
                    brands: names,
                }
            })
            .collect();
        let catalog = BrandCatalog { categories };
        let featured = catalog.featured_brands();
        assert_eq!(featured.len(), FEATURED_LIMIT);
        assert_eq!(featured[3], "C1B0");
    }

    #[test]
    fn validate_rejects_empty_title() {
        let catalog = BrandCatalog {
            categories: vec![category("  ", &["X"])],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_empty_brand() {
        let catalog = BrandCatalog {
            categories: vec![category("Sport", &["NIKE", " "])],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("empty brand name"));
    }

    #[test]
    fn validate_rejects_duplicate_brand_across_categories() {
        let catalog = BrandCatalog {
            categories: vec![category("Sport", &["Nike"]), category("Fashion", &["NIKE"])],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate brand name"));
    }

    #[test]
    fn load_brand_catalog_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("brands.yaml");
        assert!(
            path.exists(),
            "brands.yaml missing at {path:?}, required for this test"
        );
        let result = load_brand_catalog(&path);
        assert!(result.is_ok(), "failed to load brands.yaml: {result:?}");
        let catalog = result.unwrap();
        assert!(!catalog.categories.is_empty());
        assert!(catalog.all_brands().contains(&"NIKE"));
    }

    #[test]
    fn load_brand_catalog_missing_file_is_io_error() {
        let err = load_brand_catalog(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::BrandsFileIo { .. }));
    }
}
