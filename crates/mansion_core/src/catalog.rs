//! Dish catalog
//!
//! Dishes are loaded once from a static TOML catalog and never mutated. The
//! carousel only needs ordered, category-filtered access plus each dish's
//! stable id and image reference.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Image references containing this marker are stand-ins, not photos
pub const PLACEHOLDER_MARKER: &str = "placeholder";

/// Display locale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

/// Text in both supported locales
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub zh: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Zh => &self.zh,
            Locale::En => &self.en,
        }
    }
}

/// Menu category partitioning the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(alias = "汤底")]
    SoupBase,
    #[serde(alias = "陆鲜")]
    LandFresh,
    #[serde(alias = "海鲜")]
    Seafood,
    #[serde(alias = "素菜")]
    Vegetables,
    #[serde(alias = "热菜")]
    HotDishes,
    #[serde(alias = "小吃")]
    Snacks,
    #[serde(alias = "饮品")]
    Beverages,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 7] = [
        Category::SoupBase,
        Category::LandFresh,
        Category::Seafood,
        Category::Vegetables,
        Category::HotDishes,
        Category::Snacks,
        Category::Beverages,
    ];

    /// Stable identifier used in config files and URLs
    pub fn slug(&self) -> &'static str {
        match self {
            Category::SoupBase => "soup-base",
            Category::LandFresh => "land-fresh",
            Category::Seafood => "seafood",
            Category::Vegetables => "vegetables",
            Category::HotDishes => "hot-dishes",
            Category::Snacks => "snacks",
            Category::Beverages => "beverages",
        }
    }

    /// Parse a slug or a Chinese category name
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == s || c.label(Locale::Zh) == s)
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Category::SoupBase, Locale::Zh) => "汤底",
            (Category::SoupBase, Locale::En) => "Soup Base",
            (Category::LandFresh, Locale::Zh) => "陆鲜",
            (Category::LandFresh, Locale::En) => "Land Fresh",
            (Category::Seafood, Locale::Zh) => "海鲜",
            (Category::Seafood, Locale::En) => "Seafood",
            (Category::Vegetables, Locale::Zh) => "素菜",
            (Category::Vegetables, Locale::En) => "Vegetables",
            (Category::HotDishes, Locale::Zh) => "热菜",
            (Category::HotDishes, Locale::En) => "Hot Dishes",
            (Category::Snacks, Locale::Zh) => "小吃",
            (Category::Snacks, Locale::En) => "Snacks",
            (Category::Beverages, Locale::Zh) => "饮品",
            (Category::Beverages, Locale::En) => "Beverages",
        }
    }
}

/// Active category selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (CategoryFilter::All, Locale::Zh) => "全部",
            (CategoryFilter::All, Locale::En) => "All",
            (CategoryFilter::Only(c), locale) => c.label(locale),
        }
    }
}

/// A menu item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub price: f64,
    pub category: Category,
    #[serde(default)]
    pub image: Option<String>,
    /// Preparation time in seconds
    #[serde(default)]
    pub preparation_time: Option<u32>,
    #[serde(default)]
    pub prep_quantity: Option<u32>,
    #[serde(default)]
    pub featured: bool,
}

impl Dish {
    /// The image reference, if it points at a real photo
    pub fn photo(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|img| !img.is_empty() && !img.contains(PLACEHOLDER_MARKER))
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    dishes: Vec<Dish>,
}

/// The immutable dish catalog
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and invalid prices
    pub fn new(dishes: Vec<Dish>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for dish in &dishes {
            if !seen.insert(dish.id.as_str()) {
                return Err(CatalogError::DuplicateId(dish.id.clone()));
            }
            if !dish.price.is_finite() || dish.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: dish.id.clone(),
                    price: dish.price,
                });
            }
        }
        Ok(Self { dishes })
    }

    /// Parse a catalog from TOML source (`[[dishes]]` tables)
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(src)?;
        Self::new(file.dishes)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&src)?;
        tracing::debug!(
            "loaded {} dishes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    /// Dishes matching the filter, in catalog order
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Dish> {
        self.dishes
            .iter()
            .filter(|d| filter.matches(d.category))
            .collect()
    }

    pub fn featured(&self) -> Vec<&Dish> {
        self.dishes.iter().filter(|d| d.featured).collect()
    }

    /// Distinct photo references across the whole catalog
    pub fn photos(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.dishes
            .iter()
            .filter_map(Dish::photo)
            .filter(|p| seen.insert(*p))
            .collect()
    }
}
