//! Mansion Core
//!
//! Foundational types shared by the dynamic menu crates:
//!
//! - **Catalog**: Immutable dish records, categories, and bilingual text
//! - **Events**: Wheel and touch gesture input in a platform-agnostic form
//! - **State transitions**: The trait phase enums implement to react to events
//!
//! # Example
//!
//! ```rust
//! use mansion_core::{Catalog, Category, CategoryFilter};
//!
//! let catalog = Catalog::from_toml_str(r#"
//! [[dishes]]
//! id = "soup-1"
//! name = { zh = "酸汤", en = "Sour Soup" }
//! description = { zh = "番茄与野山椒", en = "Tomatoes and wild peppers" }
//! price = 68
//! category = "soup-base"
//! image = "/dishes/sour-soup.png"
//! "#).unwrap();
//!
//! let soups = catalog.filter(CategoryFilter::Only(Category::SoupBase));
//! assert_eq!(soups.len(), 1);
//! assert_eq!(soups[0].photo(), Some("/dishes/sour-soup.png"));
//! ```

pub mod catalog;
pub mod error;
pub mod events;
pub mod fsm;

pub use catalog::{Catalog, Category, CategoryFilter, Dish, Locale, LocalizedText};
pub use error::{CatalogError, Result};
pub use events::{event_types, EventType, GestureEvent, Modifiers, TouchPoint};
pub use fsm::{StateTransitions, TransitionLog};
