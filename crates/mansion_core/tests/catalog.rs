use mansion_core::{Catalog, CatalogError, Category, CategoryFilter, Locale};
use pretty_assertions::assert_eq;

const MENU: &str = r#"
[[dishes]]
id = "53be1350"
name = { zh = "老凯里贵州酸汤", en = "Old Kylee GuiZhou Sour Soup Base" }
description = { zh = "贵州传统酸汤", en = "Traditional Guizhou sour soup" }
price = 68
category = "汤底"
image = "/dishes/laokaili-suantang.png"
preparation_time = 180
prep_quantity = 20
featured = true

[[dishes]]
id = "f25df060"
name = { zh = "大地飞雪", en = "Flying Snow" }
description = { zh = "精选雪花牛肉", en = "Premium marbled beef" }
price = 88
category = "land-fresh"
image = "/dishes/placeholder-beef.png"

[[dishes]]
id = "668ccc66"
name = { zh = "鲜虾", en = "Fresh Shrimp" }
description = { zh = "活虾现杀", en = "Live shrimp" }
price = 88.5
category = "seafood"
"#;

#[test]
fn parses_catalog_with_aliases_and_defaults() {
    let catalog = Catalog::from_toml_str(MENU).unwrap();
    assert_eq!(catalog.len(), 3);

    let soup = catalog.get("53be1350").unwrap();
    assert_eq!(soup.category, Category::SoupBase);
    assert_eq!(soup.name.get(Locale::En), "Old Kylee GuiZhou Sour Soup Base");
    assert_eq!(soup.preparation_time, Some(180));
    assert!(soup.featured);

    let shrimp = catalog.get("668ccc66").unwrap();
    assert_eq!(shrimp.image, None);
    assert!(!shrimp.featured);
}

#[test]
fn photos_skip_placeholders_and_missing_images() {
    let catalog = Catalog::from_toml_str(MENU).unwrap();
    assert_eq!(catalog.photos(), vec!["/dishes/laokaili-suantang.png"]);
}

#[test]
fn featured_and_filtered_views() {
    let catalog = Catalog::from_toml_str(MENU).unwrap();
    let featured: Vec<&str> = catalog.featured().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(featured, vec!["53be1350"]);

    let land = catalog.filter(CategoryFilter::Only(Category::LandFresh));
    assert_eq!(land.len(), 1);
    assert_eq!(CategoryFilter::All.label(Locale::Zh), "全部");
}

#[test]
fn unknown_category_is_a_parse_error() {
    let src = r#"
[[dishes]]
id = "x"
name = { zh = "x", en = "x" }
description = { zh = "x", en = "x" }
price = 1
category = "dessert"
"#;
    assert!(matches!(
        Catalog::from_toml_str(src),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Catalog::load(std::path::Path::new("/nonexistent/menu.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}
