use gifting_core::classifier::{OCCASIONS, RELATIONSHIPS};
use gifting_core::{CatalogItem, GiftCatalog, GiftCategory};
use serde::Serialize;

use super::{to_json, CommandResult};
use crate::CatalogSection;

const COMMAND: &str = "catalog";

#[derive(Debug, Serialize)]
struct CategoryListing {
    category: GiftCategory,
    items: Vec<ItemListing>,
}

#[derive(Debug, Serialize)]
struct ItemListing {
    name: &'static str,
    gift_type: &'static str,
    icon: &'static str,
}

impl From<&CatalogItem> for ItemListing {
    fn from(item: &CatalogItem) -> Self {
        Self { name: item.name, gift_type: item.gift_type.as_str(), icon: item.icon }
    }
}

pub fn run(section: CatalogSection, json_output: bool) -> CommandResult {
    let output = match (section, json_output) {
        (CatalogSection::Relationships, true) => to_json(COMMAND, &RELATIONSHIPS),
        (CatalogSection::Occasions, true) => to_json(COMMAND, &OCCASIONS),
        (CatalogSection::Categories, true) => to_json(COMMAND, &category_listings()),
        (CatalogSection::Relationships, false) => RELATIONSHIPS
            .iter()
            .map(|profile| format!("- {} [{}] {}", profile.key, profile.tag.as_str(), profile.note))
            .collect::<Vec<_>>()
            .join("\n"),
        (CatalogSection::Occasions, false) => OCCASIONS
            .iter()
            .map(|profile| format!("- {} [{}] {}", profile.key, profile.tag.as_str(), profile.theme))
            .collect::<Vec<_>>()
            .join("\n"),
        (CatalogSection::Categories, false) => render_categories(&category_listings()),
    };

    CommandResult::ok(output)
}

fn category_listings() -> Vec<CategoryListing> {
    let catalog = GiftCatalog::builtin();
    catalog
        .categories()
        .map(|category| CategoryListing {
            category,
            items: catalog.items(category).iter().map(ItemListing::from).collect(),
        })
        .collect()
}

fn render_categories(listings: &[CategoryListing]) -> String {
    let mut lines = Vec::new();
    for listing in listings {
        lines.push(format!("{} ({} items)", listing.category, listing.items.len()));
        for item in &listing.items {
            lines.push(format!("  {} {} [{}]", item.icon, item.name, item.gift_type));
        }
    }
    lines.join("\n")
}
