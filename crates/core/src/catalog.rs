//! Static gift catalog: category buckets, per-item type tags and icons.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON: &str = "🎁";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftCategory {
    Traditional,
    Modern,
    Personalized,
    Luxury,
    Wellness,
    Festive,
    Romantic,
    Home,
    Tech,
    Kids,
    KidsBoys,
    KidsGirls,
}

impl GiftCategory {
    pub const ALL: [GiftCategory; 12] = [
        Self::Traditional,
        Self::Modern,
        Self::Personalized,
        Self::Luxury,
        Self::Wellness,
        Self::Festive,
        Self::Romantic,
        Self::Home,
        Self::Tech,
        Self::Kids,
        Self::KidsBoys,
        Self::KidsGirls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::Modern => "modern",
            Self::Personalized => "personalized",
            Self::Luxury => "luxury",
            Self::Wellness => "wellness",
            Self::Festive => "festive",
            Self::Romantic => "romantic",
            Self::Home => "home",
            Self::Tech => "tech",
            Self::Kids => "kids",
            Self::KidsBoys => "kids_boys",
            Self::KidsGirls => "kids_girls",
        }
    }
}

impl fmt::Display for GiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse style classification attached to every catalog item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GiftType {
    Formal,
    Funky,
    Romantic,
    Practical,
    Traditional,
    Luxury,
}

impl GiftType {
    pub const ALL: [GiftType; 6] =
        [Self::Formal, Self::Funky, Self::Romantic, Self::Practical, Self::Traditional, Self::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Funky => "Funky",
            Self::Romantic => "Romantic",
            Self::Practical => "Practical",
            Self::Traditional => "Traditional",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for GiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GiftType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "funky" => Ok(Self::Funky),
            "romantic" => Ok(Self::Romantic),
            "practical" => Ok(Self::Practical),
            "traditional" => Ok(Self::Traditional),
            "luxury" => Ok(Self::Luxury),
            other => Err(format!(
                "unsupported gift type `{other}` (expected formal|funky|romantic|practical|traditional|luxury)"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub gift_type: GiftType,
    pub icon: &'static str,
}

const fn item(name: &'static str, gift_type: GiftType, icon: &'static str) -> CatalogItem {
    CatalogItem { name, gift_type, icon }
}

use GiftType::{Formal, Funky, Luxury, Practical, Romantic, Traditional};

const TRADITIONAL_ITEMS: &[CatalogItem] = &[
    item("Silver Pooja Items", Traditional, "🪔"),
    item("Brass Diya Set", Traditional, "🪔"),
    item("Traditional Silk Saree", Traditional, "👗"),
    item("Kurta Pajama Set", Formal, "👔"),
    item("Handcrafted Jewelry", Traditional, "💍"),
    item("Silver Coins", Formal, "🪙"),
    item("Copper Water Bottle", Practical, "🍶"),
    item("Traditional Sweet Box", Traditional, "🍬"),
];

const MODERN_ITEMS: &[CatalogItem] = &[
    item("Smart Watch", Practical, "⌚"),
    item("Bluetooth Speaker", Funky, "🔊"),
    item("Power Bank", Practical, "🔋"),
    item("Wireless Earbuds", Practical, "🎧"),
    item("Coffee Maker", Practical, "☕"),
    item("Air Purifier", Practical, "💨"),
    item("Electric Kettle", Practical, "🫖"),
    item("Grooming Kit", Practical, "💈"),
];

const PERSONALIZED_ITEMS: &[CatalogItem] = &[
    item("Customized Photo Frame", Romantic, "🖼️"),
    item("Engraved Pen Set", Formal, "🖊️"),
    item("Personalized Cushion", Funky, "🛋️"),
    item("Photo Coffee Mug", Funky, "☕"),
    item("Custom Name Plate", Formal, "🏷️"),
    item("Customized Diary", Formal, "📔"),
];

const LUXURY_ITEMS: &[CatalogItem] = &[
    item("Designer Perfume", Luxury, "🧴"),
    item("Premium Watch", Luxury, "⌚"),
    item("Leather Wallet", Formal, "👛"),
    item("Designer Sunglasses", Luxury, "🕶️"),
    item("Branded Handbag", Luxury, "👜"),
    item("Premium Tea Gift Set", Formal, "🍵"),
    item("Luxury Chocolate Box", Luxury, "🍫"),
];

const WELLNESS_ITEMS: &[CatalogItem] = &[
    item("Yoga Mat", Practical, "🧘"),
    item("Essential Oil Diffuser", Practical, "🌸"),
    item("Spa Gift Hamper", Luxury, "🧖"),
    item("Fitness Tracker", Practical, "📱"),
    item("Organic Skincare Set", Luxury, "🧴"),
    item("Meditation Kit", Practical, "🧘"),
];

const FESTIVE_ITEMS: &[CatalogItem] = &[
    item("Decorative Diya Set", Traditional, "🪔"),
    item("Rangoli Kit", Traditional, "🎨"),
    item("Festival Sweet Hamper", Traditional, "🍬"),
    item("Pooja Thali Set", Traditional, "🪔"),
    item("Festive Dry Fruit Box", Formal, "🥜"),
    item("Decorative Toran", Traditional, "🎊"),
];

const ROMANTIC_ITEMS: &[CatalogItem] = &[
    item("Couple Watches", Romantic, "⌚"),
    item("Heart-shaped Jewelry", Romantic, "💝"),
    item("Perfume Gift Set", Romantic, "🧴"),
    item("Love Letter Kit", Romantic, "💌"),
    item("Couple Keychains", Romantic, "🔑"),
];

const HOME_ITEMS: &[CatalogItem] = &[
    item("Wall Clock", Practical, "🕐"),
    item("Decorative Showpiece", Formal, "🏺"),
    item("Table Lamp", Practical, "💡"),
    item("Bedsheet Set", Practical, "🛏️"),
    item("Dinner Set", Formal, "🍽️"),
    item("Indoor Plant with Planter", Practical, "🪴"),
];

const TECH_ITEMS: &[CatalogItem] = &[
    item("Tablet", Practical, "📱"),
    item("Kindle E-reader", Practical, "📚"),
    item("Smart Home Device", Practical, "🏠"),
    item("Gaming Accessories", Funky, "🎮"),
    item("Portable Projector", Practical, "📽️"),
];

const KIDS_ITEMS: &[CatalogItem] = &[
    item("Educational Toys", Practical, "🧩"),
    item("Building Blocks Set", Funky, "🧱"),
    item("Art and Craft Kit", Funky, "🎨"),
    item("Remote Control Car", Funky, "🚗"),
    item("Story Books Set", Practical, "📚"),
];

const KIDS_BOYS_ITEMS: &[CatalogItem] = &[
    item("Remote Control Car", Funky, "🚗"),
    item("Building Blocks Set", Funky, "🧱"),
    item("Gaming Accessories", Funky, "🎮"),
    item("Story Books Set", Practical, "📚"),
    item("Cricket Kit", Funky, "🏏"),
    item("Football", Funky, "⚽"),
];

const KIDS_GIRLS_ITEMS: &[CatalogItem] = &[
    item("Art and Craft Kit", Funky, "🎨"),
    item("Doll House Set", Funky, "🏠"),
    item("Story Books Set", Practical, "📚"),
    item("Educational Toys", Practical, "🧩"),
    item("Dance Costume Set", Funky, "💃"),
    item("Jewelry Making Kit", Funky, "💎"),
];

/// Ordered category → item mapping. Read-only once built.
#[derive(Clone, Debug)]
pub struct GiftCatalog {
    buckets: Vec<(GiftCategory, &'static [CatalogItem])>,
}

impl GiftCatalog {
    pub fn new(buckets: Vec<(GiftCategory, &'static [CatalogItem])>) -> Self {
        Self { buckets }
    }

    /// Process-wide built-in catalog, initialized on first use.
    pub fn builtin() -> &'static GiftCatalog {
        static CATALOG: OnceLock<GiftCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            GiftCatalog::new(vec![
                (GiftCategory::Traditional, TRADITIONAL_ITEMS),
                (GiftCategory::Modern, MODERN_ITEMS),
                (GiftCategory::Personalized, PERSONALIZED_ITEMS),
                (GiftCategory::Luxury, LUXURY_ITEMS),
                (GiftCategory::Wellness, WELLNESS_ITEMS),
                (GiftCategory::Festive, FESTIVE_ITEMS),
                (GiftCategory::Romantic, ROMANTIC_ITEMS),
                (GiftCategory::Home, HOME_ITEMS),
                (GiftCategory::Tech, TECH_ITEMS),
                (GiftCategory::Kids, KIDS_ITEMS),
                (GiftCategory::KidsBoys, KIDS_BOYS_ITEMS),
                (GiftCategory::KidsGirls, KIDS_GIRLS_ITEMS),
            ])
        })
    }

    pub fn items(&self, category: GiftCategory) -> &'static [CatalogItem] {
        self.buckets
            .iter()
            .find(|(bucket, _)| *bucket == category)
            .map(|(_, items)| *items)
            .unwrap_or(&[])
    }

    /// Every item in bucket order. Items filed under several categories appear once per bucket.
    pub fn all_items(&self) -> impl Iterator<Item = &'static CatalogItem> + '_ {
        self.buckets.iter().flat_map(|(_, items)| items.iter())
    }

    pub fn categories(&self) -> impl Iterator<Item = GiftCategory> + '_ {
        self.buckets.iter().map(|(category, _)| *category)
    }

    pub fn find(&self, name: &str) -> Option<&'static CatalogItem> {
        self.all_items().find(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn icon_of(&self, name: &str) -> &'static str {
        self.find(name).map(|item| item.icon).unwrap_or(DEFAULT_ICON)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{GiftCatalog, GiftCategory, GiftType, DEFAULT_ICON};

    #[test]
    fn builtin_catalog_has_every_category() {
        let catalog = GiftCatalog::builtin();
        for category in GiftCategory::ALL {
            assert!(!catalog.items(category).is_empty(), "{category} should have items");
        }
    }

    #[test]
    fn shared_items_keep_a_single_type_and_icon() {
        let mut seen: HashMap<&str, (GiftType, &str)> = HashMap::new();
        for item in GiftCatalog::builtin().all_items() {
            let entry = seen.entry(item.name).or_insert((item.gift_type, item.icon));
            assert_eq!(*entry, (item.gift_type, item.icon), "{} is tagged inconsistently", item.name);
        }
    }

    #[test]
    fn unknown_titles_fall_back_to_the_default_icon() {
        let catalog = GiftCatalog::builtin();
        assert_eq!(catalog.icon_of("Hand-knitted Scarf"), DEFAULT_ICON);
        assert_eq!(catalog.icon_of("designer perfume"), "🧴");
        assert!(catalog.find("Hand-knitted Scarf").is_none());
    }

    #[test]
    fn gift_type_parses_case_insensitively() {
        assert_eq!("luxury".parse::<GiftType>(), Ok(GiftType::Luxury));
        assert_eq!(" Formal ".parse::<GiftType>(), Ok(GiftType::Formal));
        assert!("quirky".parse::<GiftType>().is_err());
    }
}
