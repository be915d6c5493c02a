//! Category rotation and seeded item picks.

use std::collections::HashSet;

use rand::Rng;

use super::pricing::draw_multiplier;
use super::seed::attempt_rng;
use super::{GenderHint, RequestContext};
use crate::catalog::{CatalogItem, GiftCatalog, GiftCategory};
use crate::classifier::{OccasionTag, RelationshipTag};

/// Vibe keywords in the order they are checked. Each match is prepended, so
/// the last matching keyword ends up in front.
const VIBE_KEYWORDS: [(&str, GiftCategory); 4] = [
    ("traditional", GiftCategory::Traditional),
    ("tech", GiftCategory::Tech),
    ("wellness", GiftCategory::Wellness),
    ("luxury", GiftCategory::Luxury),
];

/// Builds the category rotation for a request.
///
/// Repeats are kept on purpose: a category inserted twice (for example by the
/// relationship base list and a vibe keyword) is drawn from more often.
pub fn select_categories(context: &RequestContext) -> Vec<GiftCategory> {
    let request = &context.request;
    let mut categories = base_categories(context.relationship.tag);

    let vibe = request.vibe.to_lowercase();
    for (keyword, category) in VIBE_KEYWORDS {
        if vibe.contains(keyword) {
            categories.insert(0, category);
        }
    }

    if context.occasion.tag == OccasionTag::Festival {
        categories.insert(0, GiftCategory::Festive);
    }

    if request.is_child() {
        let mut kids = match request.gender_hint() {
            GenderHint::Male => {
                vec![GiftCategory::KidsBoys, GiftCategory::Kids, GiftCategory::Personalized]
            }
            GenderHint::Female => {
                vec![GiftCategory::KidsGirls, GiftCategory::Kids, GiftCategory::Personalized]
            }
            GenderHint::Unspecified => vec![GiftCategory::Kids, GiftCategory::Personalized],
        };
        kids.extend(categories);
        categories = kids;
    }

    categories
}

fn base_categories(tag: RelationshipTag) -> Vec<GiftCategory> {
    match tag {
        RelationshipTag::ImmediateFamily => {
            vec![GiftCategory::Personalized, GiftCategory::Luxury, GiftCategory::Wellness]
        }
        RelationshipTag::Professional => vec![GiftCategory::Modern, GiftCategory::Luxury],
        RelationshipTag::Romantic => {
            vec![GiftCategory::Romantic, GiftCategory::Personalized, GiftCategory::Luxury]
        }
        _ => vec![GiftCategory::Traditional, GiftCategory::Modern, GiftCategory::Personalized],
    }
}

/// A catalog item chosen on one attempt, with the price draw taken from the
/// same seeded generator right after the choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedItem {
    pub item: &'static CatalogItem,
    pub category: GiftCategory,
    pub attempt: usize,
    pub price_multiplier: f64,
}

/// Walks the rotation until `target` distinct items are picked or `max_attempts` runs out.
///
/// When the rotation's category has nothing left under the type filter the
/// whole catalog is scanned instead. Returning fewer than `target` items is
/// not an error.
pub fn pick_items(
    catalog: &GiftCatalog,
    categories: &[GiftCategory],
    context: &RequestContext,
    target: usize,
    max_attempts: usize,
) -> Vec<PickedItem> {
    let request = &context.request;
    let mut picked: Vec<PickedItem> = Vec::with_capacity(target);
    let mut used: HashSet<&'static str> = HashSet::new();

    if categories.is_empty() {
        return picked;
    }

    let mut attempt = 0;
    while picked.len() < target && attempt < max_attempts {
        let category = categories[attempt % categories.len()];
        let eligible = |item: &&'static CatalogItem| {
            !used.contains(item.name) && request.allows(item.gift_type)
        };

        let mut candidates: Vec<&'static CatalogItem> =
            catalog.items(category).iter().filter(eligible).collect();
        if candidates.is_empty() {
            candidates = catalog.all_items().filter(eligible).collect();
        }

        if !candidates.is_empty() {
            let mut rng = attempt_rng(request, attempt);
            let item = candidates[rng.gen_range(0..candidates.len())];
            let price_multiplier = draw_multiplier(&mut rng);
            used.insert(item.name);
            picked.push(PickedItem { item, category, attempt, price_multiplier });
        }

        attempt += 1;
    }

    picked
}
