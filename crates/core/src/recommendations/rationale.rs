//! Free-text explanations attached to a response: descriptions, per-gift
//! reasons, the top-level thinking trace and the pro tip.

use super::pricing::group_thousands;
use super::RequestContext;
use crate::classifier::{OccasionTag, RelationshipTag};

pub const CLAUSE_SEPARATOR: &str = " • ";
const MAX_CLAUSES: usize = 3;
const NOTE_CLAUSE_CHARS: usize = 50;
const TRACE_NOTE_CHARS: usize = 30;

const PRO_TIPS: [(&str, &str); 5] = [
    ("diwali", "Always include a handwritten card with Diwali wishes. Avoid black colored gifts."),
    ("raksha bandhan", "Present the gift after the rakhi ceremony. Include sweets for tradition."),
    ("wedding", "Gifts in odd numbers are considered auspicious. Include shagun envelope."),
    ("birthday", "Personalized gifts show extra thought. Consider their hobbies and interests."),
    ("anniversary", "Gifts symbolizing togetherness work best. Avoid sharp objects like knives."),
];
const PROFESSIONAL_TIP: &str =
    "Keep professional gifts neutral and practical. Avoid overly personal items.";
const DEFAULT_TIP: &str =
    "Present with both hands as a sign of respect. Include a personalized message.";

/// Picks one of five fixed templates by output position.
pub fn describe(context: &RequestContext, position: usize) -> String {
    let relationship = &context.request.relationship;
    let occasion = &context.request.occasion;
    match position % 5 {
        0 => format!("Perfect for {relationship} on {occasion}, combines thoughtfulness with utility"),
        1 => format!("Culturally appropriate choice that honors the {occasion} celebration"),
        2 => format!("Shows respect and affection, ideal for {relationship}"),
        3 => format!("Meaningful gift that celebrates {occasion} with traditional values"),
        _ => "Thoughtful present that strengthens your bond".to_string(),
    }
}

/// Up to three clauses in priority order: relationship, occasion, age, vibe, notes.
pub fn why_applicable(context: &RequestContext) -> String {
    let request = &context.request;
    let relationship = &request.relationship;
    let occasion = &request.occasion;
    let mut clauses: Vec<String> = Vec::with_capacity(5);

    clauses.push(match context.relationship.tag {
        RelationshipTag::ImmediateFamily => {
            format!("Your {relationship} deserves something special that shows deep appreciation")
        }
        RelationshipTag::Romantic => {
            format!("Perfect for expressing love and affection to your {relationship}")
        }
        RelationshipTag::Professional => {
            "Maintains appropriate professional boundaries while showing respect".to_string()
        }
        _ => format!("Thoughtful choice that strengthens your bond with your {relationship}"),
    });

    clauses.push(match context.occasion.tag {
        OccasionTag::Festival => {
            format!("Aligns beautifully with the spirit and traditions of {occasion}")
        }
        OccasionTag::Milestone => {
            format!("Commemorates this important {occasion} milestone meaningfully")
        }
        OccasionTag::Romantic => format!("Captures the romantic essence of {occasion}"),
        _ => format!("Ideal for celebrating {occasion}"),
    });

    if let Some(clause) = age_clause(context) {
        clauses.push(clause);
    }

    let vibe = request.vibe.to_lowercase();
    let vibe_clause = if vibe.contains("traditional") {
        Some("Honors traditional values and cultural heritage")
    } else if vibe.contains("tech") {
        Some("Modern tech gift for the gadget enthusiast")
    } else if vibe.contains("luxury") {
        Some("Premium quality that makes a lasting impression")
    } else if vibe.contains("wellness") {
        Some("Promotes health and well-being")
    } else {
        None
    };
    if let Some(clause) = vibe_clause {
        clauses.push(clause.to_string());
    }

    let notes = request.notes.trim();
    if !notes.is_empty() {
        clauses.push(format!("Considering your note: {}", truncate_chars(notes, NOTE_CLAUSE_CHARS)));
    }

    clauses.truncate(MAX_CLAUSES);
    clauses.join(CLAUSE_SEPARATOR)
}

fn age_clause(context: &RequestContext) -> Option<String> {
    let request = &context.request;
    if request.is_child() {
        let suffix = match request.gender_hint() {
            super::GenderHint::Male => " boy",
            super::GenderHint::Female => " girl",
            super::GenderHint::Unspecified => "",
        };
        return Some(format!("Age-appropriate and engaging for children{suffix}"));
    }
    match request.age_group.trim().to_ascii_lowercase().as_str() {
        "senior" => Some("Practical and valued by seniors".to_string()),
        "teenager" => Some("Trendy and appealing for teenagers".to_string()),
        _ => None,
    }
}

/// One-line summary of every resolved input.
pub fn thinking_trace(context: &RequestContext) -> String {
    let request = &context.request;

    let gender_text = if request.gender.is_empty() {
        String::new()
    } else {
        format!(", {} gender", request.gender)
    };

    let notes = &request.notes;
    let notes_text = if notes.is_empty() {
        String::new()
    } else if notes.chars().count() > TRACE_NOTE_CHARS {
        format!(", with special note: '{}...'", truncate_chars(notes, TRACE_NOTE_CHARS))
    } else {
        format!(", with note: '{notes}'")
    };

    let types_text = if request.filters_types() {
        let names: Vec<&str> = request.gift_types.iter().map(|gift_type| gift_type.as_str()).collect();
        format!(", filtering by: {}", names.join(", "))
    } else {
        String::new()
    };

    format!(
        "Analyzing gift for {} on {}. Considering {} relationship type, {} occasion, {} age group{}, {} style preference, and Rs.{} budget{}{}.",
        request.relationship,
        request.occasion,
        context.relationship.tag,
        context.occasion.tag,
        request.age_group,
        gender_text,
        request.vibe,
        group_thousands(request.budget.max(0) as u64),
        notes_text,
        types_text,
    )
}

/// Occasion keywords win over the professional fallback.
pub fn pro_tip(context: &RequestContext) -> &'static str {
    let occasion = context.request.occasion.to_lowercase();
    PRO_TIPS
        .iter()
        .find(|(keyword, _)| occasion.contains(keyword))
        .map(|(_, tip)| *tip)
        .unwrap_or(if context.relationship.tag == RelationshipTag::Professional {
            PROFESSIONAL_TIP
        } else {
            DEFAULT_TIP
        })
}

fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}
