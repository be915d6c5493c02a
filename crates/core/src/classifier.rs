//! Maps free-text relationship and occasion strings onto coarse tags.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipTag {
    ImmediateFamily,
    ExtendedFamily,
    Professional,
    Romantic,
    Social,
    Family,
    General,
}

impl RelationshipTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImmediateFamily => "immediate_family",
            Self::ExtendedFamily => "extended_family",
            Self::Professional => "professional",
            Self::Romantic => "romantic",
            Self::Social => "social",
            Self::Family => "family",
            Self::General => "general",
        }
    }
}

impl fmt::Display for RelationshipTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OccasionTag {
    Festival,
    Celebration,
    Milestone,
    Romantic,
    Religious,
    General,
}

impl OccasionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Festival => "festival",
            Self::Celebration => "celebration",
            Self::Milestone => "milestone",
            Self::Romantic => "romantic",
            Self::Religious => "religious",
            Self::General => "general",
        }
    }
}

impl fmt::Display for OccasionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formality {
    Casual,
    SemiFormal,
    Formal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Medium,
    High,
    VeryHigh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RelationshipProfile {
    pub key: &'static str,
    pub tag: RelationshipTag,
    pub formality: Formality,
    pub note: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OccasionProfile {
    pub key: &'static str,
    pub tag: OccasionTag,
    pub significance: Significance,
    pub theme: &'static str,
}

const fn relationship(
    key: &'static str,
    tag: RelationshipTag,
    formality: Formality,
    note: &'static str,
) -> RelationshipProfile {
    RelationshipProfile { key, tag, formality, note }
}

const fn occasion(
    key: &'static str,
    tag: OccasionTag,
    significance: Significance,
    theme: &'static str,
) -> OccasionProfile {
    OccasionProfile { key, tag, significance, theme }
}

pub const RELATIONSHIPS: &[RelationshipProfile] = &[
    relationship("mother", RelationshipTag::ImmediateFamily, Formality::Casual, "most respected"),
    relationship("father", RelationshipTag::ImmediateFamily, Formality::Casual, "family head"),
    relationship("brother", RelationshipTag::ImmediateFamily, Formality::Casual, "sibling bond"),
    relationship("sister", RelationshipTag::ImmediateFamily, Formality::Casual, "sibling bond"),
    relationship("wife", RelationshipTag::ImmediateFamily, Formality::Casual, "life partner"),
    relationship("husband", RelationshipTag::ImmediateFamily, Formality::Casual, "life partner"),
    relationship("son", RelationshipTag::ImmediateFamily, Formality::Casual, "parent-child"),
    relationship("daughter", RelationshipTag::ImmediateFamily, Formality::Casual, "parent-child"),
    relationship("grandparent", RelationshipTag::ImmediateFamily, Formality::Casual, "elder respect"),
    relationship(
        "grandchild",
        RelationshipTag::ImmediateFamily,
        Formality::Casual,
        "youngest generation",
    ),
    relationship("uncle", RelationshipTag::ExtendedFamily, Formality::Casual, "parental generation"),
    relationship("aunt", RelationshipTag::ExtendedFamily, Formality::Casual, "parental generation"),
    relationship("cousin", RelationshipTag::ExtendedFamily, Formality::Casual, "peer generation"),
    relationship("nephew", RelationshipTag::ExtendedFamily, Formality::Casual, "next generation"),
    relationship("niece", RelationshipTag::ExtendedFamily, Formality::Casual, "next generation"),
    relationship("boss", RelationshipTag::Professional, Formality::Formal, "workplace hierarchy"),
    relationship("colleague", RelationshipTag::Professional, Formality::SemiFormal, "work peer"),
    relationship("friend", RelationshipTag::Social, Formality::Casual, "peer relationship"),
    relationship("boyfriend", RelationshipTag::Romantic, Formality::Casual, "romantic partner"),
    relationship("girlfriend", RelationshipTag::Romantic, Formality::Casual, "romantic partner"),
    relationship("saali", RelationshipTag::Family, Formality::Casual, "in-law relationship"),
];

pub const OCCASIONS: &[OccasionProfile] = &[
    occasion("diwali", OccasionTag::Festival, Significance::VeryHigh, "prosperity"),
    occasion("holi", OccasionTag::Festival, Significance::High, "colors and joy"),
    occasion("raksha bandhan", OccasionTag::Festival, Significance::High, "sibling bond"),
    occasion("durga puja", OccasionTag::Festival, Significance::VeryHigh, "divine blessings"),
    occasion("ganesh chaturthi", OccasionTag::Festival, Significance::VeryHigh, "new beginnings"),
    occasion("navratri", OccasionTag::Festival, Significance::VeryHigh, "devotion"),
    occasion("janmashtami", OccasionTag::Festival, Significance::High, "celebration"),
    occasion("eid", OccasionTag::Festival, Significance::VeryHigh, "togetherness"),
    occasion("christmas", OccasionTag::Festival, Significance::High, "joy and giving"),
    occasion("pongal", OccasionTag::Festival, Significance::High, "harvest celebration"),
    occasion("onam", OccasionTag::Festival, Significance::High, "harvest prosperity"),
    occasion("baisakhi", OccasionTag::Festival, Significance::High, "harvest festival"),
    occasion("karva chauth", OccasionTag::Festival, Significance::High, "marital bond"),
    occasion("diwali new year", OccasionTag::Festival, Significance::VeryHigh, "fresh start"),
    occasion("new year", OccasionTag::Celebration, Significance::High, "new beginnings"),
    occasion("birthday", OccasionTag::Celebration, Significance::Medium, "personal"),
    occasion("mother's day", OccasionTag::Celebration, Significance::Medium, "maternal love"),
    occasion("father's day", OccasionTag::Celebration, Significance::Medium, "paternal love"),
    occasion("wedding", OccasionTag::Milestone, Significance::VeryHigh, "new beginnings"),
    occasion("anniversary", OccasionTag::Milestone, Significance::High, "togetherness"),
    occasion("graduation", OccasionTag::Milestone, Significance::High, "achievement"),
    occasion("promotion", OccasionTag::Milestone, Significance::Medium, "career growth"),
    occasion("baby shower", OccasionTag::Milestone, Significance::High, "new life"),
    occasion("house warming", OccasionTag::Milestone, Significance::High, "new home"),
    occasion("retirement", OccasionTag::Milestone, Significance::High, "new chapter"),
    occasion("valentine's day", OccasionTag::Romantic, Significance::Medium, "romance"),
    occasion("puja", OccasionTag::Religious, Significance::High, "spiritual"),
    occasion("temple visit", OccasionTag::Religious, Significance::Medium, "devotion"),
];

const UNKNOWN_RELATIONSHIP: RelationshipProfile =
    relationship("", RelationshipTag::General, Formality::Casual, "general relationship");

const UNKNOWN_OCCASION: OccasionProfile =
    occasion("", OccasionTag::Celebration, Significance::Medium, "general");

/// Case-insensitive lookup; unknown strings resolve to the `general` profile.
pub fn classify_relationship(raw: &str) -> RelationshipProfile {
    let normalized = raw.trim().to_lowercase();
    RELATIONSHIPS
        .iter()
        .find(|profile| profile.key == normalized)
        .copied()
        .unwrap_or(UNKNOWN_RELATIONSHIP)
}

/// Case-insensitive lookup; unknown strings resolve to the `celebration` profile.
pub fn classify_occasion(raw: &str) -> OccasionProfile {
    let normalized = raw.trim().to_lowercase();
    OCCASIONS
        .iter()
        .find(|profile| profile.key == normalized)
        .copied()
        .unwrap_or(UNKNOWN_OCCASION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_lookup_ignores_case() {
        assert_eq!(classify_relationship("MOTHER").tag, RelationshipTag::ImmediateFamily);
        assert_eq!(classify_relationship("Boss").tag, RelationshipTag::Professional);
        assert_eq!(classify_relationship("Boss").formality, Formality::Formal);
        assert_eq!(classify_relationship("saali").tag, RelationshipTag::Family);
    }

    #[test]
    fn unknown_inputs_resolve_to_documented_defaults() {
        let relationship = classify_relationship("Xyzzy");
        let occasion = classify_occasion("Unknown");

        assert_eq!(relationship.tag, RelationshipTag::General);
        assert_eq!(occasion.tag, OccasionTag::Celebration);
        assert_eq!(occasion.significance, Significance::Medium);
    }

    #[test]
    fn occasion_lookup_covers_every_tag_family() {
        assert_eq!(classify_occasion("Diwali").tag, OccasionTag::Festival);
        assert_eq!(classify_occasion("Wedding").tag, OccasionTag::Milestone);
        assert_eq!(classify_occasion("Valentine's Day").tag, OccasionTag::Romantic);
        assert_eq!(classify_occasion("Temple Visit").tag, OccasionTag::Religious);
        assert_eq!(classify_occasion("Birthday").tag, OccasionTag::Celebration);
    }

    #[test]
    fn table_keys_are_unique_and_lowercase() {
        for (index, profile) in RELATIONSHIPS.iter().enumerate() {
            assert_eq!(profile.key, profile.key.to_lowercase());
            assert!(RELATIONSHIPS[index + 1..].iter().all(|other| other.key != profile.key));
        }
        for (index, profile) in OCCASIONS.iter().enumerate() {
            assert_eq!(profile.key, profile.key.to_lowercase());
            assert!(OCCASIONS[index + 1..].iter().all(|other| other.key != profile.key));
        }
    }
}
