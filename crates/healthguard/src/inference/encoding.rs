//! Ordinal codes for the categorical survey answers.
//!
//! Lookups never fail: an unrecognized label falls back to a fixed code so that
//! new or misspelled categories degrade to the population-typical answer instead
//! of rejecting the request. Matching is exact and case-sensitive.

pub const GENERAL_HEALTH_FALLBACK: u8 = 3;
pub const CHECKUP_FALLBACK: u8 = 4;
pub const AGE_FALLBACK: u8 = 5;

const GENERAL_HEALTH: [(&str, u8); 5] = [
    ("Poor", 1),
    ("Fair", 2),
    ("Good", 3),
    ("Very Good", 4),
    ("Excellent", 5),
];

const CHECKUP: [(&str, u8); 5] = [
    ("Never", 0),
    ("5 or more years ago", 1),
    ("Within the past 5 years", 2),
    ("Within the past 2 years", 3),
    ("Within the past year", 4),
];

const AGE_CATEGORY: [(&str, u8); 13] = [
    ("18-24", 1),
    ("25-29", 2),
    ("30-34", 3),
    ("35-39", 4),
    ("40-44", 5),
    ("45-49", 6),
    ("50-54", 7),
    ("55-59", 8),
    ("60-64", 9),
    ("65-69", 10),
    ("70-74", 11),
    ("75-79", 12),
    ("80+", 13),
];

fn lookup(table: &[(&str, u8)], label: &str, fallback: u8) -> u8 {
    table
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, code)| *code)
        .unwrap_or(fallback)
}

/// Self-rated general health, `Poor` = 1 through `Excellent` = 5.
pub fn general_health_code(label: &str) -> u8 {
    lookup(&GENERAL_HEALTH, label, GENERAL_HEALTH_FALLBACK)
}

/// Recency of the last routine checkup, `Never` = 0 through `Within the past year` = 4.
pub fn checkup_code(label: &str) -> u8 {
    lookup(&CHECKUP, label, CHECKUP_FALLBACK)
}

/// Five-year age band, `18-24` = 1 through `80+` = 13.
pub fn age_code(label: &str) -> u8 {
    lookup(&AGE_CATEGORY, label, AGE_FALLBACK)
}

pub fn yes_flag(value: &str) -> u8 {
    u8::from(value == "Yes")
}

pub fn male_flag(value: &str) -> u8 {
    u8::from(value == "Male")
}
