//! Street address heuristics used by building search.
//!
//! Inputs are free-form Russian street addresses typed into the listing
//! form ("ул. Ленина, д. 10", "10 Ленина", "пр-т Мира 5/2"). The helpers
//! split them into a street part and a house-number part so they can be
//! matched against the building reference table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Leading street-type markers, applied once each and in this order.
static STREET_TYPE_PREFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(?:ул\.|улица|ул)\s+",
        r"(?i)^(?:пр-т\.|проспект|пр\.|пр)\s+",
        r"(?i)^(?:бул\.|бульвар)\s+",
        r"(?i)^(?:пл\.|площадь)\s+",
        r"(?i)^(?:пер\.|переулок)\s+",
        r"(?i)^(?:пр-д\.|проезд|прд)\s+",
        r"(?i)^(?:шоссе|ш\.|ш)\s+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("street prefix pattern"))
    .collect()
});

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.,]").expect("punctuation pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// House / building markers standing on their own ("д.", "дом", "корп.").
static STANDALONE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:корпус|корп|дом|стр|д|к)\b\.?").expect("marker pattern"));

/// Markers glued to the number that follows them ("д10", "корп.2").
static GLUED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:корпус|корп|дом|стр|д|к)\.?(\d)").expect("glued marker pattern"));

/// Tried in order, first match wins. A first capture starting with a digit
/// is the house number, whichever pattern matched.
static ADDRESS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // street, number with a letter suffix
        r"(?i)^(.+?)[,\s]+(\d+\s*[\wА-Яа-я\-/]*)$",
        // street, number
        r"(?i)^(.+?)[,\s]+(\d+\s*[\w\-/]*)$",
        // number street
        r"(?i)^(\d+\s*[\wА-Яа-я\-/]*)\s+(.+)$",
        // street, д. number
        r"(?i)^(.+?),?\s*д\.?\s*(\d+\s*[\wА-Яа-я\-/]*)$",
        // street, дом number
        r"(?i)^(.+?),?\s*дом\s*(\d+\s*[\wА-Яа-я\-/]*)$",
        // street дом number
        r"(?i)^(.+?)\s+дом\s+(\d+\s*[\wА-Яа-я\-/]*)$",
        // street,10к1
        r"(?i)^(.+?),?\s*(\d+\s*[\wА-Яа-я\-/]*)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("address pattern"))
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
}

/// Strips the street-type marker and punctuation, lower-cases the rest.
pub fn normalize_street(raw: &str) -> String {
    let mut street = raw.to_string();
    for prefix in STREET_TYPE_PREFIXES.iter() {
        street = prefix.replace(&street, "").into_owned();
    }
    let street = PUNCTUATION.replace_all(&street, " ");
    let street = WHITESPACE.replace_all(&street, " ");
    street.trim().to_lowercase()
}

pub fn parse_address(address: &str) -> ParsedAddress {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return ParsedAddress::default();
    }

    let without_markers = STANDALONE_MARKER.replace_all(trimmed, " ");
    let without_markers = GLUED_MARKER.replace_all(&without_markers, " $1");
    let normalized = WHITESPACE.replace_all(&without_markers, " ");
    let normalized = normalized.trim();

    for pattern in ADDRESS_PATTERNS.iter() {
        let Some(caps) = pattern.captures(normalized) else {
            continue;
        };
        let first = caps.get(1).map_or("", |m| m.as_str());
        let second = caps.get(2).map_or("", |m| m.as_str());
        let (street, number) = if first.starts_with(|c: char| c.is_ascii_digit()) {
            (second, first)
        } else {
            (first, second)
        };
        return ParsedAddress {
            street: Some(normalize_street(street)),
            house_number: Some(number.trim().to_lowercase()),
        };
    }

    ParsedAddress {
        street: Some(normalize_street(normalized)),
        house_number: None,
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
