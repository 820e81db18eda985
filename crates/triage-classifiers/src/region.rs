//! Region and compliance classification
//!
//! Countries are matched by exact name after trimming and title-casing.
//! There is no alias table: "USA" or "Deutschland" belong to no region.

use triage_core::RegionFacts;

pub const UNITED_STATES: &str = "United States";
pub const CANADA: &str = "Canada";
pub const JAPAN: &str = "Japan";

/// EU member states routed with the EU
pub const EU_COUNTRIES: [&str; 20] = [
    "Austria",
    "Belgium",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Ireland",
    "Italy",
    "Luxembourg",
    "Netherlands",
    "Poland",
    "Portugal",
    "Slovakia",
    "Spain",
    "Sweden",
];

/// Countries routed with Greater China, Viet Nam included
pub const GREATER_CHINA: [&str; 5] = ["China", "Hong Kong", "Macao", "Taiwan", "Viet Nam"];

/// Marker of a US FDA malfunction MDR in reportability text
pub const FDA_MALFUNCTION_REPORTABLE: &str = "US FDA - MDR: MALFUNCTION - REPORTABLE";

/// Trim, then title-case each run of letters
pub fn normalize_country(country: &str) -> String {
    title_case(country.trim())
}

/// Upper-case the first letter of every run of letters, lower-case the rest
///
/// Characters whose case mapping expands to several characters are kept as-is.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        let mapped = if in_word { single_lower(c) } else { single_upper(c) };
        in_word = mapped.is_alphabetic();
        out.push(mapped);
    }

    out
}

fn single_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn single_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub fn is_us(country: &str) -> bool {
    normalize_country(country) == UNITED_STATES
}

pub fn is_eu(country: &str) -> bool {
    EU_COUNTRIES.contains(&normalize_country(country).as_str())
}

pub fn is_canada(country: &str) -> bool {
    normalize_country(country) == CANADA
}

pub fn is_japan(country: &str) -> bool {
    normalize_country(country) == JAPAN
}

pub fn is_greater_china(country: &str) -> bool {
    GREATER_CHINA.contains(&normalize_country(country).as_str())
}

/// All region memberships of a country, normalizing once
pub fn region_facts(country: &str) -> RegionFacts {
    let name = normalize_country(country);
    let name = name.as_str();

    RegionFacts {
        is_us: name == UNITED_STATES,
        is_eu: EU_COUNTRIES.contains(&name),
        is_canada: name == CANADA,
        is_japan: name == JAPAN,
        is_greater_china: GREATER_CHINA.contains(&name),
    }
}

/// Case-insensitive substring test for the FDA malfunction marker
pub fn is_fda_reportable(reportability: &str) -> bool {
    reportability.to_uppercase().contains(FDA_MALFUNCTION_REPORTABLE)
}
