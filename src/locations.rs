//! Static location-code table for the CWA 36-hour forecast dataset.
//!
//! Maps short caller-facing codes (URL path segments) to the region names
//! the CWA open-data API expects in its `locationName` query parameter.

/// Supported location codes and their CWA region names.
///
/// Lookup is exact-match — no case folding or whitespace trimming, so the
/// public codes are the literal strings below.
const LOCATIONS: &[(&str, &str)] = &[
    ("taipei", "臺北市"),
    ("new-taipei", "新北市"),
    ("taichung", "臺中市"),
    ("kaohsiung", "高雄市"),
];

/// Resolve a location code to its CWA region name.
pub fn resolve(code: &str) -> Option<&'static str> {
    LOCATIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// All supported location codes, in table order.
pub fn supported_codes() -> Vec<String> {
    LOCATIONS.iter().map(|(c, _)| (*c).to_string()).collect()
}
