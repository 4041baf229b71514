//! Canonical region enumeration and per-region aggregates.
//!
//! The trade and roster tables key regions by two-letter postal code, the
//! boundary topology by full name and numeric id. This module owns the
//! fixed code ↔ name table; numeric ids are resolved by the geometry
//! index (`crate::geometry`).

use rust_decimal::Decimal;

/// Every known region: the 50 states plus DC and the inhabited
/// territories. Aggregation always produces exactly this set.
const REGIONS: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
    ("AS", "American Samoa"),
    ("GU", "Guam"),
    ("MP", "Northern Mariana Islands"),
    ("PR", "Puerto Rico"),
    ("VI", "U.S. Virgin Islands"),
];

/// Returns the fixed (code, name) enumeration of known regions.
pub fn regions() -> &'static [(&'static str, &'static str)] {
    REGIONS
}

/// Looks up the canonical display name for a postal code.
pub fn region_name_for_code(code: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Looks up the postal code for a canonical display name.
pub fn region_code_for_name(name: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(c, _)| *c)
}

/// One geographic unit with its summed trade volume.
///
/// The set of aggregates is always the full region enumeration; a region
/// with no trades carries a zero volume rather than being dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionAggregate {
    /// Canonical display name (matches the topology's `name` property).
    pub name: String,
    /// Two-letter postal code.
    pub code: String,
    /// Zero-padded numeric id from the boundary topology, once resolved.
    pub id: Option<String>,
    /// Summed trade volume in dollars.
    pub volume: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_covers_states_and_territories() {
        assert_eq!(REGIONS.len(), 56);
        assert_eq!(region_name_for_code("CA"), Some("California"));
        assert_eq!(region_name_for_code("PR"), Some("Puerto Rico"));
    }

    #[test]
    fn name_lookup_round_trips() {
        for (code, name) in REGIONS {
            assert_eq!(region_code_for_name(name), Some(*code));
            assert_eq!(region_name_for_code(code), Some(*name));
        }
    }

    #[test]
    fn lookups_ignore_case() {
        assert_eq!(region_name_for_code("ca"), Some("California"));
        assert_eq!(region_code_for_name("california"), Some("CA"));
    }

    #[test]
    fn unknown_keys_resolve_to_none() {
        assert_eq!(region_name_for_code("ZZ"), None);
        assert_eq!(region_code_for_name("Atlantis"), None);
    }
}
