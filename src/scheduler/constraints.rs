//! Constraint resolution.
//!
//! Parses the raw per-course constraint encodings and folds them, together
//! with the selected global exclusion snapshot, into the final excluded-period
//! set per course. Pure transforms over strings and sets; no storage access.
//!
//! ## Encoding
//!
//! A constraint list is a semicolon-separated sequence of entries of the form
//! `CODE(p1,p2,...)`, e.g. `"BCS101(1,2,3);GST111(5,6)"`. Whitespace around
//! tokens is trimmed. Malformed integer tokens are dropped silently;
//! operator-entered data is tolerated rather than rejected wholesale. A later
//! entry for the same course code overwrites an earlier one within the same
//! raw string.

use std::collections::{BTreeMap, BTreeSet};

/// Final excluded-period set per course code, sorted on both axes.
pub type CourseExclusionMap = BTreeMap<String, BTreeSet<u32>>;

/// Parse a semicolon-separated `CODE(p1,p2,...)` list into per-course period
/// sets. Entries without a well-formed, non-empty parenthesized group are
/// skipped.
pub fn parse_constraint_list(raw: &str) -> CourseExclusionMap {
    let mut map = CourseExclusionMap::new();
    if raw.trim().is_empty() {
        return map;
    }

    for entry in raw.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if let Some((code, periods)) = parse_entry(entry) {
            map.insert(code, periods);
        }
    }
    map
}

/// Parse one `CODE(p1,p2,...)` entry.
///
/// The period group ends at the first `)` after the opening paren, and an
/// empty or whitespace-only group drops the whole entry: `"BCS101()"` means
/// no constraint, not an empty inclusive set (which would invert to a
/// full-grid exclusion).
fn parse_entry(entry: &str) -> Option<(String, BTreeSet<u32>)> {
    let open = entry.find('(')?;
    let close = open + 1 + entry[open + 1..].find(')')?;

    let code = entry[..open].trim();
    if code.is_empty() {
        return None;
    }

    let group = entry[open + 1..close].trim();
    if group.is_empty() {
        return None;
    }

    Some((code.to_string(), parse_period_tokens(group)))
}

/// Parse a comma-separated list of period indices, dropping malformed tokens.
fn parse_period_tokens(tokens: &str) -> BTreeSet<u32> {
    tokens
        .split(',')
        .filter_map(|tok| tok.trim().parse::<u32>().ok())
        .collect()
}

/// Set-complement inversion: `{0..total-1} \ inclusive`.
pub fn invert_periods(inclusive: &BTreeSet<u32>, total: u32) -> BTreeSet<u32> {
    (0..total).filter(|p| !inclusive.contains(p)).collect()
}

/// Resolve the final excluded-period set per course.
///
/// 1. The inclusive encoding is parsed and inverted against `total_periods`.
/// 2. The exclusive encoding is parsed directly.
/// 3. A course present in both contributes the union of its inverted and
///    direct sets; a course present in one uses that set unchanged.
/// 4. The global exclusion set, when given, is unioned into every course
///    present in either encoding: a globally excluded period is excluded
///    for every course regardless of per-course rules.
pub fn resolve(
    inclusive_raw: &str,
    exclusive_raw: &str,
    total_periods: u32,
    global_excluded: Option<&BTreeSet<u32>>,
) -> CourseExclusionMap {
    let inclusive = parse_constraint_list(inclusive_raw);
    let exclusive = parse_constraint_list(exclusive_raw);

    let mut resolved = CourseExclusionMap::new();

    for (code, periods) in &inclusive {
        resolved.insert(code.clone(), invert_periods(periods, total_periods));
    }
    for (code, periods) in &exclusive {
        resolved
            .entry(code.clone())
            .or_default()
            .extend(periods.iter().copied());
    }

    if let Some(global) = global_excluded {
        for set in resolved.values_mut() {
            set.extend(global.iter().copied());
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[u32]) -> BTreeSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_parse_single_entry() {
        let map = parse_constraint_list("BCS101(1,2,3)");
        assert_eq!(map["BCS101"], set(&[1, 2, 3]));
    }

    #[test]
    fn test_parse_multiple_entries_with_whitespace() {
        let map = parse_constraint_list(" CSC101 (1, 2) ; GST111(5,6) ");
        assert_eq!(map.len(), 2);
        assert_eq!(map["CSC101"], set(&[1, 2]));
        assert_eq!(map["GST111"], set(&[5, 6]));
    }

    #[test]
    fn test_malformed_tokens_dropped_silently() {
        let map = parse_constraint_list("BCS101(1,x,3)");
        assert_eq!(map["BCS101"], set(&[1, 3]));
    }

    #[test]
    fn test_negative_tokens_dropped() {
        let map = parse_constraint_list("BCS101(-1,2)");
        assert_eq!(map["BCS101"], set(&[2]));
    }

    #[test]
    fn test_later_entry_overwrites_earlier() {
        let map = parse_constraint_list("BCS101(1,2);BCS101(7)");
        assert_eq!(map["BCS101"], set(&[7]));
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(parse_constraint_list("").is_empty());
        assert!(parse_constraint_list("   ").is_empty());
        assert!(parse_constraint_list("no parens here").is_empty());
        assert!(parse_constraint_list("(1,2)").is_empty());
        assert!(parse_constraint_list(";;;").is_empty());
    }

    #[test]
    fn test_empty_period_group_drops_entry() {
        assert!(parse_constraint_list("BCS101()").is_empty());
        assert!(parse_constraint_list("BCS101(   )").is_empty());
        // An inclusive entry with no periods must yield no constraint, not a
        // full-grid exclusion via inversion of the empty set.
        assert!(resolve("BCS101()", "", 4, None).is_empty());
        // Sibling entries are unaffected.
        let map = parse_constraint_list("BCS101();GST111(2)");
        assert_eq!(map.len(), 1);
        assert_eq!(map["GST111"], set(&[2]));
    }

    #[test]
    fn test_period_group_ends_at_first_close_paren() {
        let map = parse_constraint_list("CSC101(1,2))");
        assert_eq!(map["CSC101"], set(&[1, 2]));
    }

    #[test]
    fn test_duplicate_indices_collapse() {
        let map = parse_constraint_list("BCS101(4,4,4)");
        assert_eq!(map["BCS101"], set(&[4]));
    }

    #[test]
    fn test_invert_is_complement() {
        let inclusive = set(&[1, 2, 3]);
        assert_eq!(invert_periods(&inclusive, 10), set(&[0, 4, 5, 6, 7, 8, 9]));
    }

    #[test]
    fn test_invert_involution() {
        let s = set(&[0, 3, 7, 9]);
        let inverted = invert_periods(&s, 10);
        assert_eq!(invert_periods(&inverted, 10), s);
    }

    #[test]
    fn test_invert_empty_set_excludes_everything() {
        assert_eq!(invert_periods(&set(&[]), 4), set(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_invert_ignores_out_of_range_members() {
        let inclusive = set(&[2, 99]);
        assert_eq!(invert_periods(&inclusive, 4), set(&[0, 1, 3]));
    }

    #[test]
    fn test_resolve_merges_inverted_and_direct() {
        // Inclusive "BCS101(1,2,3)" over N=10 inverts to {0,4..9};
        // exclusive "BCS101(0,9)" adds nothing new beyond that union.
        let map = resolve("BCS101(1,2,3)", "BCS101(0,9)", 10, None);
        assert_eq!(map["BCS101"], set(&[0, 4, 5, 6, 7, 8, 9]));
    }

    #[test]
    fn test_resolve_course_in_only_one_encoding() {
        let map = resolve("BCS101(0,1)", "GST111(3)", 4, None);
        assert_eq!(map["BCS101"], set(&[2, 3]));
        assert_eq!(map["GST111"], set(&[3]));
    }

    #[test]
    fn test_resolve_applies_global_exclusions_to_all_courses() {
        let global = set(&[5]);
        let map = resolve("BCS101(0,1,2,3,4)", "GST111(0)", 6, Some(&global));
        assert_eq!(map["BCS101"], set(&[5]));
        assert_eq!(map["GST111"], set(&[0, 5]));
    }

    #[test]
    fn test_resolve_empty_encodings() {
        assert!(resolve("", "", 10, None).is_empty());
        // A global set alone introduces no course entries.
        assert!(resolve("", "", 10, Some(&set(&[1, 2]))).is_empty());
    }
}
