//! Tests for the client-side listing search.

use school_directory::models::SchoolSummary;
use school_directory::search::filter_schools;

fn listing() -> Vec<SchoolSummary> {
    vec![
        SchoolSummary {
            id: 2,
            name: "Sunrise Academy".to_string(),
            address: "8 Lake View".to_string(),
            city: "Delhi".to_string(),
            image: String::new(),
        },
        SchoolSummary {
            id: 1,
            name: "Greenwood International School".to_string(),
            address: "12 Hill Road".to_string(),
            city: "Mumbai".to_string(),
            image: String::new(),
        },
    ]
}

#[test]
fn test_search_by_city_case_insensitive() {
    let schools = listing();
    let results = filter_schools(&schools, "mumbai");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Greenwood International School");
}

#[test]
fn test_search_by_name_substring() {
    let schools = listing();
    let results = filter_schools(&schools, "sunrise");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Sunrise Academy");
}

#[test]
fn test_search_by_address() {
    let schools = listing();
    let results = filter_schools(&schools, "hill road");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].city, "Mumbai");
}

#[test]
fn test_empty_query_returns_full_list_in_order() {
    let schools = listing();
    let results = filter_schools(&schools, "");
    assert_eq!(results, schools);
}

#[test]
fn test_whitespace_query_returns_full_list() {
    let schools = listing();
    let results = filter_schools(&schools, "   ");
    assert_eq!(results, schools);
}

#[test]
fn test_no_match_returns_empty() {
    let schools = listing();
    assert!(filter_schools(&schools, "zzz").is_empty());
}

#[test]
fn test_search_does_not_mutate_listing() {
    let schools = listing();
    let before = schools.clone();
    let _ = filter_schools(&schools, "school");
    assert_eq!(schools, before);
}

#[test]
fn test_matches_preserve_listing_order() {
    let schools = listing();
    // Both records match "a"; relative order must be untouched.
    let results = filter_schools(&schools, "a");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, 2);
    assert_eq!(results[1].id, 1);
}
