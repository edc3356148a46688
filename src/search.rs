//! Client-side search over the listing projection.
//!
//! Pure filtering, recomputed per keystroke by the caller: the underlying
//! listing is never mutated and an empty query returns the full list in its
//! original order.

use crate::models::SchoolSummary;

/// Return the subsequence of `schools` whose name, city, or address contains
/// `query` as a case-insensitive substring.
#[must_use]
pub fn filter_schools(schools: &[SchoolSummary], query: &str) -> Vec<SchoolSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return schools.to_vec();
    }

    schools
        .iter()
        .filter(|school| {
            school.name.to_lowercase().contains(&query)
                || school.city.to_lowercase().contains(&query)
                || school.address.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
