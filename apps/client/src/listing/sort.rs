use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::JobListing;

/// Ordering applied to the filtered view. `None` keeps server order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    None,
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable in-place sort of `listings` by `key`.
///
/// Listings without a parsable date always go last, whichever direction dates
/// are sorted in, and keep their relative order. `SortKey::None` leaves the
/// slice untouched; restoring filter order is the working set's job.
pub fn sort_listings(listings: &mut Vec<JobListing>, key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::DateDesc => sort_by_date(listings, true),
        SortKey::DateAsc => sort_by_date(listings, false),
        SortKey::TitleAsc => listings.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::TitleDesc => listings.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
}

fn sort_by_date(listings: &mut Vec<JobListing>, descending: bool) {
    // Parse once per listing instead of once per comparison.
    let mut keyed: Vec<(Option<DateTime<Utc>>, JobListing)> = listings
        .drain(..)
        .map(|job| (job.posted_at(), job))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_dates(*a, *b, descending));
    listings.extend(keyed.into_iter().map(|(_, job)| job));
}

fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Collation-style title order. Accents and case are ignored first, so
/// "Élan" files under E; then accented spellings follow plain ones; on a
/// case-only tie the lowercase spelling sorts first.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    fold_title(a)
        .cmp(&fold_title(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercase, decomposed, with combining marks dropped and `ß` spelled `ss`.
fn fold_title(title: &str) -> String {
    let mut folded = String::with_capacity(title.len());
    for ch in title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        match ch {
            'ß' => folded.push_str("ss"),
            _ => folded.push(ch),
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::listing;

    fn titles(jobs: &[JobListing]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    fn dated() -> Vec<JobListing> {
        vec![
            listing("b", "c", "Full-time", "2024-03-02T00:00:00Z"),
            listing("nodate", "c", "Full-time", "N/A"),
            listing("a", "c", "Full-time", "2024-03-01T00:00:00Z"),
            listing("c", "c", "Full-time", "2024-03-03T00:00:00Z"),
            listing("garbage", "c", "Full-time", "soon"),
        ]
    }

    #[test]
    fn test_parse_sort_keys() {
        assert_eq!(SortKey::from_str("date-desc", false).unwrap(), SortKey::DateDesc);
        assert_eq!(SortKey::from_str("Title-Asc", true).unwrap(), SortKey::TitleAsc);
        assert!(SortKey::from_str("newest", true).is_err());
    }

    #[test]
    fn test_display_matches_value_names() {
        for key in SortKey::value_variants() {
            let value = key.to_possible_value().unwrap();
            assert_eq!(value.get_name(), key.as_str());
        }
    }

    #[test]
    fn test_date_desc_puts_unparsable_last() {
        let mut jobs = dated();
        sort_listings(&mut jobs, SortKey::DateDesc);
        assert_eq!(titles(&jobs), vec!["c", "b", "a", "nodate", "garbage"]);
    }

    #[test]
    fn test_date_asc_puts_unparsable_last() {
        let mut jobs = dated();
        sort_listings(&mut jobs, SortKey::DateAsc);
        assert_eq!(titles(&jobs), vec!["a", "b", "c", "nodate", "garbage"]);
    }

    #[test]
    fn test_date_sort_is_stable_for_equal_dates() {
        let mut jobs = vec![
            listing("first", "c", "x", "2024-03-01"),
            listing("second", "c", "x", "2024-03-01T00:00:00Z"),
            listing("third", "c", "x", "2024-03-01"),
        ];
        sort_listings(&mut jobs, SortKey::DateDesc);
        assert_eq!(titles(&jobs), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let mut jobs = vec![
            listing("backend", "c", "x", ""),
            listing("Android", "c", "x", ""),
            listing("Cloud", "c", "x", ""),
        ];
        sort_listings(&mut jobs, SortKey::TitleAsc);
        assert_eq!(titles(&jobs), vec!["Android", "backend", "Cloud"]);
        sort_listings(&mut jobs, SortKey::TitleDesc);
        assert_eq!(titles(&jobs), vec!["Cloud", "backend", "Android"]);
    }

    #[test]
    fn test_title_case_tie_puts_lowercase_first() {
        assert_eq!(compare_titles("rust", "Rust"), Ordering::Less);
        assert_eq!(compare_titles("Rust", "rust"), Ordering::Greater);
        assert_eq!(compare_titles("Rust", "Rust"), Ordering::Equal);
    }

    #[test]
    fn test_title_sort_folds_accents() {
        assert_eq!(compare_titles("Élan Engineer", "Zeta Engineer"), Ordering::Less);
        assert_eq!(compare_titles("Ingenieur", "Ingénieur"), Ordering::Less);
        assert_eq!(compare_titles("Straße", "Strasse Planer"), Ordering::Less);

        let mut jobs = vec![
            listing("Zeta Engineer", "c", "x", ""),
            listing("Élan Engineer", "c", "x", ""),
            listing("Ärztin", "c", "x", ""),
            listing("Backend", "c", "x", ""),
        ];
        sort_listings(&mut jobs, SortKey::TitleAsc);
        assert_eq!(
            titles(&jobs),
            vec!["Ärztin", "Backend", "Élan Engineer", "Zeta Engineer"]
        );
    }

    #[test]
    fn test_none_leaves_order() {
        let mut jobs = dated();
        sort_listings(&mut jobs, SortKey::None);
        assert_eq!(jobs, dated());
    }
}
