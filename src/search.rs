use std::collections::BTreeSet;

use crate::catalog::{Catalog, Chapter, ChapterId};

/// Chapters matching `query`, optionally restricted to `favorites`, in catalog order.
///
/// A chapter matches when the query is empty, is a case-insensitive substring of
/// either name, or equals the decimal id exactly.
pub fn filter<'a>(
    catalog: &'a Catalog,
    query: &str,
    favorites_only: bool,
    favorites: &BTreeSet<ChapterId>,
) -> Vec<&'a Chapter> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|c| matches(c, query, &needle))
        .filter(|c| !favorites_only || favorites.contains(&c.id))
        .collect()
}

fn matches(chapter: &Chapter, raw: &str, needle: &str) -> bool {
    needle.is_empty()
        || chapter.name.to_lowercase().contains(needle)
        || chapter.english_name.to_lowercase().contains(needle)
        || chapter.id.to_string() == raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new("https://example.org")
    }

    fn ids(chapters: &[&Chapter]) -> Vec<u16> {
        chapters.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let catalog = catalog();
        assert_eq!(filter(&catalog, "", false, &BTreeSet::new()).len(), 114);
    }

    #[test]
    fn exact_id_matches_only_that_chapter() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "7", false, &BTreeSet::new())), vec![7]);
        assert_eq!(ids(&filter(&catalog, "114", false, &BTreeSet::new())), vec![114]);
    }

    #[test]
    fn id_match_is_exact_not_prefix() {
        let catalog = catalog();
        assert!(filter(&catalog, "07", false, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn arabic_substring() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "الناس", false, &BTreeSet::new())), vec![114]);
    }

    #[test]
    fn transliteration_is_case_insensitive() {
        let catalog = catalog();
        let lower = filter(&catalog, "kahf", false, &BTreeSet::new());
        let upper = filter(&catalog, "KAHF", false, &BTreeSet::new());
        assert_eq!(ids(&lower), vec![18]);
        assert_eq!(ids(&lower), ids(&upper));
    }

    #[test]
    fn results_keep_catalog_order() {
        let catalog = catalog();
        let result = ids(&filter(&catalog, "al-", false, &BTreeSet::new()));
        assert!(result.len() > 10);
        assert!(result.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn favorites_only_restricts_results() {
        let catalog = catalog();
        let favorites: BTreeSet<_> = [1, 18, 36]
            .into_iter()
            .filter_map(ChapterId::new)
            .collect();

        assert_eq!(ids(&filter(&catalog, "", true, &favorites)), vec![1, 18, 36]);
        assert_eq!(ids(&filter(&catalog, "kahf", true, &favorites)), vec![18]);
        assert!(filter(&catalog, "nas", true, &favorites).is_empty());
        assert!(filter(&catalog, "", true, &BTreeSet::new()).is_empty());
    }

    proptest! {
        #[test]
        fn case_does_not_change_results(query in "[A-Za-z' -]{0,8}") {
            let catalog = catalog();
            let none = BTreeSet::new();
            let upper = ids(&filter(&catalog, &query.to_uppercase(), false, &none));
            let lower = ids(&filter(&catalog, &query.to_lowercase(), false, &none));
            prop_assert_eq!(upper, lower);
        }

        #[test]
        fn filtering_is_idempotent(query in "[a-z]{0,4}", favorites_only in any::<bool>()) {
            let catalog = catalog();
            let favorites: BTreeSet<_> = (1..=114).step_by(3).filter_map(ChapterId::new).collect();
            let first = ids(&filter(&catalog, &query, favorites_only, &favorites));
            let second = ids(&filter(&catalog, &query, favorites_only, &favorites));
            prop_assert_eq!(first, second);
        }
    }
}
