use std::cmp::Ordering;

use feruca::Collator;

use crate::types::SearchResult;

/// Orders two records by name using Unicode collation, ignoring case.
pub fn compare_by_name(a: &SearchResult, b: &SearchResult) -> Ordering {
   compare_with(&mut Collator::default(), a, b)
}

/// Sorts records by name in place. Records with equal names keep their
/// relative order.
pub fn sort_results(results: &mut [SearchResult]) {
   let mut collator = Collator::default();
   results.sort_by(|a, b| compare_with(&mut collator, a, b));
}

// Names are case-folded first so that only accents and letters decide the
// order; case-only differences compare equal.
fn compare_with(collator: &mut Collator, a: &SearchResult, b: &SearchResult) -> Ordering {
   let a = a.name.to_lowercase();
   let b = b.name.to_lowercase();
   collator.collate(a.as_str(), b.as_str())
}

#[cfg(test)]
mod tests {
   use super::*;

   fn named(name: &str, store_url: &str) -> SearchResult {
      SearchResult {
         name:            name.to_string(),
         artist_name:     String::new(),
         artwork_url_60:  String::new(),
         artwork_url_100: String::new(),
         store_url:       store_url.to_string(),
         kind:            "song".to_string(),
         currency:        "USD".to_string(),
         price:           0.0,
         genre:           String::new(),
      }
   }

   fn sorted_names(names: &[&str]) -> Vec<String> {
      let mut results: Vec<SearchResult> = names.iter().map(|n| named(n, "")).collect();
      sort_results(&mut results);
      results.into_iter().map(|r| r.name).collect()
   }

   #[test]
   fn test_sort_is_case_insensitive_and_stable() {
      let mut results = vec![
         named("banana", "1"),
         named("Apple", "2"),
         named("apple", "3"),
         named("Cherry", "4"),
      ];
      sort_results(&mut results);

      let order: Vec<&str> = results.iter().map(|r| r.store_url.as_str()).collect();
      assert_eq!(order, ["2", "3", "1", "4"]);
   }

   #[test]
   fn test_accented_names_sort_with_their_base_letter() {
      assert_eq!(sorted_names(&["Zebra", "Ärzte", "apple", "Élan", "eagle"]), [
         "apple", "Ärzte", "eagle", "Élan", "Zebra"
      ]);
   }

   #[test]
   fn test_compare_by_name() {
      assert_eq!(compare_by_name(&named("ABBA", ""), &named("abba", "")), Ordering::Equal);
      assert_eq!(compare_by_name(&named("Zebra", ""), &named("apple", "")), Ordering::Greater);
      assert_eq!(compare_by_name(&named("Ärzte", ""), &named("ärzte", "")), Ordering::Equal);
      assert_eq!(compare_by_name(&named("ab", ""), &named("ABC", "")), Ordering::Less);
      assert_eq!(compare_by_name(&named("Ölfeld", ""), &named("Pop", "")), Ordering::Less);
   }
}
