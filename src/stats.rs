use crate::config::ChartConfig;
use std::collections::{BTreeMap, HashMap};

/// Fold one repository's language breakdown into the running totals.
///
/// Excluded languages are skipped outright; aliases are resolved through the
/// merge table before their bytes are added. Addition is commutative, so the
/// order repositories (or languages within one) arrive in does not affect the
/// final mapping.
pub fn accumulate(
    totals: &mut BTreeMap<String, u64>,
    breakdown: HashMap<String, u64>,
    cfg: &ChartConfig,
) {
    for (lang, bytes) in breakdown {
        if cfg.exclude.contains(&lang) {
            continue;
        }
        let canonical = cfg.merge.get(&lang).cloned().unwrap_or(lang);
        *totals.entry(canonical).or_insert(0) += bytes;
    }
}

/// Sort descending by byte count and keep the top `top_n` entries. Ties are
/// broken alphabetically by language name so truncation at the boundary is
/// deterministic.
pub fn rank(totals: &BTreeMap<String, u64>, top_n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> =
        totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(top_n);
    entries
}

/// Percentage share of each ranked entry, against the sum of the kept subset
/// (not the pre-truncation total), rounded to two decimals.
pub fn percentages(ranked: &[(String, u64)]) -> Vec<f64> {
    let total: u64 = ranked.iter().map(|(_, v)| v).sum();
    if total == 0 {
        return vec![0.0; ranked.len()];
    }
    ranked
        .iter()
        .map(|(_, v)| ((*v as f64 / total as f64) * 100.0 * 100.0).round() / 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;

    fn cfg() -> ChartConfig {
        ChartConfig::default()
    }

    fn breakdown(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn aggregation_is_order_independent() {
        let repos = [
            breakdown(&[("Python", 100), ("Rust", 40)]),
            breakdown(&[("Rust", 60), ("HTML", 5)]),
            breakdown(&[("Python", 300)]),
        ];

        let mut forward = BTreeMap::new();
        for b in repos.iter() {
            accumulate(&mut forward, b.clone(), &cfg());
        }

        let mut reversed = BTreeMap::new();
        for b in repos.iter().rev() {
            accumulate(&mut reversed, b.clone(), &cfg());
        }

        assert_eq!(forward, reversed);
        assert_eq!(forward.get("Python"), Some(&400));
        assert_eq!(forward.get("Rust"), Some(&100));
    }

    #[test]
    fn excluded_languages_contribute_nothing() {
        let mut totals = BTreeMap::new();
        accumulate(
            &mut totals,
            breakdown(&[("Python", 500), ("JavaScript", 500)]),
            &cfg(),
        );
        assert!(!totals.contains_key("JavaScript"));

        let ranked = rank(&totals, 8);
        let pcts = percentages(&ranked);
        assert_eq!(pcts, vec![100.00]);
    }

    #[test]
    fn merge_reattributes_all_bytes() {
        let mut totals = BTreeMap::new();
        accumulate(
            &mut totals,
            breakdown(&[("Python", 300), ("Jupyter Notebook", 200)]),
            &cfg(),
        );
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Python"), Some(&500));
    }

    #[test]
    fn merge_applies_across_repositories() {
        let mut totals = BTreeMap::new();
        accumulate(&mut totals, breakdown(&[("Jupyter Notebook", 70)]), &cfg());
        accumulate(&mut totals, breakdown(&[("Python", 30)]), &cfg());
        assert_eq!(totals.get("Python"), Some(&100));
    }

    #[test]
    fn ranking_truncates_and_sorts_descending() {
        let mut totals = BTreeMap::new();
        for (i, lang) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            totals.insert(lang.to_string(), (i as u64 + 1) * 10);
        }

        let ranked = rank(&totals, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], ("E".to_string(), 50));
        assert_eq!(ranked[1], ("D".to_string(), 40));
        assert_eq!(ranked[2], ("C".to_string(), 30));

        // Fewer distinct languages than N keeps them all.
        assert_eq!(rank(&totals, 10).len(), 5);
    }

    #[test]
    fn ranking_breaks_ties_alphabetically() {
        let totals: BTreeMap<String, u64> = [("Zig", 100), ("Ada", 100), ("Nim", 100)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();

        let ranked = rank(&totals, 2);
        assert_eq!(ranked[0].0, "Ada");
        assert_eq!(ranked[1].0, "Nim");
    }

    #[test]
    fn percentages_match_worked_example() {
        let totals: BTreeMap<String, u64> = [("Python", 800u64), ("Go", 150), ("HTML", 50)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();

        let ranked = rank(&totals, 8);
        let pcts = percentages(&ranked);
        assert_eq!(pcts, vec![80.00, 15.00, 5.00]);
    }

    #[test]
    fn percentages_sum_to_hundred_of_kept_subset() {
        // Truncation drops bytes; the denominator is the kept subset, so the
        // shares still sum to ~100 rather than to the untruncated share.
        let totals: BTreeMap<String, u64> = [
            ("Python", 700u64),
            ("Rust", 300),
            ("Go", 299),
            ("C", 151),
            ("HTML", 97),
            ("CSS", 53),
            ("Shell", 31),
            ("Lua", 17),
            ("Dropped1", 11),
            ("Dropped2", 7),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        let ranked = rank(&totals, 8);
        assert_eq!(ranked.len(), 8);
        assert!(!ranked.iter().any(|(l, _)| l.starts_with("Dropped")));

        let pcts = percentages(&ranked);
        let sum: f64 = pcts.iter().sum();
        assert!((sum - 100.0).abs() < 0.1, "sum was {sum}");
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        let totals: BTreeMap<String, u64> = BTreeMap::new();
        let ranked = rank(&totals, 8);
        assert!(ranked.is_empty());
        // No division by zero on the empty slice either.
        assert!(percentages(&ranked).is_empty());
    }
}
