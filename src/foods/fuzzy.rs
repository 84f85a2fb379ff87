//! Typo-tolerant name matching for food search.

use std::cmp::Ordering;

/// Names scoring at or below this are not returned.
pub const MIN_SCORE: f64 = 50.0;

/// Best alignment of the shorter string against every same-length window
/// of the longer one, as a 0-100 similarity.
pub fn partial_score(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let long: Vec<char> = long.chars().collect();
    long.windows(short_len)
        .map(|w| {
            let window: String = w.iter().collect();
            strsim::normalized_levenshtein(short, &window) * 100.0
        })
        .fold(0.0, f64::max)
}

/// Names scoring above `MIN_SCORE` against `key`, best first. Ties go to
/// the shorter name, then alphabetical.
pub fn rank<'a, I>(key: &str, names: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f64, &str)> = names
        .into_iter()
        .map(|name| (partial_score(key, name), name))
        .filter(|(score, _)| *score > MIN_SCORE)
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| {
        sb.partial_cmp(sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.len().cmp(&b.len()))
            .then_with(|| a.cmp(b))
    });
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_is_a_perfect_match() {
        assert_eq!(partial_score("yog", "greek yogurt"), 100.0);
        assert_eq!(partial_score("greek yogurt", "yog"), 100.0);
        assert_eq!(partial_score("", "yogurt"), 0.0);
    }

    #[test]
    fn tolerates_a_transposed_letter() {
        let s = partial_score("yougurt", "yogurt");
        assert!(s > MIN_SCORE && s < 100.0, "score {s}");
        assert!(partial_score("yougurt", "rye bread") <= MIN_SCORE);
    }

    #[test]
    fn ranks_best_first_then_shortest() {
        let names = ["frozen yogurt bar", "yogurt", "rye bread", "greek yogurt"];
        assert_eq!(
            rank("yog", names, 10),
            vec!["yogurt", "greek yogurt", "frozen yogurt bar"]
        );
        assert_eq!(rank("bread", names, 10), vec!["rye bread"]);
        assert!(rank("kale", names, 10).is_empty());
        assert_eq!(rank("yog", names, 1), vec!["yogurt"]);
    }
}
