/// Stateless string helpers shared by the parser, the rules and the checkers.
use std::path::Path;

use regex::Regex;

/// Remove the characters that legacy metadata records had escaped away.
pub fn strip_special_chars(text: &str) -> String {
    let special_re = Regex::new(r"[@_!#$%^&*<>?|/\\}{~:]").expect("valid regex");
    special_re.replace_all(text, "").into_owned()
}

pub fn is_lowercase(word: &str) -> bool {
    word.to_lowercase() == word
}

pub fn is_uppercase(word: &str) -> bool {
    word.to_uppercase() == word
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&chars.as_str().to_lowercase());
    out
}

pub fn is_capitalized(word: &str) -> bool {
    capitalize(word) == word
}

/// Key used for every case-insensitive ordering in the contract.
pub fn casefold(text: &str) -> String {
    text.to_lowercase()
}

/// Stable case-insensitive sort.
pub fn sort_casefold(values: &mut [String]) {
    values.sort_by_cached_key(|v| casefold(v));
}

/// Whether `values` is already in stable case-insensitive order.
pub fn is_casefold_sorted<S: AsRef<str>>(values: &[S]) -> bool {
    values
        .windows(2)
        .all(|pair| casefold(pair[0].as_ref()) <= casefold(pair[1].as_ref()))
}

/// Check whether `observed` appears in `canonical` order.
///
/// Walks `canonical` from its end, consuming the tail of `observed` on each
/// exact match. Returns 0 when all of `observed` was consumed, otherwise the
/// number of observed elements left over; `observed[n - 1]` is then the
/// first element found out of order.
pub fn subsequence_mismatch<A, B>(observed: &[A], canonical: &[B]) -> usize
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut remaining = observed.len();
    for expected in canonical.iter().rev() {
        if remaining == 0 {
            return 0;
        }
        if expected.as_ref() == observed[remaining - 1].as_ref() {
            remaining -= 1;
        }
    }
    remaining
}

/// Name of the last component of `path` (the folder name for a sample path).
pub fn folder_name(path: &Path) -> String {
    path.components()
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Line-oriented diff of two texts in a unified-like layout.
///
/// Every line of both inputs is listed once: common lines prefixed with a
/// space, lines only in `expected` with `-`, lines only in `actual` with `+`.
pub fn line_diff(expected: &str, actual: &str, expected_label: &str, actual_label: &str) -> String {
    let old: Vec<&str> = expected.lines().collect();
    let new: Vec<&str> = actual.lines().collect();

    // lcs[i][j] = length of the longest common subsequence of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out = vec![format!("--- {expected_label}"), format!("+++ {actual_label}")];
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            out.push(format!(" {}", old[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            out.push(format!("-{}", old[i]));
            i += 1;
        } else {
            out.push(format!("+{}", new[j]));
            j += 1;
        }
    }
    out.extend(old[i..].iter().map(|line| format!("-{line}")));
    out.extend(new[j..].iter().map(|line| format!("+{line}")));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_special_chars() {
        assert_eq!(strip_special_chars("Find a route: A -> B!"), "Find a route A - B");
        assert_eq!(strip_special_chars("plain text"), "plain text");
        assert_eq!(strip_special_chars(r"a\b/c_d{e}~"), "abcde");
    }

    #[test]
    fn test_letter_case_helpers() {
        assert!(is_lowercase("map"));
        assert!(is_lowercase("3d"));
        assert!(!is_lowercase("Map"));
        assert!(is_uppercase("KML"));
        assert!(!is_uppercase("Kml"));
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
        assert!(is_capitalized("Network"));
        assert!(!is_capitalized("GeoPackage"));
    }

    #[test]
    fn test_sort_casefold_is_stable() {
        let mut values = vec![
            "b".to_string(),
            "A".to_string(),
            "a".to_string(),
            "C".to_string(),
        ];
        sort_casefold(&mut values);
        assert_eq!(values, vec!["A", "a", "b", "C"]);
        assert!(is_casefold_sorted(&values));
        assert!(!is_casefold_sorted(&["Network", "Data"]));
        assert!(is_casefold_sorted::<&str>(&[]));
    }

    #[test]
    fn test_subsequence_mismatch() {
        let canonical = ["a", "h", "b", "g", "d", "c"];
        assert_eq!(subsequence_mismatch(&["a", "b", "c"], &canonical), 0);
        assert_eq!(subsequence_mismatch::<&str, &str>(&[], &canonical), 0);
        assert_eq!(subsequence_mismatch(&["a", "h", "b", "g", "d", "c"], &canonical), 0);

        // "c" before "b": "c" is reported as the first out-of-order element.
        let observed = ["a", "c", "b"];
        let remaining = subsequence_mismatch(&observed, &canonical);
        assert_eq!(remaining, 2);
        assert_eq!(observed[remaining - 1], "c");
    }

    #[test]
    fn test_subsequence_mismatch_rejects_repeats() {
        let canonical = ["a", "b", "c"];
        assert_ne!(subsequence_mismatch(&["a", "b", "b"], &canonical), 0);
    }

    #[test]
    fn test_folder_name() {
        assert_eq!(folder_name(Path::new("/Shared/Samples/Display map")), "Display map");
        assert_eq!(folder_name(Path::new("/Shared/Samples/Display map/")), "Display map");
        assert_eq!(folder_name(Path::new("relative")), "relative");
    }

    #[test]
    fn test_line_diff_marks_changes() {
        let diff = line_diff("a\nb\nc", "a\nx\nc", "derived", "persisted");
        assert_eq!(diff, "--- derived\n+++ persisted\n a\n-b\n+x\n c");
    }

    #[test]
    fn test_line_diff_identical() {
        let diff = line_diff("a\nb", "a\nb", "l", "r");
        assert_eq!(diff, "--- l\n+++ r\n a\n b");
    }
}
