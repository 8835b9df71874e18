// Sequence similarity ratio used by the password similarity rule
//
// Ratcliff/Obershelp ratio: 2*M / T, where M is the total size of matching
// blocks found by recursively splitting around the longest common substring
// and T is the combined length of both inputs. Equivalent to the classic
// difflib ratio without junk heuristics.

/// Similarity of two strings in [0.0, 1.0]; 1.0 means identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_total(&a, &b);
    2.0 * matches as f64 / total as f64
}

fn matching_total(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (ai, bi, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_total(&a[..ai], &b[..bi]) + matching_total(&a[ai + len..], &b[bi + len..])
}

/// Longest common substring of `a` and `b`; ties resolve to the earliest
/// occurrence in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best_a = 0;
    let mut best_b = 0;
    let mut best_len = 0;
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut row = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let len = prev[j] + 1;
                row[j + 1] = len;
                if len > best_len {
                    best_len = len;
                    best_a = i + 1 - len;
                    best_b = j + 1 - len;
                }
            }
        }
        prev = row;
    }
    (best_a, best_b, best_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_fully_similar() {
        assert_eq!(sequence_ratio("abcdef", "abcdef"), 1.0);
    }

    #[test]
    fn disjoint_strings_have_zero_similarity() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn both_empty_counts_as_identical() {
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn partial_overlap_matches_difflib_ratio() {
        // matching blocks: "bcd" -> 2 * 3 / (4 + 4)
        assert_eq!(sequence_ratio("abcd", "bcde"), 0.75);
    }

    #[test]
    fn ratio_recurses_around_longest_block() {
        // "ab" and "cd" both match around the gap: 2 * 4 / (5 + 4)
        let ratio = sequence_ratio("abxcd", "abcd");
        assert!((ratio - 8.0 / 9.0).abs() < 1e-9);
    }
}
