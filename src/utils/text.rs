use crate::models::configuration::TextMatching;

/// Removes `<...>` markup tags, keeping the text between them.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Word sequence used for essay matching: tags stripped, optionally
/// uppercased, ASCII punctuation dropped, split on whitespace.
pub fn normalize_words(text: &str, case_insensitive: bool) -> Vec<String> {
    let mut text = strip_tags(text);
    if case_insensitive {
        text = text.to_uppercase();
    }
    text.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Edit distance counting single-character insertions, deletions and
/// substitutions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Whether `needle` occurs in `words` as a contiguous run whose summed
/// per-word distance stays within `max_distance`. An empty needle never
/// matches.
pub fn contains_words(words: &[String], needle: &[String], max_distance: usize) -> bool {
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }

    for start in 0..=(words.len() - needle.len()) {
        let mut distance = 0;
        for (offset, expected) in needle.iter().enumerate() {
            distance += levenshtein(&words[start + offset], expected);
            if distance > max_distance {
                break;
            }
        }
        if distance <= max_distance {
            return true;
        }
    }
    false
}

/// Compares a whole answer string against a reference text.
pub fn is_match(answer: &str, expected: &str, matching: TextMatching) -> bool {
    match_distance(answer, expected, matching).is_some()
}

/// Edit distance between an answer and a reference text when they match
/// under `matching`. Exact modes report 0 on a match.
pub fn match_distance(answer: &str, expected: &str, matching: TextMatching) -> Option<usize> {
    let (answer, expected) = (answer.trim(), expected.trim());
    match matching {
        TextMatching::CaseInsensitive => (answer.to_uppercase() == expected.to_uppercase()).then_some(0),
        TextMatching::CaseSensitive => (answer == expected).then_some(0),
        other => Some(levenshtein(answer, expected)).filter(|d| *d <= other.max_distance()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        normalize_words(text, true)
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
        assert_eq!(levenshtein("über", "uber"), 1);
    }

    #[test]
    fn test_normalize_words() {
        assert_eq!(words("<p>The <b>right</b> answer!</p>"), vec!["THE", "RIGHT", "ANSWER"]);
        assert_eq!(normalize_words("Hello,   World.", false), vec!["Hello", "World"]);
    }

    #[test]
    fn exact_window_requires_same_sequence() {
        let text = words("the quick brown fox");
        assert!(contains_words(&text, &words("quick brown"), 0));
        assert!(!contains_words(&text, &words("brown quick"), 0));
        assert!(!contains_words(&text, &words("quick fox"), 0));
    }

    #[test]
    fn distance_is_summed_over_the_window() {
        let text = words("the quikc brwn fox");
        assert!(!contains_words(&text, &words("quick brown"), 2));
        assert!(contains_words(&text, &words("quick brown"), 3));
    }

    #[test]
    fn larger_threshold_never_loses_a_match() {
        let text = words("an apple a day keeps the doctor away");
        let needles = ["apple", "aple", "doctr awy", "banana", "keeps teh"];
        for needle in needles {
            let needle = words(needle);
            let mut found_before = false;
            for max in 0..=5 {
                let found = contains_words(&text, &needle, max);
                assert!(found || !found_before);
                found_before = found;
            }
        }
    }

    #[test]
    fn empty_or_longer_needle_never_matches() {
        let text = words("short text");
        assert!(!contains_words(&text, &[], 5));
        assert!(!contains_words(&text, &words("much longer reference text"), 5));
    }

    #[test]
    fn test_is_match() {
        assert!(is_match("berlin", "Berlin", TextMatching::CaseInsensitive));
        assert!(!is_match("berlin", "Berlin", TextMatching::CaseSensitive));
        assert!(is_match("Berln", "Berlin", TextMatching::Levenshtein1));
        assert!(!is_match("Brln", "Berlin", TextMatching::Levenshtein1));
    }

    #[test]
    fn test_match_distance() {
        assert_eq!(match_distance(" Berlin ", "berlin", TextMatching::CaseInsensitive), Some(0));
        assert_eq!(match_distance("car", "cat", TextMatching::Levenshtein1), Some(1));
        assert_eq!(match_distance("cat", "cat", TextMatching::Levenshtein1), Some(0));
        assert_eq!(match_distance("dog", "cat", TextMatching::Levenshtein2), None);
    }
}
