// src/analysis/keywords.rs
//! Technology keyword matching over free-text descriptions.

/// Keywords found in a text, in keyword-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordScore {
    matched: Vec<String>,
}

impl KeywordScore {
    pub fn matched(&self) -> &[String] {
        &self.matched
    }

    pub fn count(&self) -> usize {
        self.matched.len()
    }

    pub fn into_matched(self) -> Vec<String> {
        self.matched
    }
}

/// Case-insensitive substring match of every keyword against `text`.
///
/// Matching ignores word boundaries: "r" is found inside "server".
pub fn score<S: AsRef<str>>(text: &str, keywords: &[S]) -> KeywordScore {
    if text.is_empty() {
        return KeywordScore::default();
    }

    let text = text.to_lowercase();
    let matched = keywords
        .iter()
        .map(|keyword| keyword.as_ref())
        .filter(|keyword| !keyword.is_empty() && text.contains(&keyword.to_lowercase()))
        .map(str::to_string)
        .collect();

    KeywordScore { matched }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: [&str; 5] = ["python", "sql", "power bi", "r", "aws"];

    #[test]
    fn test_matches_in_keyword_order() {
        let result = score("AWS and Python, with some SQL", &KEYWORDS);
        assert_eq!(result.matched(), ["python", "sql", "aws"]);
        assert_eq!(result.count(), 3);
    }

    #[test]
    fn test_multi_word_keyword() {
        let result = score("Dashboards sous Power BI", &KEYWORDS);
        assert_eq!(result.matched(), ["power bi", "r"]);
    }

    #[test]
    fn test_substring_without_word_boundary() {
        let result = score("server", &["r"]);
        assert_eq!(result.matched(), ["r"]);
    }

    #[test]
    fn test_empty_text_scores_nothing() {
        let result = score("", &KEYWORDS);
        assert!(result.matched().is_empty());
        assert_eq!(result.count(), 0);
    }

    #[test]
    fn test_no_keywords() {
        let empty: [&str; 0] = [];
        assert_eq!(score("python", &empty).count(), 0);
    }

    #[test]
    fn test_count_matches_subsequence_of_keywords() {
        let texts = ["", "sql", "Python SQL power bi", "nothing here", "R"];
        for text in texts {
            let result = score(text, &KEYWORDS);
            assert_eq!(result.count(), result.matched().len());

            let mut cursor = KEYWORDS.iter();
            for found in result.matched() {
                assert!(cursor.any(|k| k == found), "{} out of order for {:?}", found, text);
            }
        }
    }
}
