// extract_topics — the full pipeline: clean, vectorize, factor, summarize.
//
// Too little text is a normal outcome here, not an error: a brand-new user
// with one post simply gets the "not enough data" sentinel.

use tracing::debug;

use super::clean::clean;
use super::nmf::Nmf;
use super::tfidf::TfidfMatrix;

pub const DEFAULT_NUM_TOPICS: usize = 5;
pub const DEFAULT_WORDS_PER_TOPIC: usize = 5;

/// Fixed NMF seed so the same corpus always yields the same topics.
const NMF_SEED: u64 = 42;

/// Separator between topics in the rendered summary.
const TOPIC_SEPARATOR: &str = " || ";

/// The outcome of topic extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicSummary {
    /// Fewer than two usable texts (or an empty vocabulary) — nothing to
    /// factor.
    NotEnoughData,
    /// Topics joined by " || ", words within a topic space-joined in
    /// ascending weight order.
    Topics(String),
}

impl std::fmt::Display for TopicSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicSummary::NotEnoughData => write!(f, "Not enough text to analyze"),
            TopicSummary::Topics(s) => write!(f, "{s}"),
        }
    }
}

/// Extract up to `num_topics` topics from `texts`, each represented by its
/// `words_per_topic` highest-weighted terms.
///
/// The effective topic count is clamped to what the corpus can support
/// (no more components than documents or terms), so over-asking shrinks
/// the output instead of failing.
pub fn extract_topics(texts: &[String], num_topics: usize, words_per_topic: usize) -> TopicSummary {
    let cleaned: Vec<String> = texts
        .iter()
        .map(|t| clean(t))
        .filter(|t| !t.is_empty())
        .collect();

    if cleaned.len() < 2 || num_topics == 0 || words_per_topic == 0 {
        return TopicSummary::NotEnoughData;
    }

    let matrix = TfidfMatrix::fit(&cleaned);
    if matrix.vocabulary.is_empty() {
        return TopicSummary::NotEnoughData;
    }

    let k = num_topics
        .min(matrix.rows.len())
        .min(matrix.vocabulary.len());

    let components = Nmf::new(k, NMF_SEED).fit(&matrix.rows);

    debug!(
        documents = cleaned.len(),
        terms = matrix.vocabulary.len(),
        components = components.len(),
        "Factored corpus into topics"
    );

    let topics: Vec<String> = components
        .iter()
        .map(|component| {
            // Indices of the top terms, kept in ascending weight order
            let mut order: Vec<usize> = (0..component.len()).collect();
            order.sort_by(|&a, &b| {
                component[a]
                    .partial_cmp(&component[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let start = order.len().saturating_sub(words_per_topic);
            order[start..]
                .iter()
                .map(|&i| matrix.vocabulary[i].as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    TopicSummary::Topics(topics.join(TOPIC_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        [
            "The borrow checker rejects aliased mutable references",
            "Lifetimes annotate how long references stay valid",
            "Borrowing rules prevent data races at compile time",
            "Sourdough starter needs regular flour feedings",
            "Proofing bread dough overnight improves the crumb",
            "Baking sourdough loaves with a dutch oven crust",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_empty_input_returns_sentinel() {
        assert_eq!(extract_topics(&[], 5, 5), TopicSummary::NotEnoughData);
    }

    #[test]
    fn test_single_text_returns_sentinel() {
        let texts = vec!["just one post about rust".to_string()];
        assert_eq!(extract_topics(&texts, 5, 5), TopicSummary::NotEnoughData);
    }

    #[test]
    fn test_blank_texts_do_not_count() {
        // Two inputs, but one cleans down to nothing
        let texts = vec!["real content here".to_string(), "!!! @bob".to_string()];
        assert_eq!(extract_topics(&texts, 5, 5), TopicSummary::NotEnoughData);
    }

    #[test]
    fn test_topic_count_clamped_to_corpus() {
        let texts = vec![
            "compilers parse tokens".to_string(),
            "ovens bake bread".to_string(),
        ];
        // Asking for 5 topics of a 2-document corpus yields at most 2
        if let TopicSummary::Topics(s) = extract_topics(&texts, 5, 3) {
            assert!(s.split(" || ").count() <= 2);
        } else {
            panic!("expected topics");
        }
    }

    #[test]
    fn test_summary_has_requested_segments() {
        let summary = extract_topics(&corpus(), 2, 3);
        let TopicSummary::Topics(s) = summary else {
            panic!("expected topics");
        };
        let segments: Vec<&str> = s.split(" || ").collect();
        assert_eq!(segments.len(), 2);
        for segment in segments {
            let words: Vec<&str> = segment.split(' ').collect();
            assert!(!words.is_empty() && words.len() <= 3);
            assert!(words.iter().all(|w| !w.is_empty()));
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let a = extract_topics(&corpus(), 3, 4);
        let b = extract_topics(&corpus(), 3, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_topics_returns_sentinel() {
        assert_eq!(extract_topics(&corpus(), 0, 5), TopicSummary::NotEnoughData);
    }

    #[test]
    fn test_sentinel_displays_message() {
        assert_eq!(
            TopicSummary::NotEnoughData.to_string(),
            "Not enough text to analyze"
        );
    }
}
