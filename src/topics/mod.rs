// Topic extraction — TF-IDF vectorization and NMF factorization over a
// user's post history.

pub mod clean;
pub mod extract;
pub mod nmf;
pub mod tfidf;

pub use extract::{extract_topics, TopicSummary, DEFAULT_NUM_TOPICS, DEFAULT_WORDS_PER_TOPIC};
