// Document-term TF-IDF matrix.
//
// Each post is a separate document for IDF purposes: words appearing in
// most posts get downweighted, distinctive words get boosted. English stop
// words are excluded via the stop-words crate, and terms present in more
// than 80% of documents are dropped as corpus-wide noise. IDF is smoothed
// (ln((1+n)/(1+df)) + 1) and rows are L2-normalized, so document length
// doesn't dominate.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};

/// Terms appearing in more than this fraction of documents are excluded.
const MAX_DF: f64 = 0.8;

/// A fitted TF-IDF matrix: one row per document over a shared vocabulary.
pub struct TfidfMatrix {
    /// Terms in alphabetical order — column i of every row scores term i.
    pub vocabulary: Vec<String>,
    /// One L2-normalized row per input document.
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Build the matrix from already-cleaned documents.
    ///
    /// The vocabulary can come out empty (all terms stop words, too short,
    /// or above the document-frequency cap) — callers should treat that as
    /// "nothing to analyze".
    pub fn fit(docs: &[String]) -> Self {
        let stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();

        let tokenized: Vec<Vec<&str>> = docs
            .iter()
            .map(|doc| {
                doc.split_whitespace()
                    .filter(|t| t.len() >= 2 && !stop_words.contains(*t))
                    .collect()
            })
            .collect();

        // Document frequency per term
        let n_docs = docs.len();
        let mut df: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&&str> = tokens.iter().collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // Vocabulary: everything under the document-frequency cap, sorted
        let mut vocabulary: Vec<String> = df
            .iter()
            .filter(|(_, &count)| (count as f64 / n_docs as f64) <= MAX_DF)
            .map(|(term, _)| term.to_string())
            .collect();
        vocabulary.sort();

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let d = df[term.as_str()] as f64;
                ((1.0 + n_docs as f64) / (1.0 + d)).ln() + 1.0
            })
            .collect();

        // Raw counts scaled by IDF, then L2 row normalization
        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0_f64; vocabulary.len()];
                for token in tokens {
                    if let Some(&i) = index.get(token) {
                        row[i] += 1.0;
                    }
                }
                for (value, idf) in row.iter_mut().zip(&idf) {
                    *value *= idf;
                }
                let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for value in &mut row {
                        *value /= norm;
                    }
                }
                row
            })
            .collect();

        Self { vocabulary, rows }
    }
}
