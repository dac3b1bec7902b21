use std::collections::{BTreeMap, BTreeSet};

use super::stop_words::is_stop_word;

/// Sparse term-weight vector keyed by vocabulary term.
pub(crate) type SparseVector = BTreeMap<String, f64>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum VectorizeError {
    #[error("empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,
}

/// Lower-cased word tokens of two or more characters, stop words removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|word| !is_stop_word(word))
        .collect()
}

/// Fit a vocabulary over exactly `documents` and return one L2-normalized
/// TF-IDF vector per document. Uses raw term counts and smoothed IDF,
/// `ln((1 + n) / (1 + df)) + 1`.
pub(crate) fn fit_transform(documents: &[&str]) -> Result<Vec<SparseVector>, VectorizeError> {
    let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for tokens in &tokenized {
        let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    if document_frequency.is_empty() {
        return Err(VectorizeError::EmptyVocabulary);
    }

    let n = documents.len() as f64;
    let idf: BTreeMap<&str, f64> = document_frequency
        .iter()
        .map(|(term, df)| (*term, ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0))
        .collect();

    let vectors = tokenized
        .iter()
        .map(|tokens| {
            let mut counts: SparseVector = BTreeMap::new();
            for token in tokens {
                *counts.entry(token.clone()).or_insert(0.0) += 1.0;
            }
            for (term, weight) in counts.iter_mut() {
                *weight *= idf.get(term.as_str()).copied().unwrap_or(0.0);
            }
            l2_normalize(counts)
        })
        .collect();

    Ok(vectors)
}

fn l2_normalize(mut vector: SparseVector) -> SparseVector {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// Cosine similarity; zero vectors compare as 0.0.
pub(crate) fn cosine(left: &SparseVector, right: &SparseVector) -> f64 {
    let (small, large) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    let dot: f64 = small
        .iter()
        .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
        .sum();
    let left_norm = left.values().map(|w| w * w).sum::<f64>().sqrt();
    let right_norm = right.values().map(|w| w * w).sum::<f64>().sqrt();

    if left_norm == 0.0 || right_norm == 0.0 {
        0.0
    } else {
        dot / (left_norm * right_norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_short_tokens_and_stop_words() {
        assert_eq!(
            tokenize("The C++ engineer, with 5 years of Rust_lang & SQL!"),
            vec!["engineer", "years", "rust_lang", "sql"]
        );
    }

    #[test]
    fn shared_terms_get_unit_idf() {
        let vectors = fit_transform(&["rust rust", "rust"]).expect("vocabulary");
        assert_eq!(vectors.len(), 2);
        assert!((vectors[0]["rust"] - 1.0).abs() < 1e-12);
        assert!((cosine(&vectors[0], &vectors[1]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unique_terms_are_weighted_above_shared_ones() {
        let vectors = fit_transform(&["rust kafka", "rust"]).expect("vocabulary");
        let first = &vectors[0];
        assert!(first["kafka"] > first["rust"]);
        let expected_idf = 1.5_f64.ln() + 1.0;
        let norm = (1.0 + expected_idf * expected_idf).sqrt();
        assert!((first["rust"] - 1.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn stop_word_only_documents_have_no_vocabulary() {
        assert_eq!(
            fit_transform(&["the and of", ""]),
            Err(VectorizeError::EmptyVocabulary)
        );
    }

    #[test]
    fn cosine_of_empty_vector_is_zero() {
        let vectors = fit_transform(&["rust", ""]).expect("vocabulary");
        assert_eq!(cosine(&vectors[0], &vectors[1]), 0.0);
    }
}
