//! This is the term weighting module
//! Provide a TF-IDF vectorizer fitted once over a corpus, plus the vector
//! math (L2 normalization, dot product) used on its output

use std::collections::HashMap;

use crate::tokenize::terms;

/// Vocabulary cap. When the corpus produces more distinct terms, only the
/// most frequent ones are kept.
pub const MAX_FEATURES: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum VectorizeError {
    #[error("no terms survived tokenization; vocabulary is empty")]
    EmptyVocabulary,
}

/// A TF-IDF weighting model fitted over a fixed corpus.
///
/// Fitting assigns every retained term a column index and an inverse document
/// frequency weight. Transforming a text afterwards projects it into that
/// fixed space; terms the model has never seen contribute nothing. The model
/// is never refitted for a query.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fits a vocabulary and IDF weights over the given documents.
    ///
    /// Document frequency is counted per document; IDF uses the smoothed
    /// form `ln((1 + n) / (1 + df)) + 1` so no term gets a zero weight.
    /// If more than [`MAX_FEATURES`] distinct terms appear, the terms with
    /// the highest total corpus count are kept (ties broken alphabetically).
    ///
    /// # Errors
    ///
    /// Returns [`VectorizeError::EmptyVocabulary`] when no document yields a
    /// single term, e.g. every text is empty or all stop words.
    pub fn fit(documents: &[String]) -> Result<TfidfVectorizer, VectorizeError> {
        let mut corpus_count: HashMap<String, u32> = HashMap::new();
        let mut doc_freq: HashMap<String, u32> = HashMap::new();

        for doc in documents {
            let doc_terms = terms(doc);
            for term in &doc_terms {
                *corpus_count.entry(term.clone()).or_insert(0) += 1;
            }
            let mut seen: Vec<&String> = doc_terms.iter().collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        if corpus_count.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        // Truncate to the most informative terms if over the cap
        let mut ranked: Vec<(String, u32)> = corpus_count.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(MAX_FEATURES);

        // Column order is alphabetical so fitting is deterministic
        let mut kept: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();

        let n_docs = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (col, term) in kept.into_iter().enumerate() {
            let df = doc_freq[&term] as f32;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, col);
        }

        Ok(TfidfVectorizer { vocabulary, idf })
    }

    /// Projects a text into the fitted space as a dense L2-normalized row.
    ///
    /// Unknown terms are ignored. A text with no known terms comes back as
    /// the zero vector, which scores 0 against everything.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut row = vec![0.0; self.idf.len()];
        for term in terms(text) {
            if let Some(&col) = self.vocabulary.get(&term) {
                row[col] += 1.0;
            }
        }
        for (col, weight) in row.iter_mut().enumerate() {
            *weight *= self.idf[col];
        }
        l2_norm(&mut row);
        row
    }

    /// Number of columns in the fitted space.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }
}

/// L2 normalization in place. The zero vector is left as-is so it scores
/// 0 against everything instead of producing NaN.
pub fn l2_norm(vector: &mut [f32]) {
    let norm = vector.iter()
        .map(|x| x * x)
        .sum::<f32>()
        .sqrt();

    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

/// Dot product of two equal-length rows. For L2-normalized rows this is the
/// cosine similarity.
pub fn dot_product(left: &[f32], right: &[f32]) -> f32 {
    left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum()
}

#[cfg(test)]
mod vectorizer_test {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    // ========== Fitting Tests ==========

    #[test]
    fn test_fit_single_document() {
        let v = TfidfVectorizer::fit(&docs(&["Talat Wazir is the principal"])).unwrap();
        // talat, wazir, principal + bigrams: talat wazir, wazir principal
        assert_eq!(v.dimension(), 5);
    }

    #[test]
    fn test_fit_empty_corpus_error() {
        let result = TfidfVectorizer::fit(&docs(&["", "the of and", "?!"]));
        assert!(matches!(result, Err(VectorizeError::EmptyVocabulary)));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = docs(&["school opens at eight", "school closes at two"]);
        let a = TfidfVectorizer::fit(&corpus).unwrap();
        let b = TfidfVectorizer::fit(&corpus).unwrap();

        assert_eq!(a.dimension(), b.dimension());
        assert_eq!(a.transform("school opens"), b.transform("school opens"));
    }

    #[test]
    fn test_fit_caps_vocabulary_at_max_features() {
        // 1200 distinct rare terms plus one frequent term, so fitting must
        // truncate. Single-word documents produce no bigrams.
        let mut corpus: Vec<String> = (0..1200).map(|i| format!("word{:04}", i)).collect();
        for _ in 0..5 {
            corpus.push("school".to_string());
        }
        let v = TfidfVectorizer::fit(&corpus).unwrap();

        assert_eq!(v.dimension(), MAX_FEATURES);
        // The high-frequency term survives truncation
        assert!(v.vocabulary.contains_key("school"));
        // Equal counts tie-break alphabetically, so the alphabetically last
        // rare terms are the ones dropped
        assert!(v.vocabulary.contains_key("word0000"));
        assert!(!v.vocabulary.contains_key("word1199"));
    }

    #[test]
    fn test_idf_weights_rare_terms_higher() {
        // "school" appears in both documents, "cricket" in one
        let v = TfidfVectorizer::fit(&docs(&[
            "school cricket ground",
            "school assembly hall",
        ]))
        .unwrap();

        let school_col = v.vocabulary["school"];
        let cricket_col = v.vocabulary["cricket"];
        assert!(v.idf[cricket_col] > v.idf[school_col]);
    }

    // ========== Transform Tests ==========

    #[test]
    fn test_transform_is_unit_length() {
        let v = TfidfVectorizer::fit(&docs(&["principal of APS Mangla"])).unwrap();
        let row = v.transform("principal of APS");

        let norm: f32 = row.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transform_unseen_terms_are_zero() {
        let v = TfidfVectorizer::fit(&docs(&["principal of APS Mangla"])).unwrap();
        let row = v.transform("bus timetable");

        assert!(row.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_transform_empty_text_is_zero_vector() {
        let v = TfidfVectorizer::fit(&docs(&["principal of APS Mangla"])).unwrap();
        let row = v.transform("");

        assert_eq!(row.len(), v.dimension());
        assert!(row.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_transform_exact_document_scores_one() {
        let v = TfidfVectorizer::fit(&docs(&["Talat Wazir is the principal"])).unwrap();
        let row = v.transform("Talat Wazir is the principal");
        let again = v.transform("talat wazir principal");

        // Same surviving terms either way, similarity must be 1
        assert!((dot_product(&row, &again) - 1.0).abs() < 1e-5);
    }

    // ========== Vector Math Tests ==========

    #[test]
    fn test_l2_norm_basic() {
        // [3, 4] normalizes to [0.6, 0.8]
        let mut vector = vec![3.0, 4.0];
        l2_norm(&mut vector);

        assert!((vector[0] - 0.6).abs() < 1e-6);
        assert!((vector[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_norm_zero_vector_unchanged() {
        let mut vector = vec![0.0, 0.0, 0.0];
        l2_norm(&mut vector);

        assert_eq!(vector, vec![0.0, 0.0, 0.0]);
        assert!(vector.iter().all(|x| !x.is_nan()));
    }

    #[test]
    fn test_dot_product_basic() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        // 1*4 + 2*5 + 3*6 = 32
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!((dot_product(&a, &b)).abs() < 1e-6);
    }
}
