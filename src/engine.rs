//! The retrieval engine module
//! Scores a query against both the question side and the answer side of the
//! knowledge base and classifies the match

use serde::Serialize;
use tracing::{debug, error};

use crate::store::QaPair;
use crate::vectorizer::{TfidfVectorizer, dot_product};

/// Default similarity floor below which a match is rejected. The same
/// threshold applies to question matches and reverse lookups.
pub const MIN_CONFIDENCE: f32 = 0.1;

/// How a search result was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// The query matched a stored question.
    QuestionMatch,
    /// The query named something that appears inside a stored answer,
    /// e.g. asking "Who is Talat Wazir?" when an answer mentions that name.
    ReverseLookup,
    /// Nothing scored above the confidence floor.
    NoMatch,
}

/// Outcome of a search: the best answer (if any), how strongly it matched,
/// and which side of the knowledge base produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub answer: Option<String>,
    pub confidence: f32,
    pub search_type: SearchType,
}

impl SearchResult {
    fn no_match(confidence: f32) -> SearchResult {
        SearchResult { answer: None, confidence, search_type: SearchType::NoMatch }
    }
}

/// A term-weighted vector space over the knowledge base.
///
/// One vocabulary is fitted over the combined `"question answer"` text of
/// every pair, then questions and answers are projected through it
/// *separately*. Sharing the vocabulary is what makes a query phrased like an
/// answer fragment ("Talat Wazir") score meaningfully against both sides
/// under one consistent weighting.
///
/// An engine is immutable once built. Rebuild with [`RetrievalEngine::build`]
/// whenever the knowledge base changes and swap the whole value; nothing is
/// updated in place.
///
/// # Examples
///
/// ```
/// use faqbot::{QaPair, RetrievalEngine, SearchType};
///
/// let pairs = vec![QaPair {
///     id: 1,
///     question: "Who is the principal of APS Mangla?".to_string(),
///     answer: "Talat Wazir is the principal of APS Mangla".to_string(),
/// }];
/// let engine = RetrievalEngine::build(&pairs);
///
/// let result = engine.search("Who is the principal?", 0.1);
/// assert_eq!(result.search_type, SearchType::QuestionMatch);
/// assert!(result.confidence > 0.1);
/// ```
pub struct RetrievalEngine {
    answers: Vec<String>,
    vectorizer: Option<TfidfVectorizer>,
    // Row-major, one row per pair, dimension() columns each
    question_vectors: Vec<f32>,
    answer_vectors: Vec<f32>,
}

impl RetrievalEngine {
    /// An engine over nothing. Every query returns a no-match with
    /// confidence 0.
    pub fn empty() -> RetrievalEngine {
        RetrievalEngine {
            answers: Vec::new(),
            vectorizer: None,
            question_vectors: Vec::new(),
            answer_vectors: Vec::new(),
        }
    }

    /// Builds the vector space for the given pairs.
    ///
    /// Never fails: an empty knowledge base, or a degenerate one where no
    /// text survives tokenization, produces an empty engine (the failure is
    /// logged). The construction is deterministic, so building twice from the
    /// same pairs gives identical similarity scores.
    pub fn build(pairs: &[QaPair]) -> RetrievalEngine {
        if pairs.is_empty() {
            return RetrievalEngine::empty();
        }

        let combined: Vec<String> = pairs
            .iter()
            .map(|p| format!("{} {}", p.question, p.answer))
            .collect();

        let vectorizer = match TfidfVectorizer::fit(&combined) {
            Ok(v) => v,
            Err(e) => {
                error!("failed to build vector space: {}", e);
                return RetrievalEngine::empty();
            }
        };

        let mut question_vectors = Vec::with_capacity(pairs.len() * vectorizer.dimension());
        let mut answer_vectors = Vec::with_capacity(pairs.len() * vectorizer.dimension());
        for pair in pairs {
            question_vectors.extend(vectorizer.transform(&pair.question));
            answer_vectors.extend(vectorizer.transform(&pair.answer));
        }

        debug!(pairs = pairs.len(), dimension = vectorizer.dimension(), "vector space rebuilt");

        RetrievalEngine {
            answers: pairs.iter().map(|p| p.answer.clone()).collect(),
            vectorizer: Some(vectorizer),
            question_vectors,
            answer_vectors,
        }
    }

    /// True when the engine holds no vector space.
    pub fn is_empty(&self) -> bool {
        self.vectorizer.is_none()
    }

    /// Number of indexed pairs.
    pub fn count(&self) -> usize {
        self.answers.len()
    }

    /// Searches both sides of the knowledge base for the query.
    ///
    /// The question side is preferred on ties. A match on either side must
    /// reach `min_confidence`; otherwise the result is a no-match carrying
    /// the best score seen. Never fails: on an empty engine the result is
    /// `(None, 0.0, NoMatch)`.
    pub fn search(&self, query: &str, min_confidence: f32) -> SearchResult {
        let Some(vectorizer) = &self.vectorizer else {
            return SearchResult::no_match(0.0);
        };

        let query_vector = vectorizer.transform(&query.to_lowercase());

        let (q_idx, q_score) = self.best_row(&self.question_vectors, &query_vector);
        let (a_idx, a_score) = self.best_row(&self.answer_vectors, &query_vector);

        debug!(q_idx, q_score, a_idx, a_score, "scored query");

        if q_score >= a_score && q_score >= min_confidence {
            SearchResult {
                answer: Some(self.answers[q_idx].clone()),
                confidence: q_score,
                search_type: SearchType::QuestionMatch,
            }
        } else if a_score >= min_confidence {
            SearchResult {
                answer: Some(self.answers[a_idx].clone()),
                confidence: a_score,
                search_type: SearchType::ReverseLookup,
            }
        } else {
            SearchResult::no_match(q_score.max(a_score))
        }
    }

    /// Stable argmax of cosine similarity over the rows of a matrix.
    /// The first row wins ties, so identical records resolve to the
    /// earlier-added one. Scores are clamped to [0, 1].
    fn best_row(&self, matrix: &[f32], query: &[f32]) -> (usize, f32) {
        let dim = query.len();
        let mut best_idx = 0;
        let mut best_score = f32::NEG_INFINITY;
        for i in 0..self.answers.len() {
            let row = &matrix[i * dim..(i + 1) * dim];
            let score = dot_product(row, query);
            if score > best_score {
                best_idx = i;
                best_score = score;
            }
        }
        (best_idx, best_score.clamp(0.0, 1.0))
    }
}
