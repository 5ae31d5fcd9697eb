//! # faqbot - A FAQ Chatbot Retrieval Core
//!
//! faqbot matches a free-text query against a curated set of question/answer
//! pairs and returns the best answer with a confidence score. Queries are
//! scored with TF-IDF cosine similarity against both the question side and
//! the answer side of the knowledge base, so "Who is Talat Wazir?" finds the
//! record whose *answer* mentions that name (a reverse lookup) even though no
//! stored question does. Low-confidence queries fall back to canned
//! responses.
//!
//! ## Example
//!
//! ```
//! use faqbot::{QaPair, RetrievalEngine, SearchType};
//!
//! let pairs = vec![QaPair {
//!     id: 1,
//!     question: "Who is the principal of APS Mangla?".to_string(),
//!     answer: "Talat Wazir is the principal of APS Mangla".to_string(),
//! }];
//! let engine = RetrievalEngine::build(&pairs);
//!
//! // Query phrased like a stored question
//! let result = engine.search("Who is the principal?", 0.1);
//! assert_eq!(result.search_type, SearchType::QuestionMatch);
//!
//! // Query naming an entity that only appears in an answer
//! let result = engine.search("Who is Talat Wazir?", 0.1);
//! assert_eq!(result.search_type, SearchType::ReverseLookup);
//! ```

mod bot;
mod engine;
mod intent;
mod responder;
mod store;
pub mod server;
pub mod tokenize;
pub mod vectorizer;

pub use bot::{ChatBot, Reply};
pub use engine::{MIN_CONFIDENCE, RetrievalEngine, SearchResult, SearchType};
pub use intent::{QueryAnalysis, analyze};
pub use responder::{Rephrase, RephraseError};
pub use store::{KnowledgeBase, QaPair, StoreError, hash_password};
pub use vectorizer::VectorizeError;
