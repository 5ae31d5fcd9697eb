//! The chatbot module
//! Wires the store, the retrieval engine and the response templates into one
//! conversational front door

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::{MIN_CONFIDENCE, RetrievalEngine, SearchResult};
use crate::intent::{self, QueryAnalysis};
use crate::responder::{self, Rephrase};
use crate::store::{KnowledgeBase, QaPair};

/// Confidence at or above which an answer is returned directly (optionally
/// rephrased by the external service).
const HIGH_CONFIDENCE: f32 = 0.4;
/// Confidence at or above which an answer is returned behind a template
/// framing.
const MEDIUM_CONFIDENCE: f32 = 0.2;

/// What the bot says back, with the match confidence formatted to two
/// decimals the way the web client displays it.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub response: String,
    pub confidence: String,
}

impl Reply {
    fn new(response: impl Into<String>, confidence: f32) -> Reply {
        Reply { response: response.into(), confidence: format!("{:.2}", confidence) }
    }
}

/// The assembled chatbot.
///
/// Owns the knowledge base and the vector space derived from it. Every
/// mutation rebuilds the vector space before returning, so a reply computed
/// after a successful [`add`](ChatBot::add) already sees the new record.
/// The engine is replaced wholesale on rebuild, never patched in place.
pub struct ChatBot {
    kb: KnowledgeBase,
    engine: RetrievalEngine,
    rng: StdRng,
    rephraser: Option<Box<dyn Rephrase>>,
}

impl ChatBot {
    /// Loads the knowledge base from `path` and builds the vector space.
    pub fn load<P: AsRef<Path>>(path: P) -> ChatBot {
        let kb = KnowledgeBase::load(path);
        let engine = RetrievalEngine::build(kb.all());
        ChatBot { kb, engine, rng: StdRng::from_entropy(), rephraser: None }
    }

    /// Pins the random source, making template selection deterministic.
    pub fn with_seed(mut self, seed: u64) -> ChatBot {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Plugs in an external rephrasing service for high-confidence answers.
    pub fn with_rephraser(mut self, rephraser: Box<dyn Rephrase>) -> ChatBot {
        self.rephraser = Some(rephraser);
        self
    }

    /// Produces a reply for a chat message.
    ///
    /// Precedence: greeting, then farewell, then small talk, then the Q&A
    /// confidence tiers. Internal failures never surface; the worst case is
    /// a generic fallback with confidence 0.
    pub fn reply(&mut self, message: &str) -> Reply {
        let analysis = intent::analyze(message);

        if analysis.is_greeting {
            return Reply::new(responder::greeting(&mut self.rng), 1.0);
        }
        if analysis.is_farewell {
            return Reply::new(responder::farewell(&mut self.rng), 1.0);
        }
        if analysis.is_small_talk {
            return Reply::new(responder::small_talk(message), 1.0);
        }

        let result = self.engine.search(message, MIN_CONFIDENCE);
        debug!(
            confidence = result.confidence,
            search_type = ?result.search_type,
            "retrieval outcome"
        );

        match &result.answer {
            Some(answer) if result.confidence >= HIGH_CONFIDENCE => {
                let response = self.rephrased_or_framed(message, answer, &result);
                Reply::new(response, result.confidence)
            }
            Some(answer) if result.confidence >= MEDIUM_CONFIDENCE => {
                let response = responder::framed_answer(answer, result.search_type);
                Reply::new(response, result.confidence)
            }
            _ => Reply::new(responder::no_match(&mut self.rng, analysis.is_question), 0.0),
        }
    }

    fn rephrased_or_framed(&self, query: &str, answer: &str, result: &SearchResult) -> String {
        if let Some(rephraser) = &self.rephraser {
            match rephraser.rephrase(query, answer, result.search_type) {
                // The service loves markdown emphasis; the chat client
                // renders plain text
                Ok(text) => return text.replace('*', "").trim().to_string(),
                Err(e) => warn!("rephrasing failed, falling back to template: {}", e),
            }
        }
        responder::framed_answer(answer, result.search_type)
    }

    /// Raw retrieval, bypassing templates. Used by the REPL's `ask`.
    pub fn search(&self, query: &str) -> SearchResult {
        self.engine.search(query, MIN_CONFIDENCE)
    }

    /// Intent flags for a message.
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        intent::analyze(query)
    }

    /// All stored pairs.
    pub fn pairs(&self) -> &[QaPair] {
        self.kb.all()
    }

    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.kb.verify_credentials(username, password)
    }

    /// Adds a pair and rebuilds the vector space before returning.
    pub fn add(&mut self, question: &str, answer: &str) -> bool {
        let ok = self.kb.add(question, answer);
        self.rebuild();
        ok
    }

    /// Updates a pair in place and rebuilds the vector space.
    ///
    /// The rebuild is unconditional: a mutation that failed to persist still
    /// changed the in-memory list, and the engine must stay aligned with it.
    pub fn update(&mut self, id: u32, question: &str, answer: &str) -> bool {
        let ok = self.kb.update(id, question, answer);
        self.rebuild();
        ok
    }

    /// Deletes a pair and rebuilds the vector space. Like
    /// [`update`](ChatBot::update), the rebuild is unconditional.
    pub fn delete(&mut self, id: u32) -> bool {
        let ok = self.kb.delete(id);
        self.rebuild();
        ok
    }

    /// Rebuilds the vector space from the current pair list. The old engine
    /// is dropped only after the new one is fully constructed.
    pub fn rebuild(&mut self) {
        self.engine = RetrievalEngine::build(self.kb.all());
    }
}
