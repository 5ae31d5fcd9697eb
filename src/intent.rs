//! The query analysis module
//! Pattern checks that flag a query as a question, greeting, farewell or
//! small talk, independent of the knowledge base

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Per-query intent flags. Stateless and derived; never persisted.
///
/// The flags are checked independently, so a query can raise several at
/// once ("Hello, who is the principal?" is both a greeting and a question).
/// Precedence between them is the caller's decision.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct QueryAnalysis {
    pub is_question: bool,
    pub is_greeting: bool,
    pub is_farewell: bool,
    pub is_small_talk: bool,
}

fn question_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(what|who|when|where|why|how|which)\b").unwrap())
}

fn greeting_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(hi|hello|hey|salam|assalam|assalamualaikum)\b|\bgood\s+(morning|afternoon|evening)\b")
            .unwrap()
    })
}

fn farewell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(bye|goodbye|see\s+you|thanks|thank\s+you|khuda\s+hafiz)\b").unwrap()
    })
}

fn small_talk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(how\s+are\s+you|what's\s+up|how\s+is\s+it\s+going)\b|\b(what\s+can\s+you\s+do|what\s+do\s+you\s+know)\b")
            .unwrap()
    })
}

/// Analyzes a query. Pure function over the text; the knowledge base is
/// never consulted.
///
/// A query counts as a question when it contains a question word as a whole
/// word or ends with `?`. All matching is case-insensitive via lowercasing.
pub fn analyze(query: &str) -> QueryAnalysis {
    let q = query.to_lowercase();
    let q = q.trim();

    QueryAnalysis {
        is_question: question_re().is_match(q) || q.ends_with('?'),
        is_greeting: greeting_re().is_match(q),
        is_farewell: farewell_re().is_match(q),
        is_small_talk: small_talk_re().is_match(q),
    }
}
