//! The canned response module
//! Template tables for greetings, farewells, small talk and fallbacks, plus
//! the seam for an external rephrasing service

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::SearchType;

const GREETINGS: &[&str] = &[
    "Hello! 👋 I'm your APS Mangla assistant. How can I help you with information about the school today?",
    "Hi there! 🏫 I'm here to help you with questions about APS Mangla. What would you like to know?",
    "Assalamualaikum! Welcome to APS Mangla's virtual assistant. I'm ready to help with your questions!",
];

const FAREWELLS: &[&str] = &[
    "Goodbye! Feel free to come back anytime if you have more questions about APS Mangla. 👋",
    "Thank you for using APS Mangla's assistant! Have a great day! 🌟",
    "Khuda hafiz! I'm always here if you need more help with school information. 📚",
];

const SMALL_TALK_HOW_ARE_YOU: &str = "I'm doing great, thank you for asking! I'm here and ready to help you with information about APS Mangla. What would you like to know? 😊";

const SMALL_TALK_WHAT_CAN_YOU_DO: &str = "I can help you with information about APS Mangla! I know about our principal, subjects like ICS, school policies, schedules, and much more. Just ask me anything about the school! 🎓";

const SMALL_TALK_CAPABILITIES: &str = "I'm specialized in providing information about APS Mangla. I can answer questions about staff, curriculum, facilities, admission procedures, and general school information. How can I assist you today? 📖";

/// Fallbacks for queries that look like questions but match nothing.
const NO_MATCH_QUESTION: &[&str] = &[
    "I don't have specific information about that question yet. I focus on APS Mangla school details like our principal, subjects, facilities, and policies. Is there something else about the school I can help with?",
    "That's not in my current knowledge base about APS Mangla. I can help with information about teachers, curriculum, school facilities, and general school information. What else would you like to know?",
    "I'm still building my knowledge about APS Mangla! I don't have details about that particular topic, but I can assist with questions about staff, subjects like ICS, school procedures, and more. How else can I help?",
];

/// Fallbacks for everything else that matches nothing.
const NO_MATCH_GENERAL: &[&str] = &[
    "I don't have information about that specific topic yet. I'm focused on APS Mangla school information. You could ask about our principal, subjects, facilities, or other school-related matters.",
    "That's not something I know about yet. I specialize in APS Mangla information - try asking about teachers, classes, schedules, or school policies!",
    "I'm still learning! I don't have details about that, but I can help with APS Mangla school information. What else would you like to know about the school?",
];

/// Picks a greeting. The random source is injected so tests can pin it.
pub fn greeting(rng: &mut impl Rng) -> &'static str {
    GREETINGS.choose(rng).copied().unwrap_or(GREETINGS[0])
}

pub fn farewell(rng: &mut impl Rng) -> &'static str {
    FAREWELLS.choose(rng).copied().unwrap_or(FAREWELLS[0])
}

/// Small talk is routed by content, not randomness, like the rest of the
/// system routes it.
pub fn small_talk(query: &str) -> &'static str {
    let q = query.to_lowercase();
    if q.contains("how are you") || q.contains("how is it going") {
        SMALL_TALK_HOW_ARE_YOU
    } else if q.contains("what can you do") || q.contains("what do you know") {
        SMALL_TALK_WHAT_CAN_YOU_DO
    } else {
        SMALL_TALK_CAPABILITIES
    }
}

pub fn no_match(rng: &mut impl Rng, is_question: bool) -> &'static str {
    let table = if is_question { NO_MATCH_QUESTION } else { NO_MATCH_GENERAL };
    table.choose(rng).copied().unwrap_or(table[0])
}

/// Frames a medium-confidence answer. Reverse lookups are phrased as a known
/// fact rather than a direct answer.
pub fn framed_answer(answer: &str, search_type: SearchType) -> String {
    match search_type {
        SearchType::ReverseLookup => {
            format!("Based on what I know about APS Mangla, {}", answer.to_lowercase())
        }
        _ => format!("According to my information about APS Mangla, {}", answer.to_lowercase()),
    }
}

#[derive(Debug, thiserror::Error)]
#[error("rephrasing failed: {0}")]
pub struct RephraseError(pub String);

/// External generative rephrasing of a retrieved answer.
///
/// Strictly cosmetic: implementations may call out to a text-generation
/// service to phrase the answer conversationally, but they must only use the
/// retrieved answer as source material. The bot treats this as a fallible
/// optional dependency and falls back to [`framed_answer`] when it fails, so
/// correctness never depends on it.
pub trait Rephrase: Send {
    fn rephrase(
        &self,
        query: &str,
        answer: &str,
        search_type: SearchType,
    ) -> Result<String, RephraseError>;
}

#[cfg(test)]
mod responder_test {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_greeting_is_deterministic_with_seeded_rng() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(greeting(&mut a), greeting(&mut b));
    }

    #[test]
    fn test_greeting_comes_from_table() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            assert!(GREETINGS.contains(&greeting(&mut rng)));
        }
    }

    #[test]
    fn test_small_talk_routing() {
        assert_eq!(small_talk("How are you?"), SMALL_TALK_HOW_ARE_YOU);
        assert_eq!(small_talk("what can you do"), SMALL_TALK_WHAT_CAN_YOU_DO);
        assert_eq!(small_talk("what's up"), SMALL_TALK_CAPABILITIES);
    }

    #[test]
    fn test_no_match_tables_differ_by_question_flag() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(NO_MATCH_QUESTION.contains(&no_match(&mut rng, true)));
        assert!(NO_MATCH_GENERAL.contains(&no_match(&mut rng, false)));
    }

    #[test]
    fn test_framed_answer_by_search_type() {
        let framed = framed_answer("Talat Wazir is the principal", SearchType::ReverseLookup);
        assert!(framed.starts_with("Based on what I know"));
        assert!(framed.contains("talat wazir is the principal"));

        let framed = framed_answer("Talat Wazir is the principal", SearchType::QuestionMatch);
        assert!(framed.starts_with("According to my information"));
    }
}
