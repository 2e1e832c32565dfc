//! teachbot: a teachable chatbot core with word-overlap question matching
//!
//! Incoming questions are resolved against a flat persisted question/answer
//! table: exact lookup first, then the stored question with the highest
//! containment score, and finally a teaching prompt that commits a new entry
//! and rewrites the knowledge file.

pub mod config;
pub mod error;
pub mod flow;
pub mod matcher;
pub mod store;

pub use config::BotConfig;
pub use error::{Error, Result};
pub use flow::{Prompter, Resolution, TeachingFlow, APOLOGY};
pub use matcher::{best_fuzzy_match, exact_match, FuzzyMatch, FUZZY_THRESHOLD};
pub use store::{vocabulary, KnowledgeBase, KnowledgeStore};
