//! Answer resolution: exact hit, fuzzy suggestion, or teach-and-persist

use std::collections::HashSet;

use crate::error::Result;
use crate::matcher::{self, FUZZY_THRESHOLD};
use crate::store::{self, KnowledgeBase, KnowledgeStore};

/// Fixed reply for questions the bot cannot answer yet
pub const APOLOGY: &str = "I'm sorry, I don't know the answer to that question.";

/// Synchronous front-end collaborator. Any surface that can ask a yes/no
/// question, collect a line of text, and show a message can drive the flow;
/// the core never touches the display directly.
pub trait Prompter {
    /// Ask whether to proceed
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Collect a free-form answer; `None` means the operator declined
    fn input(&mut self, title: &str, message: &str) -> Option<String>;

    /// Show an informational message
    fn notify(&mut self, title: &str, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        (**self).confirm(title, message)
    }

    fn input(&mut self, title: &str, message: &str) -> Option<String> {
        (**self).input(title, message)
    }

    fn notify(&mut self, title: &str, message: &str) {
        (**self).notify(title, message)
    }
}

/// Which path resolved a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The question was a stored key
    ExactHit,
    /// A near match scored above the threshold
    FuzzyHit,
    /// Nothing matched; the operator was offered a teaching prompt
    Unknown,
}

/// Orchestrates matching and teaching over an owned knowledge base
pub struct TeachingFlow<P: Prompter> {
    store: KnowledgeStore,
    base: KnowledgeBase,
    vocab: HashSet<String>,
    prompter: P,
}

impl<P: Prompter> TeachingFlow<P> {
    /// Load the persisted base and derive its vocabulary
    pub fn new(store: KnowledgeStore, prompter: P) -> Result<Self> {
        let base = store.load()?;
        let vocab = store::vocabulary(&base);
        Ok(Self {
            store,
            base,
            vocab,
            prompter,
        })
    }

    /// Current in-memory knowledge base
    pub fn base(&self) -> &KnowledgeBase {
        &self.base
    }

    /// Vocabulary derived from the current base
    pub fn vocabulary(&self) -> &HashSet<String> {
        &self.vocab
    }

    /// Resolve one question to a reply
    pub fn get_answer(&mut self, question: &str) -> Result<String> {
        self.resolve(question).map(|(answer, _)| answer)
    }

    /// Resolve one question, also reporting which path answered it
    pub fn resolve(&mut self, question: &str) -> Result<(String, Resolution)> {
        if let Some(answer) = matcher::exact_match(&self.base, question) {
            tracing::debug!("exact hit for '{}'", question);
            return Ok((answer.to_string(), Resolution::ExactHit));
        }

        if let Some(m) = matcher::best_fuzzy_match(&self.base, question) {
            if m.score > FUZZY_THRESHOLD {
                if let Some(answer) = self.base.get(&m.key).cloned() {
                    self.prompter.notify(
                        "I'm not sure",
                        &format!(
                            "I'm not sure about {}, but I think you might be asking about {}.",
                            question, m.key
                        ),
                    );
                    return Ok((answer, Resolution::FuzzyHit));
                }
            }
        }

        self.teach(question)?;
        // Teaching only affects future queries; this question still gets the
        // apology even when the operator just supplied its answer.
        Ok((APOLOGY.to_string(), Resolution::Unknown))
    }

    /// Offer to learn the answer to an unknown question
    fn teach(&mut self, question: &str) -> Result<()> {
        let wants_to_teach = self.prompter.confirm(
            "Unknown Question",
            &format!(
                "I don't know the answer to this question: {}. Would you like to teach me?",
                question
            ),
        );
        if !wants_to_teach {
            return Ok(());
        }

        let Some(answer) = self
            .prompter
            .input("Teach Me", "What's the answer to this question?")
        else {
            return Ok(());
        };

        self.base.insert(question.to_string(), answer);
        self.vocab = store::vocabulary(&self.base);

        // The entry stays in memory even when the save fails, so the next
        // successful save includes it.
        match self.store.save(&self.base) {
            Ok(()) => {
                tracing::info!("learned an answer for '{}'", question);
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to persist knowledge base: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted prompter that records every exchange
    #[derive(Default)]
    struct ScriptedPrompter {
        confirm_with: bool,
        input_with: Option<String>,
        confirms: Vec<String>,
        inputs: Vec<String>,
        notices: Vec<String>,
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, _title: &str, message: &str) -> bool {
            self.confirms.push(message.to_string());
            self.confirm_with
        }

        fn input(&mut self, _title: &str, message: &str) -> Option<String> {
            self.inputs.push(message.to_string());
            self.input_with.clone()
        }

        fn notify(&mut self, _title: &str, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn seeded_store(dir: &tempfile::TempDir, entries: &[(&str, &str)]) -> KnowledgeStore {
        let store = KnowledgeStore::new(dir.path().join("kb.json"));
        if !entries.is_empty() {
            let base: KnowledgeBase = entries
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string()))
                .collect();
            store.save(&base).unwrap();
        }
        store
    }

    #[test]
    fn exact_hit_returns_stored_answer_without_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[("hello", "hi there")]);
        let mut prompter = ScriptedPrompter::default();

        {
            let mut flow = TeachingFlow::new(store, &mut prompter).unwrap();
            let (answer, resolution) = flow.resolve("hello").unwrap();
            assert_eq!(answer, "hi there");
            assert_eq!(resolution, Resolution::ExactHit);
            assert_eq!(flow.base().len(), 1);
        }

        assert!(prompter.confirms.is_empty());
        assert!(prompter.notices.is_empty());
    }

    #[test]
    fn fuzzy_hit_above_threshold_suggests_the_near_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[("what is your name", "ChatBot")]);
        let mut prompter = ScriptedPrompter::default();

        {
            let mut flow = TeachingFlow::new(store, &mut prompter).unwrap();
            let (answer, resolution) = flow.resolve("what is your name today").unwrap();
            assert_eq!(answer, "ChatBot");
            assert_eq!(resolution, Resolution::FuzzyHit);
            // No mutation on a fuzzy hit.
            assert_eq!(flow.base().len(), 1);
        }

        assert_eq!(prompter.notices.len(), 1);
        assert!(prompter.notices[0].contains("what is your name"));
        assert!(prompter.confirms.is_empty());
    }

    #[test]
    fn low_overlap_falls_through_to_the_teaching_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[("what is your favorite color", "blue")]);
        let mut prompter = ScriptedPrompter::default();

        {
            let mut flow = TeachingFlow::new(store, &mut prompter).unwrap();
            let (answer, resolution) = flow.resolve("name").unwrap();
            assert_eq!(answer, APOLOGY);
            assert_eq!(resolution, Resolution::Unknown);
            assert_eq!(flow.base().len(), 1);
        }

        assert_eq!(prompter.confirms.len(), 1);
        assert!(prompter.inputs.is_empty());
    }

    #[test]
    fn teaching_commits_for_future_queries_but_still_apologizes() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[]);
        let prompter = ScriptedPrompter {
            confirm_with: true,
            input_with: Some("yes".to_string()),
            ..Default::default()
        };
        let mut flow = TeachingFlow::new(store, prompter).unwrap();

        // The taught answer is not returned for the triggering question.
        let (answer, resolution) = flow.resolve("are you alive").unwrap();
        assert_eq!(answer, APOLOGY);
        assert_eq!(resolution, Resolution::Unknown);

        // But the next query exact-hits the new entry.
        let (answer, resolution) = flow.resolve("are you alive").unwrap();
        assert_eq!(answer, "yes");
        assert_eq!(resolution, Resolution::ExactHit);

        // And the durable store reflects it.
        let reloaded = KnowledgeStore::new(dir.path().join("kb.json")).load().unwrap();
        assert_eq!(reloaded.get("are you alive").map(String::as_str), Some("yes"));
    }

    #[test]
    fn teaching_rebuilds_the_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[]);
        let prompter = ScriptedPrompter {
            confirm_with: true,
            input_with: Some("yes".to_string()),
            ..Default::default()
        };
        let mut flow = TeachingFlow::new(store, prompter).unwrap();
        assert!(flow.vocabulary().is_empty());

        flow.resolve("Are You alive").unwrap();

        let vocab = flow.vocabulary();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("are"));
        assert!(vocab.contains("you"));
        assert!(vocab.contains("alive"));
    }

    #[test]
    fn declined_confirm_leaves_base_and_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[]);
        let prompter = ScriptedPrompter::default();
        let mut flow = TeachingFlow::new(store, prompter).unwrap();

        let (answer, _) = flow.resolve("are you alive").unwrap();
        assert_eq!(answer, APOLOGY);
        assert!(flow.base().is_empty());
        // Nothing was ever persisted.
        assert!(!dir.path().join("kb.json").exists());
    }

    #[test]
    fn cancelled_input_leaves_base_and_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[]);
        let prompter = ScriptedPrompter {
            confirm_with: true,
            input_with: None,
            ..Default::default()
        };
        let mut flow = TeachingFlow::new(store, prompter).unwrap();

        let (answer, _) = flow.resolve("are you alive").unwrap();
        assert_eq!(answer, APOLOGY);
        assert!(flow.base().is_empty());
        assert!(!dir.path().join("kb.json").exists());
    }

    #[test]
    fn degenerate_keys_never_match_and_never_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir, &[("   ", "blank")]);
        let prompter = ScriptedPrompter::default();
        let mut flow = TeachingFlow::new(store, prompter).unwrap();

        let (answer, resolution) = flow.resolve("anything at all").unwrap();
        assert_eq!(answer, APOLOGY);
        assert_eq!(resolution, Resolution::Unknown);
    }

    #[test]
    fn failed_save_surfaces_but_keeps_the_entry_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every save fails.
        let store = KnowledgeStore::new(dir.path().join("absent").join("kb.json"));
        let prompter = ScriptedPrompter {
            confirm_with: true,
            input_with: Some("yes".to_string()),
            ..Default::default()
        };
        let mut flow = TeachingFlow::new(store, prompter).unwrap();

        assert!(flow.resolve("are you alive").is_err());
        // No rollback: the unsaved entry still answers future queries.
        let (answer, resolution) = flow.resolve("are you alive").unwrap();
        assert_eq!(answer, "yes");
        assert_eq!(resolution, Resolution::ExactHit);
    }
}
