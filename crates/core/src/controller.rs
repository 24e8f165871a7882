//! Roadmap Interaction Controller
//!
//! Owns the UI-facing state derived from a finalized [`Roadmap`]: the
//! selected stage, recorded quiz answers, and revealed results. The
//! document itself is never mutated; all interaction state lives beside it,
//! keyed by `(stage index, quiz index)` so progress in one stage is fully
//! isolated from every other stage.
//!
//! Per quiz pair the state machine is:
//!
//! ```text
//! UNANSWERED --select--> ANSWERED --reveal--> REVEALED (terminal)
//!                        ^   |
//!                        +---+  (re-select while not revealed)
//! ```
//!
//! There is no reset/retry transition; a new document is required to start
//! over, and a new document always starts from an empty interaction state.

use std::collections::{BTreeMap, BTreeSet};

use crate::roadmap::{QuizItem, Roadmap, Stage};

/// Identifies one quiz question within one stage.
pub type QuizKey = (usize, usize);

/// Lifecycle phase of a single quiz pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Unanswered,
    Answered,
    Revealed,
}

/// The tagged action set the interaction reducer accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectStage { stage: usize },
    SelectAnswer { stage: usize, quiz: usize, option: String },
    Reveal { stage: usize, quiz: usize },
}

/// Snapshot of all user interaction with the current document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    current_stage: Option<usize>,
    answers: BTreeMap<QuizKey, String>,
    revealed: BTreeSet<QuizKey>,
}

impl InteractionState {
    pub fn current_stage(&self) -> Option<usize> {
        self.current_stage
    }

    pub fn selected_answer(&self, stage: usize, quiz: usize) -> Option<&str> {
        self.answers.get(&(stage, quiz)).map(String::as_str)
    }

    pub fn is_revealed(&self, stage: usize, quiz: usize) -> bool {
        self.revealed.contains(&(stage, quiz))
    }

    pub fn phase(&self, stage: usize, quiz: usize) -> QuizPhase {
        if self.is_revealed(stage, quiz) {
            QuizPhase::Revealed
        } else if self.answers.contains_key(&(stage, quiz)) {
            QuizPhase::Answered
        } else {
            QuizPhase::Unanswered
        }
    }
}

/// Mediates all user interaction with a roadmap document.
///
/// One controller instance per active view; created fresh whenever a new
/// document becomes available (interaction state is never migrated across
/// documents).
#[derive(Debug, Clone)]
pub struct RoadmapController {
    roadmap: Roadmap,
    state: InteractionState,
}

impl RoadmapController {
    pub fn new(roadmap: Roadmap) -> Self {
        Self {
            roadmap,
            state: InteractionState::default(),
        }
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    /// Interaction state snapshot for the presentation layer.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Apply one action to the interaction state. The reducer form keeps
    /// the state machine explicit and testable apart from any rendering.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectStage { stage } => self.select_stage(stage),
            Action::SelectAnswer {
                stage,
                quiz,
                option,
            } => self.select_answer(stage, quiz, option),
            Action::Reveal { stage, quiz } => self.reveal(stage, quiz),
        }
    }

    /// Set the currently selected stage. Switching stages never clears
    /// quiz state; keys are stage-qualified, so progress in every visited
    /// stage persists for the lifetime of the document.
    pub fn select_stage(&mut self, stage: usize) {
        self.state.current_stage = Some(stage);
    }

    pub fn current_stage(&self) -> Option<(usize, &Stage)> {
        let index = self.state.current_stage?;
        self.roadmap.stage(index).map(|stage| (index, stage))
    }

    /// Record the chosen option for a quiz pair. Re-selection overwrites
    /// while the pair is unrevealed; once revealed the pair is terminal and
    /// the recorded answer can no longer change.
    pub fn select_answer(&mut self, stage: usize, quiz: usize, option: impl Into<String>) {
        if self.state.is_revealed(stage, quiz) {
            return;
        }
        self.state.answers.insert((stage, quiz), option.into());
    }

    /// Permanently disclose correctness for a quiz pair. Requires a prior
    /// selection; revealing an unanswered pair has no observable effect.
    /// Idempotent once revealed.
    pub fn reveal(&mut self, stage: usize, quiz: usize) {
        if !self.state.answers.contains_key(&(stage, quiz)) {
            return;
        }
        self.state.revealed.insert((stage, quiz));
    }

    pub fn selected_answer(&self, stage: usize, quiz: usize) -> Option<&str> {
        self.state.selected_answer(stage, quiz)
    }

    pub fn is_revealed(&self, stage: usize, quiz: usize) -> bool {
        self.state.is_revealed(stage, quiz)
    }

    pub fn phase(&self, stage: usize, quiz: usize) -> QuizPhase {
        self.state.phase(stage, quiz)
    }

    fn quiz_item(&self, stage: usize, quiz: usize) -> Option<&QuizItem> {
        self.roadmap.stage(stage)?.quiz_items().get(quiz)
    }

    /// Derived, never stored: whether the recorded answer matches the quiz
    /// item's correct answer. `None` until the pair is revealed, so the
    /// presentation cannot leak correctness early.
    pub fn is_correct(&self, stage: usize, quiz: usize) -> Option<bool> {
        if !self.state.is_revealed(stage, quiz) {
            return None;
        }
        let answer = self.state.selected_answer(stage, quiz)?;
        let item = self.quiz_item(stage, quiz)?;
        Some(answer == item.correct_answer)
    }
}
