//! Roadmap Document Model
//!
//! Wire-format structs for the roadmap document produced by the generation
//! backend. Field names match the backend's JSON exactly (`roadmap_title`,
//! `learning_objectives`, ...), so these types double as the deserialization
//! target for streamed generation output and for saved roadmaps.

use serde::{Deserialize, Serialize};

/// An external learning resource attached to a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// A single multiple-choice question inside a stage's knowledge check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    /// Display order; values are not guaranteed unique.
    pub options: Vec<String>,
    /// Expected to equal one of `options` by value. The backend does not
    /// enforce this, so [`Roadmap::sanitized`] drops items where it fails.
    pub correct_answer: String,
}

impl QuizItem {
    /// Whether the declared correct answer actually appears among the options.
    pub fn answer_is_listed(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_answer)
    }
}

/// One module of the curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// May be absent or empty; display falls back to the positional index.
    #[serde(default)]
    pub stage_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub project_idea: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<QuizItem>>,
}

impl Stage {
    /// Identifier shown to the user: the backend-provided `stage_id`, or the
    /// 1-based position when the backend omitted it.
    pub fn display_id(&self, index: usize) -> String {
        if self.stage_id.is_empty() {
            (index + 1).to_string()
        } else {
            self.stage_id.clone()
        }
    }

    /// Quiz items, treating an absent quiz as empty.
    pub fn quiz_items(&self) -> &[QuizItem] {
        self.quiz.as_deref().unwrap_or(&[])
    }

    /// Resources, treating an absent list as empty.
    pub fn resource_items(&self) -> &[Resource] {
        self.resources.as_deref().unwrap_or(&[])
    }
}

/// The full roadmap document. Immutable once parsed: every successful
/// re-extraction over a grown stream buffer produces a fresh value that
/// replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub roadmap_title: String,
    #[serde(default)]
    pub summary: String,
    /// Ordering is the learning path sequence and is stable once parsed.
    pub stages: Vec<Stage>,
}

impl Roadmap {
    /// Drop quiz items whose declared correct answer is not among their
    /// options. Rendering such an item would produce a quiz the user can
    /// never answer correctly; rejecting it at validation time keeps the
    /// rest of the stage usable.
    pub fn sanitized(mut self) -> Self {
        for stage in &mut self.stages {
            if let Some(quiz) = &mut stage.quiz {
                quiz.retain(QuizItem::answer_is_listed);
            }
        }
        self
    }

    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
