use serde::{Deserialize, Serialize};

use crate::types::{
    category::Category,
    question::{Question, QuestionId},
};

pub const TROPHY: &str = "🏆";

/// Signal a card sends to its owner.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionAction {
    Delete,
}

impl std::fmt::Display for QuestionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            QuestionAction::Delete => write!(f, "DELETE"),
        }
    }
}

/// One question on screen with a show/hide answer toggle.
///
/// The card never changes the question. Deleting is only signalled to the
/// owner through the callback passed to [`QuestionCard::delete`].
#[derive(Debug, Clone)]
pub struct QuestionCard {
    question: Question,
    category: Category,
    visible_answer: bool,
}

impl QuestionCard {
    pub fn new(question: Question, category: Category) -> Self {
        QuestionCard {
            question,
            category,
            visible_answer: false,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.question.id
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn flip_visibility(&mut self) {
        self.visible_answer = !self.visible_answer;
    }

    pub fn is_answer_visible(&self) -> bool {
        self.visible_answer
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.visible_answer {
            "Hide Answer"
        } else {
            "Show Answer"
        }
    }

    /// One trophy per difficulty level.
    pub fn trophies(&self) -> String {
        TROPHY.repeat(self.question.difficulty.max(0) as usize)
    }

    pub fn category_icon(&self) -> String {
        self.category.icon()
    }

    /// Hands `QuestionAction::Delete` to the owner's callback and returns
    /// whatever it returns.
    pub fn delete<F, R>(&self, question_action: F) -> R
    where
        F: FnOnce(QuestionAction) -> R,
    {
        question_action(QuestionAction::Delete)
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "[{}] #{} {}\nDifficulty: {}\n{}",
            self.category_icon(),
            self.question.id.0,
            self.question.question,
            self.trophies(),
            self.toggle_label(),
        );
        if self.visible_answer {
            out.push_str(&format!("\nAnswer: {}", self.question.answer));
        }
        out
    }
}
