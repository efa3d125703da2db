use tracing::{Level, event, instrument};

use handle_errors::Error;

use crate::client::TriviaClient;
use crate::components::{ADD_QUESTION_FAILED, LOAD_CATEGORIES_FAILED, Notice};
use crate::types::{
    category::{Category, CategoryId},
    question::{MAX_DIFFICULTY, MIN_DIFFICULTY, NewQuestion},
};

pub const FIELD_QUESTION: &str = "question";
pub const FIELD_ANSWER: &str = "answer";
pub const FIELD_DIFFICULTY: &str = "difficulty";
pub const FIELD_CATEGORY: &str = "category";

/// Question being typed in, not submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryId,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            question: String::new(),
            answer: String::new(),
            difficulty: MIN_DIFFICULTY,
            category: CategoryId(1),
        }
    }
}

impl From<&Draft> for NewQuestion {
    fn from(draft: &Draft) -> Self {
        NewQuestion {
            question: draft.question.clone(),
            answer: draft.answer.clone(),
            difficulty: draft.difficulty,
            category: draft.category,
        }
    }
}

/// State of the "add a new trivia question" form.
#[derive(Debug, Default)]
pub struct QuestionForm {
    draft: Draft,
    categories: Vec<Category>,
}

impl QuestionForm {
    pub fn new() -> Self {
        QuestionForm::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Options of the category selector, in the order the API listed them.
    pub fn category_options(&self) -> Vec<(CategoryId, &str)> {
        self.categories
            .iter()
            .map(|c| (c.id, c.kind.as_str()))
            .collect()
    }

    /// Options of the difficulty selector: `1 => ★` up to `5 => ★★★★★`.
    pub fn difficulty_options() -> Vec<(i32, String)> {
        (MIN_DIFFICULTY..=MAX_DIFFICULTY)
            .map(|level| (level, "★".repeat(level as usize)))
            .collect()
    }

    /// Loads the selectable categories. Called once when the form is shown.
    #[instrument(skip(self))]
    pub async fn mount(&mut self, client: &TriviaClient) -> Result<(), Notice> {
        match client.get_categories().await {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                event!(Level::ERROR, "{}", e);
                Err(Notice {
                    message: LOAD_CATEGORIES_FAILED,
                    source: e,
                })
            }
        }
    }

    /// Stores `value` in the draft field called `name`.
    pub fn handle_change(&mut self, name: &str, value: &str) -> Result<(), Error> {
        match name {
            FIELD_QUESTION => self.draft.question = value.to_string(),
            FIELD_ANSWER => self.draft.answer = value.to_string(),
            FIELD_DIFFICULTY => {
                self.draft.difficulty = value.trim().parse::<i32>().map_err(Error::ParseError)?
            }
            FIELD_CATEGORY => {
                self.draft.category =
                    CategoryId(value.trim().parse::<i32>().map_err(Error::ParseError)?)
            }
            _ => return Err(Error::UnknownField(name.to_string())),
        }
        Ok(())
    }

    /// Sends the draft as one new question. The draft is cleared on
    /// success and left untouched on failure.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, client: &TriviaClient) -> Result<(), Notice> {
        match client.add_question(&NewQuestion::from(&self.draft)).await {
            Ok(()) => {
                self.clear();
                Ok(())
            }
            Err(e) => {
                event!(Level::ERROR, "{}", e);
                Err(Notice {
                    message: ADD_QUESTION_FAILED,
                    source: e,
                })
            }
        }
    }

    /// Resets every field of the draft.
    pub fn clear(&mut self) {
        self.draft = Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_an_empty_draft() {
        let form = QuestionForm::new();
        assert_eq!(form.draft(), &Draft::default());
        assert_eq!(form.draft().difficulty, 1);
        assert_eq!(form.draft().category, CategoryId(1));
        assert!(form.categories().is_empty());
    }

    #[test]
    fn changes_are_keyed_by_field_name() {
        let mut form = QuestionForm::new();
        form.handle_change("question", "Who discovered penicillin?")
            .unwrap();
        form.handle_change("answer", "Alexander Fleming").unwrap();
        form.handle_change("difficulty", "3").unwrap();
        form.handle_change("category", "1").unwrap();

        assert_eq!(
            form.draft(),
            &Draft {
                question: "Who discovered penicillin?".to_string(),
                answer: "Alexander Fleming".to_string(),
                difficulty: 3,
                category: CategoryId(1),
            }
        );
    }

    #[test]
    fn bad_changes_leave_the_draft_alone() {
        let mut form = QuestionForm::new();
        assert!(matches!(
            form.handle_change("difficulty", "hard"),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            form.handle_change("author", "me"),
            Err(Error::UnknownField(_))
        ));
        assert_eq!(form.draft(), &Draft::default());
    }

    #[test]
    fn clear_resets_every_field() {
        let mut form = QuestionForm::new();
        form.handle_change("question", "Who discovered penicillin?")
            .unwrap();
        form.handle_change("difficulty", "5").unwrap();
        form.handle_change("category", "4").unwrap();
        form.clear();
        assert_eq!(form.draft(), &Draft::default());
    }

    #[test]
    fn difficulty_options_use_stars() {
        let options = QuestionForm::difficulty_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], (1, "★".to_string()));
        assert_eq!(options[4], (5, "★★★★★".to_string()));
    }
}
