use serde::{Deserialize, Serialize};

use crate::types::category::{Category, CategoryCount, CategoryId};

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;
/// Shortest accepted question or answer text.
pub const MIN_TEXT_LEN: usize = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(pub i32);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryId,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// A page of `GET /questions`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<CategoryCount>,
    pub current_category: Option<Category>,
}

/// A page of `GET /categories/{id}/questions`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryQuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
    pub current_category: Category,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<Category>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionCreated {
    pub success: bool,
    pub created: QuestionId,
}

/// Reply to a deletion: the removed id and the remaining questions.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionDeleted {
    pub success: bool,
    pub deleted: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}
