use serde::{Deserialize, Serialize};

use crate::types::category::CategoryId;
use crate::types::question::{Question, QuestionId};

/// Category id that lets the server pick any category.
pub const ANY_CATEGORY: CategoryId = CategoryId(0);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuizCategory {
    pub id: CategoryId,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuizRequest {
    pub previous_questions: Vec<QuestionId>,
    pub quiz_category: QuizCategory,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}
