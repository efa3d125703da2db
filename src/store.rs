use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use handle_errors::Error;

use crate::types::{
    category::{Category, CategoryCount, CategoryId},
    question::{MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_TEXT_LEN, NewQuestion, Question, QuestionId},
};

/// In-memory question bank shared by all route handlers.
#[derive(Debug, Clone)]
pub struct Store {
    pub categories: Arc<RwLock<Vec<Category>>>,
    pub questions: Arc<RwLock<BTreeMap<QuestionId, Question>>>,
    next_id: Arc<AtomicI32>,
}

#[derive(Deserialize)]
struct Seed {
    categories: Vec<Category>,
    questions: Vec<Question>,
}

impl Default for Store {
    fn default() -> Self {
        Store::new(Vec::new(), Vec::new())
    }
}

impl Store {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_id = questions.iter().map(|q| q.id.0).max().unwrap_or(0) + 1;
        Store {
            categories: Arc::new(RwLock::new(categories)),
            questions: Arc::new(RwLock::new(
                questions.into_iter().map(|q| (q.id, q)).collect(),
            )),
            next_id: Arc::new(AtomicI32::new(next_id)),
        }
    }

    /// Store pre-filled with the bundled sample categories and questions.
    pub fn seeded() -> Result<Self, Error> {
        let file = include_str!("../seed.json");
        let seed: Seed = serde_json::from_str(file).map_err(Error::SerializationError)?;
        Ok(Store::new(seed.categories, seed.questions))
    }

    pub async fn get_categories(&self) -> Vec<Category> {
        self.categories.read().await.clone()
    }

    pub async fn get_category(&self, id: CategoryId) -> Option<Category> {
        self.categories
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn category_counts(&self) -> Vec<CategoryCount> {
        let categories = self.categories.read().await;
        let questions = self.questions.read().await;
        categories
            .iter()
            .map(|c| CategoryCount {
                id: c.id,
                kind: c.kind.clone(),
                counter: questions.values().filter(|q| q.category == c.id).count(),
            })
            .collect()
    }

    /// All questions, newest first, optionally restricted to one category.
    pub async fn get_questions(&self, category: Option<CategoryId>) -> Vec<Question> {
        self.questions
            .read()
            .await
            .values()
            .rev()
            .filter(|q| category.is_none_or(|id| q.category == id))
            .cloned()
            .collect()
    }

    pub async fn count_questions(&self) -> usize {
        self.questions.read().await.len()
    }

    /// Case-insensitive substring search over the question text, newest first.
    pub async fn search_questions(&self, term: &str) -> Vec<Question> {
        let term = term.to_lowercase();
        self.questions
            .read()
            .await
            .values()
            .rev()
            .filter(|q| q.question.to_lowercase().contains(&term))
            .cloned()
            .collect()
    }

    pub async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        if new_question.question.chars().count() < MIN_TEXT_LEN {
            return Err(Error::InvalidQuestion(format!(
                "question needs at least {} characters",
                MIN_TEXT_LEN
            )));
        }
        if new_question.answer.chars().count() < MIN_TEXT_LEN {
            return Err(Error::InvalidQuestion(format!(
                "answer needs at least {} characters",
                MIN_TEXT_LEN
            )));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&new_question.difficulty) {
            return Err(Error::InvalidQuestion(format!(
                "difficulty must be between {} and {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY
            )));
        }
        if self.get_category(new_question.category).await.is_none() {
            return Err(Error::InvalidQuestion(format!(
                "unknown category {}",
                new_question.category.0
            )));
        }

        let mut questions = self.questions.write().await;
        let id = QuestionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let question = Question {
            id,
            question: new_question.question,
            answer: new_question.answer,
            category: new_question.category,
            difficulty: new_question.difficulty,
        };
        questions.insert(id, question.clone());
        Ok(question)
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<Question, Error> {
        match self.questions.write().await.remove(&id) {
            Some(question) => Ok(question),
            None => Err(Error::QuestionNotFound(id.0)),
        }
    }

    /// Questions of `category` that are not listed in `previous`.
    pub async fn quiz_candidates(
        &self,
        category: CategoryId,
        previous: &[QuestionId],
    ) -> Vec<Question> {
        let previous: HashSet<&QuestionId> = previous.iter().collect();
        self.questions
            .read()
            .await
            .values()
            .filter(|q| q.category == category && !previous.contains(&q.id))
            .cloned()
            .collect()
    }
}
