use std::collections::HashMap;
use tracing::{Level, event, info, instrument};

use crate::store::Store;
use crate::types::pagination::extract_pagination;
use crate::types::question::{
    NewQuestion, QuestionCreated, QuestionDeleted, QuestionId, QuestionsPage, SearchRequest,
    SearchResults,
};

use handle_errors::Error;

/// Shortest accepted search term.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

#[instrument(skip(store))]
pub async fn get_questions(
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia", Level::INFO, "querying questions");
    let pagination = extract_pagination(params)?;
    info!(page = pagination.page);

    let selection = store.get_questions(None).await;
    let questions = pagination.slice(&selection).to_vec();
    if questions.is_empty() {
        return Err(warp::reject::custom(Error::NoQuestions));
    }

    Ok(warp::reply::json(&QuestionsPage {
        success: true,
        questions,
        total_questions: selection.len(),
        categories: store.category_counts().await,
        current_category: None,
    }))
}

#[instrument(skip(store))]
pub async fn add_question(
    store: Store,
    new_question: NewQuestion,
) -> Result<impl warp::Reply, warp::Rejection> {
    match store.add_question(new_question).await {
        Ok(question) => {
            event!(Level::INFO, id = question.id.0, "question added");
            Ok(warp::reply::json(&QuestionCreated {
                success: true,
                created: question.id,
            }))
        }
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn delete_question(
    id: i32,
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let pagination = extract_pagination(params)?;
    if let Err(e) = store.delete_question(QuestionId(id)).await {
        return Err(warp::reject::custom(e));
    }
    event!(Level::INFO, id, "question deleted");

    let remaining = store.get_questions(None).await;
    Ok(warp::reply::json(&QuestionDeleted {
        success: true,
        deleted: QuestionId(id),
        questions: pagination.slice(&remaining).to_vec(),
        total_questions: remaining.len(),
    }))
}

#[instrument(skip(store))]
pub async fn search_questions(
    params: HashMap<String, String>,
    store: Store,
    search: SearchRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let pagination = extract_pagination(params)?;
    let term_len = search.search_term.chars().count();
    if term_len < MIN_SEARCH_TERM_LEN {
        return Err(warp::reject::custom(Error::SearchTermTooShort(term_len)));
    }

    let found = store.search_questions(&search.search_term).await;
    let questions = pagination.slice(&found).to_vec();
    if questions.is_empty() {
        return Err(warp::reject::custom(Error::NoQuestions));
    }

    Ok(warp::reply::json(&SearchResults {
        success: true,
        questions,
        total_questions: found.len(),
        current_category: None,
    }))
}
