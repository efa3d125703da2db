use std::collections::HashMap;
use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::category::{CategoriesResponse, CategoryId};
use crate::types::pagination::extract_pagination;
use crate::types::question::CategoryQuestionsPage;

use handle_errors::Error;

#[instrument(skip(store))]
pub async fn get_categories(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia", Level::INFO, "querying categories");
    let categories = store.get_categories().await;
    if categories.is_empty() {
        return Err(warp::reject::custom(Error::NoCategories));
    }

    Ok(warp::reply::json(&CategoriesResponse {
        success: true,
        categories,
    }))
}

#[instrument(skip(store))]
pub async fn get_category_questions(
    id: i32,
    params: HashMap<String, String>,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    let pagination = extract_pagination(params)?;
    let current_category = match store.get_category(CategoryId(id)).await {
        Some(category) => category,
        None => return Err(warp::reject::custom(Error::CategoryNotFound(id))),
    };

    let selection = store.get_questions(Some(current_category.id)).await;
    let questions = pagination.slice(&selection).to_vec();
    if questions.is_empty() {
        return Err(warp::reject::custom(Error::NoQuestions));
    }
    event!(Level::INFO, category = id, page = pagination.page, found = questions.len());

    Ok(warp::reply::json(&CategoryQuestionsPage {
        success: true,
        questions,
        total_questions: selection.len(),
        categories: store.get_categories().await,
        current_category,
    }))
}
