use rand::seq::SliceRandom;
use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::quiz::{ANY_CATEGORY, QuizRequest, QuizResponse};

/// Picks a random question of the requested category that was not played yet.
/// `ANY_CATEGORY` draws the category at random first.
#[instrument(skip(store))]
pub async fn play_quiz(
    store: Store,
    request: QuizRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let category = if request.quiz_category.id == ANY_CATEGORY {
        let categories = store.get_categories().await;
        categories.choose(&mut rand::thread_rng()).map(|c| c.id)
    } else {
        Some(request.quiz_category.id)
    };

    let question = match category {
        Some(category) => {
            let candidates = store
                .quiz_candidates(category, &request.previous_questions)
                .await;
            candidates.choose(&mut rand::thread_rng()).cloned()
        }
        None => None,
    };
    event!(
        Level::INFO,
        played = request.previous_questions.len(),
        exhausted = question.is_none()
    );

    Ok(warp::reply::json(&QuizResponse {
        success: true,
        question,
    }))
}
