use handle_errors::return_error;
use tracing::Span;
use warp::{Filter, http::Method, trace::Info};

use crate::routes;
use crate::store::Store;

/// Span for one request to `route`, tagged with a fresh request id.
fn request_span(route: &'static str) -> impl Fn(Info) -> Span + Clone {
    move |info: Info| {
        tracing::info_span!(
            "request",
            route = route,
            method = %info.method(),
            path = %info.path(),
            id = %uuid::Uuid::new_v4(),
        )
    }
}

/// Every trivia API route, with CORS, request tracing and error recovery.
pub fn routes(
    store: Store,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_credentials(true)
        .allow_header("Content-Type")
        .allow_methods(&[Method::DELETE, Method::POST, Method::GET]);

    let get_categories = warp::get()
        .and(warp::path("categories"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::category::get_categories)
        .with(warp::trace(request_span("get_categories")));

    let get_category_questions = warp::get()
        .and(warp::path("categories"))
        .and(warp::path::param::<i32>())
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::category::get_category_questions)
        .with(warp::trace(request_span("get_category_questions")));

    let get_questions = warp::get()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::question::get_questions)
        .with(warp::trace(request_span("get_questions")));

    let add_question = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::add_question)
        .with(warp::trace(request_span("add_question")));

    let search_questions = warp::post()
        .and(warp::path("questions"))
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::search_questions)
        .with(warp::trace(request_span("search_questions")));

    let delete_question = warp::delete()
        .and(warp::path("questions"))
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::question::delete_question)
        .with(warp::trace(request_span("delete_question")));

    let play_quiz = warp::post()
        .and(warp::path("quizzes"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::quiz::play_quiz)
        .with(warp::trace(request_span("play_quiz")));

    get_categories
        .or(get_category_questions)
        .or(get_questions)
        .or(add_question)
        .or(search_questions)
        .or(delete_question)
        .or(play_quiz)
        .with(cors)
        .with(warp::trace::request())
        .recover(return_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::category::CategoriesResponse;
    use crate::types::question::{QuestionDeleted, QuestionsPage, SearchResults};
    use crate::types::quiz::QuizResponse;
    use handle_errors::ErrorResponse;
    use serde_json::json;
    use warp::http::StatusCode;

    fn seeded() -> Store {
        Store::seeded().unwrap()
    }

    #[tokio::test]
    async fn lists_categories() {
        let res = warp::test::request()
            .method("GET")
            .path("/categories")
            .reply(&routes(seeded()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: CategoriesResponse = serde_json::from_slice(res.body()).unwrap();
        assert!(body.success);
        assert_eq!(body.categories.len(), 6);
    }

    #[tokio::test]
    async fn empty_category_list_is_not_found() {
        let res = warp::test::request()
            .path("/categories")
            .reply(&routes(Store::default()))
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(
            body,
            ErrorResponse {
                success: false,
                error: 404,
                message: "Resource not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn paginates_questions() {
        let filter = routes(seeded());

        let first = warp::test::request().path("/questions").reply(&filter).await;
        let first: QuestionsPage = serde_json::from_slice(first.body()).unwrap();
        assert_eq!(first.questions.len(), 10);
        assert_eq!(first.questions[0].id.0, 23);
        assert_eq!(first.total_questions, 19);
        assert_eq!(first.categories.len(), 6);
        assert!(first.current_category.is_none());

        let second = warp::test::request()
            .path("/questions?page=2")
            .reply(&filter)
            .await;
        let second: QuestionsPage = serde_json::from_slice(second.body()).unwrap();
        assert_eq!(second.questions.len(), 9);

        let third = warp::test::request()
            .path("/questions?page=3")
            .reply(&filter)
            .await;
        assert_eq!(third.status(), StatusCode::NOT_FOUND);

        let zero = warp::test::request()
            .path("/questions?page=0")
            .reply(&filter)
            .await;
        assert_eq!(zero.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn adds_and_deletes_a_question() {
        let store = seeded();
        let filter = routes(store.clone());

        let res = warp::test::request()
            .method("POST")
            .path("/questions")
            .json(&json!({
                "question": "What is the boiling point of water in Celsius?",
                "answer": "100 degrees",
                "difficulty": 1,
                "category": 1
            }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(store.count_questions().await, 20);

        let res = warp::test::request()
            .method("DELETE")
            .path("/questions/24")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: QuestionDeleted = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body.deleted.0, 24);
        assert_eq!(body.total_questions, 19);

        let res = warp::test::request()
            .method("DELETE")
            .path("/questions/24")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_short_questions() {
        let res = warp::test::request()
            .method("POST")
            .path("/questions")
            .json(&json!({
                "question": "Why?",
                "answer": "Because",
                "difficulty": 1,
                "category": 1
            }))
            .reply(&routes(seeded()))
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn searches_questions() {
        let filter = routes(seeded());

        let res = warp::test::request()
            .method("POST")
            .path("/questions/search")
            .json(&json!({ "searchTerm": "soccer" }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: SearchResults = serde_json::from_slice(res.body()).unwrap();
        let ids: Vec<i32> = body.questions.iter().map(|q| q.id.0).collect();
        assert_eq!(ids, [11, 10]);

        let res = warp::test::request()
            .method("POST")
            .path("/questions/search")
            .json(&json!({ "searchTerm": "ab" }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res = warp::test::request()
            .method("POST")
            .path("/questions/search")
            .json(&json!({ "searchTerm": "zeppelin" }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_questions_of_a_category() {
        let filter = routes(seeded());

        let res = warp::test::request()
            .path("/categories/3/questions")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["current_category"]["type"], "Geography");
        assert_eq!(body["total_questions"], 3);

        let res = warp::test::request()
            .path("/categories/99/questions")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn quiz_never_repeats_and_runs_dry() {
        let filter = routes(seeded());

        let res = warp::test::request()
            .method("POST")
            .path("/quizzes")
            .json(&json!({
                "previous_questions": [10],
                "quiz_category": { "id": 6, "type": "Sports" }
            }))
            .reply(&filter)
            .await;
        let body: QuizResponse = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body.question.map(|q| q.id.0), Some(11));

        let res = warp::test::request()
            .method("POST")
            .path("/quizzes")
            .json(&json!({
                "previous_questions": [10, 11],
                "quiz_category": { "id": 6, "type": "Sports" }
            }))
            .reply(&filter)
            .await;
        let body: QuizResponse = serde_json::from_slice(res.body()).unwrap();
        assert!(body.success);
        assert!(body.question.is_none());
    }

    #[tokio::test]
    async fn quiz_without_body_is_unprocessable() {
        let res = warp::test::request()
            .method("POST")
            .path("/quizzes")
            .reply(&routes(seeded()))
            .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let filter = routes(seeded());
        for (method, path) in [
            ("GET", "/nope"),
            ("POST", "/nope"),
            ("GET", "/questions/5"),
            ("DELETE", "/categories"),
        ] {
            let res = warp::test::request()
                .method(method)
                .path(path)
                .reply(&filter)
                .await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{} {}", method, path);
            let body: ErrorResponse = serde_json::from_slice(res.body()).unwrap();
            assert_eq!(body.error, 404);
            assert_eq!(body.message, "Resource not found");
        }
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_with_credentials() {
        let filter = routes(seeded());
        let res = warp::test::request()
            .method("OPTIONS")
            .path("/questions/5")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "DELETE")
            .header("access-control-request-headers", "content-type")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(
            headers["access-control-allow-origin"],
            "http://localhost:3000"
        );
        assert_eq!(headers["access-control-allow-credentials"], "true");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        for method in ["GET", "POST", "DELETE"] {
            assert!(methods.contains(method), "{} missing from {}", method, methods);
        }

        let res = warp::test::request()
            .method("OPTIONS")
            .path("/questions/5")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "PUT")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
