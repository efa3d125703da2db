#![allow(dead_code)]

use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use warp::Filter;
use warp::http::StatusCode;

use trivia::server;
use trivia::store::Store;

/// Serves `store` on an ephemeral local port and returns the base url.
pub fn spawn_api(store: Store) -> String {
    let (addr, server) = warp::serve(server::routes(store)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{}", addr)
}

/// Request bodies received by a mock API.
pub type Received = Arc<Mutex<Vec<Value>>>;

/// Stand-in API that lists fixed categories and records every
/// `POST /questions` body, answering it with `status`.
pub fn spawn_mock(categories: Value, status: StatusCode) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let get_categories = warp::get()
        .and(warp::path("categories"))
        .and(warp::path::end())
        .map(move || warp::reply::json(&json!({ "success": true, "categories": categories.clone() })));

    let bodies = received.clone();
    let add_question = warp::post()
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::body::json())
        .map(move |body: Value| {
            bodies.lock().unwrap().push(body);
            warp::reply::with_status(
                warp::reply::json(&json!({ "success": status.is_success() })),
                status,
            )
        });

    let (addr, server) =
        warp::serve(get_categories.or(add_question)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (format!("http://{}", addr), received)
}

/// Base url nobody listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
