#![warn(clippy::all)]

pub mod client;
pub mod components;
pub mod config;
pub mod routes;
pub mod server;
pub mod store;
pub mod types;

pub use client::TriviaClient;
pub use handle_errors::Error;
