//! View state for the question form and the question card.
//!
//! The types here hold what a screen needs and expose the user actions as
//! methods. Drawing is left to whoever owns them.

pub mod card;
pub mod form;

use handle_errors::Error;

pub const LOAD_CATEGORIES_FAILED: &str = "Unable to load categories. Please try your request again";
pub const ADD_QUESTION_FAILED: &str = "Unable to add question. Please try your request again";

/// A failure the user has to be told about.
#[derive(Debug)]
pub struct Notice {
    pub message: &'static str,
    pub source: Error,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Notice {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
