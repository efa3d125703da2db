use serde::{Deserialize, Serialize};
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::Reject,
};

use reqwest::Error as ReqwestError;
use reqwest_middleware::Error as MiddlewareReqwestError;

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    ParseError(std::num::ParseIntError),
    InvalidPage(usize),
    UnknownField(String),
    InvalidQuestion(String),
    SearchTermTooShort(usize),
    CategoryNotFound(i32),
    QuestionNotFound(i32),
    NoCategories,
    NoQuestions,
    InvalidUrl(String),
    InvalidAddress(std::net::AddrParseError),
    ConfigError(config::ConfigError),
    SerializationError(serde_json::Error),
    ReqwestAPIError(ReqwestError),
    MiddlewareReqwestAPIError(MiddlewareReqwestError),
    // The trivia API answered with a 4xx status.
    ClientError(APILayerError),
    // The trivia API answered with a 5xx status.
    ServerError(APILayerError),
}

/// Status and message taken from an error response of the trivia API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct APILayerError {
    pub status: u16,
    pub message: String,
}

impl std::fmt::Display for APILayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Status: {}, Message: {}", self.status, self.message)
    }
}

/// JSON body of every error reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ParseError(err) => {
                write!(f, "Cannot parse parameter: {}", err)
            }
            Error::InvalidPage(page) => {
                write!(f, "Page {} is out of range, pages start at 1", page)
            }
            Error::UnknownField(name) => {
                write!(f, "Unknown form field: {}", name)
            }
            Error::InvalidQuestion(reason) => {
                write!(f, "Invalid question: {}", reason)
            }
            Error::SearchTermTooShort(len) => {
                write!(f, "Search term needs at least 3 characters, got {}", len)
            }
            Error::CategoryNotFound(id) => {
                write!(f, "Category {} not found", id)
            }
            Error::QuestionNotFound(id) => {
                write!(f, "Question {} not found", id)
            }
            Error::NoCategories => {
                write!(f, "No categories available")
            }
            Error::NoQuestions => {
                write!(f, "No questions found")
            }
            Error::InvalidUrl(err) => {
                write!(f, "Invalid API url: {}", err)
            }
            Error::InvalidAddress(err) => {
                write!(f, "Invalid listen address: {}", err)
            }
            Error::ConfigError(err) => {
                write!(f, "Cannot read configuration: {}", err)
            }
            Error::SerializationError(err) => {
                write!(f, "Invalid JSON payload: {}", err)
            }
            Error::ReqwestAPIError(err) => {
                write!(f, "External API error: {}", err)
            }
            Error::MiddlewareReqwestAPIError(err) => {
                write!(f, "External API error: {}", err)
            }
            Error::ClientError(err) => {
                write!(f, "External Client error: {}", err)
            }
            Error::ServerError(err) => {
                write!(f, "External Server error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Reject for Error {}
impl Reject for APILayerError {}

fn reply_with(message: String, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    let body = ErrorResponse {
        success: false,
        error: status.as_u16(),
        message,
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(error) = r.find::<Error>() {
        match error {
            Error::CategoryNotFound(_)
            | Error::QuestionNotFound(_)
            | Error::NoCategories
            | Error::NoQuestions => {
                event!(Level::WARN, "{}", error);
                Ok(reply_with(
                    "Resource not found".to_string(),
                    StatusCode::NOT_FOUND,
                ))
            }
            Error::ReqwestAPIError(_)
            | Error::MiddlewareReqwestAPIError(_)
            | Error::ClientError(_)
            | Error::ServerError(_)
            | Error::SerializationError(_)
            | Error::ConfigError(_)
            | Error::InvalidUrl(_)
            | Error::InvalidAddress(_) => {
                event!(Level::ERROR, "{}", error);
                Ok(reply_with(
                    "Internal Server Error".to_string(),
                    StatusCode::INTERNAL_SERVER_ERROR,
                ))
            }
            _ => {
                event!(Level::ERROR, "{}", error);
                Ok(reply_with(error.to_string(), StatusCode::UNPROCESSABLE_ENTITY))
            }
        }
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::FORBIDDEN))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::ERROR, "Cannot deserialize request body: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::UNPROCESSABLE_ENTITY))
    } else if let Some(error) = r.find::<warp::reject::InvalidQuery>() {
        event!(Level::ERROR, "Cannot parse query: {}", error);
        Ok(reply_with(error.to_string(), StatusCode::UNPROCESSABLE_ENTITY))
    } else {
        event!(Level::WARN, "Requested route was not found");
        Ok(reply_with(
            "Resource not found".to_string(),
            StatusCode::NOT_FOUND,
        ))
    }
}
