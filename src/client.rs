use reqwest::{Url, header::CONTENT_TYPE};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{Level, event, instrument};

use handle_errors::{APILayerError, Error, ErrorResponse};

use crate::config::Config;
use crate::types::{
    category::{CategoriesResponse, Category, CategoryId},
    question::{
        CategoryQuestionsPage, NewQuestion, Question, QuestionDeleted, QuestionId, QuestionsPage,
        SearchRequest, SearchResults,
    },
    quiz::{QuizCategory, QuizRequest, QuizResponse},
};

/// HTTP client for the trivia API.
///
/// Cookies set by the API are kept and sent back on later requests.
/// Requests are not retried unless `max_retries` is raised.
#[derive(Clone)]
pub struct TriviaClient {
    base: Url,
    http: ClientWithMiddleware,
}

impl std::fmt::Debug for TriviaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TriviaClient")
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl TriviaClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        TriviaClient::with_retries(base_url, 0)
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        TriviaClient::with_retries(&config.api_url, config.max_retries)
    }

    pub fn with_retries(base_url: &str, max_retries: u32) -> Result<Self, Error> {
        let mut base = Url::parse(base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{} cannot be a base url", base_url)));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(Error::ReqwestAPIError)?;
        let mut builder = ClientBuilder::new(client);
        if max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(TriviaClient {
            base,
            http: builder.build(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str, page: Option<usize>) -> Result<Url, Error> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if let Some(page) = page {
            url.query_pairs_mut()
                .append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    fn with_json<T: Serialize>(request: RequestBuilder, body: &T) -> Result<RequestBuilder, Error> {
        let body = serde_json::to_string(body).map_err(Error::SerializationError)?;
        Ok(request.header(CONTENT_TYPE, "application/json").body(body))
    }

    async fn execute(request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let res = request
            .send()
            .await
            .map_err(Error::MiddlewareReqwestAPIError)?;

        if !res.status().is_success() {
            let status = res.status();
            let err = transform_error(res).await;
            event!(Level::ERROR, "{}", err);
            if status.is_client_error() {
                return Err(Error::ClientError(err));
            } else {
                return Err(Error::ServerError(err));
            }
        }

        Ok(res)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
        let res = Self::execute(request).await?;
        res.json::<T>().await.map_err(Error::ReqwestAPIError)
    }

    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        let request = self.http.get(self.url("categories", None)?);
        let res: CategoriesResponse = Self::send(request).await?;
        Ok(res.categories)
    }

    /// Posts one new question. Any success reply is accepted and its body ignored.
    #[instrument(skip(self))]
    pub async fn add_question(&self, new_question: &NewQuestion) -> Result<(), Error> {
        let request = Self::with_json(self.http.post(self.url("questions", None)?), new_question)?;
        Self::execute(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_question(&self, id: QuestionId) -> Result<QuestionDeleted, Error> {
        let request = self
            .http
            .delete(self.url(&format!("questions/{}", id.0), None)?);
        Self::send(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_questions(&self, page: usize) -> Result<QuestionsPage, Error> {
        let request = self.http.get(self.url("questions", Some(page))?);
        Self::send(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_category_questions(
        &self,
        category: CategoryId,
        page: usize,
    ) -> Result<CategoryQuestionsPage, Error> {
        let path = format!("categories/{}/questions", category.0);
        let request = self.http.get(self.url(&path, Some(page))?);
        Self::send(request).await
    }

    #[instrument(skip(self))]
    pub async fn search_questions(&self, term: &str, page: usize) -> Result<SearchResults, Error> {
        let body = SearchRequest {
            search_term: term.to_string(),
        };
        let request = Self::with_json(
            self.http.post(self.url("questions/search", Some(page))?),
            &body,
        )?;
        Self::send(request).await
    }

    /// Next quiz question not among `previous`, `None` once the category is exhausted.
    #[instrument(skip(self))]
    pub async fn next_quiz_question(
        &self,
        category: QuizCategory,
        previous: &[QuestionId],
    ) -> Result<Option<Question>, Error> {
        let body = QuizRequest {
            previous_questions: previous.to_vec(),
            quiz_category: category,
        };
        let request = Self::with_json(self.http.post(self.url("quizzes", None)?), &body)?;
        let res: QuizResponse = Self::send(request).await?;
        Ok(res.question)
    }
}

async fn transform_error(res: reqwest::Response) -> APILayerError {
    let status = res.status();
    let message = match res.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    APILayerError {
        status: status.as_u16(),
        message,
    }
}
