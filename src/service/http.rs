//! HTTP+JSON implementation of the test service.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::models::{Assignment, Submission, Test, TestResult};

use super::{ServiceError, TestService};

/// Bearer-token JSON client for the remote test service.
pub struct HttpTestService {
    http: reqwest::Client,
    config: ServiceConfig,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpTestService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn get(&self, path: &str) -> Result<Response, ServiceError> {
        let response = self
            .http
            .get(self.config.endpoint(path))
            .bearer_auth(self.config.token())
            .send()
            .await?;
        check_status(response).await
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ServiceError> {
        let response = self
            .http
            .post(self.config.endpoint(path))
            .bearer_auth(self.config.token())
            .json(body)
            .send()
            .await?;
        check_status(response).await
    }
}

/// Map a non-2xx response onto the error taxonomy, pulling the server's
/// message out of the body when it sent one.
async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = server_message(response).await;
    log::warn!("test service returned {}: {}", status, message);

    Err(match status {
        StatusCode::UNAUTHORIZED => ServiceError::Unauthorized,
        StatusCode::NOT_FOUND => ServiceError::NotFound,
        StatusCode::FORBIDDEN => ServiceError::Forbidden(message),
        StatusCode::CONFLICT => ServiceError::Conflict(message),
        _ => ServiceError::Status {
            status: status.as_u16(),
            message,
        },
    })
}

async fn server_message(response: Response) -> String {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };

    match response.json::<ErrorBody>().await {
        Ok(body) => body.message.unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

#[async_trait]
impl TestService for HttpTestService {
    async fn assignments(&self) -> Result<Vec<Assignment>, ServiceError> {
        Ok(self.get("students/me/assignments").await?.json().await?)
    }

    async fn test(&self, test_id: &str) -> Result<Test, ServiceError> {
        Ok(self.get(&format!("tests/{test_id}")).await?.json().await?)
    }

    async fn start_attempt(&self, test_id: &str) -> Result<(), ServiceError> {
        self.post(&format!("tests/{test_id}/start"), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    async fn submit_attempt(
        &self,
        test_id: &str,
        submission: &Submission,
    ) -> Result<TestResult, ServiceError> {
        Ok(self
            .post(&format!("tests/{test_id}/submit"), submission)
            .await?
            .json()
            .await?)
    }
}
