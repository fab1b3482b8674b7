use crate::domain::model::{ParsedResult, SubmissionRequest};
use crate::domain::ports::Submitter;
use crate::utils::error::{DashError, Result, UNKNOWN_PARSE_ERROR};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const PARSE_PATH: &str = "parse";

/// Posts the resume to `{endpoint}/parse` as multipart form data.
pub struct HttpSubmitter {
    client: Client,
    parse_url: Url,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    pub fn with_timeout(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            parse_url: parse_url(endpoint)?,
        })
    }

    pub fn parse_url(&self) -> &Url {
        &self.parse_url
    }

    fn build_form(request: SubmissionRequest) -> Result<Form> {
        let SubmissionRequest {
            file,
            job_description,
        } = request;

        let resume = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.content_type)?;

        Ok(Form::new()
            .part("resume", resume)
            .text("job_description", job_description))
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, request: SubmissionRequest) -> Result<ParsedResult> {
        tracing::debug!(
            "Submitting '{}' ({} bytes, {}) to {} with {} chars of job description",
            request.file.name,
            request.file.bytes.len(),
            request.file.content_type,
            self.parse_url,
            request.job_description.chars().count()
        );

        let form = Self::build_form(request)?;
        let response = self
            .client
            .post(self.parse_url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Parsing service response status: {}", status);
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(DashError::ApplicationError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let json: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(ParsedResult::from_json(&json))
    }
}

/// 從失敗回應中取出 `error` 字串，取不到就用預設訊息
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|json| json.get("error"))
        .and_then(|e| e.as_str())
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_PARSE_ERROR.to_string())
}

fn parse_url(endpoint: &str) -> Result<Url> {
    let mut base = Url::parse(endpoint)?;
    // 確保 join 時保留 endpoint 原本的路徑前綴
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(PARSE_PATH)?)
}
