use std::env;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use quiz_core::model::Question;

use super::QuestionProvider;
use crate::error::{ConfigError, ProviderError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";
pub const DEFAULT_QUESTIONS_PATH: &str = "/api/questions/random";
pub const BASE_URL_ENV: &str = "QUIZ_API_BASE_URL";
pub const PATH_ENV: &str = "QUIZ_API_PATH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    endpoint: Url,
}

impl ProviderConfig {
    /// Build a config from a base URL and a request path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or is not http(s).
    pub fn new(base_url: &str, path: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url.trim())?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base.scheme().to_string()));
        }
        let endpoint = base.join(path.trim())?;
        Ok(Self { endpoint })
    }

    /// Read `QUIZ_API_BASE_URL` and `QUIZ_API_PATH`, falling back to the local dev server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured URL is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let base_url = non_blank(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let path = non_blank(PATH_ENV).unwrap_or_else(|| DEFAULT_QUESTIONS_PATH.into());
        Self::new(&base_url, &path)
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Fetches questions with a single `GET` against the quiz backend.
#[derive(Clone, Debug)]
pub struct HttpQuestionProvider {
    client: Client,
    config: ProviderConfig,
}

impl HttpQuestionProvider {
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionProvider for HttpQuestionProvider {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ProviderError> {
        let url = self.config.endpoint.clone();
        log::debug!("fetching questions from {url}");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let questions: Vec<Question> = response.json().await?;
        log::debug!("received {} questions", questions.len());
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_path_onto_base() {
        let config = ProviderConfig::new("http://localhost:3001", "/api/questions").unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "http://localhost:3001/api/questions"
        );
    }

    #[test]
    fn absolute_path_replaces_base_path() {
        let config =
            ProviderConfig::new("https://quiz.example.com/app/", DEFAULT_QUESTIONS_PATH).unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "https://quiz.example.com/api/questions/random"
        );
    }

    #[test]
    fn lookup_falls_back_to_defaults_for_blank_values() {
        let config = ProviderConfig::from_lookup(|key| match key {
            BASE_URL_ENV => Some("   ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "http://127.0.0.1:3001/api/questions/random"
        );

        let config = ProviderConfig::from_lookup(|key| match key {
            BASE_URL_ENV => Some("https://trivia.example.org".into()),
            PATH_ENV => Some("/api/questions".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "https://trivia.example.org/api/questions"
        );
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        let err = ProviderConfig::new("ftp://example.com", "/q").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(scheme) if scheme == "ftp"));

        let err = ProviderConfig::new("not a url", "/q").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
