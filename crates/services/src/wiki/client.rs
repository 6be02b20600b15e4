use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::wiki::{ArticleSource, ParsedArticle, sanitize_article_html};

/// MediaWiki `action=parse` endpoint the game plays against. The default
/// is Japanese Wikipedia, matching the built-in theme catalog.
pub const DEFAULT_API_URL: &str = "https://ja.wikipedia.org/w/api.php";

#[derive(Clone, Debug)]
pub struct WikiConfig {
    pub api_url: String,
}

impl WikiConfig {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Reads `WIKIGOLF_WIKI_API`, falling back to Japanese Wikipedia.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = env::var("WIKIGOLF_WIKI_API")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        Self { api_url }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Article fetcher over the MediaWiki parse API.
#[derive(Clone)]
pub struct WikiClient {
    client: Client,
    config: WikiConfig,
}

impl WikiClient {
    #[must_use]
    pub fn new(config: WikiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ArticleSource for WikiClient {
    async fn fetch_article(&self, title: &str) -> Result<ParsedArticle, FetchError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "parse"),
                ("page", title),
                ("format", "json"),
                ("prop", "text"),
                ("redirects", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let body: ParseResponse = response.json().await?;
        match body.parse {
            Some(parse) => Ok(ParsedArticle {
                title: parse.title,
                html: sanitize_article_html(&parse.text.content),
            }),
            None => match body.error {
                Some(error) => Err(FetchError::Source(error.info)),
                None => Err(FetchError::missing_content(title)),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParseBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    title: String,
    text: ParseText,
}

#[derive(Debug, Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    info: String,
}
