//! Best-effort AI enrichment: result-set insights and per-article summaries.
//!
//! Nothing here returns an error to the caller. Every failure becomes
//! [`Enrichment::Degraded`] carrying documented fallback content.

mod parse;
mod prompt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::llm::{CompletionClient, LlmError, Sampling};
use crate::search::article::Article;

const INSIGHT_SAMPLING: Sampling = Sampling {
    max_tokens: 400,
    temperature: 0.3,
};
const SUMMARY_SAMPLING: Sampling = Sampling {
    max_tokens: 500,
    temperature: 0.2,
};

const MAX_THEMES: usize = 4;
const MAX_SUGGESTED_QUERIES: usize = 3;
const MAX_TAGS: usize = 5;
const MAX_ARTICLE_THEMES: usize = 3;
/// Abstracts shorter than this are not worth a model call.
const MIN_ABSTRACT_CHARS: usize = 50;
const RAW_SUMMARY_CHARS: usize = 300;

const ABSTRACT_UNAVAILABLE: &str = "Abstract not available for summarization.";
const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";
const INSIGHTS_UNAVAILABLE: &str = "Unable to generate insights at this time.";
const UNKNOWN_STUDY_TYPE: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model output is not a JSON object: {0}")]
    Unparseable(String),

    #[error("abstract too short to summarize ({0} chars)")]
    AbstractTooShort(usize),

    #[error("no articles to analyze")]
    NoArticles,
}

/// Outcome of a best-effort enrichment call.
#[derive(Debug)]
pub enum Enrichment<T> {
    Enriched(T),
    Degraded { fallback: T, error: EnrichmentError },
}

impl<T> Enrichment<T> {
    /// The enriched value, or the fallback content when degraded.
    pub fn into_value(self) -> T {
        match self {
            Enrichment::Enriched(value) => value,
            Enrichment::Degraded { fallback, .. } => fallback,
        }
    }

    /// The enriched value only; degraded outcomes yield `None`.
    pub fn enriched(self) -> Option<T> {
        match self {
            Enrichment::Enriched(value) => Some(value),
            Enrichment::Degraded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&EnrichmentError> {
        match self {
            Enrichment::Enriched(_) => None,
            Enrichment::Degraded { error, .. } => Some(error),
        }
    }

    fn degraded(fallback: T, error: impl Into<EnrichmentError>) -> Self {
        let error = error.into();
        warn!(%error, "enrichment degraded");
        Enrichment::Degraded { fallback, error }
    }
}

/// AI overview of a result page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    pub summary: String,
    pub themes: Vec<String>,
    pub suggested_queries: Vec<String>,
}

impl InsightsSummary {
    fn unavailable() -> Self {
        Self {
            summary: INSIGHTS_UNAVAILABLE.to_string(),
            themes: Vec::new(),
            suggested_queries: Vec::new(),
        }
    }
}

/// Structured digest of one article.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub summary: String,
    pub study_type: String,
    pub key_findings: Vec<String>,
    pub clinical_implications: String,
    pub tags: Vec<String>,
    pub themes: Vec<String>,
}

impl ArticleSummary {
    /// Summary text only, every structured field empty or "Unknown".
    fn plain(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            study_type: UNKNOWN_STUDY_TYPE.to_string(),
            key_findings: Vec::new(),
            clinical_implications: String::new(),
            tags: Vec::new(),
            themes: Vec::new(),
        }
    }

    /// Fallback built from unparseable model text: its first characters become the summary.
    fn from_raw(text: &str) -> Self {
        let truncated: String = text.chars().take(RAW_SUMMARY_CHARS).collect();
        if truncated.is_empty() {
            Self::plain(SUMMARY_UNAVAILABLE)
        } else {
            Self::plain(truncated)
        }
    }
}

/// Overview, themes, and follow-up queries for the first few articles of a result page.
pub async fn result_insights(
    client: &impl CompletionClient,
    articles: &[Article],
    query: &str,
) -> Enrichment<InsightsSummary> {
    if articles.is_empty() {
        return Enrichment::degraded(InsightsSummary::unavailable(), EnrichmentError::NoArticles);
    }

    let prompt = prompt::result_set(articles, query);
    let text = match client.complete(&prompt, INSIGHT_SAMPLING).await {
        Ok(text) => text,
        Err(e) => return Enrichment::degraded(InsightsSummary::unavailable(), e),
    };

    match parse::embedded_object(&text) {
        Ok(value) => {
            debug!(sampled = articles.len().min(prompt::SAMPLE_ARTICLES), "insights generated");
            Enrichment::Enriched(InsightsSummary {
                summary: parse::string_field(&value, "summary")
                    .unwrap_or_else(|| "Analysis complete.".to_string()),
                themes: parse::string_list(&value, "themes", MAX_THEMES),
                suggested_queries: parse::string_list(
                    &value,
                    "suggestedQueries",
                    MAX_SUGGESTED_QUERIES,
                ),
            })
        }
        Err(reason) => Enrichment::degraded(
            InsightsSummary::unavailable(),
            EnrichmentError::Unparseable(reason),
        ),
    }
}

/// Structured summary of one article from its title and abstract.
pub async fn summarize_article(
    client: &impl CompletionClient,
    title: &str,
    abstract_text: &str,
) -> Enrichment<ArticleSummary> {
    let abstract_chars = abstract_text.chars().count();
    if abstract_chars < MIN_ABSTRACT_CHARS {
        return Enrichment::degraded(
            ArticleSummary::plain(ABSTRACT_UNAVAILABLE),
            EnrichmentError::AbstractTooShort(abstract_chars),
        );
    }

    let prompt = prompt::article(title, abstract_text);
    let text = match client.complete(&prompt, SUMMARY_SAMPLING).await {
        Ok(text) => text,
        Err(e) => return Enrichment::degraded(ArticleSummary::plain(SUMMARY_UNAVAILABLE), e),
    };

    match parse::embedded_object(&text) {
        Ok(value) => Enrichment::Enriched(ArticleSummary {
            summary: parse::string_field(&value, "summary")
                .unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string()),
            study_type: parse::string_field(&value, "studyType")
                .unwrap_or_else(|| UNKNOWN_STUDY_TYPE.to_string()),
            key_findings: parse::string_list(&value, "keyFindings", usize::MAX),
            clinical_implications: parse::string_field(&value, "clinicalImplications")
                .unwrap_or_default(),
            tags: parse::string_list(&value, "tags", MAX_TAGS),
            themes: parse::string_list(&value, "themes", MAX_ARTICLE_THEMES),
        }),
        Err(reason) => Enrichment::degraded(
            ArticleSummary::from_raw(&text),
            EnrichmentError::Unparseable(reason),
        ),
    }
}
