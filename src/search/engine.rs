use serde::Serialize;
use tracing::{info, warn};

use crate::insights::{self, InsightsSummary};
use crate::llm::CompletionClient;
use crate::pubmed::{self, BibliographicSource, PageRequest, PubMedError};
use crate::search::article::Article;
use crate::search::assemble::assemble;
use crate::search::filters::FilterSpec;
use crate::search::query;
use crate::search::relevance;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// One search invocation: free text, 1-based page, page size, and filters.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
    pub filters: FilterSpec,
}

#[cfg(test)]
impl SearchRequest {
    pub(crate) fn new(query: impl Into<String>, filters: FilterSpec) -> Self {
        Self {
            query: query.into(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filters,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub total_results: u64,
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<Article>,
    pub ai_insights: Option<InsightsSummary>,
    pub avg_relevancy: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] PubMedError),
}

/// Compile, retrieve, assemble, score, and optionally enrich one page of results.
///
/// Enrichment runs only when `llm` is present and the page is non-empty; its
/// failure leaves `ai_insights` empty and never fails the search.
pub async fn run(
    source: &impl BibliographicSource,
    llm: Option<&impl CompletionClient>,
    request: &SearchRequest,
) -> Result<SearchResponse, SearchError> {
    if request.query.trim().is_empty() {
        return Err(SearchError::Validation("Query is required".to_string()));
    }

    let page = PageRequest {
        page: request.page.max(1),
        page_size: request.page_size.clamp(1, MAX_PAGE_SIZE),
        sort: request.filters.sort_by,
    };

    let compiled = query::compile(&request.query, &request.filters);
    info!(query = %compiled, page = page.page, page_size = page.page_size, "search:compiled");

    let retrieval = pubmed::retrieve(source, &compiled, page).await?;

    let mut articles = assemble(&retrieval.ids, &retrieval.partials);
    for article in &mut articles {
        article.relevance_score = relevance::score(
            &article.title,
            &article.abstract_text,
            &article.mesh_terms.join(" "),
            &request.query,
        );
    }

    let ai_insights = match llm {
        Some(client) if !articles.is_empty() => {
            insights::result_insights(client, &articles, &request.query)
                .await
                .enriched()
        }
        _ => None,
    };
    if llm.is_some() && !articles.is_empty() && ai_insights.is_none() {
        warn!("search responding without AI insights");
    }

    let avg_relevancy = average_score(&articles);
    info!(
        results = articles.len(),
        total = retrieval.total,
        avg_relevancy,
        insights = ai_insights.is_some(),
        "search complete"
    );

    Ok(SearchResponse {
        success: true,
        total_results: retrieval.total,
        page: page.page,
        page_size: page.page_size,
        results: articles,
        ai_insights,
        avg_relevancy,
    })
}

fn average_score(articles: &[Article]) -> u32 {
    if articles.is_empty() {
        return 0;
    }
    let sum: u32 = articles.iter().map(|a| u32::from(a.relevance_score)).sum();
    (f64::from(sum) / articles.len() as f64).round() as u32
}
