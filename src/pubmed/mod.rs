//! NCBI E-utilities gateway: identifier search followed by batched summary,
//! abstract, and taxonomy fetches.

mod markup;
pub mod types;

use std::collections::HashMap;
use std::env;
use std::fmt;

use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::search::filters::SortBy;
use crate::search::query::CompiledQuery;
use types::{ESearchResponse, ESummaryResponse, IdPage, PartialRecords, ResultEntry, Retrieval, SummaryRecord};

const API_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DATABASE: &str = "pubmed";
const ERROR_SNIPPET_CHARS: usize = 200;

/// Retrieval stage, used to label upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Summaries,
    Abstracts,
    Taxonomy,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Search => "search",
            Stage::Summaries => "summary fetch",
            Stage::Abstracts => "abstract fetch",
            Stage::Taxonomy => "taxonomy fetch",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PubMedError {
    #[error("PubMed {stage} failed: HTTP {code}: {message}")]
    Status {
        stage: Stage,
        code: u16,
        message: String,
    },

    #[error("PubMed {stage} rejected the request: {message}")]
    Rejected { stage: Stage, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid E-utilities URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Pagination and ordering for the identifier search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub sort: SortBy,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// The four staged operations of the bibliographic service.
/// Implemented by `PubMedClient` for production; test doubles count calls.
pub trait BibliographicSource {
    async fn search_ids(
        &self,
        query: &CompiledQuery,
        page: PageRequest,
    ) -> Result<IdPage, PubMedError>;

    async fn fetch_summaries(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, SummaryRecord>, PubMedError>;

    async fn fetch_abstracts(&self, ids: &[String]) -> Result<HashMap<String, String>, PubMedError>;

    async fn fetch_taxonomy(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, PubMedError>;
}

/// Run the staged retrieval for one query page.
///
/// An empty identifier page short-circuits before any fetch is issued.
/// Summary failures are fatal; abstract and taxonomy failures degrade to
/// empty maps so the page still renders.
pub async fn retrieve(
    source: &impl BibliographicSource,
    query: &CompiledQuery,
    page: PageRequest,
) -> Result<Retrieval, PubMedError> {
    let id_page = source.search_ids(query, page).await?;
    info!(ids = id_page.ids.len(), total = id_page.total, "pubmed:search");

    if id_page.ids.is_empty() {
        return Ok(Retrieval::default());
    }

    let ids = &id_page.ids;
    let (summaries, abstracts, taxonomy) = tokio::join!(
        source.fetch_summaries(ids),
        source.fetch_abstracts(ids),
        source.fetch_taxonomy(ids),
    );

    let summaries = summaries?;
    let abstracts = unwrap_or_empty(abstracts, Stage::Abstracts);
    let taxonomy = unwrap_or_empty(taxonomy, Stage::Taxonomy);

    debug!(
        summaries = summaries.len(),
        abstracts = abstracts.len(),
        taxonomy = taxonomy.len(),
        "pubmed:fetch complete"
    );

    Ok(Retrieval {
        ids: id_page.ids,
        total: id_page.total,
        partials: PartialRecords {
            summaries,
            abstracts,
            taxonomy,
        },
    })
}

fn unwrap_or_empty<V>(
    result: Result<HashMap<String, V>, PubMedError>,
    stage: Stage,
) -> HashMap<String, V> {
    match result {
        Ok(map) => map,
        Err(e) => {
            warn!(%e, %stage, "partial fetch failure (continuing without it)");
            HashMap::new()
        }
    }
}

#[derive(Clone)]
struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// HTTP client for the E-utilities endpoints.
///
/// `NCBI_API_KEY` is optional; with it NCBI allows a higher request rate.
#[derive(Clone, Debug)]
pub struct PubMedClient {
    http: Client,
    api_key: Option<ApiKey>,
    base_url: String,
}

impl PubMedClient {
    pub fn from_env(http: Client) -> Self {
        let api_key = env::var("NCBI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(ApiKey);
        if api_key.is_some() {
            debug!("NCBI API key configured");
        }
        Self {
            http,
            api_key,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: None,
            base_url: base_url.to_string(),
        }
    }

    fn endpoint(&self, name: &str, params: &[(&str, &str)]) -> Result<Url, PubMedError> {
        let mut url = Url::parse_with_params(&format!("{}/{name}", self.base_url), params)?;
        if let Some(ref key) = self.api_key {
            url.query_pairs_mut().append_pair("api_key", &key.0);
        }
        Ok(url)
    }

    async fn get(&self, stage: Stage, url: Url) -> Result<reqwest::Response, PubMedError> {
        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            } else {
                text.chars().take(ERROR_SNIPPET_CHARS).collect()
            };
            warn!(%stage, status = %status, "PubMed request failed");
            return Err(PubMedError::Status {
                stage,
                code: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch_xml(
        &self,
        stage: Stage,
        ids: &[String],
        rettype: Option<&str>,
    ) -> Result<String, PubMedError> {
        let joined = ids.join(",");
        let mut params = vec![("db", DATABASE), ("id", joined.as_str()), ("retmode", "xml")];
        if let Some(rettype) = rettype {
            params.push(("rettype", rettype));
        }
        let url = self.endpoint("efetch.fcgi", &params)?;
        Ok(self.get(stage, url).await?.text().await?)
    }
}

impl BibliographicSource for PubMedClient {
    async fn search_ids(
        &self,
        query: &CompiledQuery,
        page: PageRequest,
    ) -> Result<IdPage, PubMedError> {
        let retmax = page.page_size.to_string();
        let retstart = page.offset().to_string();
        let url = self.endpoint(
            "esearch.fcgi",
            &[
                ("db", DATABASE),
                ("term", query.as_str()),
                ("retmode", "json"),
                ("retmax", retmax.as_str()),
                ("retstart", retstart.as_str()),
                ("sort", page.sort.upstream_key()),
                ("usehistory", "n"),
            ],
        )?;

        let body: ESearchResponse = self.get(Stage::Search, url).await?.json().await?;
        let result = body.esearchresult;

        if let Some(message) = result.error {
            return Err(PubMedError::Rejected {
                stage: Stage::Search,
                message,
            });
        }

        let total = result
            .count
            .as_deref()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0);

        Ok(IdPage {
            ids: result.idlist,
            total,
        })
    }

    async fn fetch_summaries(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, SummaryRecord>, PubMedError> {
        let joined = ids.join(",");
        let url = self.endpoint(
            "esummary.fcgi",
            &[
                ("db", DATABASE),
                ("id", joined.as_str()),
                ("retmode", "json"),
                ("version", "2.0"),
            ],
        )?;

        let body: ESummaryResponse = self.get(Stage::Summaries, url).await?.json().await?;

        Ok(body
            .result
            .into_iter()
            .filter_map(|(uid, entry)| match entry {
                ResultEntry::Doc(doc) => Some((uid, SummaryRecord::from(*doc))),
                ResultEntry::Uids(_) => None,
            })
            .collect())
    }

    async fn fetch_abstracts(&self, ids: &[String]) -> Result<HashMap<String, String>, PubMedError> {
        let xml = self.fetch_xml(Stage::Abstracts, ids, Some("abstract")).await?;
        Ok(markup::extract_abstracts(&xml))
    }

    async fn fetch_taxonomy(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, PubMedError> {
        let xml = self.fetch_xml(Stage::Taxonomy, ids, None).await?;
        Ok(markup::extract_taxonomy(&xml))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        ids: Vec<String>,
        fail_summaries: bool,
        fail_abstracts: bool,
        searches: AtomicUsize,
        fetches: AtomicUsize,
        pages: Mutex<Vec<PageRequest>>,
    }

    fn upstream_error(stage: Stage) -> PubMedError {
        PubMedError::Status {
            stage,
            code: 502,
            message: "bad gateway".into(),
        }
    }

    impl BibliographicSource for CountingSource {
        async fn search_ids(
            &self,
            _query: &CompiledQuery,
            page: PageRequest,
        ) -> Result<IdPage, PubMedError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            self.pages.lock().unwrap().push(page);
            Ok(IdPage {
                ids: self.ids.clone(),
                total: self.ids.len() as u64 * 10,
            })
        }

        async fn fetch_summaries(
            &self,
            ids: &[String],
        ) -> Result<HashMap<String, SummaryRecord>, PubMedError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_summaries {
                return Err(upstream_error(Stage::Summaries));
            }
            Ok(ids
                .iter()
                .map(|id| {
                    (
                        id.clone(),
                        SummaryRecord {
                            title: format!("Title {id}"),
                            ..Default::default()
                        },
                    )
                })
                .collect())
        }

        async fn fetch_abstracts(
            &self,
            ids: &[String],
        ) -> Result<HashMap<String, String>, PubMedError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_abstracts {
                return Err(upstream_error(Stage::Abstracts));
            }
            Ok(ids.iter().map(|id| (id.clone(), format!("Abstract {id}"))).collect())
        }

        async fn fetch_taxonomy(
            &self,
            _ids: &[String],
        ) -> Result<HashMap<String, Vec<String>>, PubMedError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(HashMap::new())
        }
    }

    fn query() -> CompiledQuery {
        crate::search::query::compile("test", &Default::default())
    }

    fn page(page: u32) -> PageRequest {
        PageRequest {
            page,
            page_size: 10,
            sort: SortBy::Relevance,
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(page(1).offset(), 0);
        assert_eq!(page(3).offset(), 20);
        assert_eq!(page(0).offset(), 0);
    }

    #[tokio::test]
    async fn empty_search_short_circuits() {
        let source = CountingSource::default();

        let retrieval = retrieve(&source, &query(), page(1)).await.unwrap();

        assert!(retrieval.ids.is_empty());
        assert_eq!(retrieval.total, 0);
        assert_eq!(source.searches.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetches_all_stages_for_found_ids() {
        let source = CountingSource {
            ids: vec!["1".into(), "2".into()],
            ..Default::default()
        };

        let retrieval = retrieve(&source, &query(), page(2)).await.unwrap();

        assert_eq!(retrieval.ids, vec!["1", "2"]);
        assert_eq!(retrieval.total, 20);
        assert_eq!(retrieval.partials.summaries.len(), 2);
        assert_eq!(retrieval.partials.abstracts["2"], "Abstract 2");
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
        assert_eq!(source.pages.lock().unwrap()[0], page(2));
    }

    #[tokio::test]
    async fn summary_failure_is_fatal() {
        let source = CountingSource {
            ids: vec!["1".into()],
            fail_summaries: true,
            ..Default::default()
        };

        let err = retrieve(&source, &query(), page(1)).await.unwrap_err();
        assert!(err.to_string().contains("summary fetch"), "got: {err}");
    }

    #[tokio::test]
    async fn abstract_failure_degrades_to_empty() {
        let source = CountingSource {
            ids: vec!["1".into()],
            fail_abstracts: true,
            ..Default::default()
        };

        let retrieval = retrieve(&source, &query(), page(1)).await.unwrap();
        assert!(retrieval.partials.abstracts.is_empty());
        assert_eq!(retrieval.partials.summaries.len(), 1);
    }
}
