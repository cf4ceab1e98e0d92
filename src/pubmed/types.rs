use std::collections::HashMap;

use serde::Deserialize;

/// Response from `esearch.fcgi?retmode=json`.
#[derive(Deserialize, Debug)]
pub struct ESearchResponse {
    pub esearchresult: ESearchResult,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ESearchResult {
    pub count: Option<String>,
    pub idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}

/// Response from `esummary.fcgi?retmode=json&version=2.0`.
///
/// `result` mixes a `uids` array with one document summary keyed by each identifier.
#[derive(Deserialize, Debug)]
pub struct ESummaryResponse {
    #[serde(default)]
    pub result: HashMap<String, ResultEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ResultEntry {
    Uids(Vec<String>),
    Doc(Box<DocSum>),
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DocSum {
    pub pubdate: String,
    pub title: String,
    pub authors: Vec<DocAuthor>,
    pub source: String,
    pub fulljournalname: String,
    pub articleids: Vec<ArticleId>,
    pub pubtype: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DocAuthor {
    pub name: String,
}

/// One entry of a record's heterogeneous identifier list (`pubmed`, `doi`, `pmc`, ...).
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ArticleId {
    pub idtype: String,
    pub value: String,
}

/// Bibliographic fields for one identifier, normalized from a [`DocSum`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub journal_abbrev: String,
    pub pub_date: String,
    pub doi: Option<String>,
    pub pmc_id: Option<String>,
    pub pub_types: Vec<String>,
}

impl From<DocSum> for SummaryRecord {
    fn from(doc: DocSum) -> Self {
        let doi = find_article_id(&doc.articleids, "doi");
        let pmc_id = find_article_id(&doc.articleids, "pmc");
        Self {
            title: doc.title,
            authors: doc
                .authors
                .into_iter()
                .map(|a| a.name)
                .filter(|n| !n.is_empty())
                .collect(),
            journal: doc.fulljournalname,
            journal_abbrev: doc.source,
            pub_date: doc.pubdate,
            doi,
            pmc_id,
            pub_types: doc.pubtype,
        }
    }
}

fn find_article_id(ids: &[ArticleId], idtype: &str) -> Option<String> {
    ids.iter()
        .find(|id| id.idtype == idtype && !id.value.is_empty())
        .map(|id| id.value.clone())
}

/// First page of identifiers for a query, in the upstream's sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdPage {
    pub ids: Vec<String>,
    pub total: u64,
}

/// Per-identifier partial data from stages 2-4. Any identifier may be absent from any map.
#[derive(Debug, Clone, Default)]
pub struct PartialRecords {
    pub summaries: HashMap<String, SummaryRecord>,
    pub abstracts: HashMap<String, String>,
    pub taxonomy: HashMap<String, Vec<String>>,
}

/// Everything one retrieval produced, ready for assembly.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    pub ids: Vec<String>,
    pub total: u64,
    pub partials: PartialRecords,
}
