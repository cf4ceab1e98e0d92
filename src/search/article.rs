use serde::Serialize;

const RECORD_URL_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
}

/// One search hit, merged from the summary, abstract, and taxonomy stages.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub pmid: String,
    pub title: String,
    pub authors: Vec<Author>,
    pub journal: String,
    pub journal_abbrev: String,
    pub pub_date: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmc_id: Option<String>,
    pub has_full_text: bool,
    pub mesh_terms: Vec<String>,
    pub keywords: Vec<String>,
    pub pub_types: Vec<String>,
    pub relevance_score: u8,
    pub url: String,
}

pub fn record_url(pmid: &str) -> String {
    format!("{RECORD_URL_BASE}/{pmid}/")
}

pub fn doi_url(doi: &str) -> String {
    format!("https://doi.org/{doi}")
}

pub fn pmc_url(pmc_id: &str) -> String {
    format!("https://www.ncbi.nlm.nih.gov/pmc/articles/{pmc_id}/")
}
