use crate::pubmed::types::{PartialRecords, SummaryRecord};

use super::article::{Article, Author, record_url};

const SUBJECT_TERMS: usize = 5;
const KEYWORD_TERMS: usize = 5;
const UNTITLED: &str = "Untitled";
const UNKNOWN_JOURNAL: &str = "Unknown";

/// Split a taxonomy list by position: the first five terms are subject
/// terms, the next five keywords. Anything past the tenth term is dropped.
pub fn split_taxonomy(terms: &[String]) -> (Vec<String>, Vec<String>) {
    let subjects = terms.iter().take(SUBJECT_TERMS).cloned().collect();
    let keywords = terms
        .iter()
        .skip(SUBJECT_TERMS)
        .take(KEYWORD_TERMS)
        .cloned()
        .collect();
    (subjects, keywords)
}

/// Merge partial records into one article per identifier, preserving `ids` order.
///
/// Identifiers missing from a partial map get empty values for that part.
/// `relevance_score` is left at zero for the scorer to fill.
pub fn assemble(ids: &[String], partials: &PartialRecords) -> Vec<Article> {
    ids.iter()
        .map(|pmid| {
            let summary = partials.summaries.get(pmid).cloned().unwrap_or_default();
            let abstract_text = partials.abstracts.get(pmid).cloned().unwrap_or_default();
            let (mesh_terms, keywords) = partials
                .taxonomy
                .get(pmid)
                .map(|terms| split_taxonomy(terms))
                .unwrap_or_default();
            merge(pmid, summary, abstract_text, mesh_terms, keywords)
        })
        .collect()
}

fn merge(
    pmid: &str,
    summary: SummaryRecord,
    abstract_text: String,
    mesh_terms: Vec<String>,
    keywords: Vec<String>,
) -> Article {
    let title = non_empty_or(summary.title, UNTITLED);
    let journal = if !summary.journal.trim().is_empty() {
        summary.journal
    } else {
        non_empty_or(summary.journal_abbrev.clone(), UNKNOWN_JOURNAL)
    };

    Article {
        pmid: pmid.to_string(),
        title,
        authors: summary
            .authors
            .into_iter()
            .map(|name| Author { name })
            .collect(),
        journal,
        journal_abbrev: summary.journal_abbrev,
        pub_date: summary.pub_date,
        abstract_text,
        has_full_text: summary.pmc_id.is_some(),
        doi: summary.doi,
        pmc_id: summary.pmc_id,
        mesh_terms,
        keywords,
        pub_types: summary.pub_types,
        relevance_score: 0,
        url: record_url(pmid),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
