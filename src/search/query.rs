use std::fmt;

use super::countries::affiliation_aliases;
use super::filters::FilterSpec;

/// A boolean query in PubMed's search-field dialect, built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery(String);

impl CompiledQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compile free text and filters into one query. Each active filter is ANDed onto the text.
pub fn compile(text: &str, filters: &FilterSpec) -> CompiledQuery {
    let mut query = text.to_string();

    if let Some(days) = filters.date_range.days() {
        query.push_str(&format!(" AND (\"last {days} days\"[dp])"));
    }

    if !filters.article_types.is_empty() {
        let types = disjunction(filters.article_types.iter().map(String::as_str), "pt");
        query.push_str(&format!(" AND {types}"));
    }

    if filters.free_full_text_only {
        query.push_str(" AND free full text[sb]");
    }

    let aliases = affiliation_aliases(&filters.countries);
    if !aliases.is_empty() {
        query.push_str(&format!(" AND {}", disjunction(aliases, "ad")));
    }

    CompiledQuery(query)
}

/// `("a"[tag] OR "b"[tag] ...)`
fn disjunction<'a>(terms: impl IntoIterator<Item = &'a str>, tag: &str) -> String {
    let clauses: Vec<String> = terms
        .into_iter()
        .map(|term| format!("\"{}\"[{tag}]", term.replace('"', "")))
        .collect();
    format!("({})", clauses.join(" OR "))
}
