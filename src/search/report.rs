use crate::insights::{ArticleSummary, InsightsSummary};
use crate::markdown::{escape_md_link, preview, sanitize_heading};

use super::article::{Article, doi_url, pmc_url};
use super::engine::SearchResponse;

const MAX_LISTED_AUTHORS: usize = 3;
const ABSTRACT_PREVIEW_CHARS: usize = 400;

/// Render one result page as Markdown for terminal output.
pub fn format_results(response: &SearchResponse, query: &str) -> String {
    let mut output = format!("# PubMed: {}\n\n", sanitize_heading(query));
    output.push_str(&format!(
        "{} results (page {}, {} per page), average relevancy {}\n\n",
        response.total_results, response.page, response.page_size, response.avg_relevancy
    ));

    if let Some(ref insights) = response.ai_insights {
        push_insights(&mut output, insights);
    }

    if response.results.is_empty() {
        output.push_str("No articles matched.\n");
        return output;
    }

    for (i, article) in response.results.iter().enumerate() {
        push_article(&mut output, i + 1, article);
    }

    output
}

fn push_insights(output: &mut String, insights: &InsightsSummary) {
    output.push_str("## AI Insights\n\n");
    output.push_str(&insights.summary);
    output.push_str("\n\n");
    if !insights.themes.is_empty() {
        output.push_str(&format!("**Themes:** {}\n\n", insights.themes.join(", ")));
    }
    if !insights.suggested_queries.is_empty() {
        output.push_str("**Try also:**\n");
        for q in &insights.suggested_queries {
            output.push_str(&format!("- {q}\n"));
        }
        output.push('\n');
    }
    output.push_str("---\n\n");
}

fn push_article(output: &mut String, rank: usize, article: &Article) {
    output.push_str(&format!(
        "## {rank}. [{}]({})\n\n",
        escape_md_link(&sanitize_heading(&article.title)),
        article.url
    ));

    let mut byline = Vec::new();
    if !article.authors.is_empty() {
        byline.push(author_list(article));
    }
    byline.push(article.journal.clone());
    if !article.pub_date.is_empty() {
        byline.push(article.pub_date.clone());
    }
    output.push_str(&byline.join(" · "));
    output.push_str(&format!("  \nPMID {} · relevance {}", article.pmid, article.relevance_score));
    if !article.pub_types.is_empty() {
        output.push_str(&format!(" · {}", article.pub_types.join(", ")));
    }
    output.push_str("\n\n");

    if !article.abstract_text.is_empty() {
        output.push_str(&format!(
            "> {}\n\n",
            preview(&article.abstract_text, ABSTRACT_PREVIEW_CHARS)
        ));
    }

    if !article.mesh_terms.is_empty() {
        output.push_str(&format!("MeSH: {}\n", article.mesh_terms.join("; ")));
    }
    if !article.keywords.is_empty() {
        output.push_str(&format!("Keywords: {}\n", article.keywords.join("; ")));
    }

    let mut links = Vec::new();
    if let Some(ref doi) = article.doi {
        links.push(format!("[DOI]({})", doi_url(doi)));
    }
    if let Some(ref pmc) = article.pmc_id {
        links.push(format!("[Free full text]({})", pmc_url(pmc)));
    }
    if !links.is_empty() {
        output.push_str(&links.join(" | "));
        output.push('\n');
    }
    output.push('\n');
}

fn author_list(article: &Article) -> String {
    let names: Vec<&str> = article
        .authors
        .iter()
        .take(MAX_LISTED_AUTHORS)
        .map(|a| a.name.as_str())
        .collect();
    if article.authors.len() > MAX_LISTED_AUTHORS {
        format!("{} et al.", names.join(", "))
    } else {
        names.join(", ")
    }
}

/// Render a per-article summary as Markdown.
pub fn format_summary(title: &str, summary: &ArticleSummary) -> String {
    let mut output = format!("# {}\n\n", sanitize_heading(title));
    output.push_str(&format!("**Study type:** {}\n\n", summary.study_type));
    output.push_str(&summary.summary);
    output.push_str("\n\n");

    if !summary.key_findings.is_empty() {
        output.push_str("## Key Findings\n\n");
        for finding in &summary.key_findings {
            output.push_str(&format!("- {finding}\n"));
        }
        output.push('\n');
    }
    if !summary.clinical_implications.is_empty() {
        output.push_str("## Clinical Implications\n\n");
        output.push_str(&summary.clinical_implications);
        output.push_str("\n\n");
    }
    if !summary.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", summary.tags.join(", ")));
    }
    if !summary.themes.is_empty() {
        output.push_str(&format!("Themes: {}\n", summary.themes.join(", ")));
    }
    output
}
