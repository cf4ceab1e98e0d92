use crate::search::article::Article;

/// Articles sampled into the result-set prompt.
pub const SAMPLE_ARTICLES: usize = 5;
const ABSTRACT_EXCERPT_CHARS: usize = 300;

pub fn result_set(articles: &[Article], query: &str) -> String {
    let listing = articles
        .iter()
        .take(SAMPLE_ARTICLES)
        .enumerate()
        .map(|(i, a)| {
            let excerpt: String = a.abstract_text.chars().take(ABSTRACT_EXCERPT_CHARS).collect();
            let excerpt = if excerpt.is_empty() { "N/A".to_string() } else { excerpt };
            format!(
                "{}. {}\nDate: {}\nAbstract: {excerpt}...",
                i + 1,
                a.title,
                a.pub_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Analyze these PubMed search results for the query "{query}" and provide insights.

Articles:
{listing}

Respond in this exact JSON format:
{{
  "summary": "A 2-3 sentence overview of what these results cover and their relevance",
  "themes": ["theme1", "theme2", "theme3", "theme4"],
  "suggestedQueries": ["related search 1", "related search 2", "related search 3"]
}}

JSON response:"#
    )
}

pub fn article(title: &str, abstract_text: &str) -> String {
    format!(
        r#"Analyze this medical research paper and extract structured information for a healthcare professional.

Title: {title}

Abstract: {abstract_text}

Respond ONLY with valid JSON in this exact format:
{{
  "summary": "2-3 sentence summary of the paper focusing on what was studied and what was found",
  "studyType": "e.g., Randomized Controlled Trial, Meta-Analysis, Cohort Study, Case Report, Review, etc.",
  "keyFindings": ["finding 1", "finding 2", "finding 3"],
  "clinicalImplications": "1-2 sentences on practical implications for clinicians",
  "tags": ["tag1", "tag2", "tag3", "tag4", "tag5"],
  "themes": ["broader theme 1", "broader theme 2", "broader theme 3"]
}}

JSON:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_with(title: &str, abstract_text: &str) -> Article {
        Article {
            pmid: "1".into(),
            title: title.into(),
            authors: vec![],
            journal: String::new(),
            journal_abbrev: String::new(),
            pub_date: "2024".into(),
            abstract_text: abstract_text.into(),
            doi: None,
            pmc_id: None,
            has_full_text: false,
            mesh_terms: vec![],
            keywords: vec![],
            pub_types: vec![],
            relevance_score: 50,
            url: String::new(),
        }
    }

    #[test]
    fn result_set_samples_first_five() {
        let articles: Vec<_> = (1..=7)
            .map(|i| article_with(&format!("Title {i}"), "text"))
            .collect();
        let prompt = result_set(&articles, "statins");

        assert!(prompt.contains("query \"statins\""));
        assert!(prompt.contains("5. Title 5"));
        assert!(!prompt.contains("Title 6"));
        assert!(prompt.contains("\"suggestedQueries\""));
    }

    #[test]
    fn result_set_marks_missing_abstracts() {
        let prompt = result_set(&[article_with("T", "")], "q");
        assert!(prompt.contains("Abstract: N/A..."));
    }

    #[test]
    fn result_set_truncates_abstracts() {
        let prompt = result_set(&[article_with("T", &"a".repeat(1000))], "q");
        assert!(prompt.contains(&format!("Abstract: {}...", "a".repeat(300))));
        assert!(!prompt.contains(&"a".repeat(301)));
    }

    #[test]
    fn article_prompt_embeds_title_and_abstract() {
        let prompt = article("Aspirin trial", "We randomized patients.");
        assert!(prompt.contains("Title: Aspirin trial"));
        assert!(prompt.contains("Abstract: We randomized patients."));
        assert!(prompt.contains("\"clinicalImplications\""));
    }
}
