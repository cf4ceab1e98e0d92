//! Pattern-based extraction from `efetch` PubmedArticleSet XML.
//!
//! Only a handful of elements are needed, so articles are located by pattern
//! rather than building a full document tree.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<PubmedArticle(?:\s[^>]*)?>(.*?)</PubmedArticle>").expect("valid regex")
});
static PMID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<PMID[^>]*>\s*(\d+)\s*</PMID>").expect("valid regex"));
static ABSTRACT_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<AbstractText(?:\s[^>]*)?>(.*?)</AbstractText>").expect("valid regex")
});
static DESCRIPTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<DescriptorName[^>]*>([^<]+)</DescriptorName>").expect("valid regex")
});
static KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<Keyword[^>]*>([^<]+)</Keyword>").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Iterate `(pmid, article_xml)` for every article that carries a PMID.
fn articles(xml: &str) -> impl Iterator<Item = (&str, &str)> {
    ARTICLE.captures_iter(xml).filter_map(|caps| {
        let body = caps.get(1)?.as_str();
        let pmid = PMID.captures(body)?.get(1)?.as_str();
        Some((pmid, body))
    })
}

/// Abstract text per PMID. Structured abstracts (several `AbstractText`
/// sections) are joined with a single space. Articles without an abstract are omitted.
pub fn extract_abstracts(xml: &str) -> HashMap<String, String> {
    articles(xml)
        .filter_map(|(pmid, body)| {
            let segments: Vec<String> = ABSTRACT_TEXT
                .captures_iter(body)
                .filter_map(|caps| caps.get(1))
                .map(|m| strip_markup(m.as_str()))
                .filter(|s| !s.is_empty())
                .collect();
            if segments.is_empty() {
                None
            } else {
                Some((pmid.to_string(), segments.join(" ")))
            }
        })
        .collect()
}

/// Taxonomy terms per PMID in document order: MeSH descriptors first, then author keywords.
pub fn extract_taxonomy(xml: &str) -> HashMap<String, Vec<String>> {
    articles(xml)
        .map(|(pmid, body)| {
            let terms = DESCRIPTOR
                .captures_iter(body)
                .chain(KEYWORD.captures_iter(body))
                .filter_map(|caps| caps.get(1))
                .map(|m| decode_entities(m.as_str().trim()))
                .filter(|t| !t.is_empty())
                .collect();
            (pmid.to_string(), terms)
        })
        .collect()
}

fn strip_markup(fragment: &str) -> String {
    decode_entities(TAG.replace_all(fragment, "").trim())
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
<PubmedArticle>
  <MedlineCitation Status="MEDLINE" Owner="NLM">
    <PMID Version="1">111</PMID>
    <Article>
      <ArticleTitle>Structured</ArticleTitle>
      <Abstract>
        <AbstractText Label="BACKGROUND" NlmCategory="BACKGROUND">Background <i>text</i>.</AbstractText>
        <AbstractText Label="RESULTS" NlmCategory="RESULTS">HbA1c &lt; 7% &amp; stable.</AbstractText>
      </Abstract>
    </Article>
    <MeshHeadingList>
      <MeshHeading><DescriptorName UI="D003920" MajorTopicYN="N">Diabetes Mellitus</DescriptorName></MeshHeading>
      <MeshHeading><DescriptorName UI="D006801" MajorTopicYN="N">Humans</DescriptorName></MeshHeading>
    </MeshHeadingList>
    <KeywordList Owner="NOTNLM">
      <Keyword MajorTopicYN="N">glycemic control</Keyword>
    </KeywordList>
  </MedlineCitation>
  <PubmedData>
    <ReferenceList><Reference><ArticleIdList><ArticleId IdType="pubmed">999</ArticleId></ArticleIdList></Reference></ReferenceList>
  </PubmedData>
</PubmedArticle>
<PubmedArticle>
  <MedlineCitation>
    <PMID Version="1">222</PMID>
    <Article><ArticleTitle>No abstract</ArticleTitle></Article>
  </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn joins_abstract_segments_and_strips_markup() {
        let abstracts = extract_abstracts(SET);
        assert_eq!(
            abstracts.get("111").map(String::as_str),
            Some("Background text. HbA1c < 7% & stable.")
        );
    }

    #[test]
    fn articles_without_abstract_are_omitted() {
        let abstracts = extract_abstracts(SET);
        assert!(!abstracts.contains_key("222"));
        assert_eq!(abstracts.len(), 1);
    }

    #[test]
    fn taxonomy_lists_descriptors_then_keywords() {
        let taxonomy = extract_taxonomy(SET);
        assert_eq!(
            taxonomy["111"],
            vec!["Diabetes Mellitus", "Humans", "glycemic control"]
        );
        assert!(taxonomy["222"].is_empty());
    }

    #[test]
    fn empty_or_garbage_input_yields_nothing() {
        assert!(extract_abstracts("").is_empty());
        assert!(extract_taxonomy("<html>error</html>").is_empty());
    }

    #[test]
    fn decode_handles_double_escaped_ampersand_once() {
        assert_eq!(decode_entities("a &amp;lt; b"), "a &lt; b");
    }
}
