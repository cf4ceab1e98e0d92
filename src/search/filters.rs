use serde::{Deserialize, Deserializer};

/// Publication-date window. Unknown values deserialize to `All` (no restriction).
#[derive(Debug, Deserialize, clap::ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Week,
    Month,
    Year,
    #[serde(rename = "5years")]
    #[value(name = "5years")]
    FiveYears,
    #[default]
    #[serde(other)]
    All,
}

impl DateRange {
    /// Relative window in days, `None` when unrestricted.
    pub fn days(self) -> Option<u32> {
        match self {
            DateRange::All => None,
            DateRange::Week => Some(7),
            DateRange::Month => Some(30),
            DateRange::Year => Some(365),
            DateRange::FiveYears => Some(1825),
        }
    }
}

#[derive(Debug, Deserialize, clap::ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    DateDesc,
    DateAsc,
    #[default]
    #[serde(other)]
    Relevance,
}

impl SortBy {
    /// Sort key understood by the `esearch` endpoint.
    ///
    /// The endpoint only offers newest-first date ordering, so both date modes
    /// map to `pub_date`.
    pub fn upstream_key(self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::DateDesc | SortBy::DateAsc => "pub_date",
        }
    }
}

/// Structured filters accompanying a free-text query. Every field is optional
/// on the wire; missing and `null` fields both take their default.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub date_range: DateRange,
    #[serde(deserialize_with = "null_as_default")]
    pub article_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sort_by: SortBy,
    #[serde(deserialize_with = "null_as_default")]
    pub free_full_text_only: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
