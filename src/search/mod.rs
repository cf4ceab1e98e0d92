//! Search orchestration: filter compilation, staged retrieval, assembly, scoring, and report formatting.

pub mod article;
pub mod assemble;
pub mod countries;
pub mod engine;
pub mod filters;
pub mod query;
pub mod relevance;
pub mod report;
