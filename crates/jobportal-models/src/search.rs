//! Search filters and sort options for job listings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::job::{ExperienceLevel, JobType};

/// Sort key accepted by the listing endpoints. Wire values are camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    CreatedAt,
    Salary,
    Relevance,
    Applications,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::Salary => "salary",
            SortBy::Relevance => "relevance",
            SortBy::Applications => "applications",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SortByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortBy::CreatedAt),
            "salary" => Ok(SortBy::Salary),
            "relevance" => Ok(SortBy::Relevance),
            "applications" => Ok(SortBy::Applications),
            _ => Err(SortByParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown sort key: {0}")]
pub struct SortByParseError(String);

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort key plus direction. Defaults to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortOptions {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            sort_by: SortBy::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl SortOptions {
    /// Key/value pairs for the query string.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
        ]
    }
}

/// Listing search filters. Unset fields are omitted from the query string;
/// multi-valued fields become repeated `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub job_type: Vec<JobType>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub experience: Vec<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

impl JobSearchFilters {
    /// Key/value pairs for the query string, skipping unset and empty
    /// fields. Multi-valued fields repeat their key once per value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = self.query.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("query", query.to_string()));
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("location", location.to_string()));
        }
        for job_type in &self.job_type {
            pairs.push(("jobType", job_type.as_str().to_string()));
        }
        for experience in &self.experience {
            pairs.push(("experience", experience.as_str().to_string()));
        }
        if let Some(min) = self.salary_min {
            pairs.push(("salaryMin", min.to_string()));
        }
        if let Some(max) = self.salary_max {
            pairs.push(("salaryMax", max.to_string()));
        }
        for skill in self.skills.iter().filter(|s| !s.is_empty()) {
            pairs.push(("skills", skill.clone()));
        }
        if let Some(company_id) = self.company_id.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("companyId", company_id.to_string()));
        }
        pairs
    }
}
