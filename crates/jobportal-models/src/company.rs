//! Company records embedded in job listings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Company attached to a job listing or employer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub location: String,
    pub industry: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}
