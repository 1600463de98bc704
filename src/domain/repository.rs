//! Source control repositories

use serde::Deserialize;
use serde_json::Value;

use super::{Named, UNKNOWN, decode, decode_page, non_empty};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    pub name: String,
    /// `workspace/slug`
    pub full_name: String,
    pub slug: Option<String>,
    pub is_private: bool,
    pub language: String,
    pub description: String,
    pub main_branch: Option<String>,
}

impl Repository {
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw: RawRepository = decode(value, "repository")?;
        Ok(raw.into())
    }

    pub fn page_from_value(value: &Value) -> Result<Vec<Self>> {
        let raw: Vec<RawRepository> = decode_page(value, "repositories")?;
        Ok(raw.into_iter().map(Self::from).collect())
    }

    /// Segment used to address the repository in URLs
    pub fn path_segment(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.name)
    }

    pub fn visibility(&self) -> &'static str {
        if self.is_private { "Private" } else { "Public" }
    }
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    is_private: bool,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    mainbranch: Option<Named>,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        Self {
            full_name: raw.full_name.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            slug: non_empty(raw.slug),
            is_private: raw.is_private,
            language: non_empty(raw.language).unwrap_or_else(|| UNKNOWN.to_string()),
            description: raw.description.unwrap_or_default(),
            main_branch: raw.mainbranch.and_then(|b| b.name),
        }
    }
}
