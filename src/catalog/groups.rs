use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

pub const PRODUCT_FALLBACK_ERROR: &str = "Erro ao carregar produto";

const MALE_DEFAULT: [&str; 3] = ["mens-shirts", "mens-shoes", "mens-watches"];
const FEMALE_DEFAULT: [&str; 5] = [
    "womens-bags",
    "womens-dresses",
    "womens-jewellery",
    "womens-shoes",
    "womens-watches",
];

/// Merchandising partition of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogGroup {
    Male,
    Female,
}

impl CatalogGroup {
    pub const ALL: [CatalogGroup; 2] = [CatalogGroup::Male, CatalogGroup::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogGroup::Male => "male",
            CatalogGroup::Female => "female",
        }
    }

    /// Message stored in the error slot when a failed load carries no text.
    pub fn fallback_error(self) -> &'static str {
        match self {
            CatalogGroup::Male => "Erro ao carregar produtos masculinos",
            CatalogGroup::Female => "Erro ao carregar produtos femininos",
        }
    }
}

impl fmt::Display for CatalogGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(CatalogGroup::Male),
            "female" => Ok(CatalogGroup::Female),
            other => Err(anyhow!("unknown catalog group {other:?} (expected male|female)")),
        }
    }
}

/// Static group -> ordered category slugs mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCatalog {
    male: Vec<String>,
    female: Vec<String>,
}

impl Default for GroupCatalog {
    fn default() -> Self {
        Self {
            male: MALE_DEFAULT.iter().map(|s| s.to_string()).collect(),
            female: FEMALE_DEFAULT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GroupCatalog {
    pub fn slugs(&self, group: CatalogGroup) -> &[String] {
        match group {
            CatalogGroup::Male => &self.male,
            CatalogGroup::Female => &self.female,
        }
    }

    /// Replace the slugs of one group. Blank entries are dropped; an override
    /// left with no slugs is rejected.
    pub fn with_slugs<I, S>(mut self, group: CatalogGroup, slugs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slugs: Vec<String> = slugs
            .into_iter()
            .map(Into::into)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if slugs.is_empty() {
            bail!("catalog group {group} needs at least one category slug");
        }
        match group {
            CatalogGroup::Male => self.male = slugs,
            CatalogGroup::Female => self.female = slugs,
        }
        Ok(self)
    }
}
