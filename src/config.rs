use std::sync::Arc;

use anyhow::{Context, Result};

use crate::catalog::{CatalogGroup, GroupCatalog};
use crate::store::{CatalogStore, StalePolicy};
use crate::transport::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::transport::HttpTransport;
use crate::util::env::{env_opt, log_snapshot, parse_value, split_list};

pub const ENV_BASE_URL: &str = "CATALOG_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "CATALOG_USER_AGENT";
pub const ENV_MALE_CATEGORIES: &str = "CATALOG_MALE_CATEGORIES";
pub const ENV_FEMALE_CATEGORIES: &str = "CATALOG_FEMALE_CATEGORIES";
pub const ENV_STALE_POLICY: &str = "CATALOG_STALE_POLICY";

const ALL_KEYS: [&str; 6] = [
    ENV_BASE_URL,
    ENV_TIMEOUT_SECS,
    ENV_USER_AGENT,
    ENV_MALE_CATEGORIES,
    ENV_FEMALE_CATEGORIES,
    ENV_STALE_POLICY,
];

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub groups: GroupCatalog,
    pub stale_policy: StalePolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("catalogo/", env!("CARGO_PKG_VERSION")).to_string(),
            groups: GroupCatalog::default(),
            stale_policy: StalePolicy::default(),
        }
    }
}

impl CatalogConfig {
    /// Resolve from the process environment (`.env` included).
    pub fn from_env() -> Result<Self> {
        log_snapshot("catalog", &ALL_KEYS);
        Self::from_lookup(env_opt)
    }

    /// Resolve from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_BASE_URL) {
            cfg.base_url = v.trim().to_string();
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            cfg.timeout_secs = parse_value(ENV_TIMEOUT_SECS, &v)?;
        }
        if let Some(v) = lookup(ENV_USER_AGENT) {
            cfg.user_agent = v.trim().to_string();
        }
        for (key, group) in [
            (ENV_MALE_CATEGORIES, CatalogGroup::Male),
            (ENV_FEMALE_CATEGORIES, CatalogGroup::Female),
        ] {
            if let Some(v) = lookup(key) {
                cfg.groups = cfg
                    .groups
                    .with_slugs(group, split_list(&v))
                    .with_context(|| format!("invalid value for {key}"))?;
            }
        }
        if let Some(v) = lookup(ENV_STALE_POLICY) {
            cfg.stale_policy = parse_value(ENV_STALE_POLICY, &v)?;
        }
        Ok(cfg)
    }

    pub fn transport(&self) -> Result<HttpTransport> {
        HttpTransport::with_user_agent(
            Some(&self.base_url),
            Some(self.timeout_secs),
            &self.user_agent,
        )
        .with_context(|| format!("building HTTP transport for {}", self.base_url))
    }

    /// Fresh store for one session, talking to the configured catalog.
    pub fn build_store(&self) -> Result<CatalogStore> {
        let transport = Arc::new(self.transport()?);
        Ok(CatalogStore::new(transport, self.groups.clone(), self.stale_policy))
    }
}
