use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use milwatchcore::feed::{BoundingBox, CARIBBEAN_REGIONS};
use milwatchcore::{RuleBook, RuleSet};
use serde::{Deserialize, Serialize};

use crate::client::fr24::DEFAULT_API_BASE_URL;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub regions: Vec<BoundingBox>,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub rules: RuleSet,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            regions: CARIBBEAN_REGIONS.to_vec(),
            concurrency: 1,
            timeout_secs: 10,
            rules: RuleSet::default(),
        }
    }
}

impl ScanConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scan config {}", path_ref.display()))?;
        let config: ScanConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scan config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(api_token: Option<String>, concurrency: usize) -> Self {
        Self {
            api_token,
            concurrency,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn rule_book(&self) -> anyhow::Result<RuleBook> {
        RuleBook::compile(self.rules.clone()).context("compiling classification rules")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_default_regions() {
        let cfg = ScanConfig::from_args(Some("secret".into()), 4);
        assert_eq!(cfg.regions.len(), 4);
        assert_eq!(cfg.concurrency, 4);
        assert!(cfg.rule_book().is_ok());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"concurrency: 3\nregions:\n  - {north: 12.0, south: 10.0, west: -62.0, east: -60.0}\nrules:\n  military_types: [A400]\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ScanConfig::load(&path).unwrap();
        assert_eq!(cfg.concurrency, 3);
        assert_eq!(cfg.regions, vec![BoundingBox::new(12.0, 10.0, -62.0, -60.0)]);
        assert_eq!(cfg.rules.military_types, vec!["A400".to_string()]);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn bad_rules_fail_with_context() {
        let cfg = ScanConfig {
            rules: RuleSet {
                serial_pattern: "[".into(),
                ..RuleSet::default()
            },
            ..Default::default()
        };
        let err = cfg.rule_book().unwrap_err();
        assert!(err.to_string().contains("compiling classification rules"));
    }
}
