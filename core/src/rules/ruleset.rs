//! Lookup tables that drive classification.
//!
//! [`RuleSet`] is the loadable form; [`RuleBook`] is the normalized,
//! compiled form handed to every component.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_SERIAL_PATTERN: &str = r"^\d{2}-\d{4}$";

#[derive(thiserror::Error, Debug)]
pub enum RuleError {
    #[error("invalid serial pattern {pattern:?}: {source}")]
    InvalidSerialPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("empty entry in {0}")]
    EmptyEntry(&'static str),
}

/// Classification tables as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub military_identity_prefixes: Vec<String>,
    pub military_types: Vec<String>,
    pub military_callsign_prefixes: Vec<String>,
    pub civil_bizjet_types: Vec<String>,
    pub military_keywords: Vec<String>,
    pub civilian_keywords: Vec<String>,
    pub serial_pattern: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            military_identity_prefixes: strings(&["AE"]),
            military_types: strings(&[
                "Q4", "C30J", "C17", "K35R", "E6", "P8", "E3CF", "P3", "E8", "U2", "C5M", "C130",
                "C130H", "C130J", "K35T", "K35E", "K10", "E3", "RC135",
            ]),
            military_callsign_prefixes: strings(&[
                "RCH", "K35", "KOW", "AE", "RFF", "FORTE", "PAT", "CNV", "MAZ",
            ]),
            civil_bizjet_types: strings(&[
                "C750", "C56X", "C25A", "C25B", "C25C", "C550", "C680", "C68A", "GLF2", "GLF3",
                "GLF4", "GLF5", "GLF6", "FA50", "FA7X", "FA8X", "E55P", "E50P", "CL60", "LJ45",
                "LJ35", "LJ40", "LJ55", "LJ60",
            ]),
            military_keywords: strings(&[
                "usaf",
                "navy",
                "air force",
                "raf",
                "marines",
                "military",
                "us navy",
                "us army",
                "royal air force",
                "canadian forces",
                "us coast guard",
                "usmc",
            ]),
            civilian_keywords: strings(&[
                "aviation",
                "airlines",
                "airways",
                "jet",
                "charter",
                "aero",
                "private",
                "bizjet",
                "leasing",
                "helicopter",
                "avionics",
                "executive",
                "flight",
            ]),
            serial_pattern: DEFAULT_SERIAL_PATTERN.to_string(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Normalized, immutable rule tables.
///
/// Codes are stored upper-case and keywords lower-case so callers only
/// normalize the record side.
#[derive(Debug, Clone)]
pub struct RuleBook {
    military_identity_prefixes: Vec<String>,
    military_types: BTreeSet<String>,
    military_callsign_prefixes: Vec<String>,
    civil_bizjet_types: BTreeSet<String>,
    military_keywords: Vec<String>,
    civilian_keywords: Vec<String>,
    serial_pattern: Regex,
}

impl RuleBook {
    pub fn compile(set: RuleSet) -> Result<Self, RuleError> {
        let serial_pattern =
            Regex::new(&set.serial_pattern).map_err(|source| RuleError::InvalidSerialPattern {
                pattern: set.serial_pattern.clone(),
                source,
            })?;

        Ok(Self {
            military_identity_prefixes: upper(
                set.military_identity_prefixes,
                "military_identity_prefixes",
            )?,
            military_types: upper(set.military_types, "military_types")?
                .into_iter()
                .collect(),
            military_callsign_prefixes: upper(
                set.military_callsign_prefixes,
                "military_callsign_prefixes",
            )?,
            civil_bizjet_types: upper(set.civil_bizjet_types, "civil_bizjet_types")?
                .into_iter()
                .collect(),
            military_keywords: lower(set.military_keywords, "military_keywords")?,
            civilian_keywords: lower(set.civilian_keywords, "civilian_keywords")?,
            serial_pattern,
        })
    }

    /// `identity` is expected upper-case.
    pub fn has_military_identity_prefix(&self, identity: &str) -> bool {
        self.military_identity_prefixes
            .iter()
            .any(|prefix| identity.starts_with(prefix.as_str()))
    }

    pub fn is_military_type(&self, aircraft_type: &str) -> bool {
        self.military_types.contains(aircraft_type)
    }

    pub fn is_civil_bizjet(&self, aircraft_type: &str) -> bool {
        self.civil_bizjet_types.contains(aircraft_type)
    }

    /// Exact membership, used for painted/operating operator codes.
    pub fn is_military_operator_code(&self, code: &str) -> bool {
        self.military_callsign_prefixes.iter().any(|p| p == code)
    }

    pub fn has_military_callsign_prefix(&self, callsign: &str) -> bool {
        self.military_callsign_prefixes
            .iter()
            .any(|prefix| callsign.starts_with(prefix.as_str()))
    }

    pub fn is_military_serial(&self, registration: &str) -> bool {
        self.serial_pattern.is_match(registration)
    }

    /// `name` is expected lower-case.
    pub fn mentions_military(&self, name: &str) -> bool {
        self.military_keywords.iter().any(|kw| name.contains(kw.as_str()))
    }

    pub fn mentions_civilian(&self, name: &str) -> bool {
        self.civilian_keywords.iter().any(|kw| name.contains(kw.as_str()))
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::compile(RuleSet::default()).expect("built-in rule set compiles")
    }
}

fn upper(values: Vec<String>, table: &'static str) -> Result<Vec<String>, RuleError> {
    normalize(values, table, str::to_uppercase)
}

fn lower(values: Vec<String>, table: &'static str) -> Result<Vec<String>, RuleError> {
    normalize(values, table, str::to_lowercase)
}

fn normalize(
    values: Vec<String>,
    table: &'static str,
    case: fn(&str) -> String,
) -> Result<Vec<String>, RuleError> {
    values
        .iter()
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(RuleError::EmptyEntry(table))
            } else {
                Ok(case(trimmed))
            }
        })
        .collect()
}
