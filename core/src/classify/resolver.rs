//! Tiered operator lookup.
//!
//! Steps run in a fixed order and stop at the first usable name. Every step
//! that runs leaves a [`StepAttempt`]; a failed call is recorded and the
//! chain moves on, so resolution itself never fails.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::feed::SearchCandidate;
use crate::prelude::{AircraftDirectory, LookupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMethod {
    Direct,
    SearchByRegistration,
    SearchByIdentity,
}

/// Which lookup produced an operator name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Direct,
    SearchByRegistration,
    SearchByIdentity,
    NotFound,
    /// Resolver not consulted: airframe signals already decided the record.
    Skipped,
}

impl From<LookupMethod> for Provenance {
    fn from(method: LookupMethod) -> Self {
        match method {
            LookupMethod::Direct => Provenance::Direct,
            LookupMethod::SearchByRegistration => Provenance::SearchByRegistration,
            LookupMethod::SearchByIdentity => Provenance::SearchByIdentity,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provenance::Direct => "direct lookup",
            Provenance::SearchByRegistration => "registration search",
            Provenance::SearchByIdentity => "identity search",
            Provenance::NotFound => "operator not found",
            Provenance::Skipped => "skipped",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Found(String),
    /// The service answered without a usable name.
    Empty,
    Failed(LookupError),
}

impl StepOutcome {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => StepOutcome::Found(name.trim().to_string()),
            None => StepOutcome::Empty,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            StepOutcome::Found(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepAttempt {
    pub method: LookupMethod,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorLookup {
    pub name: Option<String>,
    pub provenance: Provenance,
    pub attempts: Vec<StepAttempt>,
}

impl OperatorLookup {
    pub fn skipped() -> Self {
        Self {
            name: None,
            provenance: Provenance::Skipped,
            attempts: Vec::new(),
        }
    }

    pub fn failures(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, StepOutcome::Failed(_)))
            .count()
    }
}

pub struct OperatorResolver<D> {
    directory: Arc<D>,
}

impl<D> Clone for OperatorResolver<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D: AircraftDirectory> OperatorResolver<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Direct identity lookup, then registration search, then identity search.
    pub async fn resolve(&self, identity: &str, registration: Option<&str>) -> OperatorLookup {
        let identity = identity.trim();
        let registration = registration.map(str::trim).filter(|r| !r.is_empty());

        let mut plan: Vec<(LookupMethod, &str)> = Vec::with_capacity(3);
        if !identity.is_empty() {
            plan.push((LookupMethod::Direct, identity));
        }
        if let Some(registration) = registration {
            plan.push((LookupMethod::SearchByRegistration, registration));
        }
        if !identity.is_empty() {
            plan.push((LookupMethod::SearchByIdentity, identity));
        }

        let mut attempts = Vec::with_capacity(plan.len());
        for (method, query) in plan {
            let outcome = self.attempt(method, query).await;
            match &outcome {
                StepOutcome::Failed(err) => warn!("{:?} for {} failed: {}", method, query, err),
                StepOutcome::Empty => debug!("{:?} for {} found no operator", method, query),
                StepOutcome::Found(name) => debug!("{:?} for {} -> {}", method, query, name),
            }

            let found = outcome.name().map(str::to_string);
            attempts.push(StepAttempt { method, outcome });
            if let Some(name) = found {
                return OperatorLookup {
                    name: Some(name),
                    provenance: method.into(),
                    attempts,
                };
            }
        }

        OperatorLookup {
            name: None,
            provenance: Provenance::NotFound,
            attempts,
        }
    }

    async fn attempt(&self, method: LookupMethod, query: &str) -> StepOutcome {
        match method {
            LookupMethod::Direct => match self.directory.lookup(query).await {
                Ok(details) => StepOutcome::from_name(details.operator_name()),
                Err(err) => StepOutcome::Failed(err),
            },
            LookupMethod::SearchByRegistration => match self.directory.search(query).await {
                Ok(candidates) => {
                    let best = candidates
                        .iter()
                        .find(|c| c.has_registration(query))
                        .or_else(|| candidates.first());
                    StepOutcome::from_name(best.and_then(SearchCandidate::operator_or_owner))
                }
                Err(err) => StepOutcome::Failed(err),
            },
            LookupMethod::SearchByIdentity => match self.directory.search(query).await {
                Ok(candidates) => StepOutcome::from_name(
                    candidates
                        .first()
                        .and_then(SearchCandidate::operator_or_owner),
                ),
                Err(err) => StepOutcome::Failed(err),
            },
        }
    }
}
