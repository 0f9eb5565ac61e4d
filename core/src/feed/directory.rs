use serde::{Deserialize, Serialize};

/// Answer of a direct identity lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftDetails {
    #[serde(default)]
    pub operator: Option<String>,
}

/// One hit of a free-text aircraft search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl AircraftDetails {
    pub fn operator_name(&self) -> Option<&str> {
        usable(&self.operator)
    }
}

impl SearchCandidate {
    /// Operator name, falling back to the registered owner.
    pub fn operator_or_owner(&self) -> Option<&str> {
        usable(&self.operator).or_else(|| usable(&self.owner))
    }

    pub fn has_registration(&self, registration: &str) -> bool {
        self.registration
            .as_deref()
            .is_some_and(|reg| reg.trim().eq_ignore_ascii_case(registration.trim()))
    }
}

fn usable(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_used_when_operator_is_blank() {
        let candidate = SearchCandidate {
            registration: Some("N123AB".into()),
            operator: Some("  ".into()),
            owner: Some("Acme Leasing".into()),
        };
        assert_eq!(candidate.operator_or_owner(), Some("Acme Leasing"));
    }

    #[test]
    fn registration_match_ignores_case() {
        let candidate = SearchCandidate {
            registration: Some("n123ab".into()),
            ..Default::default()
        };
        assert!(candidate.has_registration("N123AB"));
        assert!(!candidate.has_registration("N123AC"));
    }
}
