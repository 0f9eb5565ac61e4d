use crate::feed::FlightRecord;
use crate::rules::RuleBook;

/// Self-contained military evidence found on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalReport {
    pub reasons: Vec<String>,
}

impl SignalReport {
    pub fn is_strong(&self) -> bool {
        !self.reasons.is_empty()
    }

    pub fn summary(&self) -> String {
        self.reasons.join(", ")
    }
}

/// Runs every airframe/registry check and collects each match.
///
/// No check short-circuits another; reasons come out in a fixed order.
pub fn detect_signals(record: &FlightRecord, rules: &RuleBook) -> SignalReport {
    let identity = upper(&record.identity);
    let aircraft_type = upper(&record.aircraft_type);
    let painted = upper(&record.painted_operator_code);
    let operating = upper(&record.operating_operator_code);
    let registration = record.registration.as_deref().unwrap_or("").trim();

    let mut reasons = Vec::new();

    if !identity.is_empty() && rules.has_military_identity_prefix(&identity) {
        reasons.push("identity prefix (military)".to_string());
    }
    if !aircraft_type.is_empty() && rules.is_military_type(&aircraft_type) {
        reasons.push(format!("type {} (military)", aircraft_type));
    }
    if !registration.is_empty() && rules.is_military_serial(registration) {
        reasons.push(format!("military-style serial {}", registration));
    }
    if !painted.is_empty() && rules.is_military_operator_code(&painted) {
        reasons.push(format!("painted-as {} (military)", painted));
    }
    if !operating.is_empty() && rules.is_military_operator_code(&operating) {
        reasons.push(format!("operating-as {} (military)", operating));
    }

    SignalReport { reasons }
}

fn upper(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_uppercase()
}
