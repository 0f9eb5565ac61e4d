use serde::{Deserialize, Serialize};

use crate::classify::operator::{classify_operator, OperatorClass};
use crate::classify::signals::SignalReport;
use crate::feed::FlightRecord;
use crate::rules::RuleBook;

/// Precedence rule that produced a verdict, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    StrongSignals,
    OperatorVeto,
    BizjetSuppression,
    NoEvidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_military: bool,
    pub reason: String,
    pub rule: DecisionRule,
}

/// Final keep/drop decision for one record.
///
/// Airframe signals always keep. Without them the record is dropped, with
/// the reason naming the first of: civilian operator, military-looking
/// callsign on a bizjet airframe, or lack of evidence.
pub fn decide(
    record: &FlightRecord,
    signals: &SignalReport,
    operator: Option<&str>,
    rules: &RuleBook,
) -> Verdict {
    if signals.is_strong() {
        return Verdict {
            is_military: true,
            reason: format!("strong signals: {}", signals.summary()),
            rule: DecisionRule::StrongSignals,
        };
    }

    if classify_operator(operator, rules) == OperatorClass::Civilian {
        return Verdict {
            is_military: false,
            reason: format!("operator civilian: {}", operator.unwrap_or_default()),
            rule: DecisionRule::OperatorVeto,
        };
    }

    let callsign = normalized(&record.callsign);
    let aircraft_type = normalized(&record.aircraft_type);
    if !callsign.is_empty()
        && rules.has_military_callsign_prefix(&callsign)
        && rules.is_civil_bizjet(&aircraft_type)
    {
        return Verdict {
            is_military: false,
            reason: format!("callsign {} but bizjet type {}", callsign, aircraft_type),
            rule: DecisionRule::BizjetSuppression,
        };
    }

    Verdict {
        is_military: false,
        reason: "no strong signals and no military operator".to_string(),
        rule: DecisionRule::NoEvidence,
    }
}

fn normalized(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::signals::detect_signals;

    fn verdict_for(record: &FlightRecord, operator: Option<&str>) -> Verdict {
        let rules = RuleBook::default();
        let signals = detect_signals(record, &rules);
        decide(record, &signals, operator, &rules)
    }

    #[test]
    fn strong_signals_beat_civilian_operator() {
        let record = FlightRecord::new("AE01C2").with_type("C680");
        let verdict = verdict_for(&record, Some("Acme Aviation Charter"));
        assert!(verdict.is_military);
        assert_eq!(verdict.rule, DecisionRule::StrongSignals);
        assert_eq!(verdict.reason, "strong signals: identity prefix (military)");
    }

    #[test]
    fn civilian_operator_vetoes() {
        let record = FlightRecord::new("A1B2C3").with_callsign("RCH456").with_type("C680");
        let verdict = verdict_for(&record, Some("Acme Aviation Charter"));
        assert!(!verdict.is_military);
        assert_eq!(verdict.reason, "operator civilian: Acme Aviation Charter");
    }

    #[test]
    fn military_callsign_on_bizjet_is_suppressed() {
        let record = FlightRecord::new("A1B2C3").with_callsign("rch456").with_type("c680");
        let verdict = verdict_for(&record, None);
        assert!(!verdict.is_military);
        assert_eq!(verdict.rule, DecisionRule::BizjetSuppression);
        assert_eq!(verdict.reason, "callsign RCH456 but bizjet type C680");
    }

    #[test]
    fn military_operator_alone_does_not_keep() {
        let record = FlightRecord::new("A1B2C3").with_callsign("RCH456").with_type("B738");
        let verdict = verdict_for(&record, Some("United States Air Force"));
        assert!(!verdict.is_military);
        assert_eq!(verdict.rule, DecisionRule::NoEvidence);
        assert_eq!(verdict.reason, "no strong signals and no military operator");
    }

    #[test]
    fn same_input_same_verdict() {
        let record = FlightRecord::new("A1B2C3").with_callsign("PAT01").with_type("GLF5");
        assert_eq!(verdict_for(&record, None), verdict_for(&record, None));
    }
}
