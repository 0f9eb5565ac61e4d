use serde::{Deserialize, Serialize};

use crate::rules::RuleBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorClass {
    Military,
    Civilian,
    Unknown,
}

/// Keyword classification of a free-text operator name.
///
/// Military keywords win over civilian ones.
pub fn classify_operator(name: Option<&str>, rules: &RuleBook) -> OperatorClass {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return OperatorClass::Unknown;
    };
    let lowered = name.to_lowercase();

    if rules.mentions_military(&lowered) {
        OperatorClass::Military
    } else if rules.mentions_civilian(&lowered) {
        OperatorClass::Civilian
    } else {
        OperatorClass::Unknown
    }
}
