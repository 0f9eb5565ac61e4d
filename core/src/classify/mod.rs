pub mod decision;
pub mod dedup;
pub mod operator;
pub mod resolver;
pub mod signals;

pub use decision::{decide, DecisionRule, Verdict};
pub use dedup::deduplicate;
pub use operator::{classify_operator, OperatorClass};
pub use resolver::{
    LookupMethod, OperatorLookup, OperatorResolver, Provenance, StepAttempt, StepOutcome,
};
pub use signals::{detect_signals, SignalReport};
