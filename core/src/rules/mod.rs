pub mod ruleset;

pub use ruleset::{RuleBook, RuleError, RuleSet};
