//! Rule registration.
//!
//! A rule is a single-method check applied to the test expression of each
//! conditional; [`default_rules`] is the factory that hands the driver the
//! registered set. There is no shared mutable state across rules, so one
//! boxed set can serve every worker thread.

use syn::Expr;

use crate::classify::is_all_constant;

/// A check applied to the test expression of a conditional.
pub trait Rule: Send + Sync {
    /// Stable identifier, used as the diagnostic code.
    fn id(&self) -> &'static str;

    /// Fixed human-readable message attached to each finding.
    fn message(&self) -> &'static str;

    /// Longer explanation for help output and editor hovers.
    fn help(&self) -> &'static str;

    /// Whether this rule matches the given test expression.
    fn check_test_expr(&self, expr: &Expr) -> bool;
}

/// Flags `if` conditions built entirely from literal constants.
///
/// A condition that cannot depend on any variable or runtime state always
/// branches the same way, which is usually not what the author intended.
pub struct ConstantTestRule;

impl Rule for ConstantTestRule {
    fn id(&self) -> &'static str {
        "constant-test"
    }

    fn message(&self) -> &'static str {
        "constant value used as a conditional test"
    }

    fn help(&self) -> &'static str {
        "conditional tests should depend on a variable, not on a value fixed at parse time"
    }

    fn check_test_expr(&self, expr: &Expr) -> bool {
        is_all_constant(expr)
    }
}

/// Returns the registered rule set.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(ConstantTestRule)]
}
