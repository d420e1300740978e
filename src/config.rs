/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// How conditions of `if`, `elif`, `while`, `not`, `and` and `or` are
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionPolicy {
    /// Conditions must be booleans; anything else is a type error.
    #[default]
    Strict,
    /// Any value is accepted and judged by
    /// [`Value::is_truthy`](crate::interpreter::value::core::Value::is_truthy).
    Truthy,
}

/// Options that control evaluation.
///
/// # Example
/// ```
/// use itchy::config::{ConditionPolicy, Config};
///
/// let config = Config::default().with_max_call_depth(Some(64))
///                               .with_condition_policy(ConditionPolicy::Truthy);
/// assert_eq!(config.max_call_depth, Some(64));
/// assert_eq!(itchy::evaluate_with_config("if (1) \"yes\"", config).unwrap().to_string(), "yes");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nested calls before evaluation fails with a
    /// resource error. `None` disables the check.
    pub max_call_depth:   Option<usize>,
    /// Interpretation of non-boolean conditions.
    pub condition_policy: ConditionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth:   Some(DEFAULT_MAX_CALL_DEPTH),
               condition_policy: ConditionPolicy::Strict, }
    }
}

impl Config {
    /// Sets the call depth limit.
    #[must_use]
    pub const fn with_max_call_depth(mut self, limit: Option<usize>) -> Self {
        self.max_call_depth = limit;
        self
    }

    /// Sets the condition policy.
    #[must_use]
    pub const fn with_condition_policy(mut self, policy: ConditionPolicy) -> Self {
        self.condition_policy = policy;
        self
    }
}
