use crate::{
    ast::{ConditionalBranch, Expr},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates an `if` expression with its `elif` and `else` branches.
    ///
    /// Conditions are evaluated in order until one holds; that branch's body
    /// becomes the result. Without a matching branch the `else` body is
    /// evaluated, or the result is `null` if there is none.
    ///
    /// # Example
    /// ```
    /// let source = "x := 5; if (x < 3) \"small\" elif (x < 10) \"medium\" else \"large\"";
    /// assert_eq!(itchy::evaluate(source).unwrap().to_string(), "medium");
    /// assert_eq!(itchy::evaluate("if (false) 1").unwrap().to_string(), "null");
    /// ```
    pub(crate) fn eval_if(&mut self,
                          branches: &[ConditionalBranch],
                          else_branch: Option<&Expr>,
                          env: &Environment)
                          -> EvalResult<Value> {
        for (i, branch) in branches.iter().enumerate() {
            let context = if i == 0 { "`if` condition" } else { "`elif` condition" };
            let value = self.eval(&branch.condition, env)?;
            if self.condition(&value, context, branch.condition.position())? {
                return self.eval(&branch.body, env);
            }
        }

        match else_branch {
            Some(body) => self.eval(body, env),
            None => Ok(Value::Null),
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is checked before every iteration.
    ///
    /// # Returns
    /// The value of the last body evaluation, or `null` if the body never ran.
    pub(crate) fn eval_while(&mut self,
                             condition: &Expr,
                             body: &Expr,
                             env: &Environment)
                             -> EvalResult<Value> {
        let mut last = Value::Null;
        loop {
            let value = self.eval(condition, env)?;
            if !self.condition(&value, "`while` condition", condition.position())? {
                return Ok(last);
            }
            last = self.eval(body, env)?;
        }
    }
}
