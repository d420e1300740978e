use tracing::debug;

use crate::{
    ast::Expr,
    config::Config,
    error::Error,
    interpreter::{
        environment::Environment, evaluator::core::Context, lexer::tokenize,
        parser::parse_tokens, value::core::Value,
    },
};

/// A long-lived interpreter whose global variables persist between runs.
///
/// Each call to [`Interpreter::execute`] lexes, parses and evaluates one
/// program in the same global scope, so later programs see the variables and
/// functions defined by earlier ones.
///
/// # Example
/// ```
/// use itchy::{Config, Interpreter};
///
/// let mut interpreter = Interpreter::new(Config::default());
/// interpreter.execute("square := function(x) x * x").unwrap();
///
/// let value = interpreter.execute("square(12)").unwrap();
/// assert_eq!(value.to_string(), "144");
/// assert_eq!(interpreter.result().map(ToString::to_string).as_deref(), Some("144"));
///
/// interpreter.clear();
/// assert!(interpreter.execute("square(2)").is_err());
/// ```
#[derive(Debug)]
pub struct Interpreter {
    context: Context,
    globals: Environment,
    result:  Option<Value>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Interpreter {
    /// Creates an interpreter with an empty global scope.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { context: Context::new(config),
               globals: Environment::new(),
               result:  None, }
    }

    /// Runs `source` in the global scope and returns its value.
    ///
    /// On success the value is also kept as [`Interpreter::result`]. Bindings
    /// made before a runtime error stay in place.
    ///
    /// # Errors
    /// The first lexical, syntax or runtime error encountered.
    pub fn execute(&mut self, source: &str) -> Result<Value, Error> {
        let tokens = tokenize(source)?;
        debug!(tokens = tokens.len(), "lexed source");
        let program = parse_tokens(&tokens)?;
        self.execute_program(&program)
    }

    /// Evaluates an already parsed program in the global scope.
    ///
    /// # Errors
    /// The runtime error that stopped evaluation.
    pub fn execute_program(&mut self, program: &Expr) -> Result<Value, Error> {
        let outcome = self.context.eval_program(program, &self.globals);
        self.context.depth = 0;

        let value = outcome?;
        debug!(result = %value, "evaluated program");
        self.result = Some(value.clone());
        Ok(value)
    }

    /// The value of the most recent successful run, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Names currently bound in the global scope, sorted.
    #[must_use]
    pub fn globals(&self) -> Vec<String> {
        self.globals.names()
    }

    /// Forgets all global bindings and the last result.
    pub fn clear(&mut self) {
        self.globals.clear();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::ErrorKind, evaluate, interpreter::lexer::Position};

    #[test]
    fn globals_persist_between_runs() {
        let mut interpreter = Interpreter::default();
        interpreter.execute("count := 0").unwrap();
        interpreter.execute("count := count + 1").unwrap();

        assert_eq!(interpreter.execute("count").unwrap(), Value::Number(1.0));
        assert_eq!(interpreter.globals(), vec!["count".to_string()]);
    }

    #[test]
    fn failed_runs_keep_earlier_bindings_and_result() {
        let mut interpreter = Interpreter::default();
        interpreter.execute("a := 1").unwrap();

        let error = interpreter.execute("b := 2; a + \"x\"").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Type);
        assert_eq!(interpreter.execute("b").unwrap(), Value::Number(2.0));
        assert_eq!(interpreter.result(), Some(&Value::Number(2.0)));
    }

    #[test]
    fn returned_closures_outlive_their_interpreter() {
        let Value::Function(closure) = evaluate("x := 5; function() x").unwrap() else {
            panic!("expected a function");
        };
        let mut context = Context::new(Config::default());

        assert_eq!(context.call_function(&closure, vec![], Position::default()).unwrap(),
                   Value::Number(5.0));
    }

    #[test]
    fn closures_keep_globals_after_the_session_is_dropped() {
        let closure = {
            let mut interpreter = Interpreter::default();
            interpreter.execute("base := 10; add := function(n) base + n").unwrap();
            interpreter.execute("add").unwrap()
        };
        let Value::Function(closure) = closure else {
            panic!("expected a function");
        };
        let mut context = Context::default();

        assert_eq!(context.call_function(&closure, vec![Value::Number(1.0)], Position::default())
                          .unwrap(),
                   Value::Number(11.0));
    }

    #[test]
    fn depth_is_reset_after_a_recursion_error() {
        let config = Config::default().with_max_call_depth(Some(8));
        let mut interpreter = Interpreter::new(config);
        interpreter.execute("f := function(n) if (n == 0) 0 else f(n - 1)").unwrap();

        assert_eq!(interpreter.execute("f(100)").unwrap_err().kind(), ErrorKind::Resource);
        assert_eq!(interpreter.execute("f(5)").unwrap(), Value::Number(0.0));
    }
}
