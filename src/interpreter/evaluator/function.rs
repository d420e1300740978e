use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::{core::Value, function::Closure},
    },
};

impl Context {
    /// Creates a closure from a function literal. The current scope is
    /// captured by reference.
    pub(crate) fn eval_function_literal(params: &Rc<[String]>,
                                        body: &Rc<Expr>,
                                        env: &Environment)
                                        -> Value {
        Value::Function(Rc::new(Closure { params: Rc::clone(params),
                                          body:   Rc::clone(body),
                                          env:    env.clone(), }))
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right
    /// with spread arguments expanded in place.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the function.
    /// - `arguments`: Argument expressions, possibly containing `...xs`.
    /// - `position`: Location of the call.
    /// - `env`: Current scope.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            position: Position,
                            env: &Environment)
                            -> EvalResult<Value> {
        let closure = match self.eval(callee, env)? {
            Value::Function(closure) => closure,
            other => {
                return Err(RuntimeError::NotCallable { found: other.kind(),
                                                       position });
            },
        };
        let arguments = self.eval_elements(arguments, env)?;
        self.call_function(&closure, arguments, position)
    }

    /// Calls a closure with already evaluated arguments.
    ///
    /// Parameters are bound in a fresh scope whose parent is the scope the
    /// closure captured, so the body sees the variables of its definition
    /// site rather than those of the caller.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` if the number of arguments differs from the
    ///   number of parameters.
    /// - `RecursionLimit` if the call would exceed the configured depth.
    /// - Any error raised by the body.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     config::Config,
    ///     interpreter::{
    ///         environment::Environment, evaluator::core::Context, lexer::Position, value::core::Value,
    ///     },
    /// };
    ///
    /// let globals = Environment::new();
    /// let mut context = Context::new(Config::default());
    /// let program = itchy::parse("function(a, b) a * b").unwrap();
    ///
    /// let Value::Function(closure) = context.eval_program(&program, &globals).unwrap() else {
    ///     panic!("expected a function");
    /// };
    /// let args = vec![Value::Number(6.0), Value::Number(7.0)];
    /// let result = context.call_function(&closure, args, Position::default());
    /// assert_eq!(result.unwrap(), Value::Number(42.0));
    /// ```
    pub fn call_function(&mut self,
                         closure: &Closure,
                         arguments: Vec<Value>,
                         position: Position)
                         -> EvalResult<Value> {
        if arguments.len() != closure.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: closure.arity(),
                                                             found: arguments.len(),
                                                             position });
        }

        self.enter_call(position)?;
        trace!(depth = self.depth, %position, "call {closure}");

        let scope = closure.env.child_scope();
        for (param, argument) in closure.params.iter().zip(arguments) {
            scope.define(param, argument);
        }
        let result = self.eval(&closure.body, &scope);

        self.depth -= 1;
        result
    }
}
