use crate::{
    ast::Expr,
    config::Config,
    error::RuntimeError,
    interpreter::{environment::Environment, value::core::Value},
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// Variables live in [`Environment`] scopes that are passed alongside each
/// evaluation call; the context itself only holds the evaluation options and
/// the current call depth.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating one or more programs.
/// The depth counter returns to zero after every top-level evaluation, even a
/// failed one.
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) config: Config,
    pub(crate) depth:  usize,
}

impl Context {
    /// Creates a new evaluation context with the given options.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, depth: 0 }
    }

    /// Returns the options this context evaluates with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Evaluates a parsed program directly in `env`.
    ///
    /// Unlike an ordinary block, the top-level block of a program does not
    /// open a new scope, so its bindings stay in `env` afterwards.
    ///
    /// # Example
    /// ```
    /// use itchy::{
    ///     config::Config,
    ///     interpreter::{environment::Environment, evaluator::core::Context, lexer::Position},
    /// };
    ///
    /// let program = itchy::parse("x := 40; x + 2").unwrap();
    /// let globals = Environment::new();
    /// let mut context = Context::new(Config::default());
    ///
    /// let result = context.eval_program(&program, &globals).unwrap();
    /// assert_eq!(result.to_string(), "42");
    /// assert_eq!(globals.lookup("x", Position::default()).unwrap().to_string(), "40");
    /// ```
    pub fn eval_program(&mut self, program: &Expr, env: &Environment) -> EvalResult<Value> {
        match program {
            Expr::Block { body, .. } => self.eval_sequence(body, env),
            other => self.eval(other, env),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant. Every call runs on a stack
    /// with room to spare, growing it first if necessary.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Scope in which names are resolved and bound.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr(expr, env))
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, position } => env.lookup(name, *position),
            Expr::Assignment { target,
                               op,
                               value,
                               position, } => {
                self.eval_assignment(target, *op, value, *position, env)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => self.eval_binary_op(left, *op, right, *position, env),
            Expr::Comparison { first, links, .. } => self.eval_comparison_chain(first, links, env),
            Expr::UnaryOp { op,
                            operand,
                            position, } => self.eval_unary_op(*op, operand, *position, env),
            Expr::Length { operand, position } => self.eval_length(operand, *position, env),
            Expr::Spread { position, .. } => {
                Err(RuntimeError::MisplacedSpread { position: *position })
            },
            Expr::Block { body, .. } => self.eval_block(body, env),
            Expr::If { branches,
                       else_branch,
                       .. } => self.eval_if(branches, else_branch.as_deref(), env),
            Expr::While { condition, body, .. } => self.eval_while(condition, body, env),
            Expr::Function { params, body, .. } => {
                Ok(Self::eval_function_literal(params, body, env))
            },
            Expr::Call { callee,
                         arguments,
                         position, } => self.eval_call(callee, arguments, *position, env),
            Expr::Index { collection,
                          index,
                          position, } => self.eval_index(collection, index, *position, env),
            Expr::List { elements, .. } => Ok(Value::list(self.eval_elements(elements, env)?)),
        }
    }

    /// Evaluates a block in a fresh child scope of `env`.
    ///
    /// # Returns
    /// The value of the last expression, or `null` for an empty block.
    pub(crate) fn eval_block(&mut self, body: &[Expr], env: &Environment) -> EvalResult<Value> {
        let scope = env.child_scope();
        self.eval_sequence(body, &scope)
    }

    /// Evaluates expressions in order within `env` and returns the last value,
    /// or `null` if there are none.
    pub(crate) fn eval_sequence(&mut self, body: &[Expr], env: &Environment) -> EvalResult<Value> {
        let mut last = Value::Null;
        for expr in body {
            last = self.eval(expr, env)?;
        }
        Ok(last)
    }
}
