use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use itchy::{
    ast::printer::render_tree,
    config::{ConditionPolicy, DEFAULT_MAX_CALL_DEPTH},
    Config, Interpreter,
};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// itchy is a small expression-oriented scripting language where everything,
/// blocks and loops included, produces a value.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script files to run, in order, sharing one global scope. Standard input
    /// is read when neither files nor `--eval` are given.
    files: Vec<PathBuf>,

    /// Runs the given source text after any files.
    #[arg(short, long, value_name = "SOURCE")]
    eval: Option<String>,

    /// Writes the final value to this file instead of standard output.
    #[arg(short, long, value_name = "PATH", conflicts_with = "no_output")]
    output: Option<PathBuf>,

    /// Does not print the final value.
    #[arg(long)]
    no_output: bool,

    /// Prints the syntax tree of each program before running it.
    #[arg(long)]
    print_ast: bool,

    /// Maximum number of nested function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH, conflicts_with = "unlimited_depth")]
    max_call_depth: usize,

    /// Disables the call depth limit.
    #[arg(long)]
    unlimited_depth: bool,

    /// Accepts any value as a condition, judging it by its truthiness.
    #[arg(long)]
    truthy: bool,
}

impl Args {
    fn config(&self) -> Config {
        let limit = (!self.unlimited_depth).then_some(self.max_call_depth);
        let policy = if self.truthy { ConditionPolicy::Truthy } else { ConditionPolicy::Strict };
        Config::default().with_max_call_depth(limit)
                         .with_condition_policy(policy)
    }

    /// Collects `(name, source)` pairs in the order they should run.
    fn sources(&self) -> Result<Vec<(String, String)>, String> {
        let mut sources = Vec::new();
        for path in &self.files {
            let source = fs::read_to_string(path).map_err(|e| {
                                                     format!("Failed to read the input file '{}': {e}",
                                                             path.display())
                                                 })?;
            sources.push((path.display().to_string(), source));
        }
        if let Some(source) = &self.eval {
            sources.push(("<eval>".to_string(), source.clone()));
        }
        if sources.is_empty() {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)
                       .map_err(|e| format!("Failed to read standard input: {e}"))?;
            sources.push(("<stdin>".to_string(), source));
        }
        Ok(sources)
    }
}

fn run(args: &Args) -> Result<(), String> {
    let sources = args.sources()?;

    let mut interpreter = Interpreter::new(args.config());
    for (name, source) in &sources {
        debug!(%name, "running");
        let program = itchy::parse(source).map_err(|e| format!("{name}: {e}"))?;
        if args.print_ast {
            print!("{}", render_tree(&program));
        }
        interpreter.execute_program(&program)
                   .map_err(|e| format!("{name}: {e}"))?;
    }

    if args.no_output {
        return Ok(());
    }
    let rendered = interpreter.result().map(ToString::to_string).unwrap_or_default();
    match &args.output {
        Some(path) => fs::write(path, format!("{rendered}\n")).map_err(|e| {
                          format!("Failed to write the output file '{}': {e}", path.display())
                      }),
        None => {
            println!("{rendered}");
            Ok(())
        },
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(EnvFilter::from_default_env())
                                  .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        },
    }
}
