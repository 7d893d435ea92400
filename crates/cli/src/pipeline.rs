//! Pipeline for processing Ember syntax trees.
//!
//! A run goes through three stages, each with its own failure mode:
//!
//! - **Load**: the AST JSON is read and deserialised. I/O failures and
//!   malformed trees stop here.
//! - **Compile**: the tree is compiled to IR. Unsupported constructs and
//!   invalid assignment targets stop here, before any output is produced.
//! - **Run**: the IR is evaluated against the process's streams. Errors
//!   raised by the script are written to the program's stderr as they
//!   happen, so the pipeline does not print them a second time.

use crate::cli::Input;
use ember::{Config, Environment, EvalError, ModuleResult};
use ember_ast::{AstError, Node};
use ember_codegen::CompileError;
use ember_runtime::Stream;
use std::fs::File;
use std::io::{self, BufReader};
use thiserror::Error;
use tracing::debug;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Could not encode the result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PipelineError {
    /// Script errors have already been written to the program's stderr.
    pub fn is_reported(&self) -> bool {
        matches!(self, PipelineError::Eval(EvalError::Runtime(err)) if err.is_script_error())
    }

    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Io(_) => "Load",
            PipelineError::Eval(err) => err.stage(),
            PipelineError::Encode(_) => "Output",
        }
    }
}

impl From<AstError> for PipelineError {
    fn from(error: AstError) -> Self {
        PipelineError::Eval(error.into())
    }
}

impl From<CompileError> for PipelineError {
    fn from(error: CompileError) -> Self {
        PipelineError::Eval(error.into())
    }
}

/// Read a syntax tree from a file or stdin
pub fn load_program(input: &Input) -> PipelineResult<Node> {
    let program = match input {
        Input::File(path) => {
            debug!(path = %path.display(), "loading AST");
            ember_ast::from_reader(BufReader::new(File::open(path)?))?
        }
        Input::Stdin => ember_ast::from_reader(io::stdin().lock())?,
    };
    Ok(program)
}

/// The IR listing of a program
pub fn dump_ir(program: &Node) -> PipelineResult<String> {
    let compiled = ember_codegen::compile(program)?;
    Ok(compiled.to_string())
}

/// Evaluate a program, then print its result as JSON when asked to
pub fn run_program(
    environment: &Environment,
    program: &Node,
    json: bool,
) -> PipelineResult<ModuleResult> {
    let result = environment.evaluate(program)?;
    if json {
        let text = serde_json::to_string(&result)?;
        environment.streams().stdout.write(&format!("{}\n", text))?;
    }
    Ok(result)
}

pub fn run_file(input: &Input, config: Config, json: bool) -> PipelineResult<()> {
    let program = load_program(input)?;
    let environment = Environment::with_stdio(config);
    run_program(&environment, &program, json)?;
    Ok(())
}

pub fn dump_file(input: &Input) -> PipelineResult<()> {
    let program = load_program(input)?;
    let listing = dump_ir(&program)?;
    ember_runtime::StdoutStream.write(&listing)?;
    Ok(())
}
