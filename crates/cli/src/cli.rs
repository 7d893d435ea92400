//! Command-line interface for Ember.

use clap::Parser;
use ember::Config;
use ember_runtime::host::DEFAULT_MAX_CALL_DEPTH;
use std::path::PathBuf;

/// Ember - compile and run PHP-dialect syntax trees
#[derive(Parser)]
#[command(name = "ember")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// AST JSON file produced by the parser (`-` or none reads stdin)
    pub file: Option<PathBuf>,

    /// Print the compiled IR instead of running it
    #[arg(long)]
    pub dump_ir: bool,

    /// Maximum nesting of function and method calls
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    pub max_call_depth: usize,

    /// Print the module result as JSON after the program's output
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolve the actual command to run
    pub fn resolve_command(&self) -> ResolvedCommand {
        let input = match &self.file {
            Some(path) if path.as_os_str() != "-" => Input::File(path.clone()),
            _ => Input::Stdin,
        };

        if self.dump_ir {
            ResolvedCommand::DumpIr { input }
        } else {
            ResolvedCommand::Run {
                input,
                config: Config::new().with_max_call_depth(self.max_call_depth),
                json: self.json,
            }
        }
    }
}

/// Where the syntax tree is read from
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    File(PathBuf),
    Stdin,
}

/// Resolved command after processing CLI arguments
#[derive(Debug)]
pub enum ResolvedCommand {
    DumpIr {
        input: Input,
    },
    Run {
        input: Input,
        config: Config,
        json: bool,
    },
}
