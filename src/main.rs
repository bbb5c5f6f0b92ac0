use clap::{Parser as ClapParser, Subcommand};
use fieldexpr::CodecOptions;
use fieldexpr::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "fieldexpr")]
#[command(about = "fieldexpr - Encode, decode, evaluate and compile filter expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an expression
    Check {
        /// Expression in text grammar or array JSON
        expression: String,
    },

    /// Evaluate an expression against a JSON document
    Eval {
        /// Expression in text grammar or array JSON
        expression: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Convert text grammar to the array (JSON) form
    Encode {
        /// Expression in text grammar
        expression: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Write count 0 for every quantifier
        #[arg(long)]
        lossy_counts: bool,
    },

    /// Convert the array (JSON) form to text grammar
    Decode {
        /// Array JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Compile an expression to a SQL select
    Compile {
        /// Expression in text grammar or array JSON
        expression: String,

        /// Table to select from
        #[arg(short, long, default_value = "entity")]
        table: String,

        /// Alias prefixed to every field
        #[arg(short, long, env = "FIELDEXPR_ALIAS", default_value = "e")]
        alias: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'fieldexpr docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { expression } => run_check(expression),
        Commands::Eval { expression, input } => run_eval(expression, input),
        Commands::Encode {
            expression,
            pretty,
            lossy_counts,
        } => run_encode(&expression, pretty, lossy_counts),
        Commands::Decode { input } => run_decode(input),
        Commands::Compile {
            expression,
            table,
            alias,
        } => cli::compile_to_sql(&expression, &table, &alias).map(|sql| println!("{}", sql)),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Explicit input, else stdin when it is piped.
fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(expression: String) -> Result<(), CliError> {
    let options = CheckOptions {
        expression,
        input: None,
        syntax_only: true,
    };
    if cli::execute_check(&options)? == CheckResult::SyntaxValid {
        println!("Syntax is valid");
    }
    Ok(())
}

fn run_eval(expression: String, input: Option<String>) -> Result<(), CliError> {
    let options = CheckOptions {
        expression,
        input: read_input(input)?,
        syntax_only: false,
    };
    if let CheckResult::Evaluated(matched) = cli::execute_check(&options)? {
        println!("{}", matched);
    }
    Ok(())
}

fn run_encode(expression: &str, pretty: bool, lossy_counts: bool) -> Result<(), CliError> {
    let options = CodecOptions {
        lossy_quantifier_counts: lossy_counts,
    };
    let output = cli::encode_text(expression, options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}

fn run_decode(input: Option<String>) -> Result<(), CliError> {
    let json = read_input(input)?.ok_or(CliError::NoInput)?;
    println!("{}", cli::decode_array(&json)?);
    Ok(())
}
