use clap::{Parser as ClapParser, Subcommand};
use colexpr::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "colexpr")]
#[command(about = "colexpr - evaluate small function-call expressions over known columns")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "colexpr=trace")
    #[arg(long, global = true, env = "COLEXPR_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate an expression program
    Check {
        /// The program to evaluate (reads from stdin if not provided)
        expression: Option<String>,

        /// Permitted column names
        #[arg(short, long, env = "COLEXPR_COLUMNS", value_delimiter = ',')]
        columns: Vec<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream of an expression as JSON
    Tokens {
        /// The program to tokenize (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// List built-in functions, or show documentation for one
    Docs {
        /// Function name
        function: Option<String>,
    },
}

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` wins over `--log-level` when set.
fn init_tracing(log_level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Check {
            expression,
            columns,
            pretty,
            syntax_only,
        } => run_check(expression, columns, pretty, syntax_only),
        Commands::Tokens { expression } => run_tokens(expression),
        Commands::Docs { function: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs {
            function: Some(name),
        } => cli::get_function_doc(&name).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    expression: Option<String>,
    columns: Vec<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let options = CheckOptions {
        expression: read_expression(expression)?,
        columns,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => {
            let json = if options.pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_tokens(expression: Option<String>) -> Result<(), CliError> {
    let tokens = cli::execute_tokens(&read_expression(expression)?)?;
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
