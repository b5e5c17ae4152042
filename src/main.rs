use clap::Parser;
use log::info;
use symcalc_rs::scanning::StringScanner;
use symcalc_rs::{BracketRule, CalcError, EvalConfig, Expression, LookupPolicy};

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "symcalc")]
#[command(about = "Evaluates arithmetic over scalar and array variables")]
#[command(version)]
struct Cli {
    /// Evaluate this expression and exit instead of prompting
    #[arg(short = 'e', long = "expr")]
    expression: Option<String>,

    /// File of symbol values, one `name value` or `name size (index,value)...` per line
    #[arg(short = 'f', long = "values")]
    values: Option<PathBuf>,

    /// Fail on unbound names and out-of-range subscripts instead of reading zero
    #[arg(long = "strict")]
    strict: bool,

    /// Pair the i-th opening bracket with the i-th closing bracket
    #[arg(long = "positional-brackets")]
    positional_brackets: bool,

    /// Deepest bracket nesting to evaluate
    #[arg(long = "max-depth", default_value_t = 256)]
    max_depth: usize,

    /// Print the symbols and their values before each result
    #[arg(long = "dump")]
    dump: bool,
}

impl Cli {
    fn config(&self) -> EvalConfig {
        EvalConfig::default()
            .with_lookup(if self.strict { LookupPolicy::strict } else { LookupPolicy::lenient })
            .with_brackets(if self.positional_brackets { BracketRule::positional } else { BracketRule::nested })
            .with_max_depth(self.max_depth)
    }
}

fn run(cli: &Cli, text: &str) -> Result<f32, CalcError> {
    let mut expression = Expression::with_config(text, cli.config());
    if !expression.is_legally_matched() {
        return Err(CalcError::unbalanced_brackets);
    }
    expression.build_symbols();
    if let Some(path) = &cli.values {
        info!("loading symbol values from {}", path.display());
        expression.load_symbol_values(BufReader::new(File::open(path)?))?;
    }
    if cli.dump {
        for scalar in expression.scalars() {
            println!("{}", scalar);
        }
        for array in expression.arrays() {
            println!("{}", array);
        }
    }
    expression.evaluate()
}

/// Prints the result or the error. Returns false on error.
fn report(cli: &Cli, text: &str) -> bool {
    match run(cli, text) {
        Ok(value) => {
            println!("{}", value);
            true
        },
        Err(e) => {
            println!("Error, {}", e);
            false
        },
    }
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Some(text) = &cli.expression {
        if !report(&cli, text) {
            std::process::exit(1);
        }
        return Ok(());
    }

    print!("> ");
    std::io::stdout().flush()?;

    for line in std::io::stdin().lines() {
        let line = line?;
        if StringScanner::new(line.clone()).is_empty() {
            break;
        }

        report(&cli, &line);

        print!("> ");
        std::io::stdout().flush()?;
    }
    Ok(())
}
