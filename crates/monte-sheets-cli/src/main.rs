//! Monte Sheets CLI - Monte Carlo formula evaluation tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use monte_sheets::prelude::*;
use monte_sheets::{evaluate_text, sampling_registry, EvaluationContext};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monte")]
#[command(
    author,
    version,
    about = "Monte Carlo spreadsheet formula evaluation tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula and print summary statistics
    Eval {
        /// Formula text, e.g. "1 + triangular(0, 10)"
        expr: String,

        /// Print every sample instead of summary statistics
        #[arg(short, long)]
        samples: bool,

        /// Decimal places for the summary output
        #[arg(short, long)]
        decimals: Option<u32>,
    },

    /// Evaluate a grid of cell formulas from a file and print display values
    Grid {
        /// Input file with one cell per line: "<CELL> <FORMULA>", e.g. "A2 =A1*2"
        input: PathBuf,

        /// Number of rows in the grid
        #[arg(short, long, default_value = "10")]
        rows: u32,

        /// Number of columns in the grid
        #[arg(short, long, default_value = "8")]
        cols: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            expr,
            samples,
            decimals,
        } => eval_expression(&expr, samples, decimals),
        Commands::Grid { input, rows, cols } => eval_grid(&input, rows, cols),
    }
}

fn eval_expression(expr: &str, print_samples: bool, decimals: Option<u32>) -> Result<()> {
    // Bare-formula context: no cell references, sampling functions in scope
    let ctx = EvaluationContext {
        variables: None,
        functions: Some(sampling_registry()),
    };

    let samples = evaluate_text(expr, &ctx).with_context(|| format!("Failed to evaluate '{expr}'"))?;

    if print_samples {
        for s in &samples {
            println!("{s}");
        }
        return Ok(());
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    println!("samples: {}", samples.len());
    println!("mean:    {}", monte_sheets::format_number(mean, decimals));

    if samples.len() > 1 {
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("min:     {}", monte_sheets::format_number(min, decimals));
        println!("max:     {}", monte_sheets::format_number(max, decimals));
    }

    Ok(())
}

fn eval_grid(input: &PathBuf, rows: u32, cols: u16) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    let mut ns = Namespace::new(rows, cols);
    let mut set_ids = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (cell, formula) = match line.split_once(char::is_whitespace) {
            Some((cell, formula)) => (cell, formula.trim()),
            None => bail!("line {}: expected '<CELL> <FORMULA>'", lineno + 1),
        };

        let id: CellId = cell
            .parse()
            .with_context(|| format!("line {}: bad cell id '{}'", lineno + 1, cell))?;
        ns.set_formula(&id, formula)
            .with_context(|| format!("line {}: cell '{}' outside the grid", lineno + 1, cell))?;
        set_ids.push(id);
    }

    for id in &set_ids {
        let shown = ns
            .display_value(id)
            .with_context(|| format!("Failed to evaluate cell {id}"))?;
        println!("{id}\t{shown}");
    }

    Ok(())
}
