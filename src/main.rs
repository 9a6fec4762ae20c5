use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use waverange::{execute, QueryOutcome, QueryRequest, WaveletTree};

#[derive(Parser, Debug)]
#[command(
    name = "waverange",
    about = "Access, rank, and range-quantile queries over an integer sequence"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode the value at a position in the sequence.
    Access {
        /// Whitespace-separated integers (file path, or `-` for stdin).
        values: PathBuf,
        /// 0-based position to decode.
        #[arg(long)]
        index: usize,
    },
    /// Count occurrences of a value within a prefix of the sequence.
    Rank {
        /// Whitespace-separated integers (file path, or `-` for stdin).
        values: PathBuf,
        /// Inclusive end of the counted prefix.
        #[arg(long)]
        position: usize,
        /// Value to count.
        #[arg(long)]
        value: i64,
    },
    /// Find the k-th smallest value within a position range.
    Quantile {
        /// Whitespace-separated integers (file path, or `-` for stdin).
        values: PathBuf,
        /// Start position (inclusive).
        #[arg(long)]
        start: usize,
        /// End position (inclusive).
        #[arg(long)]
        end: usize,
        /// Order statistic, 1-indexed.
        #[arg(long, default_value_t = 1)]
        k: usize,
    },
    /// Print the node layout of the tree built over the sequence.
    Dump {
        /// Whitespace-separated integers (file path, or `-` for stdin).
        values: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (values_path, request) = match cli.command {
        Commands::Access { values, index } => (values, Some(QueryRequest::Access { index })),
        Commands::Rank {
            values,
            position,
            value,
        } => (values, Some(QueryRequest::Rank { position, value })),
        Commands::Quantile {
            values,
            start,
            end,
            k,
        } => (values, Some(QueryRequest::Quantile { start, end, k })),
        Commands::Dump { values } => (values, None),
    };

    let sequence = read_values(&values_path)
        .with_context(|| format!("failed to read values from {}", values_path.display()))?;
    let tree = WaveletTree::build(&sequence).context("failed to build wavelet tree")?;

    match request {
        Some(request) => match execute(&tree, request) {
            Ok(QueryOutcome::Value(value)) => println!("{value}"),
            Ok(QueryOutcome::Count(count)) => println!("{count}"),
            Err(err) => bail!("query failed: {err}"),
        },
        None => print!("{}", tree.structure()),
    }

    Ok(())
}

fn read_values(path: &PathBuf) -> Result<Vec<i64>> {
    let contents = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    let mut values = Vec::new();
    for token in contents.split_whitespace() {
        let value: i64 = token
            .parse()
            .with_context(|| format!("invalid integer '{token}'"))?;
        values.push(value);
    }

    if values.is_empty() {
        bail!("no values found in input");
    }

    Ok(values)
}
