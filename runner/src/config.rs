use std::env;

use anyhow::{Context, Result};
use clap::Parser;
use maze::Position;

pub const DEFAULT_ROWS: usize = 22;
pub const DEFAULT_COLS: usize = 35;

pub const ROWS_VAR: &str = "MAZE_ROWS";
pub const COLS_VAR: &str = "MAZE_COLS";
pub const SEED_VAR: &str = "MAZE_SEED";

#[derive(Debug, Parser)]
#[command(
    name = "maze-runner",
    version,
    about = "Generate a maze by recursive division and search it depth-first"
)]
pub struct CliArgs {
    /// Number of rows [env: MAZE_ROWS] [default: 22]
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns [env: MAZE_COLS] [default: 35]
    #[arg(long)]
    pub cols: Option<usize>,

    /// Seed for a reproducible maze [env: MAZE_SEED]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as ROW,COL [default: 0,0]
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Goal cell as ROW,COL [default: bottom-right cell]
    #[arg(long, value_parser = parse_position)]
    pub goal: Option<Position>,

    /// Print every visit event
    #[arg(long)]
    pub trace: bool,

    /// Print a JSON report instead of the drawing
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u64>,
    pub start: Position,
    pub goal: Position,
    pub trace: bool,
    pub json: bool,
}

impl Config {
    /// Loads `.env` if present, then layers the process environment and the
    /// command line over the defaults.
    pub fn load(args: CliArgs) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::resolve(args, |key| env::var(key).ok())
    }

    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(args: CliArgs, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rows = match args.rows {
            Some(rows) => rows,
            None => from_var(&var, ROWS_VAR)?.unwrap_or(DEFAULT_ROWS),
        };
        let cols = match args.cols {
            Some(cols) => cols,
            None => from_var(&var, COLS_VAR)?.unwrap_or(DEFAULT_COLS),
        };
        let seed = match args.seed {
            Some(seed) => Some(seed),
            None => from_var(&var, SEED_VAR)?,
        };

        let start = args.start.unwrap_or(Position::new(0, 0));
        let goal = args.goal.unwrap_or(Position::new(
            rows.saturating_sub(1),
            cols.saturating_sub(1),
        ));

        Ok(Config {
            rows,
            cols,
            seed,
            start,
            goal,
            trace: args.trace,
            json: args.json,
        })
    }
}

fn from_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(value) = var(key) else {
        return Ok(None);
    };

    let parsed = value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, value))?;
    Ok(Some(parsed))
}

pub fn parse_position(input: &str) -> Result<Position, String> {
    let (row, col) = input
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {:?}", input))?;

    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row in {:?}", input))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column in {:?}", input))?;

    Ok(Position::new(row, col))
}
