use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use maze::{Maze, Position, VisitOutcome, create_maze, find_path_with};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitEvent {
    pub position: Position,
    pub outcome: VisitOutcome,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u64>,
    pub start: Position,
    pub goal: Position,
    pub found: bool,
    pub path: Vec<Position>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<VisitEvent>,
}

/// Builds the maze and searches it. Visit events are kept only when tracing
/// was asked for.
pub fn solve(config: &Config) -> Result<(Maze, Report)> {
    let maze = create_maze(config.rows, config.cols, config.seed)
        .context("Failed to build the maze")?;

    let mut events = Vec::new();
    let path = find_path_with(&maze, config.start, config.goal, |cell, outcome| {
        if config.trace {
            events.push(VisitEvent {
                position: cell.position(),
                outcome,
            });
        }
    })
    .context("Failed to search the maze")?;

    let path: Vec<Position> = path
        .map(|cells| cells.iter().map(|cell| cell.position()).collect())
        .unwrap_or_default();

    let report = Report {
        rows: config.rows,
        cols: config.cols,
        seed: config.seed,
        start: config.start,
        goal: config.goal,
        found: !path.is_empty(),
        path,
        events,
    };
    info!(found = report.found, length = report.path.len(), "search complete");

    Ok((maze, report))
}

/// Everything the driver prints to stdout.
pub fn run(config: &Config) -> Result<String> {
    let (maze, report) = solve(config)?;

    if config.json {
        return serde_json::to_string_pretty(&report).context("Failed to encode the report");
    }

    let path: Vec<_> = report
        .path
        .iter()
        .filter_map(|position| maze.cell(*position))
        .collect();

    let mut out = String::new();
    writeln!(out, "{}", maze.render_with_path(&path))?;

    for event in &report.events {
        writeln!(
            out,
            "{},{} {}",
            event.position.row,
            event.position.col,
            outcome_label(event.outcome)
        )?;
    }

    if report.found {
        write!(
            out,
            "Path found! {} {} from {} to {}.",
            report.path.len(),
            if report.path.len() == 1 { "cell" } else { "cells" },
            report.start,
            report.goal
        )?;
    } else {
        write!(out, "No solution from {} to {}.", report.start, report.goal)?;
    }

    Ok(out)
}

fn outcome_label(outcome: VisitOutcome) -> &'static str {
    match outcome {
        VisitOutcome::Visited => "visited",
        VisitOutcome::DeadEnd => "dead-end",
        VisitOutcome::OnPath => "on-path",
    }
}
