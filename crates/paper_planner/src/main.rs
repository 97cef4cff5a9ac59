mod config;
mod error;
mod export;
mod heights;

use allocator::{
    AllocError, AllocationState, COLS, DistributionReport, FeasibilityMatrix, Matrix, PageLayout,
    build_requests, paginate, read_inventory_csv, row_label, total_count,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use error::PlannerError;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Distribute exam paper problems over difficulty and type", long_about = None)]
struct Args {
    /// Configuration file path (defaults are used if it does not exist)
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// Inventory CSV with `Style,Type,Difficulty,Count` rows
    #[arg(short = 'i', long = "inventory")]
    inventory: Option<PathBuf>,

    /// Also export the flattened problem request list as JSON
    #[arg(long = "requests-json")]
    requests_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// One total per difficulty, spread over every row
    Simple {
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<u32>,
    },
    /// Objective and subjective totals per difficulty
    Normal {
        #[arg(long, value_delimiter = ',', required = true)]
        objective: Vec<u32>,
        #[arg(long, value_delimiter = ',', required = true)]
        subjective: Vec<u32>,
    },
    /// Direct cell edits, applied in order
    Detail {
        /// row,col,value
        #[arg(long = "cell", value_parser = parse_cell, required = true)]
        cells: Vec<CellEdit>,
    },
    /// Page plan for a list of item heights
    Layout {
        /// CSV with `Item,Height` rows
        #[arg(long)]
        heights: PathBuf,
    },
}

#[derive(Debug, Clone, Copy)]
struct CellEdit {
    row: usize,
    col: usize,
    value: u32,
}

fn parse_cell(s: &str) -> std::result::Result<CellEdit, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [row, col, value] = parts.as_slice() else {
        return Err(format!("expected row,col,value but got '{s}'"));
    };
    Ok(CellEdit {
        row: row.parse().map_err(|e| format!("invalid row '{row}': {e}"))?,
        col: col.parse().map_err(|e| format!("invalid col '{col}': {e}"))?,
        value: value
            .parse()
            .map_err(|e| format!("invalid value '{value}': {e}"))?,
    })
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("Error: {e:#}");
        for cause in e.chain() {
            if let Some(AllocError::QuotaExceeded { max, .. }) = cause.downcast_ref::<AllocError>()
            {
                error!("최대 {max}개의 문항만 출제할 수 있습니다");
                break;
            }
            if let Some(ioe) = cause.downcast_ref::<std::io::Error>() {
                if ioe.kind() == std::io::ErrorKind::PermissionDenied {
                    error!("Hint: Run in a writable directory or set PAPER_PLANNER_OUTPUT_DIR.");
                    break;
                }
            }
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let env_config = config::Config::from_env()?;

    let mut state = AllocationState::new(settings.allocator.max_total);
    match &args.command {
        Command::Layout { heights } => return run_layout(heights, &settings.layout),
        Command::Simple { values } => {
            let feasible = load_inventory(args)?;
            let values = to_columns(values, "values")?;
            let report = state.by_difficulty(&feasible).set_values(values)?;
            log_report(&report);
        }
        Command::Normal {
            objective,
            subjective,
        } => {
            let feasible = load_inventory(args)?;
            let objective = to_columns(objective, "objective")?;
            let subjective = to_columns(subjective, "subjective")?;
            let report = state
                .by_answer_style(&feasible)
                .set_values(objective, subjective)?;
            log_report(&report);
        }
        Command::Detail { cells } => {
            let feasible = load_inventory(args)?;
            let mut view = state.detailed(&feasible);
            for edit in cells {
                let stored = view.set_cell(edit.row, edit.col, edit.value)?;
                if stored < edit.value {
                    warn!(
                        "cell ({}, {}): only {} of {} problems available",
                        edit.row, edit.col, stored, edit.value
                    );
                }
            }
        }
    }

    let matrix = state.get();
    log_matrix(&matrix);

    let output_dir = env_config.output_dir.as_deref();
    let path = export::export_allocation_csv(&matrix, output_dir)?;
    info!("Allocation saved to: {}", path.display());

    if args.requests_json {
        let requests = build_requests(&matrix);
        debug!(
            "{} request lines, {} problems",
            requests.len(),
            total_count(&requests)
        );
        let path = export::export_requests_json(&requests, output_dir)?;
        info!("Problem requests saved to: {}", path.display());
    }

    Ok(())
}

fn load_settings(path: &Path) -> Result<allocator::Config> {
    if path.exists() {
        let config = allocator::Config::load_from_file(path)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    } else {
        debug!(
            "Configuration file {} not found, using defaults",
            path.display()
        );
        Ok(allocator::Config::default())
    }
}

fn load_inventory(args: &Args) -> Result<FeasibilityMatrix> {
    let path = args.inventory.as_ref().ok_or_else(|| {
        PlannerError::InvalidArgument("--inventory is required for this command".to_string())
    })?;
    let feasible = read_inventory_csv(path)
        .with_context(|| format!("Failed to load inventory {}", path.display()))?;
    info!(
        "Inventory: {} problems from {}",
        feasible.as_matrix().total(),
        path.display()
    );
    Ok(feasible)
}

fn to_columns(values: &[u32], name: &str) -> Result<[u32; COLS]> {
    let columns = <[u32; COLS]>::try_from(values).map_err(|_| {
        PlannerError::InvalidArgument(format!(
            "--{name} needs {COLS} comma-separated values, got {}",
            values.len()
        ))
    })?;
    Ok(columns)
}

fn log_report(report: &DistributionReport) {
    if report.is_complete() {
        return;
    }
    warn!(
        "Inventory could not cover the request: {} problems short",
        report.shortfall()
    );
}

fn log_matrix(matrix: &Matrix) {
    info!(
        "{:<11} {:<15} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "Style", "Type", "Highest", "High", "Medium", "Low", "Lowest"
    );
    for (row, cells) in matrix.rows().iter().enumerate() {
        let Some((style, cognitive_type)) = row_label(row) else {
            continue;
        };
        info!(
            "{:<11} {:<15} {:>7} {:>7} {:>7} {:>7} {:>7}",
            style.to_string(),
            cognitive_type.to_string(),
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            cells[4]
        );
    }
    info!("Total problems: {}", matrix.total());
}

fn run_layout(heights_path: &Path, layout: &PageLayout) -> Result<()> {
    let heights = heights::read_heights_csv(heights_path)?;
    let pages = paginate(&heights, layout);
    info!(
        "{} items on {} pages ({} columns, height {})",
        heights.len(),
        pages.len(),
        layout.columns,
        layout.page_height
    );

    for (page_no, page) in pages.iter().enumerate() {
        for (col, placements) in page.columns.iter().enumerate() {
            let items: Vec<String> = placements
                .iter()
                .map(|p| {
                    if p.overflow {
                        format!("{}!", p.item + 1)
                    } else {
                        (p.item + 1).to_string()
                    }
                })
                .collect();
            info!("page {} col {}: {}", page_no + 1, col + 1, items.join(" "));
        }
    }

    let overflowing = pages
        .iter()
        .flat_map(|p| p.columns.iter().flatten())
        .filter(|p| p.overflow)
        .count();
    if overflowing > 0 {
        warn!("{overflowing} items are taller than a page column");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        let edit = parse_cell("3, 4,12").unwrap();
        assert_eq!((edit.row, edit.col, edit.value), (3, 4, 12));
        assert!(parse_cell("1,2").is_err());
        assert!(parse_cell("1,2,x").is_err());
        assert!(parse_cell("1,2,3,4").is_err());
    }

    #[test]
    fn test_to_columns_length() {
        assert_eq!(to_columns(&[1, 2, 3, 4, 5], "values").unwrap(), [1, 2, 3, 4, 5]);
        assert!(to_columns(&[1, 2], "values").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "paper_planner",
            "-i",
            "inv.csv",
            "normal",
            "--objective",
            "1,2,3,4,5",
            "--subjective",
            "0,0,0,0,1",
        ])
        .unwrap();
        assert_eq!(args.inventory, Some(PathBuf::from("inv.csv")));
        match args.command {
            Command::Normal {
                objective,
                subjective,
            } => {
                assert_eq!(objective, vec![1, 2, 3, 4, 5]);
                assert_eq!(subjective, vec![0, 0, 0, 0, 1]);
            }
            _ => panic!("expected normal subcommand"),
        }
    }

    #[test]
    fn test_args_parse_repeated_cells() {
        let args = Args::try_parse_from([
            "paper_planner",
            "detail",
            "--cell",
            "0,0,5",
            "--cell",
            "7,4,1",
        ])
        .unwrap();
        match args.command {
            Command::Detail { cells } => assert_eq!(cells.len(), 2),
            _ => panic!("expected detail subcommand"),
        }
    }
}
