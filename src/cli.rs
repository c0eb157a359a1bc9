//! CLI interface for portcall.
//!
//! Each subcommand is non-interactive: a chain file in, a chain (or a
//! validation report) out as JSON. The result goes to `--out` when given,
//! otherwise stdout. A human-readable summary goes to stderr when writing
//! to a file.

mod format;

use std::{cell::RefCell, fs, path::PathBuf, rc::Rc, str::FromStr};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::model::{PortCall, PortCallField};
use crate::service::{self, Debouncer, EditKey};
use crate::storage;
use crate::validate::validate_port_call_sequence;

use format::{format_chain, format_report};

/// Portcall — keep a voyage's port calls consistent.
#[derive(Debug, Parser)]
#[command(name = "portcall", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Write the resulting JSON to this file instead of stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: retiming a voyage
  1. portcall show voyage.json
  2. portcall edit voyage.json --set 1:speed=15 --out voyage.json
  3. portcall edit voyage.json --set 0:departure=2025-10-01T16:23:00 --out voyage.json
  4. portcall validate voyage.json

Rows are 0-based positions in sequence order.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the chain as a table.
    Show {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,
    },

    /// Check ordering and ranges. Exits non-zero when the chain is invalid.
    Validate {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,
    },

    /// Apply field edits and recalculate.
    ///
    /// Repeated edits to the same row and field are coalesced: only the
    /// last one is applied. Cells apply in order of their last edit.
    Edit {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,

        /// An edit as `ROW:FIELD=VALUE`, e.g. `1:speed=15` or `0:departure=2025-10-01T16:23:00`.
        #[arg(long = "set", required = true, value_parser = parse_set)]
        edits: Vec<FieldEdit>,
    },

    /// Append a default port call after the last one.
    Add {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,

        /// Owning voyage id for the new port call.
        #[arg(long)]
        voyage: i64,
    },

    /// Remove a port call by id.
    Remove {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,

        /// Port-call id to remove.
        #[arg(long, allow_hyphen_values = true)]
        id: i64,
    },

    /// Move a port call to another position.
    ///
    /// Ballast rows are pinned and cannot be moved or displaced.
    Reorder {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,

        /// Current 0-based position.
        #[arg(long)]
        from: usize,

        /// Target 0-based position.
        #[arg(long)]
        to: usize,
    },

    /// Renumber sequence order 1..N and recalculate in that order.
    Resequence {
        /// Chain file: a JSON array of port calls.
        chain: PathBuf,
    },
}

/// One `--set ROW:FIELD=VALUE` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub row: usize,
    pub field: PortCallField,
    pub value: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cell, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ROW:FIELD=VALUE, got '{s}'"))?;
        let (row, field) = cell
            .split_once(':')
            .ok_or_else(|| format!("expected ROW:FIELD before '=', got '{cell}'"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row '{row}': {e}"))?;
        let field = field.trim().parse()?;

        Ok(Self {
            row,
            field,
            value: value.to_string(),
        })
    }
}

fn parse_set(s: &str) -> Result<FieldEdit, String> {
    s.parse()
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();
    let out = cli.out;

    match cli.command {
        Command::Show { chain } => {
            let chain = load(&chain)?;
            println!("{}", format_chain(&chain));
            Ok(())
        }
        Command::Validate { chain } => cmd_validate(&load(&chain)?, out),
        Command::Edit { chain, edits } => {
            let chain = apply_edits(config, load(&chain)?, &edits);
            emit(&chain, out, &format!("{} edit(s)", edits.len()))
        }
        Command::Add { chain, voyage } => {
            let chain = service::add_port_call(&load(&chain)?, voyage);
            emit(&chain, out, "added port call")
        }
        Command::Remove { chain, id } => {
            let chain = service::remove_port_call(&load(&chain)?, id);
            emit(&chain, out, &format!("removed port call {id}"))
        }
        Command::Reorder { chain, from, to } => {
            let chain = service::reorder_port_calls(&load(&chain)?, from, to);
            emit(&chain, out, &format!("moved row {from} to {to}"))
        }
        Command::Resequence { chain } => {
            let chain = crate::recalc::recalc_after_sequence_change(&service::resequence(
                &load(&chain)?,
            ));
            emit(&chain, out, "resequenced")
        }
    }
}

/// Push every edit through a debouncer, then flush.
///
/// Same-cell edits coalesce to the last value. Re-editing a cell moves it
/// behind every other pending cell.
fn apply_edits(config: &Config, chain: Vec<PortCall>, edits: &[FieldEdit]) -> Vec<PortCall> {
    let chain = Rc::new(RefCell::new(chain));
    let mut debouncer = Debouncer::new(config.debounce_delay());

    for edit in edits {
        let target = Rc::clone(&chain);
        let FieldEdit { row, field, value } = edit.clone();
        debouncer.debounced_update(EditKey { row, field }, None, move || {
            let next = service::recalculate_after_field_change(&target.borrow(), row, field, &value);
            *target.borrow_mut() = next;
        });
    }
    let applied = debouncer.flush();
    info!(requested = edits.len(), applied, "applied edits");

    chain.take()
}

fn cmd_validate(chain: &[PortCall], out: Option<PathBuf>) -> Result<(), String> {
    let report = validate_port_call_sequence(chain);
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("failed to serialize report: {e}"))?;

    match out {
        Some(path) => {
            fs::write(&path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("{}", format_report(&report));
        }
        None => println!("{json}"),
    }

    if report.is_valid {
        Ok(())
    } else {
        Err(format!("chain is invalid: {} error(s)", report.errors.len()))
    }
}

fn load(path: &std::path::Path) -> Result<Vec<PortCall>, String> {
    storage::load_chain(path).map_err(|e| e.to_string())
}

/// Write the chain to `out` or stdout.
fn emit(chain: &[PortCall], out: Option<PathBuf>, summary: &str) -> Result<(), String> {
    match out {
        Some(path) => {
            storage::save_chain(&path, chain).map_err(|e| e.to_string())?;
            eprintln!("{summary} → {}", path.display());
            eprintln!("{}", format_chain(chain));
        }
        None => {
            let json = storage::render_chain(chain)
                .map_err(|e| format!("failed to serialize chain: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixtures::sample_chain;

    fn edit(s: &str) -> FieldEdit {
        s.parse().unwrap()
    }

    #[test]
    fn parses_field_edits() {
        assert_eq!(
            edit("1:speed=15"),
            FieldEdit {
                row: 1,
                field: PortCallField::Speed,
                value: "15".to_string(),
            }
        );
        let departure = edit("0:departure=2025-10-01T16:23:00");
        assert_eq!(departure.field, PortCallField::Departure);
        assert_eq!(departure.value, "2025-10-01T16:23:00");
        assert_eq!(edit("2:port-days=").value, "");
    }

    #[test]
    fn rejects_malformed_field_edits() {
        assert!("1speed=15".parse::<FieldEdit>().is_err());
        assert!("1:speed".parse::<FieldEdit>().is_err());
        assert!("x:speed=15".parse::<FieldEdit>().is_err());
        assert!("1:draft=9".parse::<FieldEdit>().is_err());
    }

    #[test]
    fn same_cell_edits_coalesce_to_last() {
        let config = Config::default();
        let edits = [edit("1:speed=9"), edit("1:speed=15")];
        let chain = apply_edits(&config, sample_chain(), &edits);

        let direct =
            service::recalculate_after_field_change(&sample_chain(), 1, PortCallField::Speed, "15");
        assert_eq!(chain, direct);
    }

    #[test]
    fn distinct_edits_apply_in_order() {
        let config = Config::default();
        let edits = [edit("1:speed=15"), edit("2:portDays=3")];
        let chain = apply_edits(&config, sample_chain(), &edits);

        let expected =
            service::recalculate_after_field_change(&sample_chain(), 1, PortCallField::Speed, "15");
        let expected =
            service::recalculate_after_field_change(&expected, 2, PortCallField::PortDays, "3");
        assert_eq!(chain, expected);
    }

    #[test]
    fn re_edited_cell_applies_after_other_cells() {
        let config = Config::default();
        let edits = [edit("1:speed=9"), edit("2:portDays=3"), edit("1:speed=15")];
        let chain = apply_edits(&config, sample_chain(), &edits);

        let expected =
            service::recalculate_after_field_change(&sample_chain(), 2, PortCallField::PortDays, "3");
        let expected =
            service::recalculate_after_field_change(&expected, 1, PortCallField::Speed, "15");
        assert_eq!(chain, expected);
    }
}
