//! Driver: command dispatch over a line-oriented input.
//!
//! Reads commands from any buffered source (stdin or a replay file),
//! executes them against a [`Hierarchy`], and prints results: `ld` echoes
//! the returned payload or a miss indication, `show` dumps cache and
//! modified-memory state, and every `ld`/`st` is followed by the
//! modified-memory report. Malformed lines are reported to stderr and
//! skipped; processing continues until EOF.

/// Line parser for the `ld`/`st`/`show` grammar.
pub mod command;

pub use command::Command;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::cache::InQuery;
use crate::common::WORD_BYTES;
use crate::hierarchy::Hierarchy;

/// Executes every line of `input` against the hierarchy.
///
/// When `echo` is set each line is printed back before execution, the way
/// replayed test files show the command being run.
///
/// # Errors
///
/// Returns the first I/O error raised by the input source.
pub fn run(hierarchy: &mut Hierarchy, input: impl BufRead, echo: bool) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if echo && !line.trim().is_empty() {
            println!("\n{line}");
        }
        match Command::parse(&line) {
            Ok(Some(cmd)) => execute(hierarchy, &cmd),
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

/// Replays commands from a file.
///
/// # Errors
///
/// Returns an I/O error when the file cannot be opened or read.
pub fn run_file(hierarchy: &mut Hierarchy, path: &Path) -> io::Result<()> {
    let file = File::open(path)?;
    run(hierarchy, BufReader::new(file), true)
}

/// Executes one parsed command and prints its results.
pub fn execute(hierarchy: &mut Hierarchy, cmd: &Command) {
    match cmd {
        Command::Show => hierarchy.print_state(),
        Command::Load { size, addr } => {
            let result = hierarchy.query(&InQuery::read(*addr, *size));
            match (result.hit, result.data) {
                (true, Some(data)) => {
                    let wanted = size / WORD_BYTES;
                    let shown = wanted.min(data.valid_count());
                    let words: Vec<String> = data.words()[..shown]
                        .iter()
                        .map(|w| format!("{w:#x}"))
                        .collect();
                    println!("data: {}", words.join(" "));
                }
                _ => println!("miss"),
            }
            hierarchy.print_changes();
        }
        Command::Store { size, addr, data } => {
            let _ = hierarchy.query(&InQuery::write(*addr, data.clone(), *size));
            hierarchy.print_changes();
        }
    }
}
