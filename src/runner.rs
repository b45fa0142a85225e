use std::io::{self, BufRead, Write};
use std::panic;
use std::thread;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::channel::{Input, Output, channel};
use crate::computer::{Computer, ExecutionError};

/// Everything needed to run one program from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub program: Vec<i64>,
    /// Requested memory size; raised to the program length if smaller.
    pub memory_size: usize,
    /// Values queued on the input channel before anything from the feed.
    pub inputs: Vec<i64>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run a program to completion, printing each output value on its own line.
///
/// `feed`, if given, supplies further input values (whitespace or comma
/// separated) after `config.inputs` are used up. It is read on a detached
/// thread, since it may block for as long as the computer runs. Without a
/// feed, a program that reads past the queued inputs fails with
/// [`ExecutionError::InputClosed`].
///
/// Output is written by a dedicated printer thread that is joined before
/// returning, so every value the program emitted has reached `sink`.
///
/// # Panics
///
/// Propagates the computer's panic on out-of-range memory access.
pub fn run<R, W>(config: RunConfig, feed: Option<R>, sink: &mut W) -> Result<(), RunError>
where
    R: BufRead + Send + 'static,
    W: Write + Send,
{
    let (to_vm, input) = channel();
    let (output, from_vm) = channel();

    for &value in &config.inputs {
        to_vm
            .write(value)
            .expect("input end is held until the computer is built");
    }
    match feed {
        Some(reader) => {
            thread::spawn(move || feed_values(reader, to_vm));
        }
        None => drop(to_vm),
    }

    thread::scope(|s| {
        let printer = s.spawn(move || print_values(from_vm, sink));

        // Built inside the scope so that a panicking run drops its output
        // end and lets the printer finish.
        let mut computer = Computer::new(&config.program, config.memory_size, input, output);
        info!(
            program_len = config.program.len(),
            memory_len = computer.memory().len(),
            queued_inputs = config.inputs.len(),
            "starting computer"
        );
        let result = computer.run();
        debug!(
            pointer = computer.pointer(),
            relative_base = computer.relative_base(),
            "computer stopped"
        );
        drop(computer);

        match printer.join() {
            Ok(printed) => printed?,
            Err(payload) => panic::resume_unwind(payload),
        }
        if let Err(e) = &result {
            error!(error = %e, "program failed");
        }
        result?;
        info!("program halted");
        Ok(())
    })
}

fn print_values<W: Write>(from_vm: Input, sink: &mut W) -> io::Result<()> {
    for value in from_vm {
        writeln!(sink, "{value}")?;
        sink.flush()?;
    }
    Ok(())
}

fn feed_values<R: BufRead>(reader: R, to_vm: Output) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stopped reading input feed");
                return;
            }
        };
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            match token.parse::<i64>() {
                Ok(value) => {
                    if to_vm.write(value).is_err() {
                        debug!("computer finished, dropping remaining input");
                        return;
                    }
                }
                Err(_) => warn!(token, "skipping non-integer input"),
            }
        }
    }
}
