/*!
 * Interactive Shell
 *
 * Line-oriented front end that owns the region and drives it from parsed
 * commands. All lexical validation happens here; the region only ever sees
 * well-formed requests. Commands:
 *
 * - `RQ <proc> <size> <approach>`: request memory (only `B` is supported)
 * - `RL <proc>`: release a process's memory
 * - `C`: compaction
 * - `STAT`: status report
 * - `QUIT`: leave the loop
 */

mod command;

pub use command::{Approach, Command, ParseError};

use crate::core::types::{Pid, Size};
use crate::memory::{MemoryError, Region};
use log::debug;
use std::io::{self, BufRead, Write};

/// Prompt printed before each command
const PROMPT: &str = "allocator>";

/// Interactive command loop over a memory region
pub struct Shell {
    region: Region,
}

impl Shell {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// The region being managed
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Run the command loop until `QUIT` or end of input.
    ///
    /// Generic over reader and writer so tests can drive a whole session
    /// with in-memory buffers.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> io::Result<()> {
        let mut line = String::new();

        loop {
            write!(writer, "{}", PROMPT)?;
            writer.flush()?;

            line.clear();
            if reader.read_line(&mut line)? == 0 {
                debug!("End of input, leaving command loop");
                break;
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            match Command::parse(input) {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command, writer)?,
                Err(err) => writeln!(writer, "{}", err)?,
            }
        }

        Ok(())
    }

    fn dispatch<W: Write>(&mut self, command: Command, writer: &mut W) -> io::Result<()> {
        debug!("Dispatching {:?}", command);

        match command {
            Command::Request {
                pid,
                size,
                approach,
            } => match approach {
                Approach::BestFit => self.request(pid, size, writer)?,
                Approach::FirstFit => writeln!(writer, "First fit not supported.")?,
                Approach::WorstFit => writeln!(writer, "Worst fit not supported.")?,
            },
            Command::Release { pid } => {
                if self.region.release(pid).is_err() {
                    writeln!(writer, "Process P{} not found.", pid)?;
                }
            }
            Command::Compact => self.region.compact(),
            Command::Status => self.report(writer)?,
            Command::Quit => {}
        }

        Ok(())
    }

    /// Successful requests are silent, matching the report-only output style
    fn request<W: Write>(&mut self, pid: Pid, size: Size, writer: &mut W) -> io::Result<()> {
        match self.region.allocate(pid, size) {
            Ok(_) => Ok(()),
            Err(MemoryError::AlreadyExists { pid }) => {
                writeln!(writer, "Process P{} already exists.", pid)
            }
            Err(MemoryError::InsufficientMemory { .. }) => {
                writeln!(writer, "Insufficient memory, request rejected.")
            }
            Err(other) => writeln!(writer, "{}", other),
        }
    }

    /// Render the status report, one block per line, low to high address
    fn report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for segment in self.region.segments() {
            writeln!(writer)?;
            writeln!(writer, "{}", segment)?;
        }
        writeln!(writer)
    }
}
