/*!
 * Command Grammar
 * Lexical validation of shell input before the region is called
 */

use crate::core::types::{Pid, Size};
use thiserror::Error;

/// Command parse errors
///
/// Display texts double as the shell's diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid command or case.")]
    InvalidCommand,

    #[error("Invalid process name: {0}")]
    InvalidProcessName(String),

    #[error("Invalid memory size: {0}")]
    InvalidSize(String),

    #[error("Zero memory requested.")]
    ZeroSize,

    #[error("No approach specified. (B/F/W)")]
    MissingApproach,

    #[error("Invalid approach specified.")]
    InvalidApproach,

    #[error("Missing {0}.")]
    MissingField(&'static str),
}

/// Allocation approach code accepted by the `RQ` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    BestFit,
    FirstFit,
    WorstFit,
}

impl Approach {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(Approach::BestFit),
            "F" => Some(Approach::FirstFit),
            "W" => Some(Approach::WorstFit),
            _ => None,
        }
    }
}

/// Parsed shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request {
        pid: Pid,
        size: Size,
        approach: Approach,
    },
    Release {
        pid: Pid,
    },
    Compact,
    Status,
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Validates lexical shape (process-name prefix, numeric size,
    /// one-letter approach code) so malformed input never reaches the
    /// region. Commands are case-sensitive.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut fields = line.split_whitespace();
        let command = fields.next().ok_or(ParseError::InvalidCommand)?;

        let parsed = match command {
            "RQ" => {
                let pid =
                    parse_process(fields.next().ok_or(ParseError::MissingField("process name"))?)?;
                let size =
                    parse_size(fields.next().ok_or(ParseError::MissingField("memory size"))?)?;
                let approach = match fields.next() {
                    Some(code) => {
                        Approach::from_code(code).ok_or(ParseError::InvalidApproach)?
                    }
                    None => return Err(ParseError::MissingApproach),
                };
                Command::Request { pid, size, approach }
            }
            "RL" => {
                let pid =
                    parse_process(fields.next().ok_or(ParseError::MissingField("process name"))?)?;
                Command::Release { pid }
            }
            "C" => Command::Compact,
            "STAT" => Command::Status,
            "QUIT" => Command::Quit,
            _ => return Err(ParseError::InvalidCommand),
        };

        if fields.next().is_some() {
            return Err(ParseError::InvalidCommand);
        }
        Ok(parsed)
    }
}

fn parse_process(token: &str) -> Result<Pid, ParseError> {
    token
        .strip_prefix('P')
        .and_then(|digits| digits.parse::<Pid>().ok())
        .ok_or_else(|| ParseError::InvalidProcessName(token.to_string()))
}

fn parse_size(token: &str) -> Result<Size, ParseError> {
    let size = token
        .parse::<Size>()
        .map_err(|_| ParseError::InvalidSize(token.to_string()))?;
    if size == 0 {
        return Err(ParseError::ZeroSize);
    }
    Ok(size)
}
