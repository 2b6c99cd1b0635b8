/*!
 * Memory Types
 * Common types for the simulated region
 */

use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("process P{pid} already owns memory")]
    AlreadyExists { pid: Pid },

    #[error("insufficient memory: requested {requested} bytes, largest hole {largest_hole} bytes ({free} free / {total} total)")]
    InsufficientMemory {
        requested: Size,
        largest_hole: Size,
        free: Size,
        total: Size,
    },

    #[error("process P{pid} not found")]
    NotFound { pid: Pid },

    #[error("invalid size: {size}")]
    InvalidSize { size: Size },
}

/// Block ownership label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Free,
    Process(Pid),
}

impl Owner {
    pub fn is_free(&self) -> bool {
        matches!(self, Owner::Free)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Free => write!(f, "Free"),
            Owner::Process(pid) => write!(f, "P{}", pid),
        }
    }
}

/// A contiguous run of addresses within the managed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub owner: Owner,
    pub start: Address,
    pub size: Size,
}

impl Block {
    pub fn new(owner: Owner, start: Address, size: Size) -> Self {
        Self { owner, start, size }
    }

    pub fn free(start: Address, size: Size) -> Self {
        Self::new(Owner::Free, start, size)
    }

    /// Address of the last byte in the block
    pub fn end(&self) -> Address {
        self.start + self.size - 1
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_free()
    }
}

/// Upper bound of a reported address range
///
/// `End` replaces the numeric address on the block that reaches the last
/// byte of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentEnd {
    Addr(Address),
    End,
}

impl fmt::Display for SegmentEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentEnd::Addr(addr) => write!(f, "{}", addr),
            SegmentEnd::End => write!(f, "END"),
        }
    }
}

/// One status-report line: an address range and its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Address,
    pub end: SegmentEnd,
    pub owner: Owner,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addresses [{} : {}] ", self.start, self.end)?;
        match self.owner {
            Owner::Free => write!(f, "Free"),
            Owner::Process(pid) => write!(f, "Process P{}", pid),
        }
    }
}

/// Region statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub free_memory: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_hole: Size,
}
