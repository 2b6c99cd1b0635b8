/*!
 * Memory Traits
 * Interfaces over the simulated region
 */

use super::types::{MemoryResult, RegionStats, Segment};
use crate::core::types::{Address, Pid, Size};

/// Allocation interface
pub trait Allocator {
    /// Allocate memory for a process, returning the placed block's start
    fn allocate(&mut self, pid: Pid, size: Size) -> MemoryResult<Address>;

    /// Release the memory owned by a process, returning the freed size
    fn release(&mut self, pid: Pid) -> MemoryResult<Size>;
}

/// Region introspection interface
pub trait MemoryInfo {
    /// Overall region statistics
    fn stats(&self) -> RegionStats;

    /// Status-report segments in ascending address order
    fn segments(&self) -> Vec<Segment>;
}
