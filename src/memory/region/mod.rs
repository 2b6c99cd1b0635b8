/*!
 * Memory Region
 *
 * Ordered partition of `[0, limit)` into owned and free blocks.
 *
 * The block list is kept sorted by ascending start address with no gaps, no
 * overlaps, and no empty blocks; no two adjacent blocks are both free, and
 * each process owns at most one block at a time. Every operation either
 * succeeds and leaves the invariants intact or fails and leaves the region
 * untouched.
 */

mod allocator;
mod compact;

use super::traits::{Allocator, MemoryInfo};
use super::types::{Block, MemoryError, MemoryResult, Owner, RegionStats, Segment, SegmentEnd};
use crate::core::types::{Address, Pid, Size};
use log::info;

/// Simulated contiguous memory region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    blocks: Vec<Block>,
    limit: Size,
}

impl Region {
    /// Create a region containing a single free block spanning `[0, limit)`
    pub fn new(limit: Size) -> MemoryResult<Self> {
        if limit == 0 {
            return Err(MemoryError::InvalidSize { size: limit });
        }

        info!("Region initialized with {} bytes", limit);
        Ok(Self {
            blocks: vec![Block::free(0, limit)],
            limit,
        })
    }

    /// Total addressable size
    pub fn limit(&self) -> Size {
        self.limit
    }

    /// Number of blocks in the partition
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// A region always holds at least one block
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Blocks in ascending address order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block owned by `pid`, if any
    pub fn owner_block(&self, pid: Pid) -> Option<&Block> {
        self.blocks.iter().find(|b| b.owner == Owner::Process(pid))
    }

    /// Status report: one segment per block, low to high address
    pub fn segments(&self) -> Vec<Segment> {
        self.blocks
            .iter()
            .map(|block| Segment {
                start: block.start,
                end: if block.end() == self.limit - 1 {
                    SegmentEnd::End
                } else {
                    SegmentEnd::Addr(block.end())
                },
                owner: block.owner,
            })
            .collect()
    }

    /// Region statistics
    pub fn stats(&self) -> RegionStats {
        let used: Size = self
            .blocks
            .iter()
            .filter(|b| !b.is_free())
            .map(|b| b.size)
            .sum();
        let allocated_blocks = self.blocks.iter().filter(|b| !b.is_free()).count();
        let largest_hole = self
            .blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0);

        RegionStats {
            total_memory: self.limit,
            used_memory: used,
            free_memory: self.limit - used,
            usage_percentage: (used as f64 / self.limit as f64) * 100.0,
            allocated_blocks,
            free_blocks: self.blocks.len() - allocated_blocks,
            largest_hole,
        }
    }

}

// Implement trait interfaces
impl Allocator for Region {
    fn allocate(&mut self, pid: Pid, size: Size) -> MemoryResult<Address> {
        Region::allocate(self, pid, size)
    }

    fn release(&mut self, pid: Pid) -> MemoryResult<Size> {
        Region::release(self, pid)
    }
}

impl MemoryInfo for Region {
    fn stats(&self) -> RegionStats {
        Region::stats(self)
    }

    fn segments(&self) -> Vec<Segment> {
        Region::segments(self)
    }
}
