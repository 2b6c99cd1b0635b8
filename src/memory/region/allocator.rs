/*!
 * Allocation and Release
 * Best-fit placement, release by owner, and free-run coalescing
 */

use super::Region;
use crate::core::types::{Address, Pid, Size};
use crate::memory::types::{Block, MemoryError, MemoryResult, Owner};
use log::{error, info, warn};

impl Region {
    /// Allocate `size` bytes for `pid` into the smallest adequate hole.
    ///
    /// Ties between equally sized holes go to the lower address. The
    /// ownership check takes priority over hole selection: a process that
    /// already owns memory is rejected even when a usable hole exists.
    pub fn allocate(&mut self, pid: Pid, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            warn!("Allocation rejected: P{} requested zero bytes", pid);
            return Err(MemoryError::InvalidSize { size });
        }

        if self.owner_block(pid).is_some() {
            warn!("Allocation rejected: P{} already owns memory", pid);
            return Err(MemoryError::AlreadyExists { pid });
        }

        // Smallest adequate hole. The scan runs low to high and replaces the
        // incumbent only on a strictly smaller size, so ties keep the lower
        // address.
        let mut best: Option<usize> = None;
        for (idx, block) in self.blocks.iter().enumerate() {
            if block.is_free() && block.size >= size {
                let better = match best {
                    Some(current) => block.size < self.blocks[current].size,
                    None => true,
                };
                if better {
                    best = Some(idx);
                }
            }
        }

        let idx = match best {
            Some(idx) => idx,
            None => {
                let stats = self.stats();
                error!(
                    "Allocation rejected: P{} requested {} bytes, largest hole {} bytes ({} free / {} total)",
                    pid, size, stats.largest_hole, stats.free_memory, stats.total_memory
                );
                return Err(MemoryError::InsufficientMemory {
                    requested: size,
                    largest_hole: stats.largest_hole,
                    free: stats.free_memory,
                    total: stats.total_memory,
                });
            }
        };

        // Exact fit relabels the hole; otherwise split off a free remainder
        // as the successor.
        let hole = self.blocks[idx];
        self.blocks[idx].owner = Owner::Process(pid);
        if hole.size > size {
            self.blocks[idx].size = size;
            self.blocks
                .insert(idx + 1, Block::free(hole.start + size, hole.size - size));
        }

        info!("Allocated {} bytes at {} for P{}", size, hole.start, pid);
        Ok(hole.start)
    }

    /// Release the block owned by `pid` and merge adjacent free runs.
    ///
    /// Returns the number of bytes released.
    pub fn release(&mut self, pid: Pid) -> MemoryResult<Size> {
        let idx = match self
            .blocks
            .iter()
            .position(|b| b.owner == Owner::Process(pid))
        {
            Some(idx) => idx,
            None => {
                warn!("Release rejected: P{} owns no memory", pid);
                return Err(MemoryError::NotFound { pid });
            }
        };

        let size = self.blocks[idx].size;
        self.blocks[idx].owner = Owner::Free;
        self.merge_free();

        info!("Released {} bytes from P{}", size, pid);
        Ok(size)
    }

    /// Collapse every maximal run of consecutive free blocks into one block
    /// starting where the run starts and sized as the run's sum.
    ///
    /// Idempotent; a region with no adjacent free blocks is left untouched.
    pub(super) fn merge_free(&mut self) {
        self.blocks.dedup_by(|curr, prev| {
            if prev.is_free() && curr.is_free() {
                prev.size += curr.size;
                true
            } else {
                false
            }
        });
    }
}
