/*!
 * Compaction
 * Slides owned blocks toward address 0 and consolidates free space
 */

use super::Region;
use log::info;

impl Region {
    /// Compact the region: owned blocks move toward address 0 keeping their
    /// relative order, and all free space ends up in a single block at the
    /// high end.
    ///
    /// Each pass walks the block list left to right and, when the current
    /// block is free, swaps its role with the successor, pushing the free
    /// capacity one slot right. A single pass stalls where two free blocks
    /// meet mid-scan, so passes repeat until no owned block moves; the merge
    /// then collapses the trailing free run into one block.
    pub fn compact(&mut self) {
        let mut moved = 0usize;

        loop {
            let mut moved_this_pass = 0usize;

            for i in 0..self.blocks.len().saturating_sub(1) {
                if !self.blocks[i].is_free() {
                    continue;
                }
                if !self.blocks[i + 1].is_free() {
                    moved_this_pass += 1;
                }

                // The successor's owner and size take over the current slot;
                // only the successor's start needs recomputing.
                let start = self.blocks[i].start;
                self.blocks.swap(i, i + 1);
                self.blocks[i].start = start;
                self.blocks[i + 1].start = start + self.blocks[i].size;
            }

            if moved_this_pass == 0 {
                break;
            }
            moved += moved_this_pass;
        }

        self.merge_free();
        info!(
            "Compaction complete: {} block moves, {} blocks remain",
            moved,
            self.len()
        );
    }
}
