/*!
 * Region Tests
 * Block-list construction, best-fit allocation, release, and compaction
 */

use contig_allocator::{Allocator, Block, MemoryError, MemoryInfo, Owner, Region, Segment, SegmentEnd};
use pretty_assertions::assert_eq;

fn owned(pid: u32, start: usize, size: usize) -> Block {
    Block::new(Owner::Process(pid), start, size)
}

fn free(start: usize, size: usize) -> Block {
    Block::free(start, size)
}

#[test]
fn initialization_creates_single_free_block() {
    let region = Region::new(1000).unwrap();

    assert_eq!(region.limit(), 1000);
    assert_eq!(region.blocks(), &[free(0, 1000)]);
    assert_eq!(
        region.segments(),
        vec![Segment {
            start: 0,
            end: SegmentEnd::End,
            owner: Owner::Free,
        }]
    );
}

#[test]
fn zero_limit_is_rejected() {
    assert_eq!(
        Region::new(0).unwrap_err(),
        MemoryError::InvalidSize { size: 0 }
    );
}

#[test]
fn allocation_splits_the_free_block() {
    let mut region = Region::new(1000).unwrap();

    let addr = region.allocate(1, 600).unwrap();

    assert_eq!(addr, 0);
    assert_eq!(region.blocks(), &[owned(1, 0, 600), free(600, 400)]);
}

#[test]
fn consecutive_allocations_pack_low_addresses() {
    let mut region = Region::new(1000).unwrap();

    region.allocate(1, 600).unwrap();
    let addr = region.allocate(2, 300).unwrap();

    assert_eq!(addr, 600);
    assert_eq!(
        region.blocks(),
        &[owned(1, 0, 600), owned(2, 600, 300), free(900, 100)]
    );
}

#[test]
fn exact_fit_relabels_without_split() {
    let mut region = Region::new(1000).unwrap();

    region.allocate(1, 600).unwrap();
    region.allocate(2, 400).unwrap();

    assert_eq!(region.blocks(), &[owned(1, 0, 600), owned(2, 600, 400)]);
}

#[test]
fn duplicate_process_is_rejected_unchanged() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();
    region.allocate(2, 300).unwrap();

    let before = region.clone();
    let err = region.allocate(1, 50).unwrap_err();

    assert_eq!(err, MemoryError::AlreadyExists { pid: 1 });
    assert_eq!(region, before);
}

#[test]
fn duplicate_check_wins_over_lower_addressed_hole() {
    // A usable hole sits at a lower address than P1's block; the ownership
    // check must still win.
    let mut region = Region::new(1000).unwrap();
    region.allocate(9, 100).unwrap();
    region.allocate(1, 200).unwrap();
    region.release(9).unwrap();

    assert_eq!(region.blocks(), &[free(0, 100), owned(1, 100, 200), free(300, 700)]);

    let before = region.clone();
    assert_eq!(
        region.allocate(1, 50).unwrap_err(),
        MemoryError::AlreadyExists { pid: 1 }
    );
    assert_eq!(region, before);
}

#[test]
fn best_fit_selects_smallest_adequate_hole() {
    // Holes of 100 and 300 bytes; an 80-byte request takes the 100-byte one.
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 100).unwrap();
    region.allocate(2, 200).unwrap();
    region.allocate(3, 300).unwrap();
    region.release(1).unwrap();

    let addr = region.allocate(4, 80).unwrap();

    assert_eq!(addr, 0);
    assert_eq!(
        region.blocks(),
        &[
            owned(4, 0, 80),
            free(80, 20),
            owned(2, 100, 200),
            owned(3, 300, 300),
            free(600, 400),
        ]
    );
}

#[test]
fn best_fit_tie_breaks_to_lower_address() {
    // Two 100-byte holes at addresses 0 and 300.
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 100).unwrap();
    region.allocate(2, 200).unwrap();
    region.allocate(3, 100).unwrap();
    region.allocate(4, 600).unwrap();
    region.release(1).unwrap();
    region.release(3).unwrap();

    let addr = region.allocate(5, 100).unwrap();

    assert_eq!(addr, 0);
}

#[test]
fn insufficient_memory_reports_largest_hole() {
    // 400 bytes free in total but fragmented into 100 + 300.
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 100).unwrap();
    region.allocate(2, 100).unwrap();
    region.allocate(3, 200).unwrap();
    region.allocate(4, 300).unwrap();
    region.allocate(5, 300).unwrap();
    region.release(2).unwrap();
    region.release(4).unwrap();

    assert_eq!(
        region.blocks(),
        &[
            owned(1, 0, 100),
            free(100, 100),
            owned(3, 200, 200),
            free(400, 300),
            owned(5, 700, 300),
        ]
    );

    let before = region.clone();
    let err = region.allocate(6, 350).unwrap_err();

    assert_eq!(
        err,
        MemoryError::InsufficientMemory {
            requested: 350,
            largest_hole: 300,
            free: 400,
            total: 1000,
        }
    );
    assert_eq!(region, before);
}

#[test]
fn release_of_unknown_process_is_rejected() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();

    let before = region.clone();
    assert_eq!(
        region.release(2).unwrap_err(),
        MemoryError::NotFound { pid: 2 }
    );
    assert_eq!(region, before);
}

#[test]
fn release_keeps_non_adjacent_free_blocks_apart() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();
    region.allocate(2, 300).unwrap();

    let released = region.release(1).unwrap();

    assert_eq!(released, 600);
    assert_eq!(
        region.blocks(),
        &[free(0, 600), owned(2, 600, 300), free(900, 100)]
    );
}

#[test]
fn release_merges_with_both_neighbors() {
    let mut region = Region::new(600).unwrap();
    region.allocate(1, 200).unwrap();
    region.allocate(2, 200).unwrap();
    region.allocate(3, 200).unwrap();
    region.release(1).unwrap();
    region.release(3).unwrap();

    region.release(2).unwrap();

    assert_eq!(region.blocks(), &[free(0, 600)]);
}

#[test]
fn allocate_release_round_trips() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();

    let before = region.clone();
    region.allocate(2, 100).unwrap();
    region.release(2).unwrap();

    assert_eq!(region, before);
}

#[test]
fn compaction_consolidates_free_space() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();
    region.allocate(2, 300).unwrap();
    region.release(1).unwrap();

    region.compact();

    assert_eq!(region.blocks(), &[owned(2, 0, 300), free(300, 700)]);
}

#[test]
fn compaction_preserves_relative_order_of_owned_blocks() {
    // Interleaved layout: P1 F P3 F P5. One call must fully consolidate.
    let mut region = Region::new(500).unwrap();
    for pid in 1..=5 {
        region.allocate(pid, 100).unwrap();
    }
    region.release(2).unwrap();
    region.release(4).unwrap();

    region.compact();

    assert_eq!(
        region.blocks(),
        &[
            owned(1, 0, 100),
            owned(3, 100, 100),
            owned(5, 200, 100),
            free(300, 200),
        ]
    );
}

#[test]
fn compaction_is_idempotent() {
    let mut region = Region::new(1000).unwrap();
    for pid in 1..=4 {
        region.allocate(pid, 150).unwrap();
    }
    region.release(1).unwrap();
    region.release(3).unwrap();

    region.compact();
    let after_first = region.clone();
    region.compact();

    assert_eq!(region, after_first);
}

#[test]
fn compaction_of_fully_free_region_is_a_no_op() {
    let mut region = Region::new(1000).unwrap();
    region.compact();
    assert_eq!(region.blocks(), &[free(0, 1000)]);
}

#[test]
fn operations_conserve_total_size() {
    let mut region = Region::new(1000).unwrap();
    let total = |r: &Region| r.blocks().iter().map(|b| b.size).sum::<usize>();

    region.allocate(1, 250).unwrap();
    assert_eq!(total(&region), 1000);
    region.allocate(2, 400).unwrap();
    assert_eq!(total(&region), 1000);
    region.release(1).unwrap();
    assert_eq!(total(&region), 1000);
    region.compact();
    assert_eq!(total(&region), 1000);
}

#[test]
fn zero_size_allocation_is_rejected() {
    let mut region = Region::new(1000).unwrap();
    assert_eq!(
        region.allocate(1, 0).unwrap_err(),
        MemoryError::InvalidSize { size: 0 }
    );
    assert_eq!(region.blocks(), &[free(0, 1000)]);
}

#[test]
fn stats_reflect_the_partition() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 100).unwrap();
    region.allocate(2, 200).unwrap();
    region.allocate(3, 300).unwrap();
    region.release(1).unwrap();

    let stats = region.stats();

    assert_eq!(stats.total_memory, 1000);
    assert_eq!(stats.used_memory, 500);
    assert_eq!(stats.free_memory, 500);
    assert_eq!(stats.allocated_blocks, 2);
    assert_eq!(stats.free_blocks, 2);
    assert_eq!(stats.largest_hole, 400);
    assert!((stats.usage_percentage - 50.0).abs() < f64::EPSILON);
}

#[test]
fn segments_mark_only_the_last_block_as_end() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();

    assert_eq!(
        region.segments(),
        vec![
            Segment {
                start: 0,
                end: SegmentEnd::Addr(599),
                owner: Owner::Process(1),
            },
            Segment {
                start: 600,
                end: SegmentEnd::End,
                owner: Owner::Free,
            },
        ]
    );
}

#[test]
fn trait_interfaces_cover_the_core_operations() {
    fn exercise(memory: &mut (impl Allocator + MemoryInfo)) {
        memory.allocate(1, 100).unwrap();
        assert_eq!(memory.stats().used_memory, 100);
        assert_eq!(memory.segments().len(), 2);
        memory.release(1).unwrap();
        assert_eq!(memory.stats().used_memory, 0);
    }

    let mut region = Region::new(1000).unwrap();
    exercise(&mut region);
}

#[test]
fn segment_rendering_matches_report_format() {
    let mut region = Region::new(1000).unwrap();
    region.allocate(1, 600).unwrap();

    let lines: Vec<String> = region.segments().iter().map(|s| s.to_string()).collect();

    assert_eq!(
        lines,
        vec![
            "Addresses [0 : 599] Process P1".to_string(),
            "Addresses [600 : END] Free".to_string(),
        ]
    );
}
