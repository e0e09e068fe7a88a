//! Proves the processing path performs no heap allocation after `prepare`.
//!
//! A counting wrapper around the system allocator is installed for the
//! whole test binary; the test measures the allocation count across many
//! `process` calls and requires it to stay flat. Scope publishes go through
//! the same path, so this covers the snapshot copy as well.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use quadvca::{QuadVca, NUM_CHANNELS};
use strata::prelude::*;

struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        System.alloc(layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        System.realloc(ptr, layout, new_size)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[test]
fn process_does_not_allocate_after_prepare() {
    const BLOCK_SIZE: usize = 128;

    let mut vca = QuadVca::default();
    vca.prepare(48_000.0, BLOCK_SIZE);

    let mut data: Vec<Vec<f32>> = (0..NUM_CHANNELS).map(|_| vec![0.5f32; BLOCK_SIZE]).collect();

    let before = ALLOCATIONS.load(Ordering::Relaxed);
    for k in 0..1_000 {
        for ch in &mut data {
            ch.fill((k % 100) as f32 / 100.0);
        }
        let mut block = Block::new(data.iter_mut().map(|c| c.as_mut_slice()), BLOCK_SIZE);
        vca.process(&mut block);
        vca.encoder_turned(Encoder::E1, 1);
    }
    let after = ALLOCATIONS.load(Ordering::Relaxed);

    assert_eq!(after - before, 0, "audio path allocated");
}
