//! The process global allocator as a benchmark subject.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use membench_core::alloc::BenchAllocator;

/// Alignment for every benchmark block, the usual `max_align_t` contract.
const BLOCK_ALIGN: usize = 16;

/// Handle to one heap block.
///
/// Zero-size requests get a dangling, non-null handle and never touch the
/// global allocator; freeing such a handle is a no-op. The workload stream
/// produces genuine zero-size requests, so this path is exercised.
#[derive(Debug)]
pub struct HeapBlock {
    ptr: NonNull<u8>,
    size: usize,
}

impl HeapBlock {
    fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            size: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Benchmark subject backed by `std::alloc`.
#[derive(Debug, Default)]
pub struct SystemHeap;

fn layout_for(size: usize) -> Option<Layout> {
    Layout::from_size_align(size, BLOCK_ALIGN).ok()
}

impl BenchAllocator for SystemHeap {
    type Handle = HeapBlock;

    fn alloc(&mut self, size: usize) -> Option<HeapBlock> {
        if size == 0 {
            return Some(HeapBlock::dangling());
        }
        let layout = layout_for(size)?;
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr).map(|ptr| HeapBlock { ptr, size })
    }

    fn alloc_zeroed(&mut self, size: usize) -> Option<HeapBlock> {
        if size == 0 {
            return Some(HeapBlock::dangling());
        }
        let layout = layout_for(size)?;
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        NonNull::new(ptr).map(|ptr| HeapBlock { ptr, size })
    }

    fn realloc(&mut self, block: HeapBlock, new_size: usize) -> Option<HeapBlock> {
        if block.size == 0 {
            return self.alloc(new_size);
        }
        if new_size == 0 {
            self.free(block);
            return Some(HeapBlock::dangling());
        }
        let layout = layout_for(block.size)?;
        // SAFETY: `block.ptr` was allocated by this subject with `layout`,
        // and `new_size` is non-zero.
        let ptr = unsafe { alloc::realloc(block.ptr.as_ptr(), layout, new_size) };
        // On failure the old block stays allocated and the dropped handle
        // leaks it, matching the driver's store-the-null pass-through.
        NonNull::new(ptr).map(|ptr| HeapBlock {
            ptr,
            size: new_size,
        })
    }

    fn free(&mut self, block: HeapBlock) {
        if block.size == 0 {
            return;
        }
        let Some(layout) = layout_for(block.size) else {
            return;
        };
        // SAFETY: allocated by this subject with the same layout.
        unsafe { alloc::dealloc(block.ptr.as_ptr(), layout) };
    }
}
