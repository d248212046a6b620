//! Grid Chunks and Dirty Tracking
//!
//! Chunks are fixed-size rectangles of cells that scope mesh rebuilds. Edits
//! mark chunks dirty; the renderer drains the dirty set once per update, so
//! any number of edits to one chunk in between cost exactly one rebuild.
//!
//! # Example
//!
//! ```ignore
//! let mut dirty = DirtyChunks::new(4);
//! dirty.mark(2);
//! dirty.mark(2);
//! dirty.mark(0);
//! assert_eq!(dirty.take(), vec![2, 0]);
//! assert!(dirty.is_empty());
//! ```

use super::cell::{CellId, ChunkId};

/// Cells belonging to one chunk, in local row-major order.
#[derive(Clone, Debug, Default)]
pub struct HexGridChunk {
    cells: Vec<CellId>,
}

impl HexGridChunk {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, cell: CellId) {
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }
}

/// Coalescing set of chunks awaiting a mesh rebuild.
#[derive(Clone, Debug)]
pub struct DirtyChunks {
    flags: Vec<bool>,
    order: Vec<ChunkId>,
}

impl DirtyChunks {
    pub fn new(chunk_count: usize) -> Self {
        Self {
            flags: vec![false; chunk_count],
            order: Vec::new(),
        }
    }

    /// Mark a chunk dirty. Marking an already dirty chunk is a no-op.
    pub fn mark(&mut self, chunk: ChunkId) {
        if let Some(flag) = self.flags.get_mut(chunk) {
            if !*flag {
                *flag = true;
                self.order.push(chunk);
            }
        }
    }

    pub fn mark_all(&mut self) {
        for chunk in 0..self.flags.len() {
            self.mark(chunk);
        }
    }

    pub fn is_dirty(&self, chunk: ChunkId) -> bool {
        self.flags.get(chunk).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Drain dirty chunks in the order they were first marked.
    pub fn take(&mut self) -> Vec<ChunkId> {
        for &chunk in &self.order {
            self.flags[chunk] = false;
        }
        std::mem::take(&mut self.order)
    }
}
