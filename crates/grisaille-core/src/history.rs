//! Bounded undo/redo history for edit snapshots.
//!
//! The editor snapshots the working image before every destructive edit
//! (crop, rotate, palette apply). Undo moves the current state onto the redo
//! stack and restores the most recent snapshot; any new edit clears the redo
//! stack. The undo stack is capped, dropping the oldest snapshot when full,
//! so a long session can't grow memory without bound.
//!
//! Snapshots serialize with serde, which is how the surrounding tool persists
//! a session across reloads.

use crate::buffer::{BufferError, PixelBuffer};
use serde::{Deserialize, Serialize};

/// Default cap on the number of undo snapshots retained.
pub const DEFAULT_HISTORY_CAP: usize = 32;

/// A saved image state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data, row-major.
    pub pixels: Vec<u8>,
}

impl Snapshot {
    /// Capture the current state of a buffer.
    pub fn of(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels.clone(),
        }
    }

    /// Restore the snapshot into a pixel buffer.
    ///
    /// Validates the snapshot's consistency: a snapshot deserialized from an
    /// old or tampered session blob may not hold the buffer invariants.
    pub fn restore(&self) -> Result<PixelBuffer, BufferError> {
        PixelBuffer::new(self.width, self.height, self.pixels.clone())
    }
}

/// Bounded undo/redo stacks of image snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl History {
    /// Create an empty history retaining at most `cap` undo snapshots.
    ///
    /// A cap of 0 is bumped to 1 so undo always works at least one step.
    pub fn new(cap: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Record a snapshot before a destructive edit.
    ///
    /// Clears the redo stack; drops the oldest snapshot once the cap is
    /// reached.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        if self.undo.len() == self.cap {
            self.undo.remove(0);
        }
        self.undo.push(snapshot);
    }

    /// Undo: save `current` for redo and return the previous snapshot.
    ///
    /// Returns `None` when there is nothing to undo; `current` is not
    /// consumed in that case conceptually, but the caller passes a fresh
    /// snapshot either way.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Redo: save `current` for undo and return the next snapshot.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        if self.undo.len() == self.cap {
            self.undo.remove(0);
        }
        self.undo.push(current);
        Some(next)
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo snapshots currently held.
    pub fn depth(&self) -> usize {
        self.undo.len()
    }
}
