//! Block height sources
//!
//! The registry stamps each loan with the current height. Production code
//! approximates height from wall-clock seconds; tests drive it by hand.

use std::cell::Cell;

/// Supplies the current block height
pub trait BlockHeightSource {
    fn block_height(&self) -> u64;
}

/// Height derived from Unix time, one block per second
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockHeight;

impl BlockHeightSource for WallClockHeight {
    fn block_height(&self) -> u64 {
        let millis = chrono::Utc::now().timestamp_millis();
        u64::try_from(millis.div_euclid(1000)).unwrap_or(0)
    }
}

/// Deterministic height, advanced explicitly
///
/// Uses interior mutability so a height shared by reference with a
/// registry can still be moved forward by its owner.
#[derive(Debug, Clone, Default)]
pub struct ManualHeight {
    height: Cell<u64>,
}

impl ManualHeight {
    pub fn new(height: u64) -> Self {
        Self {
            height: Cell::new(height),
        }
    }

    /// Advance by `blocks` and return the new height
    pub fn advance(&self, blocks: u64) -> u64 {
        let next = self.height.get().saturating_add(blocks);
        self.height.set(next);
        next
    }

    pub fn set(&self, height: u64) {
        self.height.set(height);
    }
}

impl BlockHeightSource for ManualHeight {
    fn block_height(&self) -> u64 {
        self.height.get()
    }
}

impl<T: BlockHeightSource + ?Sized> BlockHeightSource for &T {
    fn block_height(&self) -> u64 {
        (**self).block_height()
    }
}

impl<T: BlockHeightSource + ?Sized> BlockHeightSource for Box<T> {
    fn block_height(&self) -> u64 {
        (**self).block_height()
    }
}
