//! A `Sync` atomic `f64` built on `AtomicU64`, bit-cast to let CAS loops
//! compare and exchange values as `f64`, since Rust has no native atomic
//! floating-point type.
//!
//! Used for the shared max-reduction on arrival times and min-reduction on
//! required times — the two points in the pipeline where more than one
//! writer can target the same slot concurrently.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        AtomicF64(AtomicU64::new(value.to_bits()))
    }

    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.0.load(order))
    }

    pub fn store(&self, value: f64, order: Ordering) {
        self.0.store(value.to_bits(), order);
    }

    /// CAS loop: set the slot to `value` if `value` is strictly greater than
    /// the current contents. Returns the value that was in the slot before
    /// this call (matching `AtomicU64::fetch_max`'s convention).
    pub fn fetch_max(&self, value: f64, order: Ordering) -> f64 {
        let mut current = self.load(order);
        while value > current {
            match self
                .0
                .compare_exchange_weak(current.to_bits(), value.to_bits(), order, order)
            {
                Ok(_) => break,
                Err(actual_bits) => current = f64::from_bits(actual_bits),
            }
        }
        current
    }

    /// CAS loop: set the slot to `value` if `value` is strictly less than the
    /// current contents.
    pub fn fetch_min(&self, value: f64, order: Ordering) -> f64 {
        let mut current = self.load(order);
        while value < current {
            match self
                .0
                .compare_exchange_weak(current.to_bits(), value.to_bits(), order, order)
            {
                Ok(_) => break,
                Err(actual_bits) => current = f64::from_bits(actual_bits),
            }
        }
        current
    }
}
