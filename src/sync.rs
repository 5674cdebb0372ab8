// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Versioned read/write cell shared by the registry and the cost graph
//!
//! Reads try the lock without blocking first and only wait when a writer
//! holds (or is queued on) it. Every successful write bumps a stamp, so
//! callers can tell whether anything changed between two reads.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// A value behind a read/write lock with a monotonically increasing write stamp
#[derive(Debug, Default)]
pub struct Stamped<T> {
    inner: RwLock<T>,
    stamp: AtomicU64,
}

impl<T> Stamped<T> {
    /// Wrap a value
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
            stamp: AtomicU64::new(0),
        }
    }

    /// Run `f` against a consistent view of the value
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        if let Some(guard) = self.inner.try_read() {
            return f(&guard);
        }
        trace!("optimistic read invalidated by writer, waiting");
        let guard = self.inner.read();
        f(&guard)
    }

    /// Like [`Stamped::read`], also returning the stamp the view was taken at
    pub fn read_stamped<R>(&self, f: impl FnOnce(&T) -> R) -> (u64, R) {
        self.read(|value| (self.stamp.load(Ordering::Acquire), f(value)))
    }

    /// Run `f` with exclusive access; the stamp advances only when `f` succeeds
    pub fn write<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E> {
        let mut guard = self.inner.write();
        let out = f(&mut guard)?;
        self.stamp.fetch_add(1, Ordering::AcqRel);
        Ok(out)
    }

    /// Run an infallible mutation with exclusive access and bump the stamp
    pub fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        let out = f(&mut guard);
        self.stamp.fetch_add(1, Ordering::AcqRel);
        out
    }

    /// Number of successful writes so far
    pub fn stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }
}
