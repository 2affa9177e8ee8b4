//! Parallel Processing Abstraction
//!
//! Work is split into contiguous chunks and mapped on scoped threads. With
//! parallelism disabled (the default) everything runs on the calling thread.

use serde::{Deserialize, Serialize};

/// Parallel processing context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelContext {
    /// Enable parallel processing
    pub parallel: bool,
    /// Worker threads (0 = auto)
    pub threads: usize,
}

impl ParallelContext {
    /// Sequential context
    #[must_use]
    pub const fn sequential() -> Self {
        Self {
            parallel: false,
            threads: 0,
        }
    }

    /// Parallel context with `threads` workers (0 = auto)
    #[must_use]
    pub const fn with_threads(threads: usize) -> Self {
        Self {
            parallel: true,
            threads,
        }
    }

    /// Effective worker count
    #[must_use]
    pub fn thread_count(&self) -> usize {
        if !self.parallel {
            1
        } else if self.threads == 0 {
            num_cpus()
        } else {
            self.threads
        }
    }
}

/// Get number of CPUs
#[must_use]
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Map `f` over `items`, preserving order.
///
/// Inputs smaller than `2 * threads` are mapped sequentially.
pub fn parallel_map<T, U, F>(ctx: &ParallelContext, items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    let threads = ctx.thread_count();
    if threads <= 1 || items.len() < threads * 2 {
        return items.iter().map(f).collect();
    }

    let chunk = items.len().div_ceil(threads);
    let f = &f;
    std::thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk)
            .map(|part| scope.spawn(move || part.iter().map(f).collect::<Vec<U>>()))
            .collect();

        let mut out = Vec::with_capacity(items.len());
        for handle in handles {
            match handle.join() {
                Ok(part) => out.extend(part),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        out
    })
}
