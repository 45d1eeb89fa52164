// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Sink
//!
//! Backends may report from worker threads.  Two traces landing on one writer at the same time
//! must come out as two blocks, not a shuffle of lines.  [`SharedSink`] holds its lock for one full
//! trace.
//!
//! Stderr already has a process-wide lock, see
//! [`print_stack_trace_to_stderr`](crate::print_stack_trace_to_stderr).

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::format::print_stack_trace;
use crate::snapshot::Snapshot;

/// A writer shared between threads that print whole traces at a time.
#[derive(Debug, Default)]
pub struct SharedSink<W> {
    inner: Mutex<W>,
}

impl<W: Write> SharedSink<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Print one trace while holding the lock.
    pub fn print(&self, skip: usize, snapshot: &Snapshot) {
        let mut writer = self.lock();
        print_stack_trace(&mut *writer, skip, snapshot);
    }

    /// Run `f` with exclusive access, for callers that write a header and a trace as one unit.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut writer = self.lock();
        f(&mut *writer)
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // A panic mid-trace leaves a partial block behind, which is still worth appending to.
    fn lock(&self) -> MutexGuard<'_, W> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::snapshot::Frame;

    #[test]
    fn with_lock_groups_header_and_trace() {
        let sink = SharedSink::new(Vec::new());
        let snapshot = Snapshot::new(vec![Frame::new(
            concat!(env!("CARGO_MANIFEST_DIR"), "/src/sink.rs"),
            7,
            "caller",
        )]);

        sink.with_lock(|w| {
            writeln!(w, "[Vulkan] ID:0 | test").unwrap();
            print_stack_trace(w, 0, &snapshot);
        });

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[Vulkan] ID:0 | test\nStack Trace:\n[__0] "));
        assert!(output.contains("sink.rs(6)\n\tcaller\n"));
    }

    #[test]
    fn poisoned_lock_still_prints() {
        let sink = std::sync::Arc::new(SharedSink::new(Vec::new()));
        let poisoner = sink.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with_lock(|_| panic!("poison the sink"));
        })
        .join();

        sink.print(0, &Snapshot::default());
        let sink = std::sync::Arc::try_unwrap(sink).unwrap();
        assert_eq!(sink.into_inner(), b"Stack Trace:\n\n\n");
    }
}
