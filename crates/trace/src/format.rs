// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Format
//!
//! Writes a [`Snapshot`] as text.  Only frames whose source file exists on this machine and has an
//! extension are shown; the rest are system library or runtime frames nobody can open.  Skipping
//! applies after that filter, so `skip` counts frames the reader would actually have seen.
//!
//! The `print_*` functions run inside validation and fault callbacks.  They swallow write errors
//! and stop early rather than raising anything into that context.  [`write_stack_trace`] is the
//! fallible core for callers that want the error.

use std::io::{self, Write};
use std::path::Path;

use crate::normalize::{Normalize, PlatformNormalizer};
use crate::snapshot::{Frame, Snapshot};

const HEADER: &str = "Stack Trace:";

/// Frames that are eligible for display, in snapshot order, paired with their source path.
pub fn qualifying_frames(snapshot: &Snapshot) -> impl Iterator<Item = (&Path, &Frame)> {
    snapshot.frames().iter().filter_map(|frame| {
        let path = frame.source_file()?;
        qualifies(path).then_some((path, frame))
    })
}

fn qualifies(path: &Path) -> bool {
    path.extension().is_some_and(|ext| !ext.is_empty()) && path.exists()
}

/// Write `snapshot` to `sink`, omitting the first `skip` qualifying frames.
///
/// Layout per frame is `[__n] <file>(<line - 1>)` followed by the normalized description on an
/// indented line and a blank line.  The trace ends with one more blank line.
pub fn write_stack_trace<W, N>(
    sink: &mut W,
    skip: usize,
    snapshot: &Snapshot,
    normalizer: &N,
) -> io::Result<()>
where
    W: Write + ?Sized,
    N: Normalize + ?Sized,
{
    writeln!(sink, "{HEADER}")?;

    for (index, (path, frame)) in qualifying_frames(snapshot).skip(skip).enumerate() {
        // Capture facilities report one past the calling line.
        let line = frame.source_line.saturating_sub(1);
        write!(sink, "[{index:_>3}] {}({line})\n\t", path.display())?;
        write!(sink, "{}\n\n", normalizer.normalize(&frame.description))?;
    }

    write!(sink, "\n\n")?;
    sink.flush()
}

/// Print `snapshot` to `sink`.  Write failures end the trace early and are otherwise ignored.
pub fn print_stack_trace<W: Write + ?Sized>(sink: &mut W, skip: usize, snapshot: &Snapshot) {
    if let Err(error) = write_stack_trace(sink, skip, snapshot, &PlatformNormalizer::default()) {
        tracing::debug!(%error, "stack trace output abandoned");
    }
}

/// Capture the current stack and print it to `sink`.  The innermost frame is this function's
/// caller.
#[inline(never)]
pub fn print_current_stack_trace<W: Write + ?Sized>(sink: &mut W, skip: usize) {
    let snapshot = Snapshot::capture();
    print_stack_trace(sink, skip, &snapshot);
}

/// Like [`print_stack_trace`], holding the stderr lock across the whole trace.
pub fn print_stack_trace_to_stderr(skip: usize, snapshot: &Snapshot) {
    let mut stderr = io::stderr().lock();
    print_stack_trace(&mut stderr, skip, snapshot);
}

/// Like [`print_current_stack_trace`], holding the stderr lock across the whole trace.
#[inline(never)]
pub fn print_current_stack_trace_to_stderr(skip: usize) {
    let snapshot = Snapshot::capture();
    print_stack_trace_to_stderr(skip, &snapshot);
}
