// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Snapshot
//!
//! Frames captured at one point in execution.  A snapshot is taken once, when a fault or report is
//! detected, and is read-only afterwards.
//!
//! Line numbers follow the platform stack-capture convention, which reports one past the line of
//! the call.  Frames handed in from an outside facility already look like that.  The `backtrace`
//! crate resolves exact lines, so [`Snapshot::capture`] shifts them by one to match.

use std::path::{Path, PathBuf};

/// One function invocation active at capture time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Source file of the frame.  `None` when debug info has no file for it.
    pub source_file: Option<PathBuf>,
    /// Line in the capture facility's convention.  See the module docs.
    pub source_line: u32,
    /// Raw description, usually a symbol name with platform decoration.
    pub description: String,
}

impl Frame {
    pub fn new(
        source_file: impl Into<PathBuf>,
        source_line: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_file: Some(source_file.into()),
            source_line,
            description: description.into(),
        }
    }

    /// A frame with no resolvable source, such as one inside a system library.
    pub fn unresolved(description: impl Into<String>) -> Self {
        Self {
            source_file: None,
            source_line: 0,
            description: description.into(),
        }
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }
}

/// Ordered frames, innermost call first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    frames: Vec<Frame>,
}

/// Frames at or inside these functions belong to the capture itself and are cut from the head of
/// a captured snapshot.  Each is `#[inline(never)]` so its frame survives optimization.
const CAPTURE_ENTRY_POINTS: &[&str] = &[
    "vkwrap_trace::snapshot::Snapshot::capture",
    "vkwrap_trace::format::print_current_stack_trace",
];

impl Snapshot {
    /// Wrap frames produced by an external capture facility.  Frames must be innermost first.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Capture the current call stack.
    ///
    /// The innermost frame of the result is the caller of `capture`, or the caller of
    /// [`print_current_stack_trace`](crate::print_current_stack_trace) when reached through it.
    /// Without symbols the capture machinery cannot be recognized and is left in.
    ///
    /// Inlined functions resolve to several frames for one return address.  All of them are
    /// kept.  Addresses that resolve to no symbol at all are dropped since they could never pass
    /// the source-file filter anyway.
    #[inline(never)]
    pub fn capture() -> Self {
        let mut frames = Vec::new();

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                frames.push(Frame {
                    source_file: symbol.filename().map(Path::to_path_buf),
                    source_line: symbol.lineno().map_or(0, |line| line.saturating_add(1)),
                    description: symbol
                        .name()
                        .map(|name| format!("{name:#}"))
                        .unwrap_or_default(),
                });
            });
            true
        });

        let head = frames
            .iter()
            .rposition(|frame| is_capture_entry_point(&frame.description))
            .map_or(0, |i| i + 1);
        frames.drain(..head);

        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl From<Vec<Frame>> for Snapshot {
    fn from(frames: Vec<Frame>) -> Self {
        Self::new(frames)
    }
}

impl FromIterator<Frame> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn is_capture_entry_point(description: &str) -> bool {
    // v0 mangling renders inherent methods as `<Type>::method`.
    let plain: String = description
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect();
    CAPTURE_ENTRY_POINTS
        .iter()
        .any(|entry| plain.starts_with(entry))
}
