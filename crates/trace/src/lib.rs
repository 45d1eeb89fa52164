// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Trace
//!
//! Stack traces that fit in a terminal next to a validation message.
//!
//! Validation layers tell you *what* went wrong but not *who* asked for it.  The callback that
//! receives the message runs on the offending call stack, so capturing and printing that stack is
//! usually the fastest way back to the bad API call.
//!
//! - [`Snapshot`] holds the captured frames, innermost call first.
//! - [`Normalize`] strips platform decoration from frame descriptions.  [`PlatformNormalizer`] is
//!   the strategy picked for the build target.
//! - [`print_stack_trace`] and friends filter, number, and write the frames.  They never fail
//!   outward because they are expected to run inside fault handlers.
//! - [`SharedSink`] keeps concurrent traces from interleaving.
//!
//! Output looks like this:
//!
//! ```text
//! Stack Trace:
//! [__0] /build/src/renderer.rs(41)
//!     renderer::Renderer::submit
//!
//! [__1] /build/src/main.rs(12)
//!     triangle::main
//!
//!
//! ```

pub mod format;
pub mod normalize;
pub mod sink;
pub mod snapshot;

pub use format::{
    print_current_stack_trace, print_current_stack_trace_to_stderr, print_stack_trace,
    print_stack_trace_to_stderr, qualifying_frames, write_stack_trace,
};
pub use normalize::{ModuleOffset, Normalize, PlatformNormalizer, Verbatim};
pub use sink::SharedSink;
pub use snapshot::{Frame, Snapshot};

pub mod prelude {
    pub use crate::format::{print_current_stack_trace, print_stack_trace};
    pub use crate::normalize::{Normalize, PlatformNormalizer};
    pub use crate::sink::SharedSink;
    pub use crate::snapshot::{Frame, Snapshot};
}
