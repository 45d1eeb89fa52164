// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Vulkan Utils
//!
//! Junk drawer.  Move things out when there is a place for them to belong.
//!

use std::borrow::Cow;
use std::ffi::{c_char, CStr};

/// Return the first of `wanted` that does not appear in `available`.
pub fn first_missing<'a>(wanted: &[&'a CStr], available: &[&CStr]) -> Option<&'a CStr> {
    wanted
        .iter()
        .copied()
        .find(|name| !available.contains(name))
}

/// Read a fixed-size, NUL-terminated name array as returned in `vk::LayerProperties` and
/// `vk::ExtensionProperties`.  An unterminated array yields `None`.
pub fn fixed_name(raw: &[c_char]) -> Option<&CStr> {
    // SAFETY c_char and u8 have the same size and alignment.
    let bytes = unsafe { std::slice::from_raw_parts(raw.as_ptr().cast::<u8>(), raw.len()) };
    CStr::from_bytes_until_nul(bytes).ok()
}

/// Read a possibly-null C string handed to us by the driver.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that outlives `'a`.
pub unsafe fn lossy_c_str<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("")
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
    }
}
