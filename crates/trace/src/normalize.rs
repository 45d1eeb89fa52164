// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Normalize
//!
//! Frame descriptions are whatever the capture facility felt like producing.  Under MSVC they look
//! like `module!Namespace::Func+0x1a`; elsewhere they are usually a bare symbol.  A [`Normalize`]
//! strategy turns one into something worth reading.  Exactly one platform-dependent choice lives
//! here, [`PlatformNormalizer`], so the formatter never needs `cfg` attributes of its own.
//!
//! Strategies must tolerate any input.  A description that does not match the expected shape is
//! returned unchanged.

/// Strip capture-facility decoration from a frame description.
pub trait Normalize {
    fn normalize<'a>(&self, description: &'a str) -> &'a str;
}

/// Leaves descriptions untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Verbatim;

impl Normalize for Verbatim {
    fn normalize<'a>(&self, description: &'a str) -> &'a str {
        description
    }
}

/// Strips the `module!` prefix and the `+offset` suffix that MSVC-style captures wrap around
/// symbol names.
///
/// The prefix is everything through the first `!`.  The suffix is everything from the last `+`,
/// but only when what follows it is an offset (`0x1a` or `26`) so that names like
/// `Vec3::operator+` survive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModuleOffset;

impl Normalize for ModuleOffset {
    fn normalize<'a>(&self, description: &'a str) -> &'a str {
        let symbol = description
            .split_once('!')
            .map_or(description, |(_module, symbol)| symbol);

        match symbol.rsplit_once('+') {
            Some((name, offset)) if is_offset(offset) => name,
            _ => symbol,
        }
    }
}

fn is_offset(s: &str) -> bool {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// The strategy matching this target's capture conventions.
#[cfg(any(target_env = "msvc", windows))]
pub type PlatformNormalizer = ModuleOffset;

/// The strategy matching this target's capture conventions.
#[cfg(not(any(target_env = "msvc", windows)))]
pub type PlatformNormalizer = Verbatim;
