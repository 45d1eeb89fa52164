// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Vulkan
//!
//! Just enough Vulkan to get an instance up and hear about it when we hold it wrong.
//!
//! - `Instance` with its `InstanceConfig`
//! - **Validation**
//!   * `validation_callback`
//!   * `ValidationReport`
//!     + `reflow_message`

pub mod instance;
pub mod util;
pub mod validation;

use ash::vk;

pub mod prelude {
    pub use super::VulkanError;
    pub use crate::instance::{Instance, InstanceConfig};
}

#[derive(thiserror::Error, Debug)]
pub enum VulkanError {
    #[error("Vulkan library: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("layer not present: {0}")]
    LayerNotPresent(String),

    #[error("instance extension not present: {0}")]
    ExtensionNotPresent(String),

    #[error("name contains a NUL byte: {0}")]
    InvalidName(#[from] std::ffi::NulError),

    #[error("Ash: {0}")]
    Ash(#[from] vk::Result),
}
