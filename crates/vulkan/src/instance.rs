// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Instance
//!
//! The entry, instance, and debug messenger are encapsulated by `Instance`.  Validation is the
//! whole point of this crate, so when it is requested and the layer is missing we fail rather than
//! run silently without it.

use std::ffi::{c_void, CStr, CString};

use ash::vk;

use crate::prelude::*;
use crate::util;
use crate::validation;

static VALIDATION_LAYER: &CStr = c"VK_LAYER_KHRONOS_validation";

/// Everything `Instance::new` needs to know.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub application_name: String,
    pub application_version: u32,
    pub engine_name: String,
    pub engine_version: u32,
    pub api_version: u32,
    /// Enable `VK_LAYER_KHRONOS_validation` and install the debug messenger.
    pub validation: bool,
    /// Severities forwarded to the validation callback.
    pub severities: vk::DebugUtilsMessageSeverityFlagsEXT,
    /// Additional instance extensions, such as surface extensions.
    pub extensions: Vec<CString>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            application_name: "Hello Triangle".to_owned(),
            application_version: vk::make_api_version(0, 1, 0, 0),
            engine_name: "No Engine".to_owned(),
            engine_version: vk::make_api_version(0, 1, 0, 0),
            api_version: vk::API_VERSION_1_3,
            validation: cfg!(debug_assertions),
            severities: vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            extensions: Vec::new(),
        }
    }
}

impl InstanceConfig {
    /// Layers to enable for this configuration.
    pub fn layers(&self) -> Vec<&CStr> {
        if self.validation {
            vec![VALIDATION_LAYER]
        } else {
            Vec::new()
        }
    }

    /// Instance extensions to enable for this configuration.
    pub fn instance_extensions(&self) -> Vec<&CStr> {
        let mut extensions: Vec<&CStr> = self.extensions.iter().map(CString::as_c_str).collect();
        if self.validation && !extensions.contains(&vk::EXT_DEBUG_UTILS_NAME) {
            extensions.push(vk::EXT_DEBUG_UTILS_NAME);
        }
        extensions
    }

    /// Create-info for the debug messenger.  Every message type is forwarded; severity is the
    /// only filter.
    pub fn messenger_info(&self) -> vk::DebugUtilsMessengerCreateInfoEXT<'static> {
        vk::DebugUtilsMessengerCreateInfoEXT {
            message_severity: self.severities,
            message_type: vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            pfn_user_callback: Some(validation::validation_callback),
            ..Default::default()
        }
    }
}

struct DebugMessenger {
    loader: ash::ext::debug_utils::Instance,
    messenger: vk::DebugUtilsMessengerEXT,
}

pub struct Instance {
    // Keeps the loaded library alive for as long as the instance.
    #[allow(dead_code)]
    entry: ash::Entry,
    instance: ash::Instance,
    debug_messenger: Option<DebugMessenger>,
}

impl Instance {
    /// Load the Vulkan library, create an instance, and install the debug messenger if validation
    /// is enabled.
    pub fn new(config: &InstanceConfig) -> Result<Self, VulkanError> {
        let application_name = CString::new(config.application_name.as_str())?;
        let engine_name = CString::new(config.engine_name.as_str())?;

        let entry = unsafe { ash::Entry::load()? };

        let layers = config.layers();
        let extensions = config.instance_extensions();
        check_support(&entry, &layers, &extensions)?;

        let app_info = vk::ApplicationInfo {
            p_application_name: application_name.as_ptr(),
            application_version: config.application_version,
            p_engine_name: engine_name.as_ptr(),
            engine_version: config.engine_version,
            api_version: config.api_version,
            ..Default::default()
        };

        let layer_ptrs: Vec<_> = layers.iter().map(|name| name.as_ptr()).collect();
        let extension_ptrs: Vec<_> = extensions.iter().map(|name| name.as_ptr()).collect();

        // Chained so that instance creation and destruction are validated too.
        let messenger_info = config.messenger_info();

        let create_info = vk::InstanceCreateInfo {
            p_next: if config.validation {
                &messenger_info as *const _ as *const c_void
            } else {
                std::ptr::null()
            },
            p_application_info: &app_info,
            enabled_layer_count: layer_ptrs.len() as u32,
            pp_enabled_layer_names: layer_ptrs.as_ptr(),
            enabled_extension_count: extension_ptrs.len() as u32,
            pp_enabled_extension_names: extension_ptrs.as_ptr(),
            ..Default::default()
        };

        let instance = unsafe { entry.create_instance(&create_info, None)? };
        tracing::info!(
            application = %config.application_name,
            validation = config.validation,
            "created Vulkan instance"
        );

        let debug_messenger = if config.validation {
            let loader = ash::ext::debug_utils::Instance::new(&entry, &instance);
            match unsafe { loader.create_debug_utils_messenger(&messenger_info, None) } {
                Ok(messenger) => {
                    tracing::debug!(severities = ?config.severities, "installed debug messenger");
                    Some(DebugMessenger { loader, messenger })
                }
                Err(error) => {
                    tracing::warn!(%error, "debug messenger unavailable, validation output is lost");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            entry,
            instance,
            debug_messenger,
        })
    }

    pub fn instance(&self) -> &ash::Instance {
        &self.instance
    }

    pub fn handle(&self) -> vk::Instance {
        self.instance.handle()
    }

    /// Whether validation messages are currently being routed to the callback.
    pub fn is_validated(&self) -> bool {
        self.debug_messenger.is_some()
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        unsafe {
            if let Some(debug) = self.debug_messenger.take() {
                debug
                    .loader
                    .destroy_debug_utils_messenger(debug.messenger, None);
            }
            self.instance.destroy_instance(None);
        }
        tracing::debug!("destroyed Vulkan instance");
    }
}

fn check_support(
    entry: &ash::Entry,
    layers: &[&CStr],
    extensions: &[&CStr],
) -> Result<(), VulkanError> {
    if !layers.is_empty() {
        let available = unsafe { entry.enumerate_instance_layer_properties()? };
        let names: Vec<&CStr> = available
            .iter()
            .filter_map(|layer| util::fixed_name(&layer.layer_name))
            .collect();
        if let Some(missing) = util::first_missing(layers, &names) {
            return Err(VulkanError::LayerNotPresent(
                missing.to_string_lossy().into_owned(),
            ));
        }
    }

    let available = unsafe { entry.enumerate_instance_extension_properties(None)? };
    let names: Vec<&CStr> = available
        .iter()
        .filter_map(|ext| util::fixed_name(&ext.extension_name))
        .collect();
    if let Some(missing) = util::first_missing(extensions, &names) {
        return Err(VulkanError::ExtensionNotPresent(
            missing.to_string_lossy().into_owned(),
        ));
    }

    tracing::debug!(?layers, ?extensions, "instance layers and extensions available");
    Ok(())
}
