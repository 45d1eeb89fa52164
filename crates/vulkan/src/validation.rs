// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Validation
//!
//! The debug messenger calls [`validation_callback`] on the thread that made the offending call.
//! We print what the layer said and then the stack that got us there.  Everything for one
//! message is written under a single stderr lock so reports from different threads stay whole.
//!
//! Validation messages are long single lines packed with `:`-separated fields and end in a
//! parenthesized link into the Vulkan spec.  [`reflow_message`] breaks them up for a terminal.

use std::borrow::Cow;
use std::ffi::c_void;
use std::io::{self, Write};

use ash::vk;

use crate::util;

/// Put each `:`-separated field on its own line and the trailing `(...)` on the last line.
///
/// Colons inside the final parenthesized group, such as the one in `https:`, are left alone.  A
/// message with no `(` has every colon replaced and gains a trailing newline.
pub fn reflow_message(message: &str) -> String {
    let split = message.rfind('(').unwrap_or(message.len());
    let (fields, reference) = message.split_at(split);

    let mut reflowed = fields.replace(':', "\n");
    reflowed.push('\n');
    reflowed.push_str(reference);
    reflowed
}

/// One debug-utils message, decoded from the callback arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport<'a> {
    pub severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    pub message_types: vk::DebugUtilsMessageTypeFlagsEXT,
    pub message_id_number: i32,
    pub message_id_name: Cow<'a, str>,
    pub message: Cow<'a, str>,
}

impl<'a> ValidationReport<'a> {
    /// Decode the callback data the driver handed us.  Null pointers decode as empty strings.
    ///
    /// # Safety
    ///
    /// `data` must be null or point to callback data that is valid for `'a`.
    pub unsafe fn from_raw(
        severity: vk::DebugUtilsMessageSeverityFlagsEXT,
        message_types: vk::DebugUtilsMessageTypeFlagsEXT,
        data: *const vk::DebugUtilsMessengerCallbackDataEXT<'a>,
    ) -> Self {
        match unsafe { data.as_ref() } {
            Some(data) => Self {
                severity,
                message_types,
                message_id_number: data.message_id_number,
                message_id_name: unsafe { util::lossy_c_str(data.p_message_id_name) },
                message: unsafe { util::lossy_c_str(data.p_message) },
            },
            None => Self {
                severity,
                message_types,
                message_id_number: 0,
                message_id_name: Cow::Borrowed(""),
                message: Cow::Borrowed(""),
            },
        }
    }

    /// Write the report header: id line, reporting thread, and the reflowed message.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(
            sink,
            "[Vulkan] ID:{} | {}",
            self.message_id_number, self.message_id_name
        )?;
        writeln!(sink, "Current Thread: {:?}", std::thread::current().id())?;
        writeln!(sink, "{}", reflow_message(&self.message))
    }
}

/// The debug-utils messenger callback.  Always returns `VK_FALSE` so the triggering call proceeds.
///
/// The trace skips one qualifying frame, which is this callback itself.
///
/// # Safety
///
/// Called by the Vulkan loader with valid or null callback data.
pub unsafe extern "system" fn validation_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_types: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _p_user_data: *mut c_void,
) -> vk::Bool32 {
    let report =
        unsafe { ValidationReport::from_raw(message_severity, message_types, p_callback_data) };

    let mut stderr = io::stderr().lock();
    if report.write_to(&mut stderr).is_ok() {
        vkwrap_trace::print_current_stack_trace(&mut stderr, 1);
    }

    vk::FALSE
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "Validation Error: [ VUID-vkDestroyInstance-instance-00629 ] Object 0: \
        handle = 0x55d2, type = VK_OBJECT_TYPE_INSTANCE; | MessageID = 0x8b3d8e18 | \
        vkDestroyInstance():  Object Tracking - For VkInstance 0x55d2, VkDevice 0x6f has not been \
        destroyed. The Vulkan spec states: All child objects must have been destroyed \
        (https://docs.vulkan.org/spec/latest/chapters/initialization.html#VUID-vkDestroyInstance-instance-00629)";

    #[test]
    fn reflow_splits_fields_before_reference() {
        let reflowed = reflow_message(SAMPLE);
        let (fields, reference) = reflowed.rsplit_once("\n(").unwrap();

        assert!(reference.starts_with("https://docs.vulkan.org"));
        assert!(reference.contains("https:"));
        assert!(!fields.contains(':'));
        assert!(fields.starts_with("Validation Error\n [ VUID-vkDestroyInstance-instance-00629 ]"));
        // `vkDestroyInstance()` has a `(` but the last one wins.
        assert!(fields.contains("vkDestroyInstance()"));
    }

    #[test]
    fn reflow_without_reference() {
        assert_eq!(reflow_message("a: b: c"), "a\n b\n c\n");
        assert_eq!(reflow_message(""), "\n");
        assert_eq!(reflow_message("plain"), "plain\n");
    }

    #[test]
    fn reflow_reference_only() {
        assert_eq!(reflow_message("(see: x)"), "\n(see: x)");
    }

    #[test]
    fn report_header_layout() {
        let report = ValidationReport {
            severity: vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            message_types: vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
            message_id_number: -1953598952,
            message_id_name: Cow::Borrowed("VUID-vkDestroyInstance-instance-00629"),
            message: Cow::Borrowed("Validation Error: bad (ref)"),
        };
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("[Vulkan] ID:-1953598952 | VUID-vkDestroyInstance-instance-00629")
        );
        assert_eq!(
            lines.next(),
            Some(format!("Current Thread: {:?}", std::thread::current().id()).as_str())
        );
        assert_eq!(lines.next(), Some("Validation Error"));
        assert_eq!(lines.next(), Some(" bad "));
        assert_eq!(lines.next(), Some("(ref)"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn from_raw_reads_callback_data() {
        let data = vk::DebugUtilsMessengerCallbackDataEXT {
            message_id_number: 7,
            p_message_id_name: c"UNASSIGNED-test".as_ptr(),
            p_message: c"hello: world".as_ptr(),
            ..Default::default()
        };
        let report = unsafe {
            ValidationReport::from_raw(
                vk::DebugUtilsMessageSeverityFlagsEXT::WARNING,
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL,
                &data,
            )
        };
        assert_eq!(report.message_id_number, 7);
        assert_eq!(report.message_id_name, "UNASSIGNED-test");
        assert_eq!(report.message, "hello: world");
    }

    #[test]
    fn from_raw_tolerates_null() {
        let report = unsafe {
            ValidationReport::from_raw(
                vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
                vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
                std::ptr::null(),
            )
        };
        assert_eq!(report.message_id_number, 0);
        assert!(report.message.is_empty());
    }

    #[test]
    fn callback_never_aborts_the_call() {
        let data = vk::DebugUtilsMessengerCallbackDataEXT {
            p_message: c"Validation Error: from a unit test (no link)".as_ptr(),
            ..Default::default()
        };
        let result = unsafe {
            validation_callback(
                vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
                vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
                &data,
                std::ptr::null_mut(),
            )
        };
        assert_eq!(result, vk::FALSE);

        let result = unsafe {
            validation_callback(
                vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
                vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
                std::ptr::null(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(result, vk::FALSE);
    }
}
