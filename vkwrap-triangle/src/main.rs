// Copyright 2026 The vkwrap Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use ash::vk;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vkwrap_vulkan::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Create a validated Vulkan instance and report misuse with stack traces")]
struct Args {
    /// Skip the validation layer and debug messenger
    #[arg(long = "no-validation")]
    no_validation: bool,

    /// Application name reported to the driver
    #[arg(long = "app-name", default_value = "Hello Triangle")]
    app_name: String,

    /// Forward info and verbose messages from the validation layer too
    #[arg(short = 'a', long = "all-messages")]
    all_messages: bool,

    /// Print the current stack trace once at startup
    #[arg(long = "print-trace")]
    print_trace: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn instance_config(&self) -> InstanceConfig {
        let mut config = InstanceConfig {
            application_name: self.app_name.clone(),
            validation: !self.no_validation,
            ..Default::default()
        };
        if self.all_messages {
            config.severities |= vk::DebugUtilsMessageSeverityFlagsEXT::INFO
                | vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE;
        }
        config
    }
}

fn main() -> Result<(), VulkanError> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.print_trace {
        vkwrap_trace::print_current_stack_trace_to_stderr(0);
    }

    let instance = Instance::new(&args.instance_config())?;
    tracing::info!(
        handle = ?instance.handle(),
        validated = instance.is_validated(),
        "instance ready"
    );

    // NEXT physical device selection and a surface, then an actual triangle.
    drop(instance);
    Ok(())
}
