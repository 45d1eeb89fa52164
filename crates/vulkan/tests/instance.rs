use vkwrap_vulkan::prelude::*;

#[test]
#[ignore = "requires a Vulkan driver and the Khronos validation layer"]
fn validated_instance_creation_test() {
    let config = InstanceConfig {
        validation: true,
        ..Default::default()
    };
    let instance = Instance::new(&config).unwrap();
    assert!(instance.is_validated());
}

#[test]
#[ignore = "requires a Vulkan driver"]
fn unvalidated_instance_creation_test() {
    let config = InstanceConfig {
        validation: false,
        ..Default::default()
    };
    let instance = Instance::new(&config).unwrap();
    assert!(!instance.is_validated());
}

#[test]
fn interior_nul_is_rejected_before_loading_library() {
    let config = InstanceConfig {
        application_name: "bad\0name".to_owned(),
        validation: false,
        ..Default::default()
    };
    match Instance::new(&config) {
        Err(VulkanError::InvalidName(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("instance created with an interior NUL in its name"),
    }
}
