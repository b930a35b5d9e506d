use test_case::test_case;

use crate::{CompositeLayout, DEVICE_WORD_BYTES, DeviceType, ScalarType};

#[test_case(ScalarType::Bool, 1; "bool")]
#[test_case(ScalarType::Int16, 2; "int16")]
#[test_case(ScalarType::UInt32, 4; "uint32")]
#[test_case(ScalarType::Int64, 8; "int64")]
#[test_case(ScalarType::Float32, 4; "float32")]
#[test_case(ScalarType::Float64, 8; "float64")]
fn scalar_sizes(scalar: ScalarType, bytes: usize) {
    assert_eq!(scalar.bytes(), bytes);
    assert_eq!(scalar.align(), bytes);
}

#[test]
fn pointers_and_descriptors_are_one_device_word() {
    let ptr = DeviceType::ptr(DeviceType::Scalar(ScalarType::Float64));
    let desc = DeviceType::ArrayDescriptor { elem: ScalarType::Float32, ndim: 3 };
    assert_eq!(ptr.size(), DEVICE_WORD_BYTES);
    assert_eq!(desc.size(), DEVICE_WORD_BYTES);
}

#[test]
fn marker_is_ghost() {
    let marker = DeviceType::Composite(CompositeLayout::marker("Tag"));
    assert!(marker.is_ghost());
    assert_eq!(marker.size(), 0);
}

#[test]
fn mutable_zero_size_composite_is_not_ghost() {
    let layout = CompositeLayout::new("Empty", 0, 1);
    assert!(!DeviceType::Composite(layout).is_ghost());
}

#[test]
fn immutable_nonzero_composite_is_not_ghost() {
    let layout = CompositeLayout::new("Config", 24, 8).immutable();
    assert!(!DeviceType::Composite(layout).is_ghost());
}

#[test]
fn host_refs_make_a_layout_unrepresentable() {
    let layout = CompositeLayout::new("Callback", 16, 8).with_host_refs();
    assert!(!DeviceType::Composite(layout).pointer_free());
    assert!(DeviceType::Scalar(ScalarType::Int32).pointer_free());
}

#[test]
fn display_renders_c_style() {
    let ptr = DeviceType::ptr(DeviceType::Scalar(ScalarType::Float32));
    let desc = DeviceType::ArrayDescriptor { elem: ScalarType::Float64, ndim: 1 };
    assert_eq!(ptr.to_string(), "float*");
    assert_eq!(desc.to_string(), "double[1]");
}
