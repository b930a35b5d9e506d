use test_case::test_case;

use crate::error::Error;
use crate::{ArgType, CompositeLayout, DeviceType, ScalarType, classify};

#[test_case(ScalarType::Bool; "bool")]
#[test_case(ScalarType::Int32; "int32")]
#[test_case(ScalarType::UInt64; "uint64")]
#[test_case(ScalarType::Float64; "float64")]
fn scalar_is_identity(scalar: ScalarType) {
    assert_eq!(classify(&ArgType::Scalar(scalar)).unwrap(), DeviceType::Scalar(scalar));
}

#[test]
fn composite_is_identity() {
    let layout = CompositeLayout::new("Params", 16, 8);
    let classified = classify(&ArgType::Composite(layout.clone())).unwrap();
    assert_eq!(classified, DeviceType::Composite(layout));
}

#[test]
fn device_ptr_becomes_raw_ptr() {
    let ty = ArgType::device_ptr(ArgType::Scalar(ScalarType::Float32));
    assert_eq!(classify(&ty).unwrap(), DeviceType::ptr(DeviceType::Scalar(ScalarType::Float32)));
}

#[test]
fn nested_device_ptr_classifies_recursively() {
    let ty = ArgType::device_ptr(ArgType::device_ptr(ArgType::Scalar(ScalarType::Int32)));
    let expected = DeviceType::ptr(DeviceType::ptr(DeviceType::Scalar(ScalarType::Int32)));
    assert_eq!(classify(&ty).unwrap(), expected);
}

#[test]
fn device_array_becomes_descriptor_with_identical_parameters() {
    let ty = ArgType::device_array(ScalarType::Float32, 2);
    assert_eq!(classify(&ty).unwrap(), DeviceType::ArrayDescriptor { elem: ScalarType::Float32, ndim: 2 });
}

#[test]
fn host_ptr_is_rejected() {
    assert!(matches!(classify(&ArgType::HostPtr), Err(Error::UnsupportedArgument)));
}

#[test]
fn device_ptr_to_host_ptr_is_rejected() {
    let ty = ArgType::device_ptr(ArgType::HostPtr);
    assert!(matches!(classify(&ty), Err(Error::UnsupportedArgument)));
}
