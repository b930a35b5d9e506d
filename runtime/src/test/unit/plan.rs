use strela_device::{ArgValue, DevicePtr, ScalarValue};
use strela_dtype::{ArgType, CompositeLayout, DeviceType, ScalarType};

use crate::error::Error;
use crate::plan::{PassMode, plan};

#[test]
fn array_wrapper_and_scalar_both_fit_in_register() {
    let base = DevicePtr::new(0x4000);
    let planned = plan(vec![
        (ArgValue::DeviceArray { base }, ArgType::device_array(ScalarType::Float32, 1)),
        (ArgValue::Scalar(ScalarValue::Int32(7)), ArgType::Scalar(ScalarType::Int32)),
    ])
    .unwrap();

    let codegen = planned.codegen_signature();
    assert_eq!(
        codegen,
        vec![
            DeviceType::ArrayDescriptor { elem: ScalarType::Float32, ndim: 1 },
            DeviceType::Scalar(ScalarType::Int32),
        ]
    );
    assert!(planned.args.iter().all(|spec| spec.pass == PassMode::Direct));
    assert_eq!(planned.call_signature(), codegen);

    // The wrapper value was reinterpreted as its base address.
    assert_eq!(planned.args[0].value, ArgValue::DevicePtr(base));
}

#[test]
fn zero_size_immutable_marker_is_ghost() {
    let marker = CompositeLayout::marker("Tag");
    let planned = plan(vec![
        (ArgValue::Unit, ArgType::Composite(marker.clone())),
        (ArgValue::Scalar(ScalarValue::Int32(1)), ArgType::Scalar(ScalarType::Int32)),
    ])
    .unwrap();

    assert_eq!(planned.args[0].pass, PassMode::Ghost);
    assert_eq!(planned.args[0].call_type(), None);

    // Present in the codegen signature, absent from the call signature.
    assert_eq!(planned.codegen_signature().len(), 2);
    assert_eq!(planned.call_signature(), vec![DeviceType::Scalar(ScalarType::Int32)]);
}

#[test]
fn oversized_composite_goes_by_pointer() {
    let layout = CompositeLayout::new("Params", 16, 8).immutable();
    let planned = plan(vec![(
        ArgValue::Composite(vec![0u8; 16].into_boxed_slice()),
        ArgType::Composite(layout.clone()),
    )])
    .unwrap();

    assert_eq!(planned.args[0].pass, PassMode::Indirect);
    assert_eq!(planned.args[0].call_type(), Some(DeviceType::ptr(DeviceType::Composite(layout))));
}

#[test]
fn register_budget_boundary_is_inclusive() {
    let at_budget = CompositeLayout::new("Word", 8, 8);
    let over_budget = CompositeLayout::new("Wide", 9, 1);

    let planned = plan(vec![
        (ArgValue::Composite(vec![0u8; 8].into_boxed_slice()), ArgType::Composite(at_budget)),
        (ArgValue::Composite(vec![0u8; 9].into_boxed_slice()), ArgType::Composite(over_budget)),
    ])
    .unwrap();

    assert_eq!(planned.args[0].pass, PassMode::Direct);
    assert_eq!(planned.args[1].pass, PassMode::Indirect);
}

#[test]
fn host_pointer_aborts_the_whole_plan() {
    let result = plan(vec![
        (ArgValue::Scalar(ScalarValue::Int32(1)), ArgType::Scalar(ScalarType::Int32)),
        (ArgValue::HostPtr(0xbeef), ArgType::HostPtr),
    ]);
    assert!(matches!(result, Err(Error::Classify { .. })));
}

#[test]
fn host_ref_layout_is_unrepresentable() {
    let layout = CompositeLayout::new("Callback", 16, 8).with_host_refs();
    let result = plan(vec![(ArgValue::Composite(vec![0u8; 16].into_boxed_slice()), ArgType::Composite(layout))]);
    assert!(matches!(result, Err(Error::UnrepresentableType { .. })));
}
