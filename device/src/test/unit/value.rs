use proptest::prelude::*;
use test_case::test_case;

use crate::handle::DevicePtr;
use crate::value::{ArgValue, CallArg, ScalarValue};

#[test_case(ScalarValue::Bool(true), 1; "bool")]
#[test_case(ScalarValue::Int16(-7), 2; "int16")]
#[test_case(ScalarValue::UInt32(9), 4; "uint32")]
#[test_case(ScalarValue::Int64(-1), 8; "int64")]
#[test_case(ScalarValue::Float32(1.5), 4; "float32")]
#[test_case(ScalarValue::Float64(-0.25), 8; "float64")]
fn scalar_bytes_match_declared_width(value: ScalarValue, bytes: usize) {
    assert_eq!(value.to_bytes().len(), bytes);
    assert_eq!(value.scalar_type().bytes(), bytes);
}

#[test]
fn array_wrapper_reinterprets_to_its_base_address() {
    let base = DevicePtr::new(0x1000);
    assert_eq!(ArgValue::DeviceArray { base }.device_repr(), ArgValue::DevicePtr(base));
}

#[test]
fn device_repr_is_identity_elsewhere() {
    let value = ArgValue::Scalar(ScalarValue::Int32(3));
    assert_eq!(value.clone().device_repr(), value);
}

#[test]
fn call_arg_bytes_carry_pointer_addresses() {
    let arg = CallArg::Ptr(DevicePtr::new(0xabcd));
    assert_eq!(arg.size(), 8);
    assert_eq!(arg.as_bytes().to_vec(), 0xabcdu64.to_le_bytes().to_vec());
}

proptest! {
    #[test]
    fn scalar_values_round_trip_through_le_bytes(v in any::<i64>()) {
        let bytes = ScalarValue::Int64(v).to_bytes();
        prop_assert_eq!(i64::from_le_bytes(bytes.as_slice().try_into().unwrap()), v);
    }
}
