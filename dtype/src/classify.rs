//! Classification of source argument types into device-representable types.
//!
//! Rules, applied in order:
//!
//! 1. A device-resident pointer wrapper becomes a raw pointer to its
//!    (classified) element type.
//! 2. A raw host pointer is rejected: it cannot cross the host/device
//!    boundary without an explicit device-resident wrapper.
//! 3. A device array wrapper becomes the raw array descriptor with
//!    identical element type and rank.
//! 4. Everything else maps to itself.

use crate::error::{Result, UnsupportedArgumentSnafu};
use crate::{ArgType, DeviceType};

/// Map a source type to the type device code is specialized against.
///
/// Pure; layout admissibility of the result is the planner's concern.
pub fn classify(ty: &ArgType) -> Result<DeviceType> {
    match ty {
        ArgType::DevicePtr { elem } => Ok(DeviceType::Ptr { elem: Box::new(classify(elem)?) }),
        ArgType::HostPtr => UnsupportedArgumentSnafu.fail(),
        ArgType::DeviceArray { elem, ndim } => Ok(DeviceType::ArrayDescriptor { elem: *elem, ndim: *ndim }),
        ArgType::Scalar(s) => Ok(DeviceType::Scalar(*s)),
        ArgType::Composite(c) => Ok(DeviceType::Composite(c.clone())),
    }
}
