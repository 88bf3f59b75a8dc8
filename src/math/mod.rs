mod easing;
mod interpolate;

pub use easing::Easing;
pub use interpolate::{interpolate_pose, slerp_shortest};
