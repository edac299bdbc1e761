pub mod physics;

pub use physics::wirelength::{Hpwl, HpwlParams, forward, forward_with_bboxes};
pub use physics::partial::PartialWirelength;
