use num::Float;
use std::fmt::{Debug, Display};

/// Real-number width shared by every array of one wirelength call.
pub trait Coord: Float + Debug + Display + Default + Send + Sync + 'static {
    const NAME: &'static str;

    /// Minimum that propagates NaN from either operand.
    #[inline(always)]
    fn min_nan(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            Self::nan()
        } else if other < self {
            other
        } else {
            self
        }
    }

    /// Maximum that propagates NaN from either operand.
    #[inline(always)]
    fn max_nan(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            Self::nan()
        } else if other > self {
            other
        } else {
            self
        }
    }
}

impl Coord for f32 {
    const NAME: &'static str = "f32";
}

impl Coord for f64 {
    const NAME: &'static str = "f64";
}
