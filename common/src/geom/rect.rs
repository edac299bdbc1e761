use super::coord::Coord;
use super::point::Point;

/// Axis-aligned bounding box of one net's pins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl<T: Coord> NetBox<T> {
    pub fn new(min: Point<T>, max: Point<T>) -> Self {
        Self { min, max }
    }

    /// Box stored for masked and pinless nets.
    pub fn zero() -> Self {
        let z = T::zero();
        Self::new(Point::new(z, z), Point::new(z, z))
    }

    pub fn from_point(p: Point<T>) -> Self {
        Self { min: p, max: p }
    }

    /// Grows the box to cover `p`. A NaN coordinate poisons the affected bounds.
    #[inline(always)]
    pub fn extend(&mut self, p: Point<T>) {
        self.min.x = self.min.x.min_nan(p.x);
        self.max.x = self.max.x.max_nan(p.x);
        self.min.y = self.min.y.min_nan(p.y);
        self.max.y = self.max.y.max_nan(p.y);
    }

    pub fn width(&self) -> T {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> T {
        self.max.y - self.min.y
    }
    pub fn hpwl(&self) -> T {
        self.width() + self.height()
    }

    /// Reads net `net` back out of exported min/max buffers (x row, then y row).
    /// `None` when `net` is not below `num_nets` or a buffer is too short.
    pub fn from_buffers(
        bbox_min: &[T],
        bbox_max: &[T],
        net: usize,
        num_nets: usize,
    ) -> Option<Self> {
        if net >= num_nets {
            return None;
        }
        Some(Self::new(
            Point::new(*bbox_min.get(net)?, *bbox_min.get(num_nets + net)?),
            Point::new(*bbox_max.get(net)?, *bbox_max.get(num_nets + net)?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_tracks_extremes() {
        let mut b = NetBox::from_point(Point::new(1.0f64, 2.0));
        b.extend(Point::new(5.0, 2.0));
        b.extend(Point::new(3.0, -1.0));
        assert_eq!(b.min, Point::new(1.0, -1.0));
        assert_eq!(b.max, Point::new(5.0, 2.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 3.0);
        assert_eq!(b.hpwl(), 7.0);
    }

    #[test]
    fn nan_poisons_only_its_axis() {
        let mut b = NetBox::from_point(Point::new(0.0f32, 0.0));
        b.extend(Point::new(f32::NAN, 1.0));
        b.extend(Point::new(2.0, 3.0));
        assert!(b.width().is_nan());
        assert_eq!(b.height(), 3.0);
    }

    #[test]
    fn reads_exported_rows() {
        let min = [1.0f64, 0.0, 2.0, 0.0];
        let max = [5.0f64, 0.0, 2.0, 3.0];
        let b = NetBox::from_buffers(&min, &max, 1, 2).unwrap();
        assert_eq!(b.min, Point::new(0.0, 0.0));
        assert_eq!(b.max, Point::new(0.0, 3.0));
    }

    #[test]
    fn short_buffers_read_as_none() {
        let min = [1.0f64, 0.0, 2.0, 0.0];
        let max = [5.0f64, 0.0, 2.0];
        assert!(NetBox::from_buffers(&min, &max, 0, 2).is_some());
        assert!(NetBox::from_buffers(&min, &max, 1, 2).is_none());
        assert!(NetBox::from_buffers(&min, &min, 2, 2).is_none());
    }
}
