use hpwl_common::db::indices::NetId;
use hpwl_common::geom::coord::Coord;
use hpwl_common::geom::rect::NetBox;

/// Per-net wirelength split by axis, stored as two rows of `num_nets`:
/// row 0 holds x extents, row 1 holds y extents.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialWirelength<T> {
    data: Vec<T>,
    num_nets: usize,
}

impl<T: Coord> PartialWirelength<T> {
    pub fn from_boxes(boxes: &[NetBox<T>]) -> Self {
        let mut data = Vec::with_capacity(2 * boxes.len());
        data.extend(boxes.iter().map(NetBox::width));
        data.extend(boxes.iter().map(NetBox::height));
        Self {
            data,
            num_nets: boxes.len(),
        }
    }

    pub fn num_nets(&self) -> usize {
        self.num_nets
    }

    pub fn x(&self) -> &[T] {
        &self.data[..self.num_nets]
    }

    pub fn y(&self) -> &[T] {
        &self.data[self.num_nets..]
    }

    pub fn rows_mut(&mut self) -> (&mut [T], &mut [T]) {
        self.data.split_at_mut(self.num_nets)
    }

    pub fn net(&self, net: NetId) -> T {
        self.x()[net.index()] + self.y()[net.index()]
    }

    pub fn total_x(&self) -> T {
        self.x().iter().fold(T::zero(), |acc, &v| acc + v)
    }

    pub fn total_y(&self) -> T {
        self.y().iter().fold(T::zero(), |acc, &v| acc + v)
    }

    pub fn total(&self) -> T {
        self.total_x() + self.total_y()
    }

    /// Nets whose contribution is NaN or infinite on either axis.
    pub fn anomalous_nets(&self) -> Vec<NetId> {
        self.x()
            .iter()
            .zip(self.y())
            .enumerate()
            .filter(|(_, (x, y))| !x.is_finite() || !y.is_finite())
            .map(|(i, _)| NetId::new(i))
            .collect()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}
