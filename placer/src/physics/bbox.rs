use super::partial::PartialWirelength;
use hpwl_common::db::indices::NetId;
use hpwl_common::db::netlist::NetPinView;
use hpwl_common::error::{Result, WirelengthError};
use hpwl_common::geom::coord::Coord;
use hpwl_common::geom::point::Point;
use hpwl_common::geom::rect::NetBox;
use hpwl_common::util::check;
use hpwl_common::util::profiler::ScopedTimer;
use log::Level;
use rayon::prelude::*;

pub const DEFAULT_MIN_NETS_PER_TASK: usize = 1024;

/// Computes every net's bounding box and the partial wirelength it induces.
///
/// Masked nets and nets without pins get an all-zero box. A NaN coordinate
/// contaminates the bounds of the net that owns it and nothing else.
pub fn compute<T: Coord>(
    coords: &[T],
    adjacency: NetPinView<'_>,
    mask: &[bool],
    num_nets: usize,
) -> Result<(Vec<NetBox<T>>, PartialWirelength<T>)> {
    compute_with_min_len(coords, adjacency, mask, num_nets, DEFAULT_MIN_NETS_PER_TASK)
}

pub(crate) fn compute_with_min_len<T: Coord>(
    coords: &[T],
    adjacency: NetPinView<'_>,
    mask: &[bool],
    num_nets: usize,
    min_nets_per_task: usize,
) -> Result<(Vec<NetBox<T>>, PartialWirelength<T>)> {
    let num_pins = check::check_coords(coords)?;
    check::check_mask(mask.len(), num_nets)?;
    check::check_offsets(adjacency.netpin_start(), adjacency.num_incidences())?;
    if adjacency.num_nets() != num_nets {
        return Err(WirelengthError::shape(format!(
            "netpin_start describes {} nets, expected {}",
            adjacency.num_nets(),
            num_nets
        )));
    }
    check::check_pin_indices(adjacency.flat_netpin(), num_pins)?;

    let boxes = reduce_nets(coords, adjacency, mask, min_nets_per_task);
    let partial = PartialWirelength::from_boxes(&boxes);
    Ok((boxes, partial))
}

// Nets are independent and each writes only its own slot. Pins within a net are
// scanned in order, so results do not depend on the thread count.
fn reduce_nets<T: Coord>(
    coords: &[T],
    adjacency: NetPinView<'_>,
    mask: &[bool],
    min_nets_per_task: usize,
) -> Vec<NetBox<T>> {
    let _timer = ScopedTimer::with_level("net bbox reduction", Level::Debug);
    let (xs, ys) = coords.split_at(coords.len() / 2);

    (0..mask.len())
        .into_par_iter()
        .with_min_len(min_nets_per_task.max(1))
        .map(|i| {
            if mask[i] {
                reduce_net(xs, ys, adjacency.pins(NetId::new(i)))
            } else {
                NetBox::zero()
            }
        })
        .collect()
}

#[inline]
fn reduce_net<T: Coord>(xs: &[T], ys: &[T], pins: &[i32]) -> NetBox<T> {
    let mut pins = pins.iter().map(|&p| p as usize);
    let Some(first) = pins.next() else {
        return NetBox::zero();
    };
    let mut bbox = NetBox::from_point(Point::new(xs[first], ys[first]));
    for p in pins {
        bbox.extend(Point::new(xs[p], ys[p]));
    }
    bbox
}
