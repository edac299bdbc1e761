use super::partial::PartialWirelength;
use hpwl_common::error::Result;
use hpwl_common::geom::coord::Coord;
use hpwl_common::util::check;
use rayon::prelude::*;

/// Scales both axes of each net by its weight; empty `weights` is the identity.
pub fn apply_weights<T: Coord>(
    mut partial: PartialWirelength<T>,
    weights: &[T],
) -> Result<PartialWirelength<T>> {
    check::check_weights(weights.len(), partial.num_nets())?;
    if weights.is_empty() {
        return Ok(partial);
    }

    let (xs, ys) = partial.rows_mut();
    xs.par_iter_mut()
        .zip(ys.par_iter_mut())
        .zip(weights.par_iter())
        .for_each(|((x, y), &w)| {
            *x = *x * w;
            *y = *y * w;
        });
    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpwl_common::error::WirelengthError;
    use hpwl_common::geom::point::Point;
    use hpwl_common::geom::rect::NetBox;

    fn sample() -> PartialWirelength<f64> {
        PartialWirelength::from_boxes(&[
            NetBox::new(Point::new(1.0, 2.0), Point::new(5.0, 2.0)),
            NetBox::new(Point::new(0.0, 0.0), Point::new(0.0, 3.0)),
        ])
    }

    #[test]
    fn weights_scale_both_axes() {
        let wl = apply_weights(sample(), &[2.0, 10.0]).unwrap();
        assert_eq!(wl.x(), &[8.0, 0.0]);
        assert_eq!(wl.y(), &[0.0, 30.0]);
    }

    #[test]
    fn empty_weights_are_identity() {
        assert_eq!(apply_weights(sample(), &[]).unwrap(), sample());
    }

    #[test]
    fn weight_length_mismatch() {
        assert!(matches!(
            apply_weights(sample(), &[1.0]),
            Err(WirelengthError::Shape(_))
        ));
    }
}
