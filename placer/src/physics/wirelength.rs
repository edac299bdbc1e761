use super::bbox::{self, DEFAULT_MIN_NETS_PER_TASK};
use super::partial::PartialWirelength;
use super::weights::apply_weights;
use hpwl_common::db::mask::NetMask;
use hpwl_common::db::netlist::NetPinView;
use hpwl_common::error::Result;
use hpwl_common::geom::coord::Coord;
use hpwl_common::geom::rect::NetBox;
use hpwl_common::util::check;
use hpwl_common::util::config::WirelengthConfig;

#[derive(Clone, Debug)]
pub struct HpwlParams {
    pub num_threads: usize,
    pub min_nets_per_task: usize,
}

impl Default for HpwlParams {
    fn default() -> Self {
        Self {
            num_threads: 0,
            min_nets_per_task: DEFAULT_MIN_NETS_PER_TASK,
        }
    }
}

impl From<&WirelengthConfig> for HpwlParams {
    fn from(config: &WirelengthConfig) -> Self {
        Self {
            num_threads: config.num_threads,
            min_nets_per_task: config.min_nets_per_task,
        }
    }
}

pub struct Hpwl {
    params: HpwlParams,
    pool: Option<rayon::ThreadPool>,
}

impl Default for Hpwl {
    fn default() -> Self {
        Self {
            params: HpwlParams::default(),
            pool: None,
        }
    }
}

impl Hpwl {
    pub fn new(params: HpwlParams) -> Result<Self> {
        let pool = if params.num_threads > 0 {
            log::debug!("Starting HPWL worker pool with {} threads", params.num_threads);
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(params.num_threads)
                    .thread_name(|i| format!("hpwl-{}", i))
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self { params, pool })
    }

    pub fn params(&self) -> &HpwlParams {
        &self.params
    }

    pub fn forward<T: Coord>(
        &self,
        coords: &[T],
        flat_netpin: &[i32],
        netpin_start: &[i32],
        net_weights: &[T],
        net_mask: &[bool],
    ) -> Result<PartialWirelength<T>> {
        let view = NetPinView::new(flat_netpin, netpin_start)?;
        let (_, partial) = self.evaluate(coords, view, net_weights, net_mask)?;
        Ok(partial)
    }

    /// Like [`Hpwl::forward`], additionally writing each net's box into `out_bbox_min`
    /// and `out_bbox_max`. Each buffer holds `2 * num_nets` values: the x row, then
    /// the y row. Masked and pinless nets are written as zero.
    pub fn forward_with_bboxes<T: Coord>(
        &self,
        coords: &[T],
        flat_netpin: &[i32],
        netpin_start: &[i32],
        net_weights: &[T],
        net_mask: &[bool],
        out_bbox_min: &mut [T],
        out_bbox_max: &mut [T],
    ) -> Result<PartialWirelength<T>> {
        let view = NetPinView::new(flat_netpin, netpin_start)?;
        let num_nets = net_mask.len();
        check::check_export_buffers(out_bbox_min.len(), out_bbox_max.len(), num_nets)?;

        let (boxes, partial) = self.evaluate(coords, view, net_weights, net_mask)?;
        export_boxes(&boxes, out_bbox_min, out_bbox_max);
        Ok(partial)
    }

    pub fn forward_masked<T: Coord>(
        &self,
        coords: &[T],
        view: NetPinView<'_>,
        net_weights: &[T],
        net_mask: &NetMask,
    ) -> Result<PartialWirelength<T>> {
        let (_, partial) = self.evaluate(coords, view, net_weights, net_mask.as_slice())?;
        Ok(partial)
    }

    fn evaluate<T: Coord>(
        &self,
        coords: &[T],
        view: NetPinView<'_>,
        net_weights: &[T],
        net_mask: &[bool],
    ) -> Result<(Vec<NetBox<T>>, PartialWirelength<T>)> {
        let num_nets = net_mask.len();
        check::check_weights(net_weights.len(), num_nets)?;

        log::debug!(
            "HPWL ({}): {} pins, {} nets, {} incidences",
            T::NAME,
            coords.len() / 2,
            num_nets,
            view.num_incidences()
        );

        let min_len = self.params.min_nets_per_task;
        let (boxes, partial) = self.install(|| -> Result<_> {
            let (boxes, partial) =
                bbox::compute_with_min_len(coords, view, net_mask, num_nets, min_len)?;
            Ok((boxes, apply_weights(partial, net_weights)?))
        })?;

        let anomalies = partial.anomalous_nets();
        if let Some(first) = anomalies.first() {
            log::warn!(
                "{} nets have non-finite wirelength (first: {:?})",
                anomalies.len(),
                first
            );
        }
        Ok((boxes, partial))
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn export_boxes<T: Coord>(boxes: &[NetBox<T>], out_bbox_min: &mut [T], out_bbox_max: &mut [T]) {
    let num_nets = boxes.len();
    let (min_x, min_y) = out_bbox_min.split_at_mut(num_nets);
    let (max_x, max_y) = out_bbox_max.split_at_mut(num_nets);
    for (i, b) in boxes.iter().enumerate() {
        min_x[i] = b.min.x;
        min_y[i] = b.min.y;
        max_x[i] = b.max.x;
        max_y[i] = b.max.y;
    }
}

/// [`Hpwl::forward`] on the global rayon pool.
pub fn forward<T: Coord>(
    coords: &[T],
    flat_netpin: &[i32],
    netpin_start: &[i32],
    net_weights: &[T],
    net_mask: &[bool],
) -> Result<PartialWirelength<T>> {
    Hpwl::default().forward(coords, flat_netpin, netpin_start, net_weights, net_mask)
}

/// [`Hpwl::forward_with_bboxes`] on the global rayon pool.
pub fn forward_with_bboxes<T: Coord>(
    coords: &[T],
    flat_netpin: &[i32],
    netpin_start: &[i32],
    net_weights: &[T],
    net_mask: &[bool],
    out_bbox_min: &mut [T],
    out_bbox_max: &mut [T],
) -> Result<PartialWirelength<T>> {
    Hpwl::default().forward_with_bboxes(
        coords,
        flat_netpin,
        netpin_start,
        net_weights,
        net_mask,
        out_bbox_min,
        out_bbox_max,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpwl_common::db::netlist::NetPinCsr;
    use hpwl_common::error::WirelengthError;
    use hpwl_common::util::config::BenchmarkConfig;
    use hpwl_common::util::generator::generate_random_netlist;

    static COORDS: [f64; 8] = [1.0, 5.0, 0.0, 0.0, 2.0, 2.0, 0.0, 3.0];
    static FLAT: [i32; 4] = [0, 1, 2, 3];
    static START: [i32; 3] = [0, 2, 4];

    #[test]
    fn forward_unweighted() {
        let wl = forward(&COORDS, &FLAT, &START, &[], &[true, true]).unwrap();
        assert_eq!(wl.x(), &[4.0, 0.0]);
        assert_eq!(wl.y(), &[0.0, 3.0]);
        assert_eq!(wl.total(), 7.0);
    }

    #[test]
    fn forward_masked_net() {
        let wl = forward(&COORDS, &FLAT, &START, &[], &[true, false]).unwrap();
        assert_eq!(wl.as_slice(), &[4.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn forward_weighted() {
        let wl = forward(&COORDS, &FLAT, &START, &[2.0, 10.0], &[true, true]).unwrap();
        assert_eq!(wl.x(), &[8.0, 0.0]);
        assert_eq!(wl.y(), &[0.0, 30.0]);
    }

    #[test]
    fn export_matches_plain_forward() {
        let weights = [2.0, 10.0];
        let mask = [true, true];
        let plain = forward(&COORDS, &FLAT, &START, &weights, &mask).unwrap();

        let mut bbox_min = [-1.0; 4];
        let mut bbox_max = [-1.0; 4];
        let exported = forward_with_bboxes(
            &COORDS,
            &FLAT,
            &START,
            &weights,
            &mask,
            &mut bbox_min,
            &mut bbox_max,
        )
        .unwrap();

        assert_eq!(plain, exported);
        assert_eq!(bbox_min, [1.0, 0.0, 2.0, 0.0]);
        assert_eq!(bbox_max, [5.0, 0.0, 2.0, 3.0]);
        for net in 0..2 {
            let b = NetBox::from_buffers(&bbox_min, &bbox_max, net, 2).unwrap();
            assert_eq!(b.width() * weights[net], exported.x()[net]);
            assert_eq!(b.height() * weights[net], exported.y()[net]);
        }
    }

    #[test]
    fn export_zero_fills_masked_nets() {
        let mut bbox_min = [9.0f32; 4];
        let mut bbox_max = [9.0f32; 4];
        let coords = COORDS.map(|v| v as f32);
        forward_with_bboxes(
            &coords,
            &FLAT,
            &START,
            &[],
            &[false, true],
            &mut bbox_min,
            &mut bbox_max,
        )
        .unwrap();
        assert_eq!(bbox_min, [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(bbox_max, [0.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn bad_export_buffers_are_untouched() {
        let mut bbox_min = [9.0; 4];
        let mut bbox_max = [9.0; 3];
        let err = forward_with_bboxes(
            &COORDS,
            &FLAT,
            &START,
            &[],
            &[true, true],
            &mut bbox_min,
            &mut bbox_max,
        );
        assert!(matches!(err, Err(WirelengthError::Shape(_))));
        assert_eq!(bbox_min, [9.0; 4]);
        assert_eq!(bbox_max, [9.0; 3]);
    }

    #[test]
    fn invalid_inputs_leave_export_buffers_untouched() {
        let mut bbox_min = [9.0; 4];
        let mut bbox_max = [9.0; 4];
        let flat = [0, 1, 2, 8];
        let err = forward_with_bboxes(
            &COORDS,
            &flat,
            &START,
            &[],
            &[true, true],
            &mut bbox_min,
            &mut bbox_max,
        );
        assert!(matches!(err, Err(WirelengthError::PinIndex { .. })));
        assert_eq!(bbox_min, [9.0; 4]);
        assert_eq!(bbox_max, [9.0; 4]);
    }

    #[test]
    fn forward_shape_errors() {
        assert!(matches!(
            forward(&COORDS[..7], &FLAT, &START, &[], &[true, true]),
            Err(WirelengthError::Shape(_))
        ));
        assert!(matches!(
            forward(&COORDS, &FLAT, &START, &[], &[true]),
            Err(WirelengthError::Shape(_))
        ));
        assert!(forward(&COORDS, &FLAT, &[0, 3, 4], &[], &[true, true]).is_ok());
        assert!(matches!(
            forward(&COORDS, &FLAT, &[0, 3, 2], &[], &[true, true]),
            Err(WirelengthError::Shape(_))
        ));
        assert!(matches!(
            forward(&COORDS, &FLAT, &START, &[1.0], &[true, true]),
            Err(WirelengthError::Shape(_))
        ));
    }

    #[test]
    fn dedicated_pool_matches_global_pool() {
        let hpwl = Hpwl::new(HpwlParams {
            num_threads: 2,
            min_nets_per_task: 1,
        })
        .unwrap();
        assert_eq!(hpwl.params().num_threads, 2);
        let pooled = hpwl
            .forward(&COORDS, &FLAT, &START, &[], &[true, true])
            .unwrap();
        let global = forward(&COORDS, &FLAT, &START, &[], &[true, true]).unwrap();
        assert_eq!(pooled, global);
    }

    #[test]
    fn owned_mask_entry_point() {
        let view = NetPinView::new(&FLAT, &START).unwrap();
        let mut mask = NetMask::all_active(2);
        mask.set(hpwl_common::db::indices::NetId::new(0), false).unwrap();
        let wl = Hpwl::default()
            .forward_masked(&COORDS, view, &[], &mask)
            .unwrap();
        assert_eq!(wl.as_slice(), &[0.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn params_from_config() {
        let config = WirelengthConfig {
            num_threads: 3,
            min_nets_per_task: 64,
            ..WirelengthConfig::default()
        };
        let params = HpwlParams::from(&config);
        assert_eq!(params.num_threads, 3);
        assert_eq!(params.min_nets_per_task, 64);
    }

    #[test]
    fn malformed_offsets_are_shape_errors() {
        let csr = NetPinCsr {
            flat_netpin: vec![0],
            netpin_start: vec![0, 5],
        };
        assert!(matches!(csr.view(), Err(WirelengthError::Shape(_))));
        assert!(matches!(
            forward(&[1.0f64, 2.0], &csr.flat_netpin, &csr.netpin_start, &[], &[true]),
            Err(WirelengthError::Shape(_))
        ));

        let mut bbox_min = [7.0; 2];
        let mut bbox_max = [7.0; 2];
        let err = forward_with_bboxes(
            &[1.0f64, 2.0],
            &[0, 0],
            &[0, 2, 1],
            &[],
            &[true, true],
            &mut bbox_min,
            &mut bbox_max,
        );
        assert!(matches!(err, Err(WirelengthError::Shape(_))));
        assert_eq!(bbox_min, [7.0; 2]);
    }

    #[test]
    fn one_operator_serves_concurrent_callers() {
        let nl = generate_random_netlist::<f64>(&BenchmarkConfig {
            num_pins: 500,
            num_nets: 800,
            max_net_degree: 7,
            die_width: 100.0,
            die_height: 80.0,
            seed: 21,
        })
        .unwrap();
        let view = nl.csr.view().unwrap();
        let mask = NetMask::from_degree(&view, 6);
        let hpwl = Hpwl::new(HpwlParams {
            num_threads: 2,
            min_nets_per_task: 8,
        })
        .unwrap();

        let expected = hpwl.forward_masked(&nl.coords, view, &nl.weights, &mask).unwrap();
        let (a, b) = std::thread::scope(|s| {
            let a = s.spawn(|| hpwl.forward_masked(&nl.coords, view, &nl.weights, &mask));
            let b = s.spawn(|| hpwl.forward_masked(&nl.coords, view, &nl.weights, &mask));
            (a.join().unwrap().unwrap(), b.join().unwrap().unwrap())
        });
        assert_eq!(a, expected);
        assert_eq!(b, expected);
    }
}
