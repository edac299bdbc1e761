use crate::db::indices::PinId;
use crate::db::netlist::NetPinCsr;
use crate::error::{Result, WirelengthError};
use crate::geom::coord::Coord;
use crate::util::config::BenchmarkConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// In-memory placement snapshot: pin coordinates (all x, then all y), net adjacency
/// and per-net weights.
#[derive(Clone, Debug)]
pub struct RandomNetlist<T> {
    pub coords: Vec<T>,
    pub csr: NetPinCsr,
    pub weights: Vec<T>,
}

impl<T> RandomNetlist<T> {
    pub fn num_pins(&self) -> usize {
        self.coords.len() / 2
    }
}

/// Scatters pins uniformly over the die and wires them into nets with degrees in
/// `[1, max_net_degree]`. The same seed always yields the same netlist.
pub fn generate_random_netlist<T: Coord>(params: &BenchmarkConfig) -> Result<RandomNetlist<T>> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let num_pins = params.num_pins;
    let max_degree = params.max_net_degree.max(1);

    log::info!(
        "Generating netlist: {} pins, {} nets, max degree {}, die {}x{} ({})",
        num_pins,
        params.num_nets,
        max_degree,
        params.die_width,
        params.die_height,
        T::NAME
    );

    let mut coords = Vec::with_capacity(2 * num_pins);
    for _ in 0..num_pins {
        coords.push(to_coord(rng.gen_range(0.0..params.die_width.max(f64::MIN_POSITIVE)))?);
    }
    for _ in 0..num_pins {
        coords.push(to_coord(rng.gen_range(0.0..params.die_height.max(f64::MIN_POSITIVE)))?);
    }

    let mut csr = NetPinCsr::with_capacity(params.num_nets, params.num_nets * (max_degree + 1) / 2);
    let mut pins = Vec::with_capacity(max_degree);
    for _ in 0..params.num_nets {
        pins.clear();
        if num_pins > 0 {
            let degree = rng.gen_range(1..=max_degree);
            pins.extend((0..degree).map(|_| PinId::new(rng.gen_range(0..num_pins))));
        }
        csr.push_net(&pins)?;
    }

    let weights = (0..params.num_nets)
        .map(|_| to_coord(rng.gen_range(0.5..2.0)))
        .collect::<Result<Vec<T>>>()?;

    Ok(RandomNetlist {
        coords,
        csr,
        weights,
    })
}

fn to_coord<T: Coord>(v: f64) -> Result<T> {
    num::cast(v).ok_or_else(|| {
        WirelengthError::shape(format!("{} is not representable as {}", v, T::NAME))
    })
}
