use clap::{Parser, Subcommand};
use hpwl_common::db::indices::NetId;
use hpwl_common::db::mask::NetMask;
use hpwl_common::geom::coord::Coord;
use hpwl_common::geom::rect::NetBox;
use hpwl_common::util::config::{Config, Precision};
use hpwl_common::util::generator::{RandomNetlist, generate_random_netlist};
use hpwl_common::util::logger;
use hpwl_common::util::profiler::ScopedTimer;
use hpwl_placer::{Hpwl, HpwlParams, PartialWirelength};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate HPWL on a generated netlist.
    Eval {
        #[arg(long)]
        pins: Option<usize>,
        #[arg(long)]
        nets: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Evaluate in single precision.
        #[arg(long = "f32")]
        single: bool,
        /// Also export per-net bounding boxes.
        #[arg(long)]
        bboxes: bool,
    },
    /// Check that the plain and bounding-box-exporting evaluations agree.
    Verify {
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Eval {
        pins: None,
        nets: None,
        seed: None,
        single: false,
        bboxes: false,
    });

    match command {
        Commands::Eval {
            pins,
            nets,
            seed,
            single,
            bboxes,
        } => {
            if let Some(pins) = pins {
                config.benchmark.num_pins = pins;
            }
            if let Some(nets) = nets {
                config.benchmark.num_nets = nets;
            }
            if let Some(seed) = seed {
                config.benchmark.seed = seed;
            }
            if single {
                config.wirelength.precision = Precision::F32;
            }
            if bboxes {
                config.wirelength.export_bboxes = true;
            }

            match config.wirelength.precision {
                Precision::F32 => run_eval::<f32>(&config)?,
                Precision::F64 => run_eval::<f64>(&config)?,
            }
        }
        Commands::Verify { seed } => {
            if let Some(seed) = seed {
                config.benchmark.seed = seed;
            }
            match config.wirelength.precision {
                Precision::F32 => run_verify::<f32>(&config)?,
                Precision::F64 => run_verify::<f64>(&config)?,
            }
        }
    }

    Ok(())
}

fn prepare<T: Coord>(config: &Config) -> anyhow::Result<(Hpwl, RandomNetlist<T>, NetMask)> {
    let hpwl = Hpwl::new(HpwlParams::from(&config.wirelength))?;
    let netlist = generate_random_netlist::<T>(&config.benchmark)?;
    let mask = NetMask::from_degree(&netlist.csr.view()?, config.wirelength.ignore_net_degree);
    log::info!(
        "Active nets: {} of {} (ignore_net_degree = {})",
        mask.num_active(),
        mask.len(),
        config.wirelength.ignore_net_degree
    );
    Ok((hpwl, netlist, mask))
}

fn run_eval<T: Coord>(config: &Config) -> anyhow::Result<()> {
    let (hpwl, nl, mask) = prepare::<T>(config)?;
    let num_nets = nl.csr.num_nets();

    let partial = if config.wirelength.export_bboxes {
        let mut bbox_min = vec![T::zero(); 2 * num_nets];
        let mut bbox_max = vec![T::zero(); 2 * num_nets];
        let partial = {
            let _timer = ScopedTimer::new("HPWL forward with bboxes");
            hpwl.forward_with_bboxes(
                &nl.coords,
                &nl.csr.flat_netpin,
                &nl.csr.netpin_start,
                &nl.weights,
                mask.as_slice(),
                &mut bbox_min,
                &mut bbox_max,
            )?
        };
        report_widest_net(&bbox_min, &bbox_max, num_nets);
        partial
    } else {
        let _timer = ScopedTimer::new("HPWL forward");
        hpwl.forward(
            &nl.coords,
            &nl.csr.flat_netpin,
            &nl.csr.netpin_start,
            &nl.weights,
            mask.as_slice(),
        )?
    };

    report(&partial);
    Ok(())
}

fn run_verify<T: Coord>(config: &Config) -> anyhow::Result<()> {
    let (hpwl, nl, mask) = prepare::<T>(config)?;
    let num_nets = nl.csr.num_nets();

    let plain = hpwl.forward(
        &nl.coords,
        &nl.csr.flat_netpin,
        &nl.csr.netpin_start,
        &nl.weights,
        mask.as_slice(),
    )?;
    let mut bbox_min = vec![T::zero(); 2 * num_nets];
    let mut bbox_max = vec![T::zero(); 2 * num_nets];
    let exported = hpwl.forward_with_bboxes(
        &nl.coords,
        &nl.csr.flat_netpin,
        &nl.csr.netpin_start,
        &nl.weights,
        mask.as_slice(),
        &mut bbox_min,
        &mut bbox_max,
    )?;

    if plain != exported {
        return Err(anyhow::anyhow!(
            "Partial wirelength differs between plain and exporting evaluation"
        ));
    }

    let mut mismatched = 0usize;
    for net in 0..num_nets {
        let b = NetBox::from_buffers(&bbox_min, &bbox_max, net, num_nets)
            .ok_or_else(|| anyhow::anyhow!("Exported boxes missing net {}", net))?;
        let w = nl.weights[net];
        if b.width() * w != exported.x()[net] || b.height() * w != exported.y()[net] {
            if mismatched == 0 {
                log::error!("FAIL: net {} box {:?} disagrees with its wirelength", net, b);
            }
            mismatched += 1;
        }
    }
    if mismatched > 0 {
        return Err(anyhow::anyhow!(
            "Verification failed: {} nets with inconsistent boxes",
            mismatched
        ));
    }

    log::info!("Verification passed for {} nets ({})", num_nets, T::NAME);
    report(&exported);
    Ok(())
}

fn report<T: Coord>(partial: &PartialWirelength<T>) {
    log::info!(
        "HPWL = {:.3} (x = {:.3}, y = {:.3}) over {} nets",
        partial.total(),
        partial.total_x(),
        partial.total_y(),
        partial.num_nets()
    );
    let anomalies = partial.anomalous_nets();
    if !anomalies.is_empty() {
        log::warn!("{} nets carry non-finite wirelength", anomalies.len());
    }
}

fn report_widest_net<T: Coord>(bbox_min: &[T], bbox_max: &[T], num_nets: usize) {
    let widest = (0..num_nets)
        .filter_map(|i| NetBox::from_buffers(bbox_min, bbox_max, i, num_nets).map(|b| (i, b)))
        .filter(|(_, b)| b.hpwl().is_finite())
        .max_by(|a, b| {
            a.1.hpwl()
                .partial_cmp(&b.1.hpwl())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some((net, b)) = widest {
        log::info!(
            "Widest net {:?}: ({:.3}, {:.3}) - ({:.3}, {:.3}), unweighted HPWL {:.3}",
            NetId::new(net),
            b.min.x,
            b.min.y,
            b.max.x,
            b.max.y,
            b.hpwl()
        );
    }
}
