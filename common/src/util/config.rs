use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wirelength: WirelengthConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    F32,
    #[default]
    F64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirelengthConfig {
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub num_threads: usize,
    #[serde(default = "default_min_nets_per_task")]
    pub min_nets_per_task: usize,
    #[serde(default = "default_ignore_net_degree")]
    pub ignore_net_degree: usize,
    #[serde(default)]
    pub export_bboxes: bool,
}

impl Default for WirelengthConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            num_threads: 0,
            min_nets_per_task: default_min_nets_per_task(),
            ignore_net_degree: default_ignore_net_degree(),
            export_bboxes: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_num_pins")]
    pub num_pins: usize,
    #[serde(default = "default_num_nets")]
    pub num_nets: usize,
    #[serde(default = "default_max_net_degree")]
    pub max_net_degree: usize,
    #[serde(default = "default_die_width")]
    pub die_width: f64,
    #[serde(default = "default_die_height")]
    pub die_height: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            num_pins: default_num_pins(),
            num_nets: default_num_nets(),
            max_net_degree: default_max_net_degree(),
            die_width: default_die_width(),
            die_height: default_die_height(),
            seed: default_seed(),
        }
    }
}

fn default_min_nets_per_task() -> usize {
    1024
}

fn default_ignore_net_degree() -> usize {
    3000
}

fn default_num_pins() -> usize {
    40_000
}

fn default_num_nets() -> usize {
    10_000
}

fn default_max_net_degree() -> usize {
    8
}

fn default_die_width() -> f64 {
    1000.0
}

fn default_die_height() -> f64 {
    1000.0
}

fn default_seed() -> u64 {
    42
}
