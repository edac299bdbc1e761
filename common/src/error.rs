#[derive(Debug, thiserror::Error)]
pub enum WirelengthError {
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// A net index outside `[0, num_nets)`.
    #[error("net index {net} out of range for {num_nets} nets")]
    NetIndex { net: usize, num_nets: usize },

    /// A `flat_netpin` entry that does not name one of the `num_pins` pins.
    #[error("flat_netpin[{position}] = {pin} out of range for {num_pins} pins")]
    PinIndex {
        position: usize,
        pin: i64,
        num_pins: usize,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl WirelengthError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, WirelengthError>;
