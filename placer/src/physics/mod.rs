pub mod bbox;
pub mod partial;
pub mod weights;
pub mod wirelength;
