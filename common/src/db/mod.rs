pub mod indices;
pub mod mask;
pub mod netlist;
