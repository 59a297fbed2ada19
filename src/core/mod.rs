pub mod bit;
mod gate;
pub mod gate_type;
pub mod names;
