#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod proportion;
pub mod rate;
