mod generator;
mod instance;
mod io;
mod solution;

pub use generator::*;
pub use instance::*;
pub use io::*;
pub use solution::*;
