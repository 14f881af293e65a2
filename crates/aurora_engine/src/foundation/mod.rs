//! Building blocks shared by every other module: vector aliases and axis
//! helpers, the object handle type, clocks and logger setup.

pub mod collections;
pub mod logging;
pub mod math;
pub mod time;
