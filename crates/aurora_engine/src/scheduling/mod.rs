//! Time-based scheduling: delayed events and value interpolation

pub mod interpolation;
pub mod timer;

pub use interpolation::{InterpolationManager, TweenHandle};
pub use timer::{Timer, TimerCallback, TimerDescriptor};
