//! Terrain height-field and altitude queries

pub mod map;

pub use map::{Map, TerrainError, Triangle, NO_FLOOR};
