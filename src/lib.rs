//! Wrap-around arcade snake with a fixed-step grid simulation and a
//! free-running, interpolated renderer.
//!
//! The logic layer ([`grid`], [`snake`], [`scheduler`]) advances in whole
//! cells. The render layer ([`interp`], [`path`], [`render`]) blends the two
//! most recent grid snapshots so the snake glides between cells, and splits
//! the body wherever it wraps across the board edge.

pub mod audio;
pub mod canvas;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod host;
pub mod input;
pub mod interp;
pub mod mode;
pub mod path;
pub mod prefs;
pub mod raster;
pub mod render;
pub mod runner;
pub mod scheduler;
pub mod snake;
pub mod stars;
pub mod term;

pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);
