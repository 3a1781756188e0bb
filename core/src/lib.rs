//! Minesweeper engine: grid and cell model, random mine placement, flood-fill reveal, win/loss detection and the
//! change tracking a presentation layer polls to redraw only what moved.

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use level::*;
pub use shared::*;
pub use stats::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod level;
mod shared;
mod stats;
mod types;
