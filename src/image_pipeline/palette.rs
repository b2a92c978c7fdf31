//! Palette module
//!
//! False-color lookup tables and the mapper that applies the selected one.

mod mapper;
pub mod tables;

pub use mapper::{PaletteMapper, PaletteSelection};
pub use tables::{PaletteKind, PaletteTable, palette_table, palette_tables};
