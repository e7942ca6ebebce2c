//! Built-in starting layouts.

use clap::ValueEnum;
use md_core::{Coord, Layout};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Preset {
    /// Every cell occupied: all dwellers stuck at once.
    Full,
    /// No dwellers at all.
    Empty,
    /// One dweller in the bottom-right corner.
    Single,
    /// The right-hand column, four dwellers that never interact.
    Column,
    /// Alternating cells.
    Checker,
}

impl Preset {
    pub fn layout(self) -> Layout {
        match self {
            Preset::Full    => Layout::full(),
            Preset::Empty   => Layout::empty(),
            Preset::Single  => Layout::with_occupied([Coord::new(3, 3)]),
            Preset::Column  => Layout::with_occupied((0..4).map(|row| Coord::new(row, 3))),
            Preset::Checker => Layout::with_occupied(Coord::all().filter(|c| (c.row + c.col) % 2 == 0)),
        }
    }
}
