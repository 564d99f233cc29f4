//! ASCII battlefield maps.
//!
//! One character per tile, one line per row:
//! `.` open ground (buildable, walkable), `#` blocked (buildable only),
//! `~` marsh (buildable, unwalkable), `S` the enemy spawn (walkable) and
//! `C` the castle. Exactly one spawn and one castle are required and the
//! rows must all be the same width.

use anyhow::{bail, ensure, Context};
use castle_defence_core::{CellCoord, TileGridMap, TileInfo, TileLookup};

/// A parsed battlefield: the tile grid plus the two marked cells.
#[derive(Clone, Debug)]
pub(crate) struct Battlefield {
    map: TileGridMap,
    spawn: CellCoord,
    castle: CellCoord,
}

impl Battlefield {
    /// Parses a battlefield from its ASCII map text.
    pub(crate) fn parse(text: &str) -> anyhow::Result<Self> {
        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        ensure!(!lines.is_empty(), "the map is empty");
        let columns = lines[0].chars().count();
        ensure!(columns > 0, "the map is empty");

        let rows = u32::try_from(lines.len()).context("the map has too many rows")?;
        let columns = u32::try_from(columns).context("the map is too wide")?;

        let mut map = TileGridMap::new(columns, rows);
        let mut spawn = None;
        let mut castle = None;
        for (row, line) in lines.iter().enumerate() {
            let row = u32::try_from(row).context("the map has too many rows")?;
            let width = u32::try_from(line.chars().count()).context("the map is too wide")?;
            ensure!(
                width == columns,
                "row {row} is {width} tiles wide, expected {columns}"
            );
            for (column, marker) in line.chars().enumerate() {
                let column = u32::try_from(column).context("the map is too wide")?;
                let cell = CellCoord::new(column, row);
                let info = match marker {
                    '.' => TileInfo::new(true, true),
                    '#' => TileInfo::new(true, false),
                    '~' => TileInfo::new(true, false),
                    'S' => {
                        ensure!(spawn.is_none(), "the map has more than one spawn");
                        spawn = Some(cell);
                        TileInfo::new(false, true)
                    }
                    'C' => {
                        ensure!(castle.is_none(), "the map has more than one castle");
                        castle = Some(cell);
                        TileInfo::new(false, false)
                    }
                    other => bail!("unknown map marker {other:?} at {cell:?}"),
                };
                map.set_tile(cell, info);
            }
        }

        let Some(spawn) = spawn else {
            bail!("the map has no spawn (S)");
        };
        let Some(castle) = castle else {
            bail!("the map has no castle (C)");
        };
        Ok(Self { map, spawn, castle })
    }

    pub(crate) fn map(&self) -> &TileGridMap {
        &self.map
    }

    pub(crate) fn spawn(&self) -> CellCoord {
        self.spawn
    }

    pub(crate) fn castle(&self) -> CellCoord {
        self.castle
    }

    /// Renders the map with `*` overlaid on the route; the spawn and
    /// castle markers win over the overlay.
    pub(crate) fn render(&self, route: &[CellCoord]) -> String {
        let mut rendered = String::new();
        for row in 0..self.map.rows() {
            for column in 0..self.map.columns() {
                let cell = CellCoord::new(column, row);
                let marker = if cell == self.spawn {
                    'S'
                } else if cell == self.castle {
                    'C'
                } else if route.contains(&cell) {
                    '*'
                } else {
                    match self.map.tile_info(cell) {
                        Some(info) if info.can_enemies_walk() => '.',
                        Some(_) => '#',
                        None => ' ',
                    }
                };
                rendered.push(marker);
            }
            rendered.push('\n');
        }
        rendered
    }
}
