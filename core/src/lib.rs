#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Castle Defence workspace.
//!
//! This crate defines the vocabulary that connects the generic search
//! library, the invasion-path system, and the adapters: grid cell
//! coordinates, per-cell tile metadata, and the narrow [`TileLookup`]
//! capability through which the search consults the otherwise-excluded
//! map subsystem. Nothing in here knows about rendering, towers, or
//! enemies; it is pure data plus a handful of grid helpers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Computes the straight-line distance between two cell centres.
    ///
    /// This is the admissible heuristic used by the invasion-path search.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f32 {
        let column_diff = self.column.abs_diff(other.column) as f32;
        let row_diff = self.row.abs_diff(other.row) as f32;
        (column_diff * column_diff + row_diff * row_diff).sqrt()
    }

    /// Enumerates the axis-aligned neighbours of the cell.
    ///
    /// Neighbours are yielded in a fixed order: east, south, west, north.
    /// Offsets that would leave the non-negative coordinate space are
    /// skipped rather than clamped.
    #[must_use]
    pub fn cardinal_neighbors(self) -> impl Iterator<Item = CellCoord> {
        let mut candidates = [None; 4];
        let mut count = 0;

        if let Some(column) = self.column.checked_add(1) {
            candidates[count] = Some(CellCoord::new(column, self.row));
            count += 1;
        }

        if let Some(row) = self.row.checked_add(1) {
            candidates[count] = Some(CellCoord::new(self.column, row));
            count += 1;
        }

        if let Some(column) = self.column.checked_sub(1) {
            candidates[count] = Some(CellCoord::new(column, self.row));
            count += 1;
        }

        if let Some(row) = self.row.checked_sub(1) {
            candidates[count] = Some(CellCoord::new(self.column, row));
            count += 1;
        }

        candidates.into_iter().take(count).flatten()
    }
}

/// Metadata describing a single battlefield tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileInfo {
    can_place: bool,
    can_enemies_walk: bool,
}

impl TileInfo {
    /// Creates tile metadata from its two gameplay flags.
    #[must_use]
    pub const fn new(can_place: bool, can_enemies_walk: bool) -> Self {
        Self {
            can_place,
            can_enemies_walk,
        }
    }

    /// Reports whether a structure may be placed on the tile.
    #[must_use]
    pub const fn can_place(&self) -> bool {
        self.can_place
    }

    /// Reports whether enemies may traverse the tile.
    #[must_use]
    pub const fn can_enemies_walk(&self) -> bool {
        self.can_enemies_walk
    }
}

/// Read-only access to per-cell tile metadata.
///
/// This is the only interface the invasion-path search crosses into the
/// map subsystem. Implementations must stay stable for the duration of a
/// search; the search never mutates the collaborator.
pub trait TileLookup {
    /// Retrieves the tile metadata recorded for the cell, if any.
    fn tile_info(&self, cell: CellCoord) -> Option<TileInfo>;
}

impl<T: TileLookup + ?Sized> TileLookup for &T {
    fn tile_info(&self, cell: CellCoord) -> Option<TileInfo> {
        (**self).tile_info(cell)
    }
}

impl TileLookup for HashMap<CellCoord, TileInfo> {
    fn tile_info(&self, cell: CellCoord) -> Option<TileInfo> {
        self.get(&cell).copied()
    }
}

/// Dense, row-major map of tile metadata covering a rectangular grid.
///
/// Cells outside the grid, and cells inside it that were never assigned,
/// report no tile data. The map is the stable read-only collaborator the
/// search consults through [`TileLookup`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGridMap {
    columns: u32,
    rows: u32,
    tiles: Vec<Option<TileInfo>>,
}

impl TileGridMap {
    /// Creates an empty tile map with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![None; capacity],
        }
    }

    /// Number of columns covered by the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows covered by the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Assigns tile metadata to a cell; out-of-bounds cells are ignored.
    pub fn set_tile(&mut self, cell: CellCoord, info: TileInfo) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = Some(info);
            }
        }
    }

    /// Removes the tile metadata recorded for a cell, if any.
    pub fn clear_tile(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = None;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl TileLookup for TileGridMap {
    fn tile_info(&self, cell: CellCoord) -> Option<TileInfo> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let origin = CellCoord::new(1, 8);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 8);
        assert_eq!(destination.manhattan_distance(origin), 8);
    }

    #[test]
    fn euclidean_distance_matches_pythagoras() {
        let origin = CellCoord::new(0, 0);
        let destination = CellCoord::new(3, 4);
        assert!((origin.euclidean_distance(destination) - 5.0).abs() < f32::EPSILON);
        assert!((destination.euclidean_distance(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn cardinal_neighbors_follow_fixed_order() {
        let neighbors: Vec<CellCoord> = CellCoord::new(2, 2).cardinal_neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                CellCoord::new(3, 2),
                CellCoord::new(2, 3),
                CellCoord::new(1, 2),
                CellCoord::new(2, 1),
            ]
        );
    }

    #[test]
    fn cardinal_neighbors_skip_underflowing_offsets() {
        let neighbors: Vec<CellCoord> = CellCoord::new(0, 0).cardinal_neighbors().collect();
        assert_eq!(neighbors, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);
    }

    #[test]
    fn tile_grid_map_round_trips_assignments() {
        let mut map = TileGridMap::new(3, 2);
        let cell = CellCoord::new(2, 1);
        let info = TileInfo::new(true, false);

        map.set_tile(cell, info);
        assert_eq!(map.tile_info(cell), Some(info));

        map.clear_tile(cell);
        assert_eq!(map.tile_info(cell), None);
    }

    #[test]
    fn tile_grid_map_ignores_out_of_bounds_cells() {
        let mut map = TileGridMap::new(2, 2);
        let outside = CellCoord::new(5, 0);

        map.set_tile(outside, TileInfo::new(true, true));
        assert_eq!(map.tile_info(outside), None);
    }

    #[test]
    fn unassigned_cells_report_no_tile_data() {
        let map = TileGridMap::new(2, 2);
        assert_eq!(map.tile_info(CellCoord::new(1, 1)), None);
    }

    #[test]
    fn hash_map_lookup_matches_contents() {
        let mut tiles = HashMap::new();
        let cell = CellCoord::new(4, 4);
        let info = TileInfo::new(false, true);
        assert_eq!(tiles.insert(cell, info), None);

        assert_eq!(tiles.tile_info(cell), Some(info));
        assert_eq!(tiles.tile_info(CellCoord::new(0, 0)), None);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 11));
    }

    #[test]
    fn tile_info_round_trips_through_bincode() {
        assert_round_trip(&TileInfo::new(true, false));
    }

    #[test]
    fn tile_grid_map_round_trips_through_bincode() {
        let mut map = TileGridMap::new(4, 3);
        map.set_tile(CellCoord::new(1, 2), TileInfo::new(false, true));
        assert_round_trip(&map);
    }
}
