//! Tile grids and map files.
//!
//! A map is a rectangle of single-character glyphs, one per cell. Each glyph
//! resolves to a [`TileKind`] with a static solid flag when the map is
//! loaded; collision queries never look at glyphs again.
//!
//! Coordinates: cell `(cx, cy)` covers the pixels
//! `[cx * tile_size, (cx + 1) * tile_size)` horizontally and likewise
//! vertically. Anything outside the grid counts as solid.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::npc::NpcKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Grass,
    Road,
    Wall,
    /// Street entrance to the casino.
    Door,
    Floor,
    Carpet,
    /// Casino exit back to the street.
    Exit,
    BlackjackTable,
    CardTable,
    SlotMachine,
    Plant,
}

impl TileKind {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Some(match glyph {
            ' ' => TileKind::Grass,
            '.' => TileKind::Road,
            '#' => TileKind::Wall,
            'C' => TileKind::Door,
            '_' => TileKind::Floor,
            '~' => TileKind::Carpet,
            'X' => TileKind::Exit,
            'B' => TileKind::BlackjackTable,
            't' => TileKind::CardTable,
            'S' => TileKind::SlotMachine,
            'P' => TileKind::Plant,
            _ => return None,
        })
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Grass => ' ',
            TileKind::Road => '.',
            TileKind::Wall => '#',
            TileKind::Door => 'C',
            TileKind::Floor => '_',
            TileKind::Carpet => '~',
            TileKind::Exit => 'X',
            TileKind::BlackjackTable => 'B',
            TileKind::CardTable => 't',
            TileKind::SlotMachine => 'S',
            TileKind::Plant => 'P',
        }
    }

    /// Only walls block movement; furniture is walk-through.
    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Wall)
    }
}

/// The collision grid of the active scene.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileGrid {
    tiles: Vec<TileKind>,
    width: usize,
    height: usize,
    tile_size: f32,
}

impl TileGrid {
    /// Build a grid from glyph rows, top row first.
    ///
    /// Fails on an empty map, rows of different lengths, unknown glyphs or a
    /// non-positive tile size.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, String> {
        if !(tile_size > 0.0) {
            return Err(format!("Invalid tile size {}", tile_size));
        }
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err("Map has no cells".to_string());
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(format!(
                    "Row {} has {} cells, expected {}",
                    y, len, width
                ));
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = TileKind::from_glyph(glyph)
                    .ok_or_else(|| format!("Unknown tile '{}' at ({}, {})", glyph, x, y))?;
                tiles.push(kind);
            }
        }

        Ok(Self {
            tiles,
            width,
            height,
            tile_size,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Map extent in pixels.
    pub fn pixel_size(&self) -> Vector2 {
        Vector2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Cell containing `point` (floor division, may be out of bounds).
    pub fn cell_at(&self, point: Vector2) -> (i64, i64) {
        (
            (point.x / self.tile_size).floor() as i64,
            (point.y / self.tile_size).floor() as i64,
        )
    }

    /// Kind of the cell, `None` outside the grid.
    pub fn kind_at_cell(&self, cx: i64, cy: i64) -> Option<TileKind> {
        if cx < 0 || cy < 0 || cx >= self.width as i64 || cy >= self.height as i64 {
            return None;
        }
        Some(self.tiles[cy as usize * self.width + cx as usize])
    }

    pub fn is_solid_cell(&self, cx: i64, cy: i64) -> bool {
        self.kind_at_cell(cx, cy).is_none_or(TileKind::is_solid)
    }

    /// Whether the cell under `point` blocks movement.
    pub fn is_solid_at(&self, point: Vector2) -> bool {
        let (cx, cy) = self.cell_at(point);
        self.is_solid_cell(cx, cy)
    }

    /// Inclusive cell range covered by the open box `(min, max)`.
    ///
    /// A box whose edge lies exactly on a cell boundary does not cover the
    /// cell beyond it.
    fn cell_span(&self, min: Vector2, max: Vector2) -> ((i64, i64), (i64, i64)) {
        let ts = self.tile_size;
        let x0 = (min.x / ts).floor() as i64;
        let y0 = (min.y / ts).floor() as i64;
        let x1 = ((max.x / ts).ceil() as i64 - 1).max(x0);
        let y1 = ((max.y / ts).ceil() as i64 - 1).max(y0);
        ((x0, y0), (x1, y1))
    }

    /// Cells covered by the box `(min, max)` with their kinds (`None`
    /// outside the grid).
    pub fn cells_in_box(
        &self,
        min: Vector2,
        max: Vector2,
    ) -> impl Iterator<Item = (i64, i64, Option<TileKind>)> + '_ {
        let ((x0, y0), (x1, y1)) = self.cell_span(min, max);
        (y0..=y1).flat_map(move |cy| (x0..=x1).map(move |cx| (cx, cy, self.kind_at_cell(cx, cy))))
    }

    /// Whether the box `(min, max)` overlaps any solid or out-of-bounds cell.
    pub fn overlaps_solid(&self, min: Vector2, max: Vector2) -> bool {
        self.cells_in_box(min, max)
            .any(|(_, _, kind)| kind.is_none_or(TileKind::is_solid))
    }

    /// Whether the box `(min, max)` overlaps a cell of `kind`.
    pub fn overlaps_kind(&self, min: Vector2, max: Vector2, kind: TileKind) -> bool {
        self.cells_in_box(min, max).any(|(_, _, k)| k == Some(kind))
    }

    /// Every cell with its kind, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileKind)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, kind)| (i % self.width, i / self.width, *kind))
    }
}

/// An NPC placed by a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcSpawn {
    pub kind: NpcKind,
    /// Centre of the NPC in pixels.
    pub x: f32,
    pub y: f32,
    /// Overrides the kind's default line.
    #[serde(default)]
    pub dialogue: Option<String>,
}

/// On-disk map description.
///
/// ```json
/// { "tile_size": 32, "spawn": [960, 704], "rows": ["#####", "#   #", "#####"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    pub tile_size: f32,
    /// Player top-left corner when entering the scene.
    pub spawn: [f32; 2],
    pub rows: Vec<String>,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    #[serde(default)]
    pub npcs: Vec<NpcSpawn>,
}

fn default_zoom() -> f32 {
    1.0
}

/// A loaded scene: collision grid plus where things start.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMap {
    pub grid: TileGrid,
    pub spawn: Vector2,
    pub zoom: f32,
    pub npcs: Vec<NpcSpawn>,
}

impl SceneMap {
    pub fn from_map_file(file: MapFile) -> Result<Self, String> {
        let grid = TileGrid::from_rows(&file.rows, file.tile_size)?;
        if !(file.zoom > 0.0) {
            return Err(format!("Invalid zoom {}", file.zoom));
        }
        Ok(Self {
            grid,
            spawn: Vector2::new(file.spawn[0], file.spawn[1]),
            zoom: file.zoom,
            npcs: file.npcs,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: MapFile =
            serde_json::from_str(json).map_err(|e| format!("Invalid map JSON: {}", e))?;
        Self::from_map_file(file)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read map {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }
}

/// Outdoor street: 64x48 cells of 32 px, a road stripe and the walled casino
/// block with its door facing the road.
pub fn builtin_street() -> SceneMap {
    const W: usize = 64;
    const H: usize = 48;
    const TILE: f32 = 32.0;
    let (cx, cy) = (30usize, 12usize);

    let mut cells = vec![vec![' '; W]; H];
    for (y, row) in cells.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            if y == 0 || y == H - 1 || x == 0 || x == W - 1 {
                *cell = '#';
            } else if (18..=22).contains(&y) && (6..=56).contains(&x) {
                *cell = '.';
            }
        }
    }
    for row in cells.iter_mut().skip(cy).take(8) {
        for cell in row.iter_mut().skip(cx - 6).take(12) {
            *cell = '#';
        }
    }
    cells[cy + 7][cx] = 'C';
    for cell in cells[cy + 8].iter_mut().skip(cx - 3).take(7) {
        *cell = '.';
    }

    let rows: Vec<String> = cells.into_iter().map(|r| r.into_iter().collect()).collect();
    SceneMap {
        grid: TileGrid::from_rows(&rows, TILE).expect("built-in street map is valid"),
        spawn: Vector2::new(cx as f32 * TILE, (cy + 10) as f32 * TILE),
        zoom: 1.0,
        npcs: Vec::new(),
    }
}

/// Casino floor: 32x24 cells of 16 px with a gaming area holding two
/// blackjack tables, slot rows, a VIP corner, plants and a two-cell exit in
/// the bottom wall.
pub fn builtin_casino() -> SceneMap {
    const W: usize = 32;
    const H: usize = 24;
    const TILE: f32 = 16.0;

    let mut rows = Vec::with_capacity(H);
    for y in 0..H {
        let mut row = String::with_capacity(W);
        for x in 0..W {
            row.push(casino_glyph(x, y, W, H));
        }
        rows.push(row);
    }

    let t = |x: usize, y: usize| (x as f32 * TILE, y as f32 * TILE);
    let mut npcs = Vec::new();
    let mut place = |kind: NpcKind, (x, y): (f32, f32)| {
        npcs.push(NpcSpawn {
            kind,
            x,
            y,
            dialogue: None,
        })
    };
    place(NpcKind::Dealer, t(12, 8));
    place(NpcKind::Dealer, t(16, 8));
    place(NpcKind::Security, t(5, 5));
    place(NpcKind::Security, t(26, 18));
    for (x, y) in [(10, 10), (14, 11), (20, 15), (22, 6), (8, 18), (18, 17), (25, 12)] {
        place(NpcKind::Patron, t(x, y));
    }
    place(NpcKind::Hostess, t(15, 20));
    place(NpcKind::Bartender, t(4, 12));

    SceneMap {
        grid: TileGrid::from_rows(&rows, TILE).expect("built-in casino map is valid"),
        spawn: Vector2::new(256.0, 336.0),
        zoom: 1.5,
        npcs,
    }
}

fn casino_glyph(x: usize, y: usize, w: usize, h: usize) -> char {
    if y == h - 1 && (x == w / 2 - 1 || x == w / 2) {
        return 'X';
    }
    if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
        return '#';
    }
    // Main gaming area
    if (6..=12).contains(&y) && (8..=18).contains(&x) {
        return if (x - 8) % 4 == 0 && (y - 6) % 3 == 1 {
            't'
        } else if y == 9 && (x == 12 || x == 16) {
            'B'
        } else {
            '~'
        };
    }
    // Slot rows along both side walls
    if (3..=20).contains(&y) && (x == 3 || x == 28) && y % 3 == 0 {
        return 'S';
    }
    // VIP corner
    if (3..=8).contains(&y) && (20..=28).contains(&x) {
        return if x % 3 == 0 && y % 2 == 0 { 't' } else { '~' };
    }
    // Lower gaming area
    if (15..=20).contains(&y) && (8..=24).contains(&x) {
        if x % 5 == 0 && y == 17 {
            return 'S';
        }
        if x % 4 == 2 && y == 18 {
            return 't';
        }
        return '_';
    }
    if matches!(
        (x, y),
        (2, 2) | (29, 2) | (2, 21) | (29, 21) | (15, 2) | (6, 15)
    ) {
        return 'P';
    }
    '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> TileGrid {
        TileGrid::from_rows(&["#####", "#   #", "#   #", "#####"], 10.0).unwrap()
    }

    #[test]
    fn test_glyph_round_trip_and_solidity() {
        for glyph in [' ', '.', '#', 'C', '_', '~', 'X', 'B', 't', 'S', 'P'] {
            let kind = TileKind::from_glyph(glyph).unwrap();
            assert_eq!(kind.glyph(), glyph);
            assert_eq!(kind.is_solid(), glyph == '#');
        }
        assert!(TileKind::from_glyph('?').is_none());
    }

    #[test]
    fn test_from_rows_rejects_bad_maps() {
        assert!(TileGrid::from_rows(&["###", "##"], 8.0).is_err());
        assert!(TileGrid::from_rows(&["#?#"], 8.0).is_err());
        assert!(TileGrid::from_rows::<&str>(&[], 8.0).is_err());
        assert!(TileGrid::from_rows(&["###"], 0.0).is_err());
    }

    #[test]
    fn test_is_solid_at_uses_floor_division() {
        let grid = room();
        assert!(grid.is_solid_at(Vector2::new(9.9, 15.0)));
        assert!(!grid.is_solid_at(Vector2::new(10.0, 15.0)));
        assert!(!grid.is_solid_at(Vector2::new(39.9, 29.9)));
        assert!(grid.is_solid_at(Vector2::new(40.0, 15.0)));
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let grid = room();
        assert!(grid.is_solid_at(Vector2::new(-0.1, 15.0)));
        assert!(grid.is_solid_at(Vector2::new(15.0, -5.0)));
        assert!(grid.is_solid_at(Vector2::new(500.0, 15.0)));
        assert!(grid.is_solid_at(Vector2::new(15.0, 40.0)));
    }

    #[test]
    fn test_touching_a_wall_is_not_overlap() {
        let grid = room();
        // Interior spans x 10..40, y 10..30.
        assert!(!grid.overlaps_solid(Vector2::new(10.0, 10.0), Vector2::new(40.0, 30.0)));
        assert!(grid.overlaps_solid(Vector2::new(9.5, 10.0), Vector2::new(20.0, 20.0)));
        assert!(grid.overlaps_solid(Vector2::new(30.0, 25.0), Vector2::new(40.5, 29.0)));
    }

    #[test]
    fn test_overlaps_kind() {
        let grid = TileGrid::from_rows(&["#####", "# B #", "#####"], 10.0).unwrap();
        assert!(grid.overlaps_kind(
            Vector2::new(15.0, 12.0),
            Vector2::new(21.0, 18.0),
            TileKind::BlackjackTable
        ));
        assert!(!grid.overlaps_kind(
            Vector2::new(10.0, 10.0),
            Vector2::new(20.0, 20.0),
            TileKind::BlackjackTable
        ));
    }

    #[test]
    fn test_builtin_street_layout() {
        let street = builtin_street();
        let grid = &street.grid;
        assert_eq!((grid.width(), grid.height()), (64, 48));
        assert_eq!(grid.kind_at_cell(30, 19), Some(TileKind::Door));
        assert_eq!(grid.kind_at_cell(29, 19), Some(TileKind::Wall));
        assert_eq!(grid.kind_at_cell(30, 20), Some(TileKind::Road));
        assert_eq!(grid.kind_at_cell(3, 3), Some(TileKind::Grass));
        let (min, max) = (street.spawn, street.spawn + Vector2::new(22.0, 28.0));
        assert!(!grid.overlaps_solid(min, max));
    }

    #[test]
    fn test_builtin_casino_layout() {
        let casino = builtin_casino();
        let grid = &casino.grid;
        assert_eq!((grid.width(), grid.height()), (32, 24));
        assert_eq!(grid.kind_at_cell(12, 9), Some(TileKind::BlackjackTable));
        assert_eq!(grid.kind_at_cell(16, 9), Some(TileKind::BlackjackTable));
        assert_eq!(grid.kind_at_cell(15, 23), Some(TileKind::Exit));
        assert_eq!(grid.kind_at_cell(16, 23), Some(TileKind::Exit));
        assert_eq!(grid.kind_at_cell(0, 5), Some(TileKind::Wall));
        let (min, max) = (casino.spawn, casino.spawn + Vector2::new(22.0, 28.0));
        assert!(!grid.overlaps_solid(min, max));
        for npc in &casino.npcs {
            assert!(!grid.is_solid_at(Vector2::new(npc.x, npc.y)));
        }
    }

    #[test]
    fn test_map_file_json() {
        let json = r#"{
            "tile_size": 16,
            "spawn": [20, 20],
            "rows": ["####", "#_X#", "####"],
            "npcs": [{ "kind": "hostess", "x": 24, "y": 24, "dialogue": "Hi" }]
        }"#;
        let scene = SceneMap::from_json(json).unwrap();
        assert_eq!(scene.grid.kind_at_cell(2, 1), Some(TileKind::Exit));
        assert_eq!(scene.zoom, 1.0);
        assert_eq!(scene.npcs.len(), 1);
        assert_eq!(scene.npcs[0].dialogue.as_deref(), Some("Hi"));
        assert!(SceneMap::from_json("{\"tile_size\": 16}").is_err());
    }
}
