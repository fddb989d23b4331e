//! Realized board of rotatable tiles
//!
//! A board is built from a level plan through an archetype registry. The
//! searches never read the board directly; they take openings snapshots.

use log::warn;
use ndarray::Array2;

use crate::algorithm::flow::{FlowResult, simulate_flow};
use crate::algorithm::openings::OpeningsSnapshot;
use crate::generation::plan::LevelPlan;
use crate::io::error::PipeflowError;
use crate::math::probability::RandomSelector;
use crate::spatial::direction::DirectionSet;
use crate::spatial::grid::{Cell, Grid};
use crate::spatial::tiles::{
    ArchetypeRegistry, TileBlueprint, rotation_matching, rotation_overlapping,
};

/// Grid of tile blueprints with fixed Start and End cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    tiles: Array2<TileBlueprint>,
    start: Cell,
    end: Cell,
}

impl Board {
    /// Board with every cell empty
    pub fn new(grid: Grid, start: Cell, end: Cell) -> Self {
        Self {
            grid,
            tiles: Array2::from_elem(grid.shape(), TileBlueprint::default()),
            start,
            end,
        }
    }

    /// Instantiate every tile of a plan
    ///
    /// Each tile takes the registry's canonical openings for its archetype and
    /// the first rotation matching the required openings exactly, else the
    /// first sharing at least one of them, else rotation 0. An archetype the
    /// registry does not know is logged and realized with no openings.
    pub fn realize(plan: &LevelPlan, registry: &impl ArchetypeRegistry) -> Self {
        let mut board = Self::new(plan.grid, plan.start, plan.end);
        for tile in &plan.tiles {
            let base = registry.openings(tile.archetype).unwrap_or_else(|| {
                warn!("{}", PipeflowError::MissingArchetypeMapping { cell: tile.cell });
                DirectionSet::EMPTY
            });
            let rotation = rotation_matching(base, tile.directions)
                .or_else(|| rotation_overlapping(base, tile.directions))
                .unwrap_or(0);
            board.set_tile(
                tile.cell,
                TileBlueprint::new(tile.archetype, base).with_rotation(rotation),
            );
        }
        board
    }

    /// Grid extent
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Start cell
    pub const fn start(&self) -> Cell {
        self.start
    }

    /// End cell
    pub const fn end(&self) -> Cell {
        self.end
    }

    /// Tile at a cell
    pub fn tile(&self, cell: Cell) -> Option<&TileBlueprint> {
        self.grid
            .array_index(cell)
            .and_then(|index| self.tiles.get(index))
    }

    /// Replace the tile at a cell
    pub fn set_tile(&mut self, cell: Cell, tile: TileBlueprint) {
        if let Some(slot) = self
            .grid
            .array_index(cell)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *slot = tile;
        }
    }

    /// Turn one tile a quarter turn clockwise, returning its new rotation
    pub fn rotate_tile(&mut self, cell: Cell) -> Option<u8> {
        let tile = self
            .grid
            .array_index(cell)
            .and_then(|index| self.tiles.get_mut(index))?;
        tile.rotate();
        Some(tile.rotation())
    }

    /// Give every tile a random rotation
    pub fn scramble(&mut self, rng: &mut RandomSelector) {
        for tile in &mut self.tiles {
            tile.set_rotation(rng.range(0, 4) as u8);
        }
    }

    /// Unrotated openings of every cell
    pub fn base_openings(&self) -> OpeningsSnapshot {
        OpeningsSnapshot::from_fn(self.grid, |cell| {
            self.tile(cell).map(TileBlueprint::base_openings).unwrap_or_default()
        })
    }

    /// Openings of every cell at its current rotation
    pub fn current_openings(&self) -> OpeningsSnapshot {
        OpeningsSnapshot::from_fn(self.grid, |cell| {
            self.tile(cell).map(TileBlueprint::openings).unwrap_or_default()
        })
    }

    /// Water flow at the current rotations
    pub fn flow(&self) -> FlowResult {
        simulate_flow(&self.current_openings(), self.start, self.end)
    }
}
