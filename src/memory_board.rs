use std::collections::{BTreeMap, BTreeSet};

use crate::board::BoardView;
use crate::coord::{BoardExtent, PlayerId, Position, TileId};


// Edge of a square tile in the in-memory layout, in pixels.
pub const TILE_SIZE_PX: i32 = 10;


#[derive(Clone, Debug, PartialEq)]
pub struct MemoryTile {
    pub position: Position,
    pub linked: bool,
    pub has_click_handler: bool,
    pub visible: bool,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryPlayer {
    pub position: Position,
    pub detached: bool,
    pub active: bool,
}

// Board that lives entirely in memory. Stands in for the rendered page in tests and in the
// console client.
#[derive(Clone, Debug)]
pub struct MemoryBoard {
    extent: BoardExtent,
    report_extent: bool,
    tiles: BTreeMap<TileId, MemoryTile>,
    players: BTreeMap<PlayerId, MemoryPlayer>,
}

impl MemoryBoard {
    pub fn new(extent: BoardExtent) -> Self {
        let tiles = extent
            .tiles()
            .map(|tile| {
                (tile, MemoryTile {
                    position: default_tile_position(tile),
                    linked: false,
                    has_click_handler: false,
                    visible: true,
                    opacity: 1.0,
                })
            })
            .collect();
        MemoryBoard {
            extent,
            report_extent: true,
            tiles,
            players: BTreeMap::new(),
        }
    }

    // Pretend the size is unknown, so that anything scanning the board has to probe it.
    pub fn with_hidden_extent(mut self) -> Self {
        self.report_extent = false;
        self
    }

    pub fn with_player(self, player: PlayerId, tile: TileId) -> Self {
        let position = self.tiles.get(&tile).map_or(default_tile_position(tile), |t| t.position);
        self.with_player_at(player, position)
    }

    pub fn with_player_at(mut self, player: PlayerId, position: Position) -> Self {
        self.players.insert(player, MemoryPlayer { position, detached: false, active: false });
        self
    }

    pub fn with_tile_at(mut self, tile: TileId, position: Position) -> Self {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.position = position;
        }
        self
    }

    // Mirrors a server-rendered tile carrying a link, before the client touched anything.
    pub fn with_prelinked_tile(mut self, tile: TileId) -> Self {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.linked = true;
            t.has_click_handler = true;
        }
        self
    }

    pub fn tile(&self, tile: TileId) -> Option<&MemoryTile> { self.tiles.get(&tile) }
    pub fn player(&self, player: PlayerId) -> Option<&MemoryPlayer> { self.players.get(&player) }

    pub fn linked_tiles(&self) -> BTreeSet<TileId> {
        self.tiles.iter().filter(|(_, t)| t.linked).map(|(&id, _)| id).collect()
    }
    pub fn click_handler_count(&self) -> usize {
        self.tiles.values().filter(|t| t.has_click_handler).count()
    }
    pub fn hidden_tiles(&self) -> BTreeSet<TileId> {
        self.tiles.iter().filter(|(_, t)| !t.visible).map(|(&id, _)| id).collect()
    }

    // Tile the player is standing on, if it is exactly aligned with one.
    pub fn player_tile(&self, player: PlayerId) -> Option<TileId> {
        let position = self.players.get(&player)?.position;
        self.tiles.iter().find(|(_, t)| t.position == position).map(|(&id, _)| id)
    }

    // One character per tile: player number (or `*` for the active player), `+` for a linked
    // tile, `.` for a plain tile, space for a removed one.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.extent.height {
            for x in 0..self.extent.width {
                let tile_id = TileId::new(x, y);
                let Some(tile) = self.tiles.get(&tile_id) else {
                    continue;
                };
                let standing = self
                    .players
                    .iter()
                    .find(|(_, p)| p.position == tile.position);
                let ch = match standing {
                    Some((_, player)) if player.active => '*',
                    Some((id, _)) => char::from_digit(id.0 % 10, 10).unwrap_or('?'),
                    None if !tile.visible => ' ',
                    None if tile.linked => '+',
                    None => '.',
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

fn default_tile_position(tile: TileId) -> Position {
    Position::new(tile.x as i32 * TILE_SIZE_PX, tile.y as i32 * TILE_SIZE_PX)
}

impl BoardView for MemoryBoard {
    fn extent(&self) -> Option<BoardExtent> { self.report_extent.then_some(self.extent) }

    fn has_tile(&self, tile: TileId) -> bool { self.tiles.contains_key(&tile) }
    fn has_player(&self, player: PlayerId) -> bool { self.players.contains_key(&player) }

    fn tile_position(&self, tile: TileId) -> Option<Position> {
        self.tiles.get(&tile).map(|t| t.position)
    }
    fn player_position(&self, player: PlayerId) -> Option<Position> {
        self.players.get(&player).map(|p| p.position)
    }
    fn is_tile_visible(&self, tile: TileId) -> bool {
        self.tiles.get(&tile).is_some_and(|t| t.visible)
    }
    fn is_tile_linked(&self, tile: TileId) -> bool {
        self.tiles.get(&tile).is_some_and(|t| t.linked)
    }

    fn set_tile_linked(&mut self, tile: TileId, linked: bool) {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.linked = linked;
            t.has_click_handler = linked;
        }
    }
    fn set_tile_opacity(&mut self, tile: TileId, opacity: f64) {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.opacity = opacity;
        }
    }
    fn hide_tile(&mut self, tile: TileId) {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.visible = false;
        }
    }

    fn detach_player(&mut self, player: PlayerId) {
        if let Some(p) = self.players.get_mut(&player) {
            p.detached = true;
        }
    }
    fn set_player_position(&mut self, player: PlayerId, position: Position) {
        if let Some(p) = self.players.get_mut(&player) {
            p.position = position;
        }
    }
    fn set_player_active(&mut self, player: PlayerId, active: bool) {
        if let Some(p) = self.players.get_mut(&player) {
            p.active = active;
        }
    }
}
