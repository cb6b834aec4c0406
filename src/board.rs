use crate::coord::{BoardExtent, PlayerId, Position, TileId};


// Upper bound for probing boards of unknown size, along each axis.
pub const MAX_PROBED_BOARD_SIDE: u32 = 1000;


// Pre-rendered board the client manipulates. Lookups never fail: a missing tile or player is
// reported as `false` / `None`, and mutations of missing elements are no-ops.
//
// The board itself is owned by whoever rendered it (the page in the browser, `MemoryBoard` in
// tests and in the console client). The client only flips markers and moves things around.
pub trait BoardView {
    // Board size, if the bootstrap knows it. `None` means tiles have to be probed.
    fn extent(&self) -> Option<BoardExtent> { None }

    fn has_tile(&self, tile: TileId) -> bool;
    fn has_player(&self, player: PlayerId) -> bool;

    fn tile_position(&self, tile: TileId) -> Option<Position>;
    fn player_position(&self, player: PlayerId) -> Option<Position>;
    fn is_tile_visible(&self, tile: TileId) -> bool;
    fn is_tile_linked(&self, tile: TileId) -> bool;

    // Adds or removes both the "link" marker and the click handler. Exactly one handler is bound
    // to a linked tile no matter how many times it is linked.
    fn set_tile_linked(&mut self, tile: TileId, linked: bool);
    fn set_tile_opacity(&mut self, tile: TileId, opacity: f64);
    fn hide_tile(&mut self, tile: TileId);

    // Lifts the player out of its tile so that it can travel on top of other elements.
    fn detach_player(&mut self, player: PlayerId);
    fn set_player_position(&mut self, player: PlayerId, position: Position);
    fn set_player_active(&mut self, player: PlayerId, active: bool);
}


// All tiles of the board. Uses the known extent when there is one. Otherwise probes a bounded
// range assuming a rectangular gap-free board: a row ends at the first missing column, and the
// board ends at the first row without a first column.
pub fn scan_tiles(board: &impl BoardView) -> Vec<TileId> {
    if let Some(extent) = board.extent() {
        return extent.tiles().collect();
    }
    let mut tiles = Vec::new();
    for y in 0..MAX_PROBED_BOARD_SIDE {
        if !board.has_tile(TileId::new(0, y)) {
            break;
        }
        tiles.extend(
            (0..MAX_PROBED_BOARD_SIDE)
                .map(|x| TileId::new(x, y))
                .take_while(|&tile| board.has_tile(tile)),
        );
    }
    tiles
}

// Players are numbered from 1 without gaps.
pub fn scan_players(board: &impl BoardView) -> Vec<PlayerId> {
    PlayerId::all().take_while(|&player| board.has_player(player)).collect()
}

pub fn mark_active_player(board: &mut impl BoardView, active: PlayerId) {
    for player in scan_players(board) {
        board.set_player_active(player, false);
    }
    if board.has_player(active) {
        board.set_player_active(active, true);
    } else {
        log::warn!("Cannot make {} active: no such player", active);
    }
}
