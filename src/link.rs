use std::collections::BTreeSet;

use crate::board::{BoardView, scan_tiles};
use crate::coord::TileId;


// Owns the set of clickable tiles. Relinking is always "clear everything, then link the new set";
// there is no incremental add.
#[derive(Clone, Debug, Default)]
pub struct LinkManager {
    links: BTreeSet<TileId>,
}

impl LinkManager {
    pub fn new() -> Self { Self::default() }

    pub fn links(&self) -> &BTreeSet<TileId> { &self.links }
    pub fn is_linked(&self, tile: TileId) -> bool { self.links.contains(&tile) }

    // Adopts links that were already present on the page (e.g. server-rendered anchors).
    pub fn adopt(&mut self, tiles: impl IntoIterator<Item = TileId>) { self.links.extend(tiles); }

    // Unlinks every tile on the board, including ones linked by somebody else.
    pub fn clear_all_links(&mut self, board: &mut impl BoardView) {
        let scanned = scan_tiles(board);
        for &tile in scanned.iter().chain(self.links.iter()) {
            board.set_tile_linked(tile, false);
        }
        self.links.clear();
    }

    pub fn bind_links(&mut self, board: &mut impl BoardView, tiles: &[TileId]) {
        self.clear_all_links(board);
        for &tile in tiles {
            if !board.has_tile(tile) {
                log::warn!("Cannot link tile {}: no such tile", tile);
                continue;
            }
            board.set_tile_linked(tile, true);
            self.links.insert(tile);
        }
        log::debug!("Linked {} tiles", self.links.len());
    }
}
