// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::collections::BTreeSet;

use pysolation_client::command::CommandBundle;
use pysolation_client::coord::TileId;
use pysolation_client::memory_board::MemoryBoard;
use pysolation_client::sequence::ResponseOrdering;
use pysolation_client::session::GameSession;
use pysolation_client::test_util::sample_board;


#[macro_export]
macro_rules! tile {
    ($x:literal, $y:literal) => {
        pysolation_client::coord::TileId::new($x, $y)
    };
}

#[allow(dead_code)]
pub fn bundle(value: serde_json::Value) -> CommandBundle { CommandBundle::from_json(&value).unwrap() }

#[allow(dead_code)]
pub fn tile_set(tiles: &[TileId]) -> BTreeSet<TileId> { tiles.iter().copied().collect() }

#[allow(dead_code)]
pub fn sample_session() -> GameSession<MemoryBoard> {
    GameSession::new(sample_board(), ResponseOrdering::DropStale)
}
