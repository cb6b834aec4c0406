use std::str::FromStr;

use clap::ArgMatches;
use pysolation_client::coord::{BoardExtent, PlayerId, TileId};
use pysolation_client::memory_board::MemoryBoard;
use pysolation_client::test_util::SAMPLE_BOARD_EXTENT;


#[derive(Clone, Copy, Debug)]
pub struct PlayerPlacement {
    pub player: PlayerId,
    pub tile: TileId,
}

// "ID@x,y", where ID is either a number or a "player_N" element id.
impl FromStr for PlayerPlacement {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (player, tile) = s.split_once('@').ok_or_else(|| format!("expected ID@x,y, got {s:?}"))?;
        Ok(PlayerPlacement {
            player: player.parse().map_err(|err| format!("{err}"))?,
            tile: tile.parse().map_err(|err| format!("{err}"))?,
        })
    }
}

// The console cannot see the server's page, so the player has to describe the board.
pub struct BoardSetup {
    pub extent: BoardExtent,
    pub placements: Vec<PlayerPlacement>,
}

impl BoardSetup {
    pub fn from_matches(matches: &ArgMatches, configured: Option<BoardExtent>) -> Self {
        let base = configured.unwrap_or(SAMPLE_BOARD_EXTENT);
        let extent = BoardExtent {
            width: matches.get_one::<u32>("width").copied().unwrap_or(base.width),
            height: matches.get_one::<u32>("height").copied().unwrap_or(base.height),
        };
        let placements = match matches.get_many::<PlayerPlacement>("player") {
            Some(values) => values.copied().collect(),
            None => corner_placements(extent),
        };
        BoardSetup { extent, placements }
    }

    pub fn build(&self) -> MemoryBoard {
        self.placements
            .iter()
            .fold(MemoryBoard::new(self.extent), |board, p| board.with_player(p.player, p.tile))
    }
}

// Two players on opposite corners, like a freshly started two-player game.
fn corner_placements(extent: BoardExtent) -> Vec<PlayerPlacement> {
    vec![
        PlayerPlacement { player: PlayerId(1), tile: TileId::new(0, 0) },
        PlayerPlacement {
            player: PlayerId(2),
            tile: TileId::new(extent.width.saturating_sub(1), extent.height.saturating_sub(1)),
        },
    ]
}
