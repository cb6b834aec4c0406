use std::fmt;
use std::str::FromStr;

use derive_new::new;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{PlayerIdError, TileIdError};


// Player elements are probed as `player_1`, `player_2`, ... up to this bound.
pub const MAX_PLAYER_ID: u32 = 100;

const PLAYER_ELEMENT_PREFIX: &str = "player_";


// Board cell. Addressed in the document as "x,y".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TileId {
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub const fn new(x: u32, y: u32) -> Self { Self { x, y } }
    pub fn element_id(self) -> String { self.to_string() }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{},{}", self.x, self.y) }
}

impl FromStr for TileId {
    type Err = TileIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| TileIdError::MissingSeparator(s.to_owned()))?;
        let parse = |v: &str| {
            v.trim().parse::<u32>().map_err(|_| TileIdError::BadCoordinate(s.to_owned()))
        };
        Ok(TileId::new(parse(x)?, parse(y)?))
    }
}

impl TryFrom<String> for TileId {
    type Error = TileIdError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<TileId> for String {
    fn from(tile: TileId) -> Self { tile.to_string() }
}


// Player piece. Addressed in the document as "player_{id}". The server sends either the element
// id or the bare number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "PlayerIdRepr", into = "String")]
pub struct PlayerId(pub u32);

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PlayerIdRepr {
    Number(u32),
    Text(String),
}

impl PlayerId {
    pub fn element_id(self) -> String { format!("{}{}", PLAYER_ELEMENT_PREFIX, self.0) }
    pub fn all() -> impl Iterator<Item = PlayerId> { (1..MAX_PLAYER_ID).map(PlayerId) }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.element_id()) }
}

impl FromStr for PlayerId {
    type Err = PlayerIdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.strip_prefix(PLAYER_ELEMENT_PREFIX).unwrap_or(s);
        number.parse().map(PlayerId).map_err(|_| PlayerIdError(s.to_owned()))
    }
}

impl TryFrom<PlayerIdRepr> for PlayerId {
    type Error = PlayerIdError;
    fn try_from(repr: PlayerIdRepr) -> Result<Self, Self::Error> {
        match repr {
            PlayerIdRepr::Number(n) => Ok(PlayerId(n)),
            PlayerIdRepr::Text(s) => s.parse(),
        }
    }
}

impl From<PlayerId> for String {
    fn from(player: PlayerId) -> Self { player.element_id() }
}


// On-screen position in whole pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, new)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    // One unit along each axis towards `target`. An axis that is already aligned stays put.
    pub fn step_towards(self, target: Position) -> Position {
        Position {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }

    // Number of `step_towards` calls needed to reach `target`.
    pub fn chebyshev_distance(self, target: Position) -> u32 {
        self.x.abs_diff(target.x).max(self.y.abs_diff(target.y))
    }
}


// Board dimensions as reported by the page bootstrap. Tiles are 0-indexed and gap-free.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, new)]
pub struct BoardExtent {
    pub width: u32,
    pub height: u32,
}

impl BoardExtent {
    // Row-major.
    pub fn tiles(self) -> impl Iterator<Item = TileId> + Clone {
        (0..self.height)
            .cartesian_product(0..self.width)
            .map(|(y, x)| TileId::new(x, y))
    }
}
