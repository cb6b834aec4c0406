use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::DEFAULT_TICK_PERIOD;
use crate::board::MAX_PROBED_BOARD_SIDE;
use crate::coord::BoardExtent;
use crate::sequence::ResponseOrdering;


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // Base URL of the game server. Empty means "same origin" in the browser.
    pub server_address: String,
    // Mount point of the game on the server, e.g. "/game/abc123".
    pub path_prefix: String,
    pub response_ordering: ResponseOrdering,
    #[serde(with = "humantime_serde")]
    pub animation_tick: Duration,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    // Saves probing the document when the page knows its own size.
    pub board_extent: Option<BoardExtent>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_address: String::new(),
            path_prefix: String::new(),
            response_ordering: ResponseOrdering::default(),
            animation_tick: DEFAULT_TICK_PERIOD,
            request_timeout: None,
            board_extent: None,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s).map(Self::clamped)
    }
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s).map(Self::clamped)
    }

    // A configured extent is walked tile by tile, so it gets the same bound as probing.
    fn clamped(mut self) -> Self {
        if let Some(extent) = &mut self.board_extent {
            if extent.width > MAX_PROBED_BOARD_SIDE || extent.height > MAX_PROBED_BOARD_SIDE {
                log::warn!(
                    "Board extent {}x{} exceeds {} per side; clamping",
                    extent.width,
                    extent.height,
                    MAX_PROBED_BOARD_SIDE
                );
                extent.width = extent.width.min(MAX_PROBED_BOARD_SIDE);
                extent.height = extent.height.min(MAX_PROBED_BOARD_SIDE);
            }
        }
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ClientConfig::from_yaml(
            "server_address: http://localhost:8000\n\
             response_ordering: AsReceived\n\
             request_timeout: 3s\n",
        )
        .unwrap();
        assert_eq!(config.server_address, "http://localhost:8000");
        assert_eq!(config.response_ordering, ResponseOrdering::AsReceived);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.animation_tick, DEFAULT_TICK_PERIOD);
        assert_eq!(config.board_extent, None);
    }

    #[test]
    fn json_with_extent() {
        let config = ClientConfig::from_json(
            r#"{"path_prefix": "/game/abc", "board_extent": {"width": 5, "height": 6}}"#,
        )
        .unwrap();
        assert_eq!(config.path_prefix, "/game/abc");
        assert_eq!(config.board_extent, Some(BoardExtent::new(5, 6)));
    }

    #[test]
    fn oversized_extent_is_clamped() {
        let config =
            ClientConfig::from_yaml("board_extent: {width: 4294967295, height: 7}\n").unwrap();
        assert_eq!(config.board_extent, Some(BoardExtent::new(MAX_PROBED_BOARD_SIDE, 7)));
        let config =
            ClientConfig::from_json(r#"{"board_extent": {"width": 3, "height": 100000}}"#).unwrap();
        assert_eq!(config.board_extent, Some(BoardExtent::new(3, MAX_PROBED_BOARD_SIDE)));
    }
}
