#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod animation;
pub mod board;
pub mod command;
pub mod config;
pub mod coord;
pub mod dispatcher;
pub mod error;
pub mod http_transport;
pub mod link;
pub mod memory_board;
pub mod sequence;
pub mod server_client;
pub mod session;
pub mod test_util;
pub mod turn;
