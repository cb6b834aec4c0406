#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod apply;
mod board_setup;
mod play;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Command, arg};
use pysolation_client::config::ClientConfig;

use board_setup::{BoardSetup, PlayerPlacement};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Pysolation")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Isolation board game console client")
        .subcommand_required(true)
        .subcommand(
            Command::new("play")
                .about("Play against a running game server")
                .arg(arg!([server_address] "Server address, overrides the config file"))
                .arg(
                    arg!(--"config" <config_file> "Path to a yaml-serialized ClientConfig")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--"prefix" <path_prefix> "Game mount point on the server"))
                .arg(
                    arg!(--"timeout" <duration> "Request timeout, e.g. \"3s\"")
                        .value_parser(humantime::parse_duration),
                )
                .args(board_args()),
        )
        .subcommand(
            Command::new("apply")
                .about("Reads a command bundle (JSON) from stdin, applies it and prints the board.")
                .args(board_args()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            let mut client_config = match sub_matches.get_one::<PathBuf>("config") {
                Some(path) => play::read_config_file(path)?,
                None => ClientConfig::default(),
            };
            if let Some(address) = sub_matches.get_one::<String>("server_address") {
                client_config.server_address = address.clone();
            }
            if let Some(prefix) = sub_matches.get_one::<String>("prefix") {
                client_config.path_prefix = prefix.clone();
            }
            if let Some(timeout) = sub_matches.get_one::<Duration>("timeout") {
                client_config.request_timeout = Some(*timeout);
            }
            let board = BoardSetup::from_matches(sub_matches, client_config.board_extent);
            async_std::task::block_on(play::run(play::PlayConfig { client_config, board }))
        }
        Some(("apply", sub_matches)) => {
            apply::run(BoardSetup::from_matches(sub_matches, None))
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn board_args() -> [clap::Arg; 3] {
    [
        arg!(--"width" <n> "Board width in tiles").value_parser(clap::value_parser!(u32).range(1..=1000)),
        arg!(--"height" <n> "Board height in tiles").value_parser(clap::value_parser!(u32).range(1..=1000)),
        arg!(-'p' --"player" <placement> "Player placement as \"ID@x,y\"; repeat for each player")
            .value_parser(clap::value_parser!(PlayerPlacement))
            .action(clap::ArgAction::Append),
    ]
}
