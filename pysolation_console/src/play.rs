use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use console::Style;
use itertools::Itertools;
use pysolation_client::config::ClientConfig;
use pysolation_client::coord::TileId;
use pysolation_client::http_transport::ReqwestTransport;
use pysolation_client::memory_board::MemoryBoard;
use pysolation_client::server_client::{ServerClient, run_click, run_setup};
use pysolation_client::session::{ApplyOutcome, GameSession};
use pysolation_client::turn::TurnPhase;

use crate::board_setup::BoardSetup;


// Generous: the longest move on a 1000x1000 board plus a dissolve.
const MAX_ANIMATION_TICKS: usize = 2000;

pub struct PlayConfig {
    pub client_config: ClientConfig,
    pub board: BoardSetup,
}

pub fn read_config_file(path: &Path) -> anyhow::Result<ClientConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Reading config file {}", path.display()))?;
    ClientConfig::from_yaml(&contents).context("Parsing config file")
}

pub async fn run(config: PlayConfig) -> anyhow::Result<()> {
    let PlayConfig { client_config, board } = config;
    if client_config.server_address.is_empty() {
        bail!("Server address is required in the console client");
    }
    let transport =
        ReqwestTransport::new(&client_config.server_address, client_config.request_timeout)
            .with_context(|| format!("Invalid server address {}", client_config.server_address))?;
    println!("Connecting to {}...", transport.base());
    let client = ServerClient::new(transport, client_config.path_prefix.clone());
    let session = RefCell::new(GameSession::new(board.build(), client_config.response_ordering));

    let setup = run_setup(&client, &session).await.context("Fetching initial setup")?;
    log_outcome(&setup);
    print_board(&session.borrow());

    let stdin = async_std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "q" || input == "quit" {
            return Ok(());
        }
        let tile: TileId = match input.parse() {
            Ok(tile) => tile,
            Err(err) => {
                eprintln!("{err}; type a tile as x,y or \"q\" to quit");
                continue;
            }
        };
        match run_click(&client, &session, tile).await {
            Ok(Some(outcome)) => log_outcome(&outcome),
            Ok(None) => println!("{tile} is not clickable now"),
            // The board stays as it was; the player may try again.
            Err(err) => eprintln!("Request failed: {err}"),
        }
        session.borrow_mut().finish_animations(MAX_ANIMATION_TICKS);
        print_board(&session.borrow());
    }
}

fn print_board(session: &GameSession<MemoryBoard>) {
    let prompt = match session.turn_phase() {
        TurnPhase::MoveTurn => "Move to",
        TurnPhase::TileRemovalTurn => "Remove",
    };
    println!("{}", render_styled(&session.board().render()));
    println!("{prompt} (x,y):");
}

fn render_styled(board: &str) -> String {
    let linked = Style::new().green().bold();
    let active = Style::new().reverse();
    board
        .chars()
        .map(|ch| match ch {
            '+' => linked.apply_to(ch).to_string(),
            '*' => active.apply_to(ch).to_string(),
            ' ' => "·".to_owned(),
            _ => ch.to_string(),
        })
        .collect()
}

fn log_outcome(outcome: &ApplyOutcome) {
    match outcome {
        ApplyOutcome::Applied(commands) => {
            log::info!("Applied: {}", commands.iter().map(|c| c.as_str()).join(", "));
        }
        ApplyOutcome::AppliedStale(commands) => {
            log::info!("Applied from stale response: {}", commands.iter().map(|c| c.as_str()).join(", "));
        }
    }
}
