use std::io::{self, Read};

use anyhow::{Context, anyhow};
use pysolation_client::command::CommandBundle;
use pysolation_client::sequence::ResponseOrdering;
use pysolation_client::session::GameSession;

use crate::board_setup::BoardSetup;


const MAX_ANIMATION_TICKS: usize = 2000;

pub fn run(board: BoardSetup) -> anyhow::Result<()> {
    let mut bundle_in = String::new();
    io::stdin().read_to_string(&mut bundle_in).context("Reading stdin")?;
    let bundle = CommandBundle::from_json_str(&bundle_in)
        .map_err(|err| anyhow!("Error reading command bundle: {err}"))?;
    if !bundle.skipped().is_empty() {
        eprintln!("Skipped {} malformed command(s)", bundle.skipped().len());
    }
    let mut session = GameSession::new(board.build(), ResponseOrdering::AsReceived);
    session.adopt_existing_links();
    session.apply(&bundle);
    for (kind, count) in session.animations().num_tasks_by_kind() {
        log::debug!("{kind:?} animations: {count}");
    }
    let ticks = session.finish_animations(MAX_ANIMATION_TICKS);
    log::debug!("Animations finished in {ticks} ticks");
    println!("Turn: {:?}", session.turn_phase());
    print!("{}", session.board().render());
    Ok(())
}
