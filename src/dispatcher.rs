use crate::animation::AnimationScheduler;
use crate::board::{BoardView, mark_active_player};
use crate::command::{Command, CommandBundle, CommandName};
use crate::link::LinkManager;
use crate::turn::TurnStateMachine;


// Everything a command can touch. Borrowed from `GameSession` for the duration of one bundle.
pub struct DispatchTargets<'a, B: BoardView> {
    pub board: &'a mut B,
    pub turn: &'a mut TurnStateMachine,
    pub links: &'a mut LinkManager,
    pub animations: &'a mut AnimationScheduler,
}

// Applies commands to their handlers. Holds no state of its own.
pub struct CommandDispatcher;

impl CommandDispatcher {
    // Returns the names of the applied commands, in application order.
    pub fn dispatch<B: BoardView>(
        bundle: &CommandBundle, targets: DispatchTargets<B>,
    ) -> Vec<CommandName> {
        let DispatchTargets { board, turn, links, animations } = targets;
        let mut applied = Vec::new();
        for command in bundle.commands() {
            log::debug!("Applying {}", command.name().as_str());
            match command {
                Command::MovePlayer { player, target } => {
                    animations.start_move(board, *player, *target);
                }
                Command::RemoveTiles(tiles) => {
                    for &tile in tiles {
                        animations.start_dissolve(board, tile);
                    }
                }
                Command::ChangeTurn => {
                    turn.toggle();
                }
                Command::SetActivePlayer(player) => {
                    mark_active_player(board, *player);
                }
                Command::LinkTiles(tiles) => {
                    links.bind_links(board, tiles);
                }
            }
            applied.push(command.name());
        }
        applied
    }
}
