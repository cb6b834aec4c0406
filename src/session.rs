use std::collections::BTreeSet;

use crate::animation::AnimationScheduler;
use crate::board::{BoardView, scan_tiles};
use crate::command::{CommandBundle, CommandName};
use crate::coord::TileId;
use crate::dispatcher::{CommandDispatcher, DispatchTargets};
use crate::link::LinkManager;
use crate::sequence::{RequestSeq, RequestSequencer, ResponseOrdering, ResponseVerdict};
use crate::turn::{TurnPhase, TurnStateMachine};


// A click that should be sent to the server. The phase is captured at click time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ActionRequest {
    pub seq: RequestSeq,
    pub tile: TileId,
    pub phase: TurnPhase,
}

#[must_use]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ApplyOutcome {
    Applied(Vec<CommandName>),
    // A response to a newer request has already been applied, so only the commands that change
    // state incrementally were applied.
    AppliedStale(Vec<CommandName>),
}

// Client-side game state: the turn phase, the clickable set, and in-flight animations, together
// with the board they operate on. All state transitions go through here.
pub struct GameSession<B: BoardView> {
    board: B,
    turn: TurnStateMachine,
    links: LinkManager,
    animations: AnimationScheduler,
    sequencer: RequestSequencer,
}

impl<B: BoardView> GameSession<B> {
    pub fn new(board: B, ordering: ResponseOrdering) -> Self {
        GameSession {
            board,
            turn: TurnStateMachine::new(),
            links: LinkManager::new(),
            animations: AnimationScheduler::new(),
            sequencer: RequestSequencer::new(ordering),
        }
    }

    pub fn board(&self) -> &B { &self.board }
    pub fn board_mut(&mut self) -> &mut B { &mut self.board }
    pub fn turn_phase(&self) -> TurnPhase { self.turn.current() }
    pub fn links(&self) -> &BTreeSet<TileId> { self.links.links() }
    pub fn animations(&self) -> &AnimationScheduler { &self.animations }

    // Takes over links that the page was rendered with, so that they are cleared on the next
    // relink like any other.
    pub fn adopt_existing_links(&mut self) {
        let board = &self.board;
        let linked = scan_tiles(board).into_iter().filter(|&tile| board.is_tile_linked(tile));
        self.links.adopt(linked.collect::<Vec<_>>());
    }

    pub fn begin_setup(&mut self) -> RequestSeq { self.sequencer.issue() }

    // `None` if the tile is not clickable right now.
    pub fn on_tile_clicked(&mut self, tile: TileId) -> Option<ActionRequest> {
        if !self.links.is_linked(tile) {
            log::debug!("Ignoring click on unlinked tile {}", tile);
            return None;
        }
        let phase = self.turn.current();
        log::debug!("Clicked {} during {:?}", tile, phase);
        Some(ActionRequest { seq: self.sequencer.issue(), tile, phase })
    }

    pub fn apply_response(&mut self, seq: RequestSeq, bundle: &CommandBundle) -> ApplyOutcome {
        match self.sequencer.accept(seq) {
            ResponseVerdict::Apply => ApplyOutcome::Applied(self.apply(bundle)),
            ResponseVerdict::ApplyChangesOnly => {
                log::warn!("Stale response to request #{}: skipping snapshot commands", seq.value());
                ApplyOutcome::AppliedStale(self.apply(&bundle.changes_only()))
            }
        }
    }

    // Applies a bundle that is not tied to a request, e.g. one typed in by hand.
    pub fn apply(&mut self, bundle: &CommandBundle) -> Vec<CommandName> {
        CommandDispatcher::dispatch(bundle, DispatchTargets {
            board: &mut self.board,
            turn: &mut self.turn,
            links: &mut self.links,
            animations: &mut self.animations,
        })
    }

    // Returns the number of animations still running.
    pub fn tick_animations(&mut self) -> usize { self.animations.tick(&mut self.board) }

    pub fn finish_animations(&mut self, max_ticks: usize) -> usize {
        self.animations.run_to_completion(&mut self.board, max_ticks)
    }

    pub fn cancel_animations(&mut self) { self.animations.cancel_all(); }
}
