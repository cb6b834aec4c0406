use serde::{Deserialize, Serialize};
use strum::EnumIter;


// Which class of action a click on a linked tile produces.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, EnumIter, Serialize, Deserialize)]
pub enum TurnPhase {
    // Initial phase: the page is loaded before anybody moved.
    #[default]
    MoveTurn,
    TileRemovalTurn,
}

impl TurnPhase {
    pub fn next(self) -> Self {
        match self {
            TurnPhase::MoveTurn => TurnPhase::TileRemovalTurn,
            TurnPhase::TileRemovalTurn => TurnPhase::MoveTurn,
        }
    }
}


// The only place where `TurnPhase` changes. Driven exclusively by `change_turn` commands.
#[derive(Clone, Debug, Default)]
pub struct TurnStateMachine {
    phase: TurnPhase,
}

impl TurnStateMachine {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> TurnPhase { self.phase }

    pub fn toggle(&mut self) -> TurnPhase {
        self.phase = self.phase.next();
        match self.phase {
            TurnPhase::MoveTurn => log::info!("Change to player-move turn"),
            TurnPhase::TileRemovalTurn => log::info!("Change to tile-remove turn"),
        }
        self.phase
    }
}


#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn next_is_an_involution() {
        for phase in TurnPhase::iter() {
            assert_ne!(phase.next(), phase);
            assert_eq!(phase.next().next(), phase);
        }
    }

    #[test]
    fn starts_with_move_turn() {
        assert_eq!(TurnStateMachine::new().current(), TurnPhase::MoveTurn);
    }

    #[test]
    fn toggle_parity() {
        let mut turn = TurnStateMachine::new();
        assert_eq!(turn.toggle(), TurnPhase::TileRemovalTurn);
        assert_eq!(turn.toggle(), TurnPhase::MoveTurn);
        for _ in 0..7 {
            turn.toggle();
        }
        assert_eq!(turn.current(), TurnPhase::TileRemovalTurn);
    }
}
