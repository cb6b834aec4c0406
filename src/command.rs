use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::coord::{PlayerId, TileId};
use crate::error::CommandError;


// Commands the server may send back. Declaration order is the application order: link rebinding
// goes last so that the new clickable set reflects the state after the move/removal/turn change.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CommandName {
    MovePlayer,
    RemoveTile,
    ChangeTurn,
    SetActivePlayer,
    LinkTiles,
}

impl CommandName {
    pub fn as_str(self) -> &'static str { self.into() }

    // Snapshot commands replace a piece of state wholesale, so a newer one supersedes an older
    // one. All other commands are changes relative to the current state.
    pub fn is_snapshot(self) -> bool {
        match self {
            CommandName::SetActivePlayer | CommandName::LinkTiles => true,
            CommandName::MovePlayer | CommandName::RemoveTile | CommandName::ChangeTurn => false,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    MovePlayer { player: PlayerId, target: TileId },
    RemoveTiles(Vec<TileId>),
    ChangeTurn,
    SetActivePlayer(PlayerId),
    // Possibly empty: an empty list unlinks the whole board.
    LinkTiles(Vec<TileId>),
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Command::MovePlayer { .. } => CommandName::MovePlayer,
            Command::RemoveTiles(_) => CommandName::RemoveTile,
            Command::ChangeTurn => CommandName::ChangeTurn,
            Command::SetActivePlayer(_) => CommandName::SetActivePlayer,
            Command::LinkTiles(_) => CommandName::LinkTiles,
        }
    }

    // `None` when the command is absent for this turn (argument is `null`).
    fn from_json(name: CommandName, args: &Value) -> Result<Option<Command>, CommandError> {
        if args.is_null() {
            return Ok(None);
        }
        let command = match name {
            CommandName::MovePlayer => {
                let (player, target) = parse_args(name, args)?;
                Command::MovePlayer { player, target }
            }
            CommandName::RemoveTile => Command::RemoveTiles(parse_args(name, args)?),
            // Only presence matters.
            CommandName::ChangeTurn => Command::ChangeTurn,
            CommandName::SetActivePlayer => Command::SetActivePlayer(parse_args(name, args)?),
            CommandName::LinkTiles => Command::LinkTiles(parse_args(name, args)?),
        };
        Ok(Some(command))
    }
}

fn parse_args<T: DeserializeOwned>(command: CommandName, args: &Value) -> Result<T, CommandError> {
    T::deserialize(args).map_err(|err| CommandError {
        command,
        message: format!("{err} in {args}"),
    })
}


// Server response, interpreted. Holds at most one command of each kind, in application order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CommandBundle {
    commands: Vec<Command>,
    skipped: Vec<CommandError>,
}

impl CommandBundle {
    pub fn new(mut commands: Vec<Command>) -> Self {
        commands.sort_by_key(Command::name);
        commands.dedup_by_key(|c| c.name());
        CommandBundle { commands, skipped: Vec::new() }
    }

    // Fails only if the body is not a JSON object. Unknown keys are ignored; malformed arguments
    // drop just that command and are reported in `skipped`.
    pub fn from_json_str(body: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(body).map_err(|err| err.to_string())?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self, String> {
        let Some(object) = value.as_object() else {
            return Err(format!("expected a JSON object, got {value}"));
        };
        let mut bundle = CommandBundle::default();
        for name in CommandName::iter() {
            let Some(args) = object.get(name.as_str()) else {
                continue;
            };
            match Command::from_json(name, args) {
                Ok(Some(command)) => bundle.commands.push(command),
                Ok(None) => {}
                Err(err) => {
                    log::warn!("{}", err);
                    bundle.skipped.push(err);
                }
            }
        }
        Ok(bundle)
    }

    // The same bundle minus its snapshot commands.
    pub fn changes_only(&self) -> CommandBundle {
        CommandBundle {
            commands: self.commands.iter().filter(|c| !c.name().is_snapshot()).cloned().collect(),
            skipped: self.skipped.clone(),
        }
    }

    pub fn commands(&self) -> &[Command] { &self.commands }
    pub fn skipped(&self) -> &[CommandError] { &self.skipped }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_and_unknown_keys_are_ignored() {
        let bundle = CommandBundle::from_json(&json!({
            "change_turn": null,
            "remove_tile": null,
            "teleport": ["1,1"],
        }))
        .unwrap();
        assert!(bundle.is_empty());
        assert!(bundle.skipped().is_empty());
    }

    #[test]
    fn any_non_null_marker_changes_turn() {
        for marker in [json!(true), json!(false), json!(0), json!("yes"), json!([])] {
            let bundle = CommandBundle::from_json(&json!({ "change_turn": marker })).unwrap();
            assert_eq!(bundle.commands(), &[Command::ChangeTurn]);
        }
    }

    #[test]
    fn commands_follow_application_order() {
        let bundle = CommandBundle::from_json(&json!({
            "link_tiles": [],
            "change_turn": true,
            "move_player": ["player_1", "2,3"],
        }))
        .unwrap();
        let names: Vec<_> = bundle.commands().iter().map(Command::name).collect();
        assert_eq!(names, vec![
            CommandName::MovePlayer,
            CommandName::ChangeTurn,
            CommandName::LinkTiles
        ]);
    }

    #[test]
    fn malformed_command_is_skipped_alone() {
        let bundle = CommandBundle::from_json(&json!({
            "move_player": ["player_1"],
            "link_tiles": ["0,0", "0,1"],
        }))
        .unwrap();
        assert_eq!(bundle.commands(), &[Command::LinkTiles(vec![
            TileId::new(0, 0),
            TileId::new(0, 1)
        ])]);
        assert_eq!(bundle.skipped().len(), 1);
        assert_eq!(bundle.skipped()[0].command, CommandName::MovePlayer);
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(CommandBundle::from_json_str("[1, 2]").is_err());
        assert!(CommandBundle::from_json_str("<html>").is_err());
    }

    #[test]
    fn changes_only_drops_snapshots() {
        let bundle = CommandBundle::from_json(&json!({
            "link_tiles": ["1,1"],
            "set_active_player": 2,
            "remove_tile": ["2,2"],
            "change_turn": true,
        }))
        .unwrap();
        let names: Vec<_> = bundle.changes_only().commands().iter().map(Command::name).collect();
        assert_eq!(names, vec![CommandName::RemoveTile, CommandName::ChangeTurn]);
    }

    #[test]
    fn manual_bundle_is_reordered() {
        let bundle = CommandBundle::new(vec![
            Command::LinkTiles(vec![]),
            Command::RemoveTiles(vec![TileId::new(1, 1)]),
        ]);
        assert_eq!(bundle.commands()[0].name(), CommandName::RemoveTile);
    }
}
