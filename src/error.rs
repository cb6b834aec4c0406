use std::fmt;

use crate::command::CommandName;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TileIdError {
    MissingSeparator(String),
    BadCoordinate(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PlayerIdError(pub String);

// A single command in a bundle could not be interpreted. The rest of the bundle still applies.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandError {
    pub command: CommandName,
    pub message: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClientError {
    // Request did not complete: connection refused, DNS, timeout, etc.
    Transport { path: String, message: String },
    // Server answered with a non-success status.
    Http { path: String, status: u16 },
    // Response body is not a JSON object.
    Parse { path: String, message: String },
}

impl fmt::Display for TileIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TileIdError::MissingSeparator(s) => write!(f, "tile id \"{s}\" must look like \"x,y\""),
            TileIdError::BadCoordinate(s) => write!(f, "tile id \"{s}\" has a bad coordinate"),
        }
    }
}

impl fmt::Display for PlayerIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "player id \"{}\" must look like \"player_N\" or \"N\"", self.0)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &'static str = self.command.into();
        write!(f, "cannot apply \"{}\": {}", name, self.message)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Transport { path, message } => {
                write!(f, "request to {path} failed: {message}")
            }
            ClientError::Http { path, status } => {
                write!(f, "request to {path} returned status {status}")
            }
            ClientError::Parse { path, message } => {
                write!(f, "cannot parse response from {path}: {message}")
            }
        }
    }
}

impl std::error::Error for TileIdError {}
impl std::error::Error for PlayerIdError {}
impl std::error::Error for CommandError {}
impl std::error::Error for ClientError {}
