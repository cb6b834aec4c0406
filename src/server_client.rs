use std::cell::RefCell;

use async_trait::async_trait;

use crate::board::BoardView;
use crate::command::CommandBundle;
use crate::coord::TileId;
use crate::error::ClientError;
use crate::session::{ApplyOutcome, GameSession};
use crate::turn::TurnPhase;


pub const SETUP_PATH: &str = "/js/on_load_setup/";


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
    MoveTo,
    RemoveAt,
}

impl ActionKind {
    pub fn for_phase(phase: TurnPhase) -> Self {
        match phase {
            TurnPhase::MoveTurn => ActionKind::MoveTo,
            TurnPhase::TileRemovalTurn => ActionKind::RemoveAt,
        }
    }

    pub fn path(self, tile: TileId) -> String {
        match self {
            ActionKind::MoveTo => format!("/js/move_to/{tile}"),
            ActionKind::RemoveAt => format!("/js/remove_at/{tile}"),
        }
    }
}


// Sends a body-less POST and returns the response body. Implementations report non-2xx statuses
// as `ClientError::Http`. Single-threaded: futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post(&self, path: &str) -> Result<String, ClientError>;
}

// The two requests the game client ever makes. No retries: a failed request leaves the session
// exactly as it was.
pub struct ServerClient<T: HttpTransport> {
    transport: T,
    path_prefix: String,
}

impl<T: HttpTransport> ServerClient<T> {
    pub fn new(transport: T, path_prefix: impl Into<String>) -> Self {
        let path_prefix = path_prefix.into().trim_end_matches('/').to_owned();
        ServerClient { transport, path_prefix }
    }

    pub fn transport(&self) -> &T { &self.transport }

    pub async fn fetch_setup(&self) -> Result<CommandBundle, ClientError> {
        self.request(SETUP_PATH).await
    }

    pub async fn send_action(
        &self, tile: TileId, phase: TurnPhase,
    ) -> Result<CommandBundle, ClientError> {
        self.request(&ActionKind::for_phase(phase).path(tile)).await
    }

    async fn request(&self, path: &str) -> Result<CommandBundle, ClientError> {
        let path = format!("{}{}", self.path_prefix, path);
        log::debug!("POST {}", path);
        let body = self.transport.post(&path).await?;
        CommandBundle::from_json_str(&body).map_err(|message| ClientError::Parse { path, message })
    }
}


// Round trip helpers. Session borrows are never held across an await, so clicks and animation
// ticks keep working while a request is in flight.

pub async fn run_setup<B: BoardView, T: HttpTransport>(
    client: &ServerClient<T>, session: &RefCell<GameSession<B>>,
) -> Result<ApplyOutcome, ClientError> {
    let seq = session.borrow_mut().begin_setup();
    let bundle = client.fetch_setup().await.inspect_err(log_failure)?;
    Ok(session.borrow_mut().apply_response(seq, &bundle))
}

// `Ok(None)` if the tile was not clickable.
pub async fn run_click<B: BoardView, T: HttpTransport>(
    client: &ServerClient<T>, session: &RefCell<GameSession<B>>, tile: TileId,
) -> Result<Option<ApplyOutcome>, ClientError> {
    let Some(request) = session.borrow_mut().on_tile_clicked(tile) else {
        return Ok(None);
    };
    let bundle = client.send_action(request.tile, request.phase).await.inspect_err(log_failure)?;
    Ok(Some(session.borrow_mut().apply_response(request.seq, &bundle)))
}

fn log_failure(err: &ClientError) { log::warn!("{}", err); }


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_depends_on_phase() {
        let tile = TileId::new(4, 2);
        assert_eq!(ActionKind::for_phase(TurnPhase::MoveTurn).path(tile), "/js/move_to/4,2");
        assert_eq!(
            ActionKind::for_phase(TurnPhase::TileRemovalTurn).path(tile),
            "/js/remove_at/4,2"
        );
        assert_eq!(ActionKind::for_phase(TurnPhase::default()), ActionKind::MoveTo);
    }
}
