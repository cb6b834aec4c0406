// Test utilities that cannot be moved to the "tests" folder, because the console client uses them.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use crate::coord::{BoardExtent, PlayerId, TileId};
use crate::error::ClientError;
use crate::memory_board::MemoryBoard;
use crate::server_client::HttpTransport;


// Board size used by the reference server when it starts a new game.
pub const SAMPLE_BOARD_EXTENT: BoardExtent = BoardExtent { width: 5, height: 6 };

// Two players on opposite corners.
pub fn sample_board() -> MemoryBoard {
    MemoryBoard::new(SAMPLE_BOARD_EXTENT)
        .with_player(PlayerId(1), TileId::new(0, 0))
        .with_player(PlayerId(2), TileId::new(4, 5))
}


// Scripted server. Responses are served per path in FIFO order; every request is recorded.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<HashMap<String, VecDeque<Result<String, ClientError>>>>,
    requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self { Self::default() }

    pub fn respond(&self, path: &str, body: impl Into<String>) {
        self.push(path, Ok(body.into()));
    }
    pub fn fail(&self, path: &str, error: ClientError) { self.push(path, Err(error)); }

    pub fn requests(&self) -> Vec<String> { self.requests.borrow().clone() }

    fn push(&self, path: &str, response: Result<String, ClientError>) {
        self.responses
            .borrow_mut()
            .entry(path.to_owned())
            .or_default()
            .push_back(response);
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn post(&self, path: &str) -> Result<String, ClientError> {
        self.requests.borrow_mut().push(path.to_owned());
        let response = self.responses.borrow_mut().get_mut(path).and_then(VecDeque::pop_front);
        response.unwrap_or_else(|| Err(ClientError::Http { path: path.to_owned(), status: 404 }))
    }
}
