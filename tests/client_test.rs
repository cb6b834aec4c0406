mod common;

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use pysolation_client::command::CommandName;
use pysolation_client::coord::PlayerId;
use pysolation_client::error::ClientError;
use pysolation_client::memory_board::MemoryBoard;
use pysolation_client::sequence::ResponseOrdering;
use pysolation_client::server_client::{ServerClient, run_click, run_setup};
use pysolation_client::session::{ApplyOutcome, GameSession};
use pysolation_client::test_util::{FakeTransport, sample_board};
use pysolation_client::turn::TurnPhase;
use serde_json::json;

use common::*;


const SETUP: &str = "/js/on_load_setup/";

fn removal_phase_session(ordering: ResponseOrdering) -> RefCell<GameSession<MemoryBoard>> {
    let mut session = GameSession::new(sample_board(), ordering);
    session.apply(&bundle(json!({ "change_turn": true, "link_tiles": ["1,1", "2,2", "3,3"] })));
    RefCell::new(session)
}

#[async_std::test]
async fn setup_links_tiles() {
    let transport = FakeTransport::new();
    transport.respond(SETUP, r#"{"link_tiles": ["0,1", "1,0", "1,1"]}"#);
    let client = ServerClient::new(transport, "");
    let session = RefCell::new(sample_session());
    let outcome = run_setup(&client, &session).await.unwrap();
    assert_eq!(outcome, ApplyOutcome::Applied(vec![CommandName::LinkTiles]));
    assert_eq!(
        session.borrow().board().linked_tiles(),
        tile_set(&[tile!(0, 1), tile!(1, 0), tile!(1, 1)])
    );
    assert_eq!(client.transport().requests(), vec![SETUP.to_owned()]);
}

#[async_std::test]
async fn click_in_move_turn_moves() {
    let transport = FakeTransport::new();
    transport.respond(SETUP, r#"{"link_tiles": ["1,1"]}"#);
    transport.respond(
        "/js/move_to/1,1",
        r#"{"move_player": ["player_1", "1,1"], "change_turn": true, "link_tiles": ["2,2"]}"#,
    );
    let client = ServerClient::new(transport, "");
    let session = RefCell::new(sample_session());
    run_setup(&client, &session).await.unwrap();
    let outcome = run_click(&client, &session, tile!(1, 1)).await.unwrap();
    assert!(matches!(outcome, Some(ApplyOutcome::Applied(_))));
    let mut session = session.into_inner();
    assert_eq!(session.turn_phase(), TurnPhase::TileRemovalTurn);
    session.finish_animations(1000);
    assert_eq!(session.board().player_tile(PlayerId(1)), Some(tile!(1, 1)));
}

#[async_std::test]
async fn clicks_in_removal_turn_hit_removal_path() {
    let transport = FakeTransport::new();
    transport.respond("/js/remove_at/2,2", r#"{"remove_tile": ["2,2"]}"#);
    transport.respond("/js/remove_at/3,3", r#"{"remove_tile": ["3,3"]}"#);
    let client = ServerClient::new(transport, "");
    let session = removal_phase_session(ResponseOrdering::AsReceived);
    run_click(&client, &session, tile!(2, 2)).await.unwrap();
    run_click(&client, &session, tile!(3, 3)).await.unwrap();
    assert_eq!(client.transport().requests(), vec![
        "/js/remove_at/2,2".to_owned(),
        "/js/remove_at/3,3".to_owned(),
    ]);
}

#[async_std::test]
async fn racing_clicks_use_phase_at_click_time() {
    let transport = FakeTransport::new();
    transport.respond("/js/remove_at/2,2", r#"{"remove_tile": ["2,2"], "change_turn": true}"#);
    transport.respond("/js/remove_at/3,3", r#"{"remove_tile": ["3,3"]}"#);
    let client = ServerClient::new(transport, "");
    let session = removal_phase_session(ResponseOrdering::AsReceived);

    // Both clicks happen before either response arrives.
    let first = session.borrow_mut().on_tile_clicked(tile!(2, 2)).unwrap();
    let second = session.borrow_mut().on_tile_clicked(tile!(3, 3)).unwrap();
    assert_eq!(first.phase, TurnPhase::TileRemovalTurn);
    assert_eq!(second.phase, TurnPhase::TileRemovalTurn);

    // Responses complete in reverse order.
    let second_bundle = client.send_action(second.tile, second.phase).await.unwrap();
    let first_bundle = client.send_action(first.tile, first.phase).await.unwrap();
    assert_eq!(client.transport().requests(), vec![
        "/js/remove_at/3,3".to_owned(),
        "/js/remove_at/2,2".to_owned(),
    ]);

    let mut session = session.into_inner();
    assert!(matches!(session.apply_response(second.seq, &second_bundle), ApplyOutcome::Applied(_)));
    assert!(matches!(session.apply_response(first.seq, &first_bundle), ApplyOutcome::Applied(_)));
    session.finish_animations(100);
    assert_eq!(session.board().hidden_tiles(), tile_set(&[tile!(2, 2), tile!(3, 3)]));
}

#[test]
fn stale_response_still_applies_changes() {
    let mut session = removal_phase_session(ResponseOrdering::DropStale).into_inner();
    let first = session.on_tile_clicked(tile!(2, 2)).unwrap();
    let second = session.on_tile_clicked(tile!(3, 3)).unwrap();
    assert_eq!(session.apply_response(second.seq, &bundle(json!({}))), ApplyOutcome::Applied(vec![]));
    let outcome = session.apply_response(
        first.seq,
        &bundle(json!({ "remove_tile": ["2,2"], "change_turn": true, "link_tiles": ["1,1"] })),
    );
    assert_eq!(outcome, ApplyOutcome::AppliedStale(vec![CommandName::RemoveTile, CommandName::ChangeTurn]));
    assert_eq!(session.turn_phase(), TurnPhase::MoveTurn);
    session.finish_animations(100);
    assert_eq!(session.board().hidden_tiles(), tile_set(&[tile!(2, 2)]));
    // The stale snapshot of linked tiles is not applied.
    assert!(session.board().linked_tiles().contains(&tile!(3, 3)));
}

#[async_std::test]
async fn failed_request_leaves_state_alone() {
    let transport = FakeTransport::new();
    transport.respond("/js/remove_at/1,1", "<html>Server Error</html>");
    transport.fail("/js/remove_at/2,2", ClientError::Transport {
        path: "/js/remove_at/2,2".to_owned(),
        message: "connection refused".to_owned(),
    });
    let client = ServerClient::new(transport, "");
    let session = removal_phase_session(ResponseOrdering::DropStale);

    let err = run_click(&client, &session, tile!(1, 1)).await.unwrap_err();
    assert!(matches!(err, ClientError::Parse { .. }));
    let err = run_click(&client, &session, tile!(2, 2)).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
    let err = run_click(&client, &session, tile!(3, 3)).await.unwrap_err();
    assert_eq!(err, ClientError::Http { path: "/js/remove_at/3,3".to_owned(), status: 404 });

    let session = session.into_inner();
    assert_eq!(session.turn_phase(), TurnPhase::TileRemovalTurn);
    assert_eq!(session.links(), &tile_set(&[tile!(1, 1), tile!(2, 2), tile!(3, 3)]));
    // Requests are never retried.
    assert_eq!(client.transport().requests().len(), 3);
}

#[async_std::test]
async fn unlinked_click_sends_nothing() {
    let client = ServerClient::new(FakeTransport::new(), "");
    let session = RefCell::new(sample_session());
    assert_eq!(run_click(&client, &session, tile!(1, 1)).await.unwrap(), None);
    assert!(client.transport().requests().is_empty());
}

#[async_std::test]
async fn path_prefix_is_prepended() {
    let transport = FakeTransport::new();
    transport.respond("/game/abc123/js/on_load_setup/", "{}");
    let client = ServerClient::new(transport, "/game/abc123/");
    let bundle = client.fetch_setup().await.unwrap();
    assert!(bundle.is_empty());
}
