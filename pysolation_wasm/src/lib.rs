#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod web_board;
mod web_document;
mod web_element_ext;
mod web_logger;

pub mod web_error_handling;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Interval;
use pysolation_client::config::ClientConfig;
use pysolation_client::coord::TileId;
use pysolation_client::http_transport::ReqwestTransport;
use pysolation_client::server_client::{ServerClient, run_click, run_setup};
use pysolation_client::session::GameSession;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use web_board::WebBoard;
use web_document::{web_document, web_window};
use web_error_handling::{JsResult, set_panic_hook};


// The client is single-threaded, so wrapping all mutable singletons in `thread_local!` seems ok.
thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

struct App {
    client: ServerClient<ReqwestTransport>,
    session: RefCell<GameSession<WebBoard>>,
    // Runs only while there is something to animate.
    ticker: RefCell<Option<Interval>>,
    tick_millis: u32,
    stopped: Cell<bool>,
}

impl App {
    fn ensure_ticking(self: &Rc<Self>) {
        if self.stopped.get()
            || self.ticker.borrow().is_some()
            || self.session.borrow().animations().is_idle()
        {
            return;
        }
        let app = Rc::clone(self);
        let interval = Interval::new(self.tick_millis, move || {
            let remaining = app.session.borrow_mut().tick_animations();
            if remaining == 0 {
                app.ticker.borrow_mut().take();
            }
        });
        *self.ticker.borrow_mut() = Some(interval);
    }

    // Requests still in flight may complete afterwards, but they no longer animate anything.
    fn shut_down(&self) {
        self.stopped.set(true);
        self.ticker.borrow_mut().take();
        self.session.borrow_mut().cancel_animations();
    }
}

fn with_app(f: impl FnOnce(&Rc<App>)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            f(app);
        }
    });
}

fn on_tile_clicked(tile: TileId) {
    with_app(|app| {
        let app = Rc::clone(app);
        spawn_local(async move {
            // Errors are already logged, and the board is left as it was.
            if let Ok(Some(_)) = run_click(&app.client, &app.session, tile).await {
                app.ensure_ticking();
            }
        });
    });
}

// Entry point, called by the page once the board is rendered. `config_json` is a serialized
// `ClientConfig`; unspecified fields take their defaults.
#[wasm_bindgen]
pub fn start_client(config_json: &str) -> JsResult<()> {
    set_panic_hook();
    web_logger::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let mut config = ClientConfig::from_json(config_json)
        .map_err(|err| rust_error!("Invalid client config: {}", err))?;
    if config.server_address.is_empty() {
        config.server_address = web_window()?.location().origin()?;
    }
    let transport = ReqwestTransport::new(&config.server_address, config.request_timeout)
        .map_err(|err| rust_error!("Invalid server address {}: {}", config.server_address, err))?;

    let mut board = WebBoard::new(web_document()?, config.board_extent, Rc::new(on_tile_clicked));
    board.strip_anchor_links();
    let mut session = GameSession::new(board, config.response_ordering);
    session.adopt_existing_links();

    let app = Rc::new(App {
        client: ServerClient::new(transport, config.path_prefix.clone()),
        session: RefCell::new(session),
        ticker: RefCell::new(None),
        tick_millis: u32::try_from(config.animation_tick.as_millis()).unwrap_or(u32::MAX).max(1),
        stopped: Cell::new(false),
    });
    stop_client();
    APP.with(|cell| *cell.borrow_mut() = Some(Rc::clone(&app)));
    log::info!("Client started against {}", config.server_address);

    spawn_local(async move {
        if run_setup(&app.client, &app.session).await.is_ok() {
            app.ensure_ticking();
        }
    });
    Ok(())
}

// Stops animating and detaches the client from the page. Safe to call when nothing is running.
#[wasm_bindgen]
pub fn stop_client() {
    if let Some(app) = APP.with(|cell| cell.borrow_mut().take()) {
        app.shut_down();
        log::info!("Client stopped");
    }
}
