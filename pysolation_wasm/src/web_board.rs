use std::collections::HashMap;
use std::rc::Rc;

use pysolation_client::board::{BoardView, scan_tiles};
use pysolation_client::coord::{BoardExtent, PlayerId, Position, TileId};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::web_document::WebDocument;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, log_js_error};


const LINK_CLASS: &str = "link";
const VISIBLE_CLASS: &str = "visible";
const HIDDEN_CLASS: &str = "hidden";
const ACTIVE_CLASS: &str = "active";

pub type ClickSink = Rc<dyn Fn(TileId)>;

// The server-rendered page. Tiles are elements with id "x,y", players are "player_N".
pub struct WebBoard {
    document: WebDocument,
    extent: Option<BoardExtent>,
    click_sink: ClickSink,
    // Dropping a closure invalidates it, so each linked tile owns its handler here.
    click_handlers: HashMap<TileId, Closure<dyn FnMut()>>,
}

impl WebBoard {
    pub fn new(document: WebDocument, extent: Option<BoardExtent>, click_sink: ClickSink) -> Self {
        WebBoard {
            document,
            extent,
            click_sink,
            click_handlers: HashMap::new(),
        }
    }

    fn tile_element(&self, tile: TileId) -> Option<web_sys::Element> {
        self.document.get_element_by_id(&tile.element_id())
    }
    fn player_element(&self, player: PlayerId) -> Option<web_sys::Element> {
        self.document.get_element_by_id(&player.element_id())
    }

    // The server renders legal targets as plain `<a href>` links inside tiles, so that the page
    // works without scripts. Replaces them with click handlers. Returns the tiles converted.
    pub fn strip_anchor_links(&mut self) -> Vec<TileId> {
        let mut stripped = Vec::new();
        for tile in scan_tiles(&*self) {
            let Some(element) = self.tile_element(tile) else {
                continue;
            };
            let anchors = element.get_elements_by_tag_name("a");
            if anchors.length() == 0 {
                continue;
            }
            // The collection is live: removing an anchor shifts the rest down.
            while let Some(anchor) = anchors.item(0) {
                anchor.remove();
            }
            self.set_tile_linked(tile, true);
            stripped.push(tile);
        }
        log::debug!("Stripped anchor links from {} tiles", stripped.len());
        stripped
    }

    fn bind_click(&mut self, tile: TileId, element: &web_sys::Element) -> JsResult<()> {
        if self.click_handlers.contains_key(&tile) {
            return Ok(());
        }
        let sink = Rc::clone(&self.click_sink);
        let closure = Closure::<dyn FnMut()>::new(move || sink(tile));
        element.html_element()?.set_onclick(Some(closure.as_ref().unchecked_ref()));
        self.click_handlers.insert(tile, closure);
        Ok(())
    }

    fn unbind_click(&mut self, element: &web_sys::Element, tile: TileId) -> JsResult<()> {
        element.html_element()?.set_onclick(None);
        self.click_handlers.remove(&tile);
        Ok(())
    }
}

impl BoardView for WebBoard {
    fn extent(&self) -> Option<BoardExtent> { self.extent }

    fn has_tile(&self, tile: TileId) -> bool { self.tile_element(tile).is_some() }
    fn has_player(&self, player: PlayerId) -> bool { self.player_element(player).is_some() }

    fn tile_position(&self, tile: TileId) -> Option<Position> {
        self.tile_element(tile).map(|e| e.page_position())
    }
    fn player_position(&self, player: PlayerId) -> Option<Position> {
        self.player_element(player).map(|e| e.page_position())
    }

    fn is_tile_visible(&self, tile: TileId) -> bool {
        self.tile_element(tile).is_some_and(|e| !e.has_class(HIDDEN_CLASS))
    }
    fn is_tile_linked(&self, tile: TileId) -> bool {
        self.tile_element(tile).is_some_and(|e| e.has_class(LINK_CLASS))
    }

    fn set_tile_linked(&mut self, tile: TileId, linked: bool) {
        let Some(element) = self.tile_element(tile) else {
            return;
        };
        log_js_error("Cannot update link", element.set_class(LINK_CLASS, linked));
        let result = if linked {
            self.bind_click(tile, &element)
        } else {
            self.unbind_click(&element, tile)
        };
        log_js_error("Cannot update click handler", result);
    }

    fn set_tile_opacity(&mut self, tile: TileId, opacity: f64) {
        if let Some(element) = self.tile_element(tile) {
            log_js_error("Cannot set opacity", element.set_style("opacity", &opacity.to_string()));
        }
    }

    fn hide_tile(&mut self, tile: TileId) {
        let Some(element) = self.tile_element(tile) else {
            return;
        };
        let result = element
            .set_style("opacity", "0")
            .and_then(|()| element.set_class(VISIBLE_CLASS, false))
            .and_then(|()| element.set_class(HIDDEN_CLASS, true));
        log_js_error("Cannot hide tile", result);
    }

    // Inside its tile a player would be painted under the tiles that come later in the document,
    // and z-index does not help. Moving it to the body keeps it on top.
    fn detach_player(&mut self, player: PlayerId) {
        let Some(element) = self.player_element(player) else {
            return;
        };
        let position = element.page_position();
        let result = self
            .document
            .body()
            .and_then(|body| body.append_child(&element))
            .and_then(|_| element.set_style("position", "absolute"));
        log_js_error("Cannot detach player", result);
        // Without this the player snaps to the corner of the body until the first tick.
        self.set_player_position(player, position);
    }

    fn set_player_position(&mut self, player: PlayerId, position: Position) {
        let Some(element) = self.player_element(player) else {
            return;
        };
        let result = element
            .set_style("left", &format!("{}px", position.x))
            .and_then(|()| element.set_style("top", &format!("{}px", position.y)));
        log_js_error("Cannot move player", result);
    }

    fn set_player_active(&mut self, player: PlayerId, active: bool) {
        if let Some(element) = self.player_element(player) {
            log_js_error("Cannot mark player", element.set_class(ACTIVE_CLASS, active));
        }
    }
}
