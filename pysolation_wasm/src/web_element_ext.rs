use pysolation_client::coord::Position;
use wasm_bindgen::JsCast;

use crate::rust_error;
use crate::web_document::web_window;
use crate::web_error_handling::JsResult;


pub trait WebElementExt {
    fn has_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, on: bool) -> JsResult<()>;

    fn html_element(&self) -> JsResult<&web_sys::HtmlElement>;
    fn set_style(&self, property: &str, value: &str) -> JsResult<()>;

    // Top-left corner in document coordinates, rounded to whole pixels.
    fn page_position(&self) -> Position;
}

impl WebElementExt for web_sys::Element {
    fn has_class(&self, class: &str) -> bool { self.class_list().contains(class) }

    fn set_class(&self, class: &str, on: bool) -> JsResult<()> {
        self.class_list().toggle_with_force(class, on)?;
        Ok(())
    }

    fn html_element(&self) -> JsResult<&web_sys::HtmlElement> {
        self.dyn_ref::<web_sys::HtmlElement>()
            .ok_or_else(|| rust_error!("Element \"{}\" is not an HTML element", self.id()))
    }

    fn set_style(&self, property: &str, value: &str) -> JsResult<()> {
        self.html_element()?.style().set_property(property, value)
    }

    // Client rects are relative to the viewport. Adding the scroll offset keeps animations in
    // place on a scrolled page.
    fn page_position(&self) -> Position {
        let rect = self.get_bounding_client_rect();
        let (scroll_x, scroll_y) = web_window()
            .and_then(|w| Ok((w.scroll_x()?, w.scroll_y()?)))
            .unwrap_or((0.0, 0.0));
        Position::new(
            (rect.left() + scroll_x).round() as i32,
            (rect.top() + scroll_y).round() as i32,
        )
    }
}
