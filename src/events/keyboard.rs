use crate::dom;
use crate::input::is_panel_toggle;
use web_sys as web;

// 'H' shows/hides the parameter panel
pub fn wire_panel_toggle_h(window: &web::Window, document: &web::Document) {
    let doc = document.clone();
    dom::add_listener(window, "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        if is_panel_toggle(&ev.key()) {
            crate::overlay::toggle(&doc);
            log::info!("[panel] hidden={}", crate::overlay::is_hidden(&doc));
            ev.prevent_default();
        }
    });
}
