use crate::dom;
use crate::hud::{self, StatusLine};
use web_sys as web;

const MENU_ID: &str = "menu-overlay";
const HUD_ID: &str = "hud";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MENU_ID) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MENU_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(MENU_ID) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Flip the small always-on status strip.
pub fn toggle_hud(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        let visible = el.get_attribute("data-visible").as_deref() != Some("0");
        _ = el.set_attribute("data-visible", if visible { "0" } else { "1" });
        _ = el.set_attribute("style", if visible { "display:none" } else { "" });
    }
}

/// Refresh the play button, status line and track meters.
pub fn update(document: &web::Document, status: &StatusLine, pulses: &[f32]) {
    dom::set_text(document, "menu-play", hud::play_button_label(status.playing));
    let line = hud::format_status(status);
    dom::set_text(document, "menu-status", &line);
    dom::set_text(document, HUD_ID, &line);
    dom::set_inner_html(document, "menu-tracks", &hud::meter_html(pulses));
}
