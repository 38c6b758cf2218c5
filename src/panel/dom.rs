use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use super::view::PanelView;
use crate::animation::Speed;

/// Element ids the embedded page uses for the panel and controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub current_date: &'static str,
    pub info_date: &'static str,
    pub info_day: &'static str,
    pub info_cases: &'static str,
    pub info_deaths: &'static str,
    pub info_affected: &'static str,
    pub slider: &'static str,
    pub play_button: &'static str,
    /// Speed buttons are `{prefix}{control_index}`
    pub speed_button_prefix: &'static str,
    pub error: &'static str,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            current_date: "current-date",
            info_date: "info-date",
            info_day: "info-day",
            info_cases: "info-cases",
            info_deaths: "info-deaths",
            info_affected: "info-affected",
            slider: "timeline",
            play_button: "play-btn",
            speed_button_prefix: "speed-btn-",
            error: "globe-error",
        }
    }
}

pub const PLAY_LABEL: &str = "\u{25B6} Play";
pub const PAUSE_LABEL: &str = "\u{23F8} Pause";

/// Writes panel state into the host document.
///
/// Missing elements are skipped, so a page may embed only part of the panel.
pub struct DomPanel {
    document: Document,
    ids: ElementIds,
}

impl DomPanel {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ids: ElementIds::default(),
        }
    }

    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn slider(&self) -> Option<HtmlInputElement> {
        self.element(self.ids.slider)?.dyn_into::<HtmlInputElement>().ok()
    }

    /// Write every panel field and move the slider to the shown day
    pub fn render(&self, view: &PanelView) {
        self.set_text(self.ids.current_date, &view.date);
        self.set_text(self.ids.info_date, &view.date);
        self.set_text(self.ids.info_day, &view.day_text());
        self.set_text(self.ids.info_cases, &view.cases_text());
        self.set_text(self.ids.info_deaths, &view.deaths_text());
        if let Some(text) = view.affected_text() {
            self.set_text(self.ids.info_affected, &text);
        }
        if let Some(slider) = self.slider() {
            slider.set_value(&view.day.to_string());
        }
    }

    pub fn set_slider_range(&self, last_index: usize) {
        if let Some(slider) = self.slider() {
            slider.set_min("0");
            slider.set_max(&last_index.to_string());
        }
    }

    pub fn set_playing(&self, playing: bool) {
        let label = if playing { PAUSE_LABEL } else { PLAY_LABEL };
        self.set_text(self.ids.play_button, label);
    }

    /// Mark exactly one speed control active
    pub fn set_active_speed(&self, active: Speed) {
        for speed in Speed::ALL {
            let id = format!("{}{}", self.ids.speed_button_prefix, speed.control_index());
            if let Some(el) = self.element(&id) {
                let classes = el.class_list();
                let result = if speed == active {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
                if result.is_err() {
                    crate::console_warn!("could not update class list of #{}", id);
                }
            }
        }
    }

    /// Show a message in place of the globe
    pub fn show_error(&self, message: &str) {
        match self.element(self.ids.error) {
            Some(el) => {
                el.set_text_content(Some(message));
                if el.remove_attribute("hidden").is_err() {
                    crate::console_warn!("could not unhide #{}", self.ids.error);
                }
            }
            None => crate::log::error(message),
        }
    }
}
