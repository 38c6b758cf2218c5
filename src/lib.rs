use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod animation;
pub mod config;
pub mod data;
pub mod embed;
pub mod error;
pub mod interaction;
pub mod log;
pub mod math;
pub mod mesh;
pub mod panel;
pub mod particles;
pub mod render;
pub mod scene;
pub mod session;

pub use animation::{Playback, PlaybackEvent, PlaybackMode, Speed, TickToken, Transition};
pub use config::SessionConfig;
pub use data::{generate, City, DailyRecord, GeneratorParams, Timeline};
pub use embed::{render_document, EmbedOptions};
pub use error::{GlobeError, Result};
pub use session::{HoverInfo, RenderSession, SessionOptions};

use panel::DomPanel;
use render::GlobePipeline;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Build the standalone page for a YAML session config.
///
/// The timeline is generated here, so the page carries a fixed series and
/// the wasm engine only replays it.
#[wasm_bindgen]
pub fn render_embed(config_yaml: &str, module_url: &str) -> std::result::Result<String, JsValue> {
    let config = SessionConfig::from_yaml(config_yaml)?;
    let session = RenderSession::from_config(&config)?;
    let options = EmbedOptions::from_config(&config, module_url)?;
    Ok(render_document(&session, &options)?)
}

/// Globe engine state exposed to JavaScript
#[wasm_bindgen]
pub struct PandemicGlobe {
    session: RenderSession,
    pipeline: GlobePipeline,
    panel: Option<DomPanel>,
    hovered: Option<String>,
}

#[wasm_bindgen]
impl PandemicGlobe {
    /// Create the engine from the series and city JSON embedded in the page.
    ///
    /// On failure the page's error element is shown before the error is
    /// returned to the caller.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        series_json: &str,
        cities_json: &str,
        origin: Option<String>,
    ) -> std::result::Result<PandemicGlobe, JsValue> {
        let panel = web_sys::window()
            .and_then(|w| w.document())
            .map(DomPanel::new);

        let built = RenderSession::from_json(series_json, cities_json, origin.as_deref(), SessionOptions::default())
            .and_then(|session| {
                let pipeline = Self::create_pipeline(&canvas, &session)?;
                Ok((session, pipeline))
            });

        match built {
            Ok((session, pipeline)) => {
                let globe = Self {
                    session,
                    pipeline,
                    panel,
                    hovered: None,
                };
                globe.sync_all();
                Ok(globe)
            }
            Err(err) => {
                log::error(&err.to_string());
                if let Some(panel) = &panel {
                    panel.show_error(&err.to_string());
                }
                Err(err.into())
            }
        }
    }

    fn create_pipeline(
        canvas: &HtmlCanvasElement,
        session: &RenderSession,
    ) -> Result<GlobePipeline> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")
            .map_err(|_| GlobeError::Render("WebGL2 context request failed".to_string()))?
            .ok_or_else(|| GlobeError::Render("WebGL2 is not available".to_string()))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| GlobeError::Render("context is not WebGL2".to_string()))?;

        GlobePipeline::new(gl, width, height, session.stars()).map_err(GlobeError::Render)
    }

    fn sync_all(&self) {
        if let Some(panel) = &self.panel {
            panel.set_slider_range(self.session.timeline().last_index());
            panel.render(self.session.panel());
            panel.set_playing(self.session.playback().is_playing());
            panel.set_active_speed(self.session.playback().speed());
        }
    }

    fn sync(&self, transition: &Transition) {
        let Some(panel) = &self.panel else {
            return;
        };
        if transition.index_changed {
            panel.render(self.session.panel());
        }
        if transition.mode_changed {
            panel.set_playing(self.session.playback().is_playing());
        }
        if transition.speed_changed {
            panel.set_active_speed(self.session.playback().speed());
        }
    }

    fn dispatch(&mut self, event: PlaybackEvent) -> Transition {
        let transition = self.session.dispatch(event);
        self.sync(&transition);
        transition
    }

    /// Rotate and draw one frame
    #[wasm_bindgen]
    pub fn render(&mut self, time_ms: f64) {
        let model = self.session.frame();
        self.pipeline.render(self.session.scene(), &model, time_ms);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    /// Returns the token the tick timer must carry, or nothing when pausing
    #[wasm_bindgen]
    pub fn toggle_play(&mut self) -> Option<u32> {
        self.dispatch(PlaybackEvent::TogglePlay)
            .started
            .map(|token| token.0)
    }

    #[wasm_bindgen]
    pub fn play(&mut self) -> Option<u32> {
        self.dispatch(PlaybackEvent::Play).started.map(|token| token.0)
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.dispatch(PlaybackEvent::Pause);
    }

    /// Advance playback; ticks from a stale timer are ignored
    #[wasm_bindgen]
    pub fn tick(&mut self, token: u32) {
        self.dispatch(PlaybackEvent::Tick(TickToken(token)));
    }

    #[wasm_bindgen]
    pub fn scrub(&mut self, day: i32) {
        self.dispatch(PlaybackEvent::Scrub(day as i64));
    }

    #[wasm_bindgen]
    pub fn set_speed(&mut self, multiplier: f64) -> std::result::Result<(), JsValue> {
        let speed = Speed::from_multiplier(multiplier).ok_or_else(|| {
            GlobeError::InvalidPlayback(format!("unsupported speed {}", multiplier))
        })?;
        self.dispatch(PlaybackEvent::SetSpeed(speed));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.session.pointer_down(x, y);
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.pointer_move(x, y);
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    /// Handle mouse move for hover detection; returns a tooltip line
    #[wasm_bindgen]
    pub fn on_mouse_move(&mut self, x: f32, y: f32) -> Option<String> {
        let (width, height) = self.pipeline.size();
        let hit = self.session.hover(
            x,
            y,
            width as f32,
            height as f32,
            js_sys::Date::now(),
        );

        self.hovered = hit.as_ref().map(|h| h.name.clone());
        hit.map(|h| hover_label(&h))
    }

    #[wasm_bindgen]
    pub fn get_hovered_city(&self) -> Option<String> {
        self.hovered.clone()
    }

    #[wasm_bindgen]
    pub fn current_day(&self) -> usize {
        self.session.current_index()
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.session.playback().is_playing()
    }

    #[wasm_bindgen]
    pub fn tick_interval_ms(&self) -> u32 {
        self.session.tick_interval_ms()
    }

    #[wasm_bindgen]
    pub fn series_json(&self) -> std::result::Result<String, JsValue> {
        Ok(self.session.series_json()?.to_string())
    }

    #[wasm_bindgen]
    pub fn summary_json(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.session.summary())
            .map_err(|e| GlobeError::from(e).into())
    }
}

fn hover_label(hit: &HoverInfo) -> String {
    match hit.onset_day {
        Some(day) => format!("{} (reached on day {})", hit.name, panel::format_thousands(day as u64)),
        None => hit.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_label() {
        let with_onset = HoverInfo {
            name: "Milan".to_string(),
            onset_day: Some(1234),
        };
        assert_eq!(hover_label(&with_onset), "Milan (reached on day 1,234)");

        let plain = HoverInfo {
            name: "Lima".to_string(),
            onset_day: None,
        };
        assert_eq!(hover_label(&plain), "Lima");
    }

    #[test]
    fn test_render_embed_from_default_config() {
        let yaml = SessionConfig::default().to_yaml().unwrap();
        let html = render_embed(&yaml, "./pkg/pandemic_globe.js").unwrap();
        assert!(html.contains("PandemicGlobe"));
        assert!(html.contains("./pkg/pandemic_globe.js"));
    }
}
