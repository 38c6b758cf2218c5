//! One render session: the frozen timeline plus all mutable view state.
//!
//! The session knows nothing about WebGL or the DOM, so every interaction
//! path can be exercised natively. The wasm entry object owns one session
//! and mirrors its state into the page.

use std::cell::OnceCell;

use serde::Serialize;

use crate::animation::{Playback, PlaybackEvent, Speed, Transition};
use crate::config::SessionConfig;
use crate::data::{generate, time_seed, validate_cities, City, DailyRecord, Timeline, TimelineSummary};
use crate::error::{GlobeError, Result};
use crate::interaction::{MarkerPicker, Ray, RotationController};
use crate::math::Mat4;
use crate::panel::PanelView;
use crate::particles::StarField;
use crate::scene::{GlobeScene, GLOBE_RADIUS, STAR_COUNT, STAR_EXTENT};

/// Session knobs that do not affect the data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub tick_interval_ms: u32,
    pub initial_speed: Speed,
    pub star_seed: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30,
            initial_speed: Speed::Normal,
            star_seed: 0,
        }
    }
}

/// What the pointer is over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverInfo {
    pub name: String,
    pub onset_day: Option<usize>,
}

pub struct RenderSession {
    timeline: Timeline,
    cities: Vec<City>,
    origin: Option<String>,
    scene: GlobeScene,
    playback: Playback,
    rotation: RotationController,
    picker: MarkerPicker,
    stars: StarField,
    options: SessionOptions,
    panel: PanelView,
    series_json: OnceCell<String>,
}

impl RenderSession {
    pub fn new(
        timeline: Timeline,
        cities: Vec<City>,
        origin: Option<&str>,
        options: SessionOptions,
    ) -> Result<Self> {
        validate_cities(&cities)?;
        if options.tick_interval_ms == 0 {
            return Err(GlobeError::InvalidPlayback(
                "tick interval must be at least 1 ms".to_string(),
            ));
        }

        let origin_city = match origin {
            None => None,
            Some(name) => Some(
                cities
                    .iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| GlobeError::UnknownOrigin(name.to_string()))?,
            ),
        };

        let scene = GlobeScene::new(&cities, origin_city);
        let playback = Playback::new(timeline.len(), options.initial_speed);
        let panel = panel_for(&timeline, &scene, cities.len(), 0);

        crate::console_log!(
            "session ready: {} days, {} cities, origin {}",
            timeline.len(),
            cities.len(),
            origin.unwrap_or("none")
        );

        Ok(Self {
            timeline,
            cities,
            origin: origin.map(str::to_string),
            scene,
            playback,
            rotation: RotationController::new(),
            picker: MarkerPicker::new(GLOBE_RADIUS),
            stars: StarField::new(STAR_COUNT, STAR_EXTENT, options.star_seed),
            options,
            panel,
            series_json: OnceCell::new(),
        })
    }

    /// Generate a timeline from a validated config and build the session
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(time_seed);
        let timeline = generate(&config.generator_params(), seed)?;
        let options = SessionOptions {
            tick_interval_ms: config.playback.tick_interval_ms,
            initial_speed: config.initial_speed()?,
            star_seed: seed,
        };

        Self::new(
            timeline,
            config.cities.clone(),
            config.origin_city.as_deref(),
            options,
        )
    }

    /// Build from the serialized series and city list embedded in a page
    pub fn from_json(
        series_json: &str,
        cities_json: &str,
        origin: Option<&str>,
        options: SessionOptions,
    ) -> Result<Self> {
        let timeline = Timeline::from_json(series_json)?;
        let cities: Vec<City> = serde_json::from_str(cities_json)?;
        Self::new(timeline, cities, origin, options)
    }

    /// Apply a playback event; the panel is refreshed before this returns
    pub fn dispatch(&mut self, event: PlaybackEvent) -> Transition {
        let transition = self.playback.apply(event);
        if transition.index_changed {
            self.refresh_panel();
        }
        if transition.mode_changed {
            crate::console_log!(
                "playback {} at day {}",
                if self.playback.is_playing() { "started" } else { "paused" },
                self.playback.index()
            );
        }
        transition
    }

    fn refresh_panel(&mut self) {
        self.panel = panel_for(
            &self.timeline,
            &self.scene,
            self.cities.len(),
            self.playback.index(),
        );
    }

    pub fn panel(&self) -> &PanelView {
        &self.panel
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn current_index(&self) -> usize {
        self.playback.index()
    }

    pub fn current_record(&self) -> &DailyRecord {
        self.timeline.clamped(self.playback.index() as i64)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// City the outbreak starts from, when onset is tracked
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.options.tick_interval_ms
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.rotation.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.rotation.pointer_move(x, y)
    }

    pub fn pointer_up(&mut self) {
        self.rotation.pointer_up();
    }

    /// Advance per-frame state and return the globe model matrix to draw with
    pub fn frame(&mut self) -> Mat4 {
        self.rotation.advance_frame();
        self.rotation.model_matrix()
    }

    pub fn globe_model(&self) -> Mat4 {
        self.rotation.model_matrix()
    }

    /// Marker under a canvas pixel, if any is visible there.
    ///
    /// Nothing is reported while the globe is being dragged.
    pub fn hover(&self, x: f32, y: f32, width: f32, height: f32, time_ms: f64) -> Option<HoverInfo> {
        if self.rotation.is_dragging() {
            return None;
        }
        let camera = &self.scene.camera;
        let ray = Ray::from_screen(
            x,
            y,
            width,
            height,
            &camera.view(),
            &camera.projection(width / height.max(1.0)),
            camera.position,
        );

        let targets = self.scene.marker_targets(&self.globe_model(), time_ms);
        let hit = self.picker.pick(&ray, &targets)?;
        let marker = &self.scene.markers()[hit.city_index];

        Some(HoverInfo {
            name: marker.name.clone(),
            onset_day: marker.onset_day,
        })
    }

    /// The ordered series as JSON, serialized once per session
    pub fn series_json(&self) -> Result<&str> {
        if let Some(json) = self.series_json.get() {
            return Ok(json.as_str());
        }
        let json = self.timeline.to_json()?;
        Ok(self.series_json.get_or_init(|| json).as_str())
    }

    pub fn cities_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.cities)?)
    }

    pub fn summary(&self) -> TimelineSummary {
        self.timeline.summary(self.cities.len())
    }
}

fn panel_for(timeline: &Timeline, scene: &GlobeScene, city_count: usize, day: usize) -> PanelView {
    let tracks_onset = scene.markers().iter().any(|m| m.onset_day.is_some());
    let affected = tracks_onset.then(|| (scene.affected_count(day), city_count));
    PanelView::new(timeline.clamped(day as i64), day, affected)
}
