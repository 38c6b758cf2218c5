//! Day cursor state machine
//!
//! The cursor is fractional so that half speed still advances: the visible
//! day index is the floor of the cursor. Playing ticks arrive from an
//! external timer and carry the token issued when playback started, which
//! lets a pause cancel ticks that were already queued.

use super::speed::Speed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    #[default]
    Paused,
    Playing,
}

/// Identifies one run of the playback timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    TogglePlay,
    /// Timer fired for the run identified by the token
    Tick(TickToken),
    /// Jump to a day index; out-of-range values are clamped
    Scrub(i64),
    SetSpeed(Speed),
}

/// What an event changed, so the caller knows what to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub index_changed: bool,
    pub mode_changed: bool,
    pub speed_changed: bool,
    /// Set when the event started playback; the timer must tick with it
    pub started: Option<TickToken>,
}

#[derive(Debug, Clone)]
pub struct Playback {
    length: usize,
    position: f64,
    mode: PlaybackMode,
    speed: Speed,
    token: u32,
}

impl Playback {
    /// Paused at day 0; `length` is raised to 1 if zero
    pub fn new(length: usize, speed: Speed) -> Self {
        Self {
            length: length.max(1),
            position: 0.0,
            mode: PlaybackMode::Paused,
            speed,
            token: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn last_index(&self) -> usize {
        self.length - 1
    }

    /// Current day index, always in `[0, length - 1]`
    pub fn index(&self) -> usize {
        (self.position.floor() as usize).min(self.last_index())
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Token of the current (or most recent) playing run
    pub fn token(&self) -> TickToken {
        TickToken(self.token)
    }

    /// The single entry point for every state change
    pub fn apply(&mut self, event: PlaybackEvent) -> Transition {
        match event {
            PlaybackEvent::Play => self.play(),
            PlaybackEvent::Pause => self.pause(),
            PlaybackEvent::TogglePlay => {
                if self.is_playing() {
                    self.pause()
                } else {
                    self.play()
                }
            }
            PlaybackEvent::Tick(token) => self.tick(token),
            PlaybackEvent::Scrub(index) => self.scrub(index),
            PlaybackEvent::SetSpeed(speed) => {
                let changed = speed != self.speed;
                self.speed = speed;
                Transition {
                    speed_changed: changed,
                    ..Default::default()
                }
            }
        }
    }

    fn play(&mut self) -> Transition {
        if self.is_playing() {
            return Transition::default();
        }
        self.mode = PlaybackMode::Playing;
        self.token = self.token.wrapping_add(1);
        Transition {
            mode_changed: true,
            started: Some(TickToken(self.token)),
            ..Default::default()
        }
    }

    fn pause(&mut self) -> Transition {
        if !self.is_playing() {
            return Transition::default();
        }
        self.mode = PlaybackMode::Paused;
        Transition {
            mode_changed: true,
            ..Default::default()
        }
    }

    fn tick(&mut self, token: TickToken) -> Transition {
        if !self.is_playing() || token.0 != self.token {
            return Transition::default();
        }

        let before = self.index();
        let next = self.position + self.speed.multiplier();
        self.position = if next > self.last_index() as f64 { 0.0 } else { next };

        Transition {
            index_changed: self.index() != before,
            ..Default::default()
        }
    }

    fn scrub(&mut self, index: i64) -> Transition {
        let before = self.index();
        let clamped = index.clamp(0, self.last_index() as i64);
        self.position = clamped as f64;
        Transition {
            index_changed: self.index() != before,
            ..Default::default()
        }
    }
}
