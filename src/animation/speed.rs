/// Playback speed multiplier, in days per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Half,
    #[default]
    Normal,
    Double,
    Quadruple,
}

impl Speed {
    /// Every speed, in the order the controls are laid out
    pub const ALL: [Speed; 4] = [Speed::Half, Speed::Normal, Speed::Double, Speed::Quadruple];

    pub fn multiplier(self) -> f64 {
        match self {
            Speed::Half => 0.5,
            Speed::Normal => 1.0,
            Speed::Double => 2.0,
            Speed::Quadruple => 4.0,
        }
    }

    /// Exact lookup; anything outside the four supported values is `None`
    pub fn from_multiplier(multiplier: f64) -> Option<Speed> {
        Self::ALL
            .into_iter()
            .find(|s| (s.multiplier() - multiplier).abs() < 1e-9)
    }

    /// Position of this speed's control
    pub fn control_index(self) -> usize {
        match self {
            Speed::Half => 0,
            Speed::Normal => 1,
            Speed::Double => 2,
            Speed::Quadruple => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Half => "0.5x",
            Speed::Normal => "1x",
            Speed::Double => "2x",
            Speed::Quadruple => "4x",
        }
    }
}
