//! Synthetic cumulative case/death series
//!
//! Each day draws new cases from an exponential distribution whose mean
//! depends on the phase the day falls in; deaths are a fixed fraction of
//! new cases. The series is a pure function of its parameters and seed.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::record::{DailyRecord, Timeline};
use crate::error::{GlobeError, Result};

/// A stretch of days sharing one mean daily-new-case rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// First day index (inclusive) the phase applies to
    pub start_day: usize,
    /// Mean of the exponential draw for new cases per day
    pub mean_daily_cases: f64,
}

impl Phase {
    pub const fn new(start_day: usize, mean_daily_cases: f64) -> Self {
        Self {
            start_day,
            mean_daily_cases,
        }
    }
}

/// Inputs to the generator
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    pub sequence_length: usize,
    pub start_date: NaiveDate,
    pub phases: Vec<Phase>,
    pub death_rate: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            start_date: default_start_date(),
            phases: default_phases(),
            death_rate: DEFAULT_DEATH_RATE,
        }
    }
}

pub const DEFAULT_SEQUENCE_LENGTH: usize = 2195;
pub const DEFAULT_DEATH_RATE: f64 = 0.009;

pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Outbreak, first year, second year, long tail
pub fn default_phases() -> Vec<Phase> {
    vec![
        Phase::new(0, 500.0),
        Phase::new(60, 50_000.0),
        Phase::new(365, 100_000.0),
        Phase::new(730, 200_000.0),
    ]
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<()> {
        if self.sequence_length == 0 {
            return Err(GlobeError::EmptySequence);
        }

        self.start_date
            .checked_add_days(Days::new(self.sequence_length as u64 - 1))
            .ok_or(GlobeError::DateOverflow {
                start: self.start_date,
                length: self.sequence_length,
            })?;

        validate_phases(&self.phases)?;

        if !self.death_rate.is_finite() || !(0.0..=1.0).contains(&self.death_rate) {
            return Err(GlobeError::InvalidDeathRate(self.death_rate));
        }

        Ok(())
    }

    /// Mean daily new cases for a given day index
    pub fn mean_for_day(&self, day: usize) -> f64 {
        self.phases
            .iter()
            .rev()
            .find(|phase| phase.start_day <= day)
            .map(|phase| phase.mean_daily_cases)
            .unwrap_or(0.0)
    }
}

fn validate_phases(phases: &[Phase]) -> Result<()> {
    let first = phases
        .first()
        .ok_or_else(|| GlobeError::InvalidPhases("at least one phase is required".to_string()))?;

    if first.start_day != 0 {
        return Err(GlobeError::InvalidPhases(format!(
            "first phase must start on day 0, not day {}",
            first.start_day
        )));
    }

    for pair in phases.windows(2) {
        if pair[1].start_day <= pair[0].start_day {
            return Err(GlobeError::InvalidPhases(format!(
                "phase starting on day {} does not come after day {}",
                pair[1].start_day, pair[0].start_day
            )));
        }
    }

    for phase in phases {
        if !phase.mean_daily_cases.is_finite() || phase.mean_daily_cases <= 0.0 {
            return Err(GlobeError::InvalidPhases(format!(
                "phase starting on day {} has mean {}, expected a positive number",
                phase.start_day, phase.mean_daily_cases
            )));
        }
    }

    Ok(())
}

/// Generate a fresh timeline from `params` and `seed`
pub fn generate(params: &GeneratorParams, seed: u64) -> Result<Timeline> {
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(params.sequence_length);
    let mut total_cases = 0.0f64;
    let mut total_deaths = 0.0f64;
    let mut date = params.start_date;

    for day in 0..params.sequence_length {
        let daily_cases = sample_exponential(&mut rng, params.mean_for_day(day));

        total_cases += daily_cases;
        total_deaths += daily_cases * params.death_rate;

        records.push(DailyRecord {
            date,
            cumulative_cases: total_cases as u64,
            cumulative_deaths: total_deaths as u64,
        });

        // validate() already proved the whole range is representable
        date = date.succ_opt().unwrap_or(date);
    }

    Ok(Timeline::from_validated(records))
}

/// Inverse-CDF draw from an exponential distribution with the given mean
fn sample_exponential<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> f64 {
    // gen::<f64>() is in [0, 1), so 1 - u is in (0, 1] and ln never sees 0
    let u: f64 = rng.gen();
    -mean * (1.0 - u).ln()
}

/// Seed derived from the wall clock, for production sessions
pub fn time_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}
