pub mod city;
pub mod generator;
pub mod record;

pub use city::{City, default_cities, validate_cities};
pub use generator::{GeneratorParams, Phase, generate, time_seed};
pub use record::{DailyRecord, Timeline, TimelineSummary};
