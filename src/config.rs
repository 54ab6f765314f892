//! Run configuration and the named speed presets.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::ParseError;

/// Smallest array the controller will generate.
pub const MIN_ARRAY_SIZE: usize = 5;

/// Largest array the controller will generate.
pub const MAX_ARRAY_SIZE: usize = 200;

pub const DEFAULT_ARRAY_SIZE: usize = 50;

/// Bogo sort gives up after this many shuffles.
pub const DEFAULT_MAX_SHUFFLE_ATTEMPTS: u32 = 1000;

pub fn clamp_array_size(size: usize) -> usize {
    size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE)
}

/// Named delay presets offered by the presentation layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    VeryFast,
    UltraFast,
}

impl Speed {
    pub const ALL: [Speed; 5] = [
        Speed::Slow,
        Speed::Normal,
        Speed::Fast,
        Speed::VeryFast,
        Speed::UltraFast,
    ];

    pub const fn millis(self) -> u64 {
        match self {
            Speed::Slow => 100,
            Speed::Normal => 50,
            Speed::Fast => 25,
            Speed::VeryFast => 10,
            Speed::UltraFast => 5,
        }
    }

    pub const fn delay(self) -> Duration {
        Duration::from_millis(self.millis())
    }

    pub const fn label(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
            Speed::VeryFast => "Very Fast",
            Speed::UltraFast => "Ultra Fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a preset name into its delay. Raw milliseconds are accepted as well, which is why this
/// yields a `Duration` rather than a `Speed`.
pub fn parse_delay(s: &str) -> Result<Duration, ParseError> {
    let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");

    let speed = match normalized.as_str() {
        "slow" => Speed::Slow,
        "normal" => Speed::Normal,
        "fast" => Speed::Fast,
        "very-fast" => Speed::VeryFast,
        "ultra-fast" => Speed::UltraFast,
        other => {
            return other
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ParseError::InvalidSpeed(s.to_string()));
        }
    };

    Ok(speed.delay())
}

impl FromStr for Speed {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let delay = parse_delay(s)?;
        Speed::ALL
            .into_iter()
            .find(|speed| speed.delay() == delay)
            .ok_or_else(|| ParseError::InvalidSpeed(s.to_string()))
    }
}

/// Caller-supplied settings, fixed for the duration of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Minimum pause per `tick`.
    pub step_delay: Duration,
    /// Retry budget for randomized algorithms.
    pub max_shuffle_attempts: u32,
    /// Used by the controller whenever it generates a new array.
    pub array_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            step_delay: Speed::default().delay(),
            max_shuffle_attempts: DEFAULT_MAX_SHUFFLE_ATTEMPTS,
            array_size: DEFAULT_ARRAY_SIZE,
        }
    }
}

impl RunConfig {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_speed(self, speed: Speed) -> Self {
        self.with_delay(speed.delay())
    }

    pub fn with_array_size(mut self, size: usize) -> Self {
        self.array_size = clamp_array_size(size);
        self
    }

    pub fn with_max_shuffle_attempts(mut self, attempts: u32) -> Self {
        self.max_shuffle_attempts = attempts;
        self
    }

    /// Defaults, overridden by `SORT_ANIM_SPEED`, `SORT_ANIM_DELAY_MS`, `SORT_ANIM_SIZE` and
    /// `SORT_ANIM_BOGO_ATTEMPTS` when set. Values that don't parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("SORT_ANIM_SPEED") {
            match raw.parse::<Speed>() {
                Ok(speed) => config.step_delay = speed.delay(),
                Err(err) => warn!(%err, "ignoring SORT_ANIM_SPEED"),
            }
        }

        // An explicit delay wins over a preset.
        if let Some(raw) = lookup("SORT_ANIM_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.step_delay = Duration::from_millis(ms),
                Err(err) => warn!(value = %raw, %err, "ignoring SORT_ANIM_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("SORT_ANIM_SIZE") {
            match raw.trim().parse::<usize>() {
                Ok(size) => config.array_size = clamp_array_size(size),
                Err(err) => warn!(value = %raw, %err, "ignoring SORT_ANIM_SIZE"),
            }
        }

        if let Some(raw) = lookup("SORT_ANIM_BOGO_ATTEMPTS") {
            match raw.trim().parse::<u32>() {
                Ok(attempts) => config.max_shuffle_attempts = attempts,
                Err(err) => warn!(value = %raw, %err, "ignoring SORT_ANIM_BOGO_ATTEMPTS"),
            }
        }

        config
    }
}
