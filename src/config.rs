use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, Coords, GridInt};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: GridInt,
    pub rows: GridInt,
    pub start_length: usize,

    /// Step interval at score zero, in milliseconds.
    pub base_step_ms: f64,
    /// Floor for the step interval.
    pub min_step_ms: f64,
    /// The interval shrinks by `speedup_ms` once per `speedup_every` points.
    pub speedup_every: u32,
    pub speedup_ms: f64,

    pub normal_points: u32,
    pub bonus_points: u32,
    /// Probability that a freshly spawned food is the bonus kind.
    pub bonus_chance: f64,

    /// Smallest tile size in surface pixels, even if the board overflows.
    pub min_tile: f64,
    pub min_stroke: f64,
    pub min_corner_radius: f64,
    /// Consecutive body points further apart than `tile * wrap_jump_factor`
    /// on either axis are drawn as separate segments.
    pub wrap_jump_factor: f64,

    pub frame_ms: u64,
    pub star_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cols: 40,
            rows: 24,
            start_length: 7,
            base_step_ms: 95.0,
            min_step_ms: 45.0,
            speedup_every: 80,
            speedup_ms: 3.0,
            normal_points: 10,
            bonus_points: 30,
            bonus_chance: 0.16,
            min_tile: 2.0,
            min_stroke: 1.0,
            min_corner_radius: 0.5,
            wrap_jump_factor: 1.6,
            frame_ms: 16,
            star_count: 160,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < 4 || self.rows < 4 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 4x4, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.start_length < 3 || self.start_length as GridInt > self.cols / 2 {
            return Err(ConfigError::Invalid(format!(
                "start length {} must be between 3 and half the grid width",
                self.start_length
            )));
        }
        if !self.base_step_ms.is_finite()
            || !(self.min_step_ms > 0.0)
            || self.base_step_ms < self.min_step_ms
        {
            return Err(ConfigError::Invalid(format!(
                "step interval must satisfy 0 < min ({}) <= base ({})",
                self.min_step_ms, self.base_step_ms
            )));
        }
        if self.speedup_every == 0 {
            return Err(ConfigError::Invalid("speedup_every must be positive".into()));
        }
        // A negative decrement would slow the game down as the score rises.
        if !(self.speedup_ms >= 0.0) || !self.speedup_ms.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "speedup_ms {} must be a non-negative number",
                self.speedup_ms
            )));
        }
        // Neighbouring cells sit one tile apart and must never count as a wrap.
        if !(self.wrap_jump_factor > 1.0) || !self.wrap_jump_factor.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "wrap_jump_factor {} must be greater than 1",
                self.wrap_jump_factor
            )));
        }
        if !(self.min_stroke >= 0.0) || !(self.min_corner_radius >= 0.0) {
            return Err(ConfigError::Invalid("stroke and corner minimums must not be negative".into()));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.bonus_chance) {
            return Err(ConfigError::Invalid(format!(
                "bonus chance {} is not a probability",
                self.bonus_chance
            )));
        }
        if !(self.min_tile > 0.0) {
            return Err(ConfigError::Invalid("min_tile must be positive".into()));
        }
        Ok(())
    }

    pub fn dims(&self) -> Coords {
        (self.cols, self.rows)
    }

    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Step interval for a given score. Non-increasing in `score`, never
    /// below `min_step_ms`.
    pub fn step_interval_ms(&self, score: u32) -> f64 {
        let steps = (score / self.speedup_every) as f64;
        (self.base_step_ms - steps * self.speedup_ms).max(self.min_step_ms)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
