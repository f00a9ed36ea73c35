mod format;

pub use format::format_calories;

use serde::Serialize;

/// Calories per minute per MET per kilogram.
const KCAL_FACTOR: f64 = 0.0175;

/// Accrues calories one elapsed second at a time.
///
/// The per-second amount is added on every tick rather than recomputed from
/// the elapsed total, so long sessions carry the usual float drift.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieAccumulator {
    intensity: f64,
    body_weight_kg: f64,
    calories_burned: f64,
    ticks: u64,
}

impl CalorieAccumulator {
    pub fn new(intensity: f64, body_weight_kg: f64) -> Self {
        Self {
            intensity,
            body_weight_kg,
            calories_burned: 0.0,
            ticks: 0,
        }
    }

    pub fn calories_per_minute(&self) -> f64 {
        KCAL_FACTOR * self.intensity * self.body_weight_kg
    }

    pub fn calories_per_second(&self) -> f64 {
        self.calories_per_minute() / 60.0
    }

    /// Add one second's worth. Returns the new total.
    pub fn tick(&mut self) -> f64 {
        self.calories_burned += self.calories_per_second();
        self.ticks += 1;
        self.calories_burned
    }

    pub fn calories_burned(&self) -> f64 {
        self.calories_burned
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn body_weight_kg(&self) -> f64 {
        self.body_weight_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_minute_matches_per_minute_rate() {
        let mut acc = CalorieAccumulator::new(3.5, 80.2);
        for _ in 0..60 {
            acc.tick();
        }
        let expected = 0.0175 * 3.5 * 80.2;
        assert!((acc.calories_burned() - expected).abs() < 1e-9);
        assert!((acc.calories_burned() - 4.912).abs() < 1e-3);
        assert_eq!(acc.ticks(), 60);
    }

    #[test]
    fn totals_never_decrease() {
        let mut acc = CalorieAccumulator::new(8.0, 55.0);
        let mut last = acc.calories_burned();
        for _ in 0..600 {
            let now = acc.tick();
            assert!(now > last);
            last = now;
        }
    }

    #[test]
    fn zero_intensity_burns_nothing() {
        let mut acc = CalorieAccumulator::new(0.0, 80.0);
        acc.tick();
        assert_eq!(acc.calories_burned(), 0.0);
    }
}
