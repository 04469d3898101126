use crate::grid::TickOutcome;

/// Something that advances in discrete steps of a (possibly changing)
/// interval.
pub trait Ticker {
    fn interval_ms(&self) -> f64;
    fn tick(&mut self) -> TickOutcome;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepReport {
    pub ticks: u32,
    pub leftover_ms: f64,
    pub terminated: bool,
}

#[derive(Debug, Default)]
pub struct StepScheduler {
    acc_ms: f64,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.acc_ms = 0.0;
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.acc_ms
    }

    /// Adds `elapsed_ms` and runs as many whole steps as fit. The interval is
    /// re-read before every step, so a speed-up takes effect mid-catch-up.
    /// Stops right after a step that collides.
    pub fn advance<T: Ticker>(&mut self, elapsed_ms: f64, ticker: &mut T) -> StepReport {
        self.acc_ms += elapsed_ms.max(0.0);

        let mut ticks = 0;
        let mut terminated = false;
        while self.acc_ms >= ticker.interval_ms() {
            self.acc_ms -= ticker.interval_ms();
            ticks += 1;
            if ticker.tick() == TickOutcome::Collided {
                terminated = true;
                break;
            }
        }

        StepReport { ticks, leftover_ms: self.acc_ms, terminated }
    }
}
