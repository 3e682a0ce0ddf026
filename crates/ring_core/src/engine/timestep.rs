/// timestep.rs
/// Fixed simulation step and the monotonic bout clock.
///
/// Every cooldown, stun window, knockdown hold and round length is measured
/// against `SimClock::now()`. Time is derived from the tick count so it does
/// not drift over long training runs.

/// Default physics step (50 Hz)
pub const DEFAULT_FIXED_DT: f32 = 0.02;

/// Lower bound used wherever dt appears in a denominator
pub const MIN_DT: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    tick: u64,
    dt: f32,
}

impl SimClock {
    pub fn new(dt: f32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { DEFAULT_FIXED_DT };
        Self { tick: 0, dt }
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// dt for divisions
    #[inline]
    pub fn safe_dt(&self) -> f32 {
        self.dt.max(MIN_DT)
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn now(&self) -> f32 {
        (self.tick as f64 * self.dt as f64) as f32
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DT)
    }
}
