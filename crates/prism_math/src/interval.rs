/// A closed range of ray parameters or channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Parameters strictly beyond `bias`, unbounded above.
    pub fn beyond(bias: f64) -> Interval {
        Interval::new(bias, f64::INFINITY)
    }

    /// The unit interval [0, 1], used for channel and coefficient ranges.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
