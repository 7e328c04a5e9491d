/// Integer types a [`SaturatingCounter`] can step.
pub trait Step: Copy + Ord {
    fn step_up(self) -> Self;
}

macro_rules! impl_step {
    ($($t:ty),*) => {
        $(impl Step for $t {
            #[inline]
            fn step_up(self) -> Self {
                self.saturating_add(1)
            }
        })*
    };
}

impl_step!(u16, u32, u64, usize);

/// Counter that climbs by one per increment and stops at `max`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SaturatingCounter<T> {
    value: T,
    min: T,
    max: T,
}

impl<T: Step> SaturatingCounter<T> {
    /// Starts at `min`.
    pub fn new(min: T, max: T) -> Self {
        debug_assert!(min <= max);
        Self { value: min, min, max }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    /// Steps once unless the ceiling is reached. Returns the new value.
    pub fn increment(&mut self) -> T {
        if self.value < self.max {
            self.value = self.value.step_up().min(self.max);
        }
        self.value
    }

    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.value >= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climbs_to_ceiling_in_range_steps() {
        let mut count = SaturatingCounter::new(53_000u32, 55_000);
        for _ in 0..2000 {
            count.increment();
        }
        assert_eq!(count.get(), 55_000);
        assert!(count.is_saturated());
    }

    #[test]
    fn stays_at_ceiling() {
        let mut count = SaturatingCounter::new(53_000u32, 55_000);
        for _ in 0..2500 {
            count.increment();
        }
        assert_eq!(count.increment(), 55_000);
    }

    #[test]
    fn single_step_from_start() {
        let mut count = SaturatingCounter::new(53_000u32, 55_000);
        assert_eq!(count.increment(), 53_001);
    }

    #[test]
    fn works_at_the_type_limit() {
        let mut count = SaturatingCounter::new(u16::MAX - 1, u16::MAX);
        assert_eq!(count.increment(), u16::MAX);
        assert_eq!(count.increment(), u16::MAX);
    }

    #[test]
    fn degenerate_range_never_moves() {
        let mut count = SaturatingCounter::new(7usize, 7);
        assert_eq!(count.increment(), 7);
        assert_eq!(count.min(), count.max());
    }
}
