use crate::domain::model::{Catalog, Serial, SerialRange};
use crate::utils::error::{Result, SalvageError};

/// Source of uniform randomness for generation and allocation.
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers never pass zero.
    fn index_below(&mut self, len: usize) -> usize;

    /// Uniform value in `min..=max`.
    fn value_in(&mut self, min: u32, max: u32) -> u32;

    fn choose_uniform<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if options.is_empty() {
            return None;
        }
        options.get(self.index_below(options.len()))
    }

    /// Draws serials from `range` until one is not taken, giving up after
    /// `max_attempts` draws. At least one draw is always made.
    fn random_serial(
        &mut self,
        range: SerialRange,
        is_taken: impl Fn(Serial) -> bool,
        max_attempts: usize,
    ) -> Result<Serial>
    where
        Self: Sized,
    {
        if range.size() == 0 {
            return Err(SalvageError::InvalidConfigValueError {
                field: "generation.serial_range".to_string(),
                value: format!("{}..={}", range.min, range.max),
                reason: "min must not exceed max".to_string(),
            });
        }
        let max_attempts = max_attempts.max(1);
        for _ in 0..max_attempts {
            let candidate = Serial::new(self.value_in(range.min, range.max));
            if !is_taken(candidate) {
                return Ok(candidate);
            }
        }
        Err(SalvageError::SerialSpaceExhausted {
            attempts: max_attempts,
        })
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn index_below(&mut self, len: usize) -> usize {
        (**self).index_below(len)
    }

    fn value_in(&mut self, min: u32, max: u32) -> u32 {
        (**self).value_in(min, max)
    }
}

pub trait ConfigProvider {
    fn donor_count(&self) -> usize;
    fn recipient_count(&self) -> usize;
    fn serial_range(&self) -> SerialRange;
    fn catalog(&self) -> &Catalog;
    fn max_resample_attempts(&self) -> usize;
    fn max_serial_attempts(&self) -> usize;
    fn seed(&self) -> Option<u64>;
}
