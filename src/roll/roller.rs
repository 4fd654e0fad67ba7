use crate::common::UInt;
use crate::dice::DieType;
use rand::{
    distributions::{DistIter, Distribution, Uniform},
    Rng,
};

/// The operating system's cryptographically secure random source.
pub type SecureRoller = rand::rngs::OsRng;

/// A source of die faces.
pub trait Roller {
    type RollIter<'a>: Iterator<Item = UInt> + 'a
    where
        Self: 'a;

    fn roll(&mut self, die: DieType) -> UInt;

    fn roll_iter(&mut self, num: usize, die: DieType) -> Self::RollIter<'_>;
}

impl<R: Rng> Roller for R {
    type RollIter<'a> = std::iter::Take<DistIter<Uniform<UInt>, &'a mut Self, UInt>>
    where
        Self: 'a;

    fn roll(&mut self, die: DieType) -> UInt {
        self.gen_range(1..=die.sides())
    }

    fn roll_iter(&mut self, num: usize, die: DieType) -> Self::RollIter<'_> {
        Uniform::new_inclusive(1, die.sides())
            .sample_iter(self)
            .take(num)
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
