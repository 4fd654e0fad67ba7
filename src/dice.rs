use crate::common::*;
use crate::error::InvalidConfiguration;
use crate::roll::{RollContext, Roller, SecureRoller};
use std::fmt;

/// The most dice a single [MultiDie] may roll.
pub const MAX_MULTIPLIER: UInt = 1000;

pub(crate) const SUPPORTED_SIDES: &str = "4, 6, 8, 10, 12, 20, 100";

/// One of the supported polyhedral dice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum DieType {
    D4 = 4,
    D6 = 6,
    D8 = 8,
    D10 = 10,
    D12 = 12,
    D20 = 20,
    D100 = 100,
}

impl DieType {
    pub const ALL: [Self; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    pub const fn sides(self) -> UInt {
        self as UInt
    }

    /// Rolls the die once using the operating system's secure random source.
    pub fn roll(self) -> DieRoll {
        self.roll_with(&mut SecureRoller::default())
    }

    pub fn roll_with<R: Roller>(self, roller: &mut R) -> DieRoll {
        RollContext::new(roller).roll_die(self)
    }
}

impl TryFrom<UInt> for DieType {
    type Error = InvalidConfiguration;

    fn try_from(sides: UInt) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|die| die.sides() == sides)
            .ok_or(InvalidConfiguration::UnsupportedSides { sides })
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.sides())
    }
}

/// The face shown by one physical die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DieRoll {
    die: DieType,
    value: UInt,
}

impl DieRoll {
    pub(crate) fn new(die: DieType, value: UInt) -> Self {
        assert!(
            (1..=die.sides()).contains(&value),
            "rolled {} on a {}",
            value,
            die
        );
        Self { die, value }
    }

    pub fn die(&self) -> DieType {
        self.die
    }

    pub fn value(&self) -> UInt {
        self.value
    }

    pub fn is_max(&self) -> bool {
        self.value == self.die.sides()
    }

    /// Splits a D100 face into the tens and ones dice that would show it.
    ///
    /// A roll of 100 reads as `00` and `0`.
    pub fn percentile(&self) -> Option<(UInt, UInt)> {
        match self.die {
            DieType::D100 if self.value == 100 => Some((0, 0)),
            DieType::D100 => Some((self.value / 10 * 10, self.value % 10)),
            _ => None,
        }
    }
}

/// `multiplier` dice of the same type, rolled together and summed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MultiDie {
    die: DieType,
    multiplier: UInt,
}

impl MultiDie {
    pub fn new(die: DieType, multiplier: UInt) -> Result<Self, InvalidConfiguration> {
        if multiplier < 1 {
            Err(InvalidConfiguration::MultiplierTooSmall(multiplier))
        } else if multiplier > MAX_MULTIPLIER {
            Err(InvalidConfiguration::MultiplierTooLarge(multiplier))
        } else {
            Ok(Self { die, multiplier })
        }
    }

    pub const fn single(die: DieType) -> Self {
        Self { die, multiplier: 1 }
    }

    pub fn die(&self) -> DieType {
        self.die
    }

    pub fn multiplier(&self) -> UInt {
        self.multiplier
    }

    pub fn roll(&self) -> MultiDieRoll {
        self.roll_with(&mut SecureRoller::default())
    }

    pub fn roll_with<R: Roller>(&self, roller: &mut R) -> MultiDieRoll {
        RollContext::new(roller).roll_multi_die(self)
    }
}

impl From<DieType> for MultiDie {
    fn from(die: DieType) -> Self {
        Self::single(die)
    }
}

impl fmt::Display for MultiDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiplier != 1 {
            write!(f, "{}", self.multiplier)?;
        }
        write!(f, "{}", self.die)
    }
}

impl std::str::FromStr for MultiDie {
    type Err = crate::parse::DieParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_multi_die(s)
    }
}

/// Every face rolled for one [MultiDie]. The total is always derived from the faces.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MultiDieRoll {
    dice: NonEmpty<DieRoll>,
}

impl MultiDieRoll {
    pub(crate) fn new(dice: NonEmpty<DieRoll>) -> Self {
        Self { dice }
    }

    pub fn dice(&self) -> &[DieRoll] {
        self.dice.as_slice()
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// The face of the only die rolled, if exactly one was.
    pub fn single(&self) -> Option<&DieRoll> {
        match self.dice.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn total(&self) -> Int {
        self.dice.iter().map(|d| Int::from(d.value)).sum()
    }
}
