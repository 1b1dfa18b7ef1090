use std::fmt;
use std::str::FromStr;
use thiserror::Error;

lazy_static::lazy_static! {
    /// Regex matching a rule string in `B3/S23` notation.
    static ref BS_RULE_REGEX: regex::Regex =
        regex::Regex::new(r"^[Bb]([0-8]*)/?[Ss]([0-8]*)$").unwrap();
}

/// Error encountered while parsing a rule string.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("expected a rule like \"B3/S23\"; got {0:?}")]
    BadRuleString(String),
}

/// A 2-state totalistic 2D range-1 Moore-neighborhood rule.
///
/// Each table is indexed by the number of live neighbors (0 to 8).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LifeRule {
    birth: [bool; 9],
    survival: [bool; 9],
}
impl Default for LifeRule {
    fn default() -> Self {
        LIFE
    }
}

impl FromStr for LifeRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, RuleError> {
        let captures = BS_RULE_REGEX
            .captures(s.trim())
            .ok_or_else(|| RuleError::BadRuleString(s.to_owned()))?;
        let mut conditions = [[false; 9]; 2];
        for (table, group) in conditions.iter_mut().zip(1..=2) {
            for digit in captures[group].bytes() {
                table[(digit - b'0') as usize] = true;
            }
        }
        Ok(Self {
            birth: conditions[0],
            survival: conditions[1],
        })
    }
}
impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for i in 0..=8 {
            if self.birth[i] {
                write!(f, "{}", i)?;
            }
        }
        write!(f, "/S")?;
        for i in 0..=8 {
            if self.survival[i] {
                write!(f, "{}", i)?;
            }
        }
        Ok(())
    }
}

impl LifeRule {
    /// Returns the next state of a cell, given its current state and the
    /// number of live cells adjacent to it.
    #[inline]
    pub fn next_state(&self, alive: bool, live_neighbors: usize) -> bool {
        if alive {
            self.survival[live_neighbors]
        } else {
            self.birth[live_neighbors]
        }
    }
}

/// Conway's Game of Life: a live cell survives with 2 or 3 live neighbors and
/// a dead cell is born with exactly 3.
pub const LIFE: LifeRule = LifeRule {
    birth: [false, false, false, true, false, false, false, false, false],
    survival: [false, false, true, true, false, false, false, false, false],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_transitions() {
        for n in 0..=8 {
            assert_eq!(n == 2 || n == 3, LIFE.next_state(true, n), "survival {}", n);
            assert_eq!(n == 3, LIFE.next_state(false, n), "birth {}", n);
        }
    }

    #[test]
    fn test_rule_strings() {
        assert_eq!("B3/S23", LIFE.to_string());
        assert_eq!(Ok(LIFE), "B3/S23".parse());
        assert_eq!(Ok(LIFE), "b3s23".parse());

        let highlife: LifeRule = "B36/S23".parse().unwrap();
        assert!(highlife.next_state(false, 6));
        assert!(!highlife.next_state(true, 6));
        assert_eq!("B36/S23", highlife.to_string());

        let seeds: LifeRule = "B2/S".parse().unwrap();
        assert_eq!("B2/S", seeds.to_string());

        assert_eq!(
            Err(RuleError::BadRuleString("B9/S23".to_owned())),
            "B9/S23".parse::<LifeRule>()
        );
        assert!("23/3".parse::<LifeRule>().is_err());
    }
}
