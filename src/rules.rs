use std::{fmt, str::FromStr};

use thiserror::Error;

/// Birth and survival conditions, as lists of neighbor counts.
///
/// Counts are not validated: a value outside `0..=8` never matches and a
/// repeated value matches like a single one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// a live cell with one of these neighbor counts stays alive.
    pub survival: Vec<u8>,
    /// a dead cell with one of these neighbor counts becomes alive.
    pub birth: Vec<u8>,
}

impl Default for Rules {
    fn default() -> Self {
        Self::conway()
    }
}

impl Rules {
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        Self {
            survival: survival.to_vec(),
            birth: birth.to_vec(),
        }
    }

    /// B3/S23
    pub fn conway() -> Self {
        Self::new(&[3], &[2, 3])
    }

    /// B36/S23, has replicators
    pub fn highlife() -> Self {
        Self::new(&[3, 6], &[2, 3])
    }

    /// B2/S, every live cell dies each generation
    pub fn seeds() -> Self {
        Self::new(&[2], &[])
    }

    /// B3678/S34678, symmetric under inversion
    pub fn day_and_night() -> Self {
        Self::new(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    pub fn presets() -> Vec<(&'static str, Rules)> {
        vec![
            ("conway", Self::conway()),
            ("highlife", Self::highlife()),
            ("seeds", Self::seeds()),
            ("day-and-night", Self::day_and_night()),
        ]
    }

    /// Preset following the current rules in [`Rules::presets`], wrapping
    /// around. Rules that match no preset move to the first one.
    pub fn next_preset(&self) -> (&'static str, Rules) {
        let mut presets = Self::presets();
        let next = presets
            .iter()
            .position(|(_, rules)| rules == self)
            .map_or(0, |index| (index + 1) % presets.len());
        presets.swap_remove(next)
    }

    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survival.contains(&neighbors)
        } else {
            self.birth.contains(&neighbors)
        }
    }

    /// adds the count if missing, removes it otherwise. returns whether it is now present.
    pub fn toggle_survival(&mut self, count: u8) -> bool {
        toggle(&mut self.survival, count)
    }

    /// adds the count if missing, removes it otherwise. returns whether it is now present.
    pub fn toggle_birth(&mut self, count: u8) -> bool {
        toggle(&mut self.birth, count)
    }
}

fn toggle(counts: &mut Vec<u8>, count: u8) -> bool {
    if counts.contains(&count) {
        counts.retain(|&c| c != count);
        false
    } else {
        counts.push(count);
        true
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("expected two sections separated by '/', got {0:?}")]
    MissingSeparator(String),

    #[error("unknown section {0:?}, sections start with 'B' or 'S'")]
    UnknownSection(String),

    #[error("section '{0}' appears twice")]
    DuplicateSection(char),

    #[error("invalid neighbor count {found:?} in section '{section}'")]
    InvalidCount { section: char, found: char },
}

impl FromStr for Rules {
    type Err = RuleParseError;

    /// parses `B3/S23` notation, sections in either order, case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| RuleParseError::MissingSeparator(s.to_string()))?;

        let mut birth = None;
        let mut survival = None;
        for section in [first, second] {
            let mut chars = section.chars();
            let (name, slot) = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => ('B', &mut birth),
                Some('S') => ('S', &mut survival),
                _ => return Err(RuleParseError::UnknownSection(section.to_string())),
            };
            if slot.is_some() {
                return Err(RuleParseError::DuplicateSection(name));
            }
            let counts = chars
                .map(|c| match c.to_digit(10) {
                    Some(n) if n <= 8 => Ok(n as u8),
                    _ => Err(RuleParseError::InvalidCount {
                        section: name,
                        found: c,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            *slot = Some(counts);
        }

        Ok(Self {
            survival: survival.unwrap_or_default(),
            birth: birth.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for count in &self.birth {
            write!(f, "{count}")?;
        }
        write!(f, "/S")?;
        for count in &self.survival {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_transitions() {
        let rules = Rules::conway();
        assert!(!rules.next_state(true, 0));
        assert!(!rules.next_state(true, 1));
        assert!(rules.next_state(true, 2));
        assert!(rules.next_state(true, 3));
        assert!(!rules.next_state(true, 4));
        assert!(rules.next_state(false, 3));
        assert!(!rules.next_state(false, 2));
        assert!(!rules.next_state(false, 0));
    }

    #[test]
    fn out_of_range_counts_never_match() {
        let rules = Rules::new(&[3, 3, 42], &[2, 200]);
        assert!(rules.next_state(false, 3));
        assert!(!rules.next_state(false, 2));
        assert!(rules.next_state(true, 2));
        assert!(!rules.next_state(true, 8));
    }

    #[test]
    fn toggling_counts() {
        let mut rules = Rules::conway();
        assert!(!rules.toggle_survival(2));
        assert_eq!(rules.survival, vec![3]);
        assert!(rules.toggle_birth(6));
        assert_eq!(rules, Rules::new(&[3, 6], &[3]));
    }

    #[test]
    fn presets_cycle() {
        let (name, rules) = Rules::conway().next_preset();
        assert_eq!((name, &rules), ("highlife", &Rules::highlife()));
        assert_eq!(Rules::day_and_night().next_preset().1, Rules::conway());
        assert_eq!(Rules::new(&[1], &[]).next_preset().0, "conway");
    }

    #[test]
    fn parse_presets() {
        for (name, rules) in Rules::presets() {
            let parsed: Rules = rules.to_string().parse().unwrap();
            assert_eq!(parsed, rules, "{name}");
        }
        assert_eq!("s23/b3".parse::<Rules>().unwrap(), Rules::conway());
        assert_eq!(Rules::seeds().to_string(), "B2/S");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "B3S23".parse::<Rules>(),
            Err(RuleParseError::MissingSeparator("B3S23".into()))
        );
        assert_eq!(
            "X3/S23".parse::<Rules>(),
            Err(RuleParseError::UnknownSection("X3".into()))
        );
        assert_eq!(
            "B3/B23".parse::<Rules>(),
            Err(RuleParseError::DuplicateSection('B'))
        );
        assert_eq!(
            "B39/S23".parse::<Rules>(),
            Err(RuleParseError::InvalidCount {
                section: 'B',
                found: '9'
            })
        );
    }
}
