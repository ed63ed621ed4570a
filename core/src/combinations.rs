// Copyright (c) 2023 Mike Tsao. All rights reserved.

use crate::error::{Error, Result};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// One voice in an explicit combination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoiceRef {
    /// A voice by its position in the score, counting from the top.
    Index(usize),
    /// The lowest voice, whatever its position ("bs", the basso seguente).
    Lowest,
}
impl Display for VoiceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceRef::Index(i) => write!(f, "{i}"),
            VoiceRef::Lowest => write!(f, "bs"),
        }
    }
}

/// Which groups of voices an analysis looks at. Each group becomes one unit of
/// work at dispatch.
///
/// The text form is what users type: `[all]` for every pair, `[all,bs]` for
/// each upper voice against the lowest, `[0,3]` for one explicit group, and
/// `[[0,3],[1,bs]]` for several.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum VoiceCombinations {
    /// Every voice on its own.
    Each,
    /// All voices together, as one group.
    #[default]
    Whole,
    /// Every two-voice combination, in score order.
    AllPairs,
    /// Every upper voice paired with the lowest.
    AllAgainstLowest,
    Explicit(Vec<Vec<VoiceRef>>),
}
impl VoiceCombinations {
    /// The groups, as voice positions, for a score with `part_count` voices.
    /// Fails if an explicit group names a voice the score doesn't have.
    pub fn resolve(&self, part_count: usize) -> Result<Vec<Vec<usize>>> {
        let n = part_count;
        Ok(match self {
            VoiceCombinations::Each => (0..n).map(|i| vec![i]).collect(),
            VoiceCombinations::Whole => {
                if n == 0 {
                    Vec::default()
                } else {
                    vec![(0..n).collect()]
                }
            }
            VoiceCombinations::AllPairs => (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| vec![i, j]))
                .collect(),
            VoiceCombinations::AllAgainstLowest => match n.checked_sub(1) {
                Some(lowest) => (0..lowest).map(|i| vec![i, lowest]).collect(),
                None => Vec::default(),
            },
            VoiceCombinations::Explicit(groups) => {
                let mut resolved = Vec::with_capacity(groups.len());
                for group in groups {
                    let combination: Vec<usize> = group
                        .iter()
                        .map(|v| match v {
                            VoiceRef::Index(i) => *i,
                            VoiceRef::Lowest => n.saturating_sub(1),
                        })
                        .collect();
                    // An empty score has no lowest voice either: "bs" resolves
                    // to 0 there, which is out of range.
                    if let Some(voice) = combination.iter().copied().find(|voice| *voice >= n) {
                        return Err(Error::InvalidCombination {
                            combination,
                            voice,
                            count: n,
                        });
                    }
                    resolved.push(combination);
                }
                resolved
            }
        })
    }
}
impl Display for VoiceCombinations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceCombinations::Each => write!(f, "[each]"),
            VoiceCombinations::Whole => write!(f, "[whole]"),
            VoiceCombinations::AllPairs => write!(f, "[all]"),
            VoiceCombinations::AllAgainstLowest => write!(f, "[all,bs]"),
            VoiceCombinations::Explicit(groups) => {
                let groups: Vec<String> = groups
                    .iter()
                    .map(|g| {
                        let voices: Vec<String> = g.iter().map(|v| v.to_string()).collect();
                        format!("[{}]", voices.join(","))
                    })
                    .collect();
                write!(f, "[{}]", groups.join(","))
            }
        }
    }
}
impl FromStr for VoiceCombinations {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let unparseable = || Error::UnparseableCombinations(s.to_string());
        let inner = compact
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(unparseable)?;

        match inner {
            "all" => return Ok(VoiceCombinations::AllPairs),
            "all,bs" => return Ok(VoiceCombinations::AllAgainstLowest),
            "each" => return Ok(VoiceCombinations::Each),
            "whole" => return Ok(VoiceCombinations::Whole),
            _ => {}
        }

        let groups: Vec<&str> = if let Some(nested) = inner
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            nested.split("],[").collect()
        } else {
            vec![inner]
        };

        let mut parsed = Vec::with_capacity(groups.len());
        for group in groups {
            if group.is_empty() {
                return Err(unparseable());
            }
            let voices = group
                .split(',')
                .map(|token| match token {
                    "bs" => Ok(VoiceRef::Lowest),
                    _ => token
                        .parse::<usize>()
                        .map(VoiceRef::Index)
                        .map_err(|_| unparseable()),
                })
                .collect::<Result<Vec<_>>>()?;
            parsed.push(voices);
        }
        Ok(VoiceCombinations::Explicit(parsed))
    }
}
impl TryFrom<String> for VoiceCombinations {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
impl From<VoiceCombinations> for String {
    fn from(value: VoiceCombinations) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_forms() {
        assert_eq!(
            "[all]".parse::<VoiceCombinations>().unwrap(),
            VoiceCombinations::AllPairs
        );
        assert_eq!(
            " [ all, bs ] ".parse::<VoiceCombinations>().unwrap(),
            VoiceCombinations::AllAgainstLowest
        );
        assert_eq!(
            "[each]".parse::<VoiceCombinations>().unwrap(),
            VoiceCombinations::Each
        );
    }

    #[test]
    fn explicit_forms() {
        assert_eq!(
            "[0,3]".parse::<VoiceCombinations>().unwrap(),
            VoiceCombinations::Explicit(vec![vec![VoiceRef::Index(0), VoiceRef::Index(3)]])
        );
        assert_eq!(
            "[[0,3],[1,3]]".parse::<VoiceCombinations>().unwrap(),
            VoiceCombinations::Explicit(vec![
                vec![VoiceRef::Index(0), VoiceRef::Index(3)],
                vec![VoiceRef::Index(1), VoiceRef::Index(3)]
            ])
        );
        assert_eq!(
            "[[0,bs]]".parse::<VoiceCombinations>().unwrap(),
            VoiceCombinations::Explicit(vec![vec![VoiceRef::Index(0), VoiceRef::Lowest]])
        );
    }

    #[test]
    fn garbage_is_rejected() {
        for text in ["", "all", "[]", "[[]]", "[0,x]", "[[0,1],]", "[-1]", "[0,1"] {
            assert!(
                matches!(
                    text.parse::<VoiceCombinations>(),
                    Err(Error::UnparseableCombinations(_))
                ),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn text_form_survives_display() {
        for text in ["[all]", "[all,bs]", "[each]", "[whole]", "[[0,3],[1,bs]]"] {
            let parsed: VoiceCombinations = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn resolve_named_forms() {
        assert_eq!(
            VoiceCombinations::Each.resolve(3).unwrap(),
            vec![vec![0], vec![1], vec![2]]
        );
        assert_eq!(
            VoiceCombinations::Whole.resolve(3).unwrap(),
            vec![vec![0, 1, 2]]
        );
        assert_eq!(
            VoiceCombinations::AllPairs.resolve(4).unwrap(),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(
            VoiceCombinations::AllAgainstLowest.resolve(4).unwrap(),
            vec![vec![0, 3], vec![1, 3], vec![2, 3]]
        );
    }

    #[test]
    fn resolve_small_scores() {
        for combinations in [
            VoiceCombinations::Each,
            VoiceCombinations::Whole,
            VoiceCombinations::AllPairs,
            VoiceCombinations::AllAgainstLowest,
        ] {
            assert!(combinations.resolve(0).unwrap().is_empty());
        }
        assert!(VoiceCombinations::AllPairs.resolve(1).unwrap().is_empty());
        assert!(VoiceCombinations::AllAgainstLowest.resolve(1).unwrap().is_empty());
    }

    #[test]
    fn resolve_explicit() {
        let combinations: VoiceCombinations = "[[0,bs],[1,2]]".parse().unwrap();
        assert_eq!(
            combinations.resolve(4).unwrap(),
            vec![vec![0, 3], vec![1, 2]]
        );
        assert!(matches!(
            combinations.resolve(2),
            Err(Error::InvalidCombination {
                voice: 2,
                count: 2,
                ..
            })
        ));

        let lowest_only: VoiceCombinations = "[bs]".parse().unwrap();
        assert!(lowest_only.resolve(0).is_err());
        assert_eq!(lowest_only.resolve(2).unwrap(), vec![vec![1]]);
    }
}
