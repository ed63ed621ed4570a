// Copyright (c) 2023 Mike Tsao. All rights reserved.

//! Turns an index back into something notatable: a run of values, each with a
//! duration drawn from the note values a score can actually show.

use crate::{
    error::{Error, Result},
    series::Series,
    time::{Offset, QuarterLength},
};
use float_cmp::approx_eq;

/// The longest single value, a whole note.
pub const WHOLE: QuarterLength = 4.0;

/// The shortest value we'll write, a 64th note. A gap that leaves anything
/// shorter can't be filled.
pub const SHORTEST: QuarterLength = 0.015625;

/// Note values below a whole note, longest first. No dotted values: two
/// plain values are preferred over one dotted one.
const UNITS: [QuarterLength; 8] = [2.0, 1.0, 0.5, 0.25, 0.125, 0.0625, 0.03125, SHORTEST];

fn close(a: QuarterLength, b: QuarterLength) -> bool {
    approx_eq!(f64, a, b, epsilon = 1e-9, ulps = 4)
}

/// The note values that exactly fill the span from `start` to `end`, as few
/// as possible, longest first.
///
/// Whole notes go first while more than a whole note remains. A span of zero
/// comes back as `[0.0]`. Returns [Error::ImpossibleDuration] if the span is
/// negative or would leave a remainder shorter than a 64th note.
///
/// ```
/// # use vis_core::{durations::fill_space_between_offsets, time::Offset};
/// assert_eq!(fill_space_between_offsets(Offset(0.0), Offset(3.0)).unwrap(), vec![2.0, 1.0]);
/// assert_eq!(fill_space_between_offsets(Offset(0.0), Offset(5.0)).unwrap(), vec![4.0, 1.0]);
/// ```
pub fn fill_space_between_offsets(start: Offset, end: Offset) -> Result<Vec<QuarterLength>> {
    let span = end - start;
    if close(span, 0.0) {
        return Ok(vec![0.0]);
    }
    if span < 0.0 {
        return Err(Error::ImpossibleDuration {
            span,
            remainder: span,
        });
    }

    let mut units = Vec::default();
    let mut remainder = span;
    loop {
        if close(remainder, WHOLE) {
            units.push(WHOLE);
            break;
        }
        if remainder > WHOLE {
            units.push(WHOLE);
            remainder -= WHOLE;
            continue;
        }
        let Some(unit) = UNITS
            .iter()
            .copied()
            .find(|u| *u <= remainder || close(*u, remainder))
        else {
            return Err(Error::ImpossibleDuration { span, remainder });
        };
        units.push(unit);
        if close(unit, remainder) {
            break;
        }
        remainder -= unit;
    }
    Ok(units)
}

/// A value placed in time. A `value` of None is a rest.
#[derive(Clone, Debug, PartialEq)]
pub struct Timed<T> {
    pub offset: Offset,
    pub duration: QuarterLength,
    pub value: Option<T>,
}
impl<T> Timed<T> {
    pub fn is_rest(&self) -> bool {
        self.value.is_none()
    }

    pub fn end(&self) -> Offset {
        self.offset + self.duration
    }
}

/// Makes `series` start at the beginning of the piece. If its first value
/// begins later than 0.0, rests (None) that fill the gap are put in front of
/// it; otherwise it comes back unchanged.
pub fn prepend_rests<T: Clone>(series: &Series<T>) -> Result<Series<Option<T>>> {
    let mut entries = Vec::with_capacity(series.len() + 1);
    if let Some((first, _)) = series.entries().first() {
        if *first != Offset::ZERO {
            let mut offset = Offset::ZERO;
            for unit in fill_space_between_offsets(Offset::ZERO, *first)? {
                entries.push((offset, None));
                offset = offset + unit;
            }
        }
    }
    entries.extend(series.iter().map(|(o, v)| (*o, Some(v.clone()))));
    Ok(Series::new_with(entries))
}

/// Gives every value of `series` a duration.
///
/// A value lasts until the next one begins, if a single note value can
/// express that; any time left over becomes rests. The last value lasts one
/// quarter note.
pub fn set_durations<T: Clone>(series: &Series<Option<T>>) -> Result<Vec<Timed<T>>> {
    let entries = series.entries();
    let mut timed = Vec::with_capacity(entries.len());
    for (i, (offset, value)) in entries.iter().enumerate() {
        let units = match entries.get(i + 1) {
            Some((next, _)) => fill_space_between_offsets(*offset, *next)?,
            None => vec![1.0],
        };
        let mut units = units.into_iter();
        let first = units.next().unwrap_or_default();
        timed.push(Timed {
            offset: *offset,
            duration: first,
            value: value.clone(),
        });
        let mut at = *offset + first;
        for unit in units {
            timed.push(Timed {
                offset: at,
                duration: unit,
                value: None,
            });
            at = at + unit;
        }
    }
    Ok(timed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use more_asserts::assert_le;

    fn fill(start: f64, end: f64) -> Result<Vec<QuarterLength>> {
        fill_space_between_offsets(Offset(start), Offset(end))
    }

    #[test]
    fn greedy_fill() {
        assert_eq!(fill(0.0, 3.0).unwrap(), vec![2.0, 1.0]);
        assert_eq!(fill(0.0, 5.0).unwrap(), vec![4.0, 1.0]);
        assert_eq!(fill(0.0, 4.0).unwrap(), vec![4.0]);
        assert_eq!(fill(0.0, 8.0).unwrap(), vec![4.0, 4.0]);
        assert_eq!(fill(1.0, 1.0).unwrap(), vec![0.0]);
        assert_eq!(fill(0.0, 3.5).unwrap(), vec![2.0, 1.0, 0.5]);
        assert_eq!(fill(0.0, 0.015625).unwrap(), vec![0.015625]);
        assert_eq!(fill(2.0, 2.75).unwrap(), vec![0.5, 0.25]);
    }

    #[test]
    fn long_spans_are_mostly_whole_notes() {
        let units = fill(0.0, 4001.5).unwrap();
        assert_eq!(units.len(), 1002);
        assert!(units[..1000].iter().all(|u| *u == WHOLE));
        assert_eq!(&units[1000..], &[1.0, 0.5]);
    }

    #[test]
    fn fill_sums_to_span() {
        for (start, end) in [(0.0, 0.75), (0.5, 1.875), (1.0, 10.375), (0.1, 0.35)] {
            let units = fill(start, end).unwrap();
            assert_approx_eq!(f64, units.iter().sum::<f64>(), end - start, epsilon = 1e-9);
            for pair in units.windows(2) {
                assert_le!(pair[1], pair[0]);
            }
        }
    }

    #[test]
    fn impossible_spans() {
        assert!(matches!(
            fill(0.0, 0.01),
            Err(Error::ImpossibleDuration { .. })
        ));
        assert!(matches!(
            fill(0.0, 2.01),
            Err(Error::ImpossibleDuration { .. })
        ));
        assert!(matches!(
            fill(2.0, 1.0),
            Err(Error::ImpossibleDuration { .. })
        ));
    }

    fn series(entries: &[(f64, &str)]) -> Series<String> {
        entries
            .iter()
            .map(|(o, v)| (Offset(*o), v.to_string()))
            .collect()
    }

    #[test]
    fn prepend_rests_only_when_late() {
        let on_time = series(&[(0.0, "C4"), (1.0, "D4")]);
        let prepended = prepend_rests(&on_time).unwrap();
        assert_eq!(prepended.len(), 2);

        let late = series(&[(3.0, "C4")]);
        let prepended = prepend_rests(&late).unwrap();
        assert_eq!(
            prepended.entries(),
            &[
                (Offset(0.0), None),
                (Offset(2.0), None),
                (Offset(3.0), Some("C4".to_string())),
            ]
        );

        assert!(prepend_rests(&Series::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn durations_reach_the_next_value() {
        let notes = prepend_rests(&series(&[(0.0, "C4"), (4.0, "D4")])).unwrap();
        let timed = set_durations(&notes).unwrap();
        assert_eq!(timed.len(), 2);
        assert_eq!(timed[0].duration, 4.0);
        assert_eq!(timed[1].offset, Offset(4.0));
        assert_eq!(timed[1].duration, 1.0);

        let notes = prepend_rests(&series(&[(0.0, "C4"), (3.0, "D4")])).unwrap();
        let timed = set_durations(&notes).unwrap();
        assert_eq!(
            timed,
            vec![
                Timed {
                    offset: Offset(0.0),
                    duration: 2.0,
                    value: Some("C4".to_string())
                },
                Timed {
                    offset: Offset(2.0),
                    duration: 1.0,
                    value: None
                },
                Timed {
                    offset: Offset(3.0),
                    duration: 1.0,
                    value: Some("D4".to_string())
                },
            ]
        );
        assert!(timed[1].is_rest());
        assert_eq!(timed[1].end(), timed[2].offset);
    }

    #[test]
    fn timed_values_leave_no_gaps() {
        let notes =
            prepend_rests(&series(&[(1.5, "E4"), (2.0, "F4"), (7.25, "G4"), (7.25, "A4")]))
                .unwrap();
        let timed = set_durations(&notes).unwrap();
        for pair in timed.windows(2) {
            assert_eq!(pair[0].end(), pair[1].offset);
        }
        assert_eq!(timed.first().map(|t| t.offset), Some(Offset::ZERO));
    }

    #[test]
    fn impossible_gaps_propagate() {
        let notes = prepend_rests(&series(&[(0.0, "C4"), (0.01, "D4")])).unwrap();
        assert!(set_durations(&notes).is_err());
        assert!(prepend_rests(&series(&[(0.001, "C4")])).is_err());
    }
}
