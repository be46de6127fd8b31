//! Run segmentation
//!
//! A run is a maximal block of consecutive events with the same label.

use crate::logic::dataset::record::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Run<'a> {
    pub is_attack: bool,
    pub events: &'a [Event],
}

impl<'a> Run<'a> {
    pub fn signatures(&self) -> Vec<&'a str> {
        self.events.iter().map(|e| e.signature.as_str()).collect()
    }
}

/// Split the stream into runs in one left-to-right pass.
///
/// Runs borrow contiguous slices of `events`, so together they cover the
/// stream exactly once. The last run is flushed after the loop.
pub fn segment_runs(events: &[Event]) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let Some(first) = events.first() else {
        return runs;
    };

    let mut current_label = first.is_attack;
    let mut run_start = 0;

    for (i, event) in events.iter().enumerate().skip(1) {
        if event.is_attack != current_label {
            runs.push(Run {
                is_attack: current_label,
                events: &events[run_start..i],
            });
            current_label = event.is_attack;
            run_start = i;
        }
    }

    runs.push(Run {
        is_attack: current_label,
        events: &events[run_start..],
    });
    runs
}

/// Every window of `length` consecutive items, step 1.
/// Yields `max(0, n - length + 1)` windows; none for `length == 0`.
pub fn extract_subsequences<'s, T>(sequence: &'s [T], length: usize) -> impl Iterator<Item = &'s [T]> {
    let windows = if length == 0 || length > sequence.len() {
        None
    } else {
        Some(sequence.windows(length))
    };
    windows.into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stream(labels: &[bool]) -> Vec<Event> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                Event::new(Utc.timestamp_opt(i as i64, 0).unwrap(), &format!("S{}", i), 50.0)
                    .labeled(l)
            })
            .collect()
    }

    #[test]
    fn test_runs_partition_stream() {
        let label_sets: &[&[bool]] = &[
            &[true, true, false, true],
            &[false],
            &[true, false, true, false, false, false],
            &[false, false, false],
            &[true, true, false, false, true, true],
        ];

        for labels in label_sets {
            let events = stream(labels);
            let runs = segment_runs(&events);

            let rebuilt: Vec<Event> = runs.iter().flat_map(|r| r.events.iter().cloned()).collect();
            assert_eq!(rebuilt, events);

            for pair in runs.windows(2) {
                assert_ne!(pair[0].is_attack, pair[1].is_attack);
            }
            assert!(runs.iter().all(|r| !r.events.is_empty()));
            assert!(runs.iter().all(|r| r.events.iter().all(|e| e.is_attack == r.is_attack)));
        }
    }

    #[test]
    fn test_single_event_single_run() {
        let events = stream(&[true]);
        let runs = segment_runs(&events);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].events.len(), 1);
        assert!(runs[0].is_attack);
    }

    #[test]
    fn test_same_label_merges() {
        let events = stream(&[true, true, true]);
        let runs = segment_runs(&events);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].signatures(), vec!["S0", "S1", "S2"]);
    }

    #[test]
    fn test_empty_stream_no_runs() {
        assert!(segment_runs(&[]).is_empty());
    }

    #[test]
    fn test_subsequence_counts() {
        let seq = ["A", "B", "C", "D", "E"];
        for n in 0..=seq.len() {
            for length in 1..=7 {
                let expected = (n + 1).saturating_sub(length);
                assert_eq!(extract_subsequences(&seq[..n], length).count(), expected);
            }
        }
        assert_eq!(extract_subsequences(&seq, 0).count(), 0);
    }

    #[test]
    fn test_subsequences_are_contiguous() {
        let seq = ["A", "B", "C"];
        let grams: Vec<&[&str]> = extract_subsequences(&seq, 2).collect();
        assert_eq!(grams, vec![&["A", "B"][..], &["B", "C"][..]]);
    }
}
