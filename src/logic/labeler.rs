//! Event Labeler
//!
//! Marks every event that falls inside a ground-truth attack window.

use chrono::Duration;

use crate::logic::dataset::record::{AttackInterval, Event};

/// Return a copy of `events` with `is_attack` set from the attack log.
///
/// An event is inside an interval when `start <= t < end + 1s`: the end stamp
/// has second resolution in run logs, so the whole end second counts.
/// Overlapping intervals simply mark the same events again.
pub fn label_events(events: &[Event], attacks: &[AttackInterval]) -> Vec<Event> {
    let one_second = Duration::seconds(1);

    let labeled: Vec<Event> = events
        .iter()
        .map(|event| {
            let is_attack = attacks
                .iter()
                .any(|a| event.timestamp >= a.start && event.timestamp < a.end + one_second);
            event.clone().labeled(is_attack)
        })
        .collect();

    let attack_count = labeled.iter().filter(|e| e.is_attack).count();
    log::info!(
        "Labeled {} events against {} attacks: {} during attacks",
        labeled.len(),
        attacks.len(),
        attack_count
    );
    labeled
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn events(times: &[i64]) -> Vec<Event> {
        times.iter().map(|&t| Event::new(ts(t), "sig", 50.0)).collect()
    }

    #[test]
    fn test_end_is_inclusive() {
        let attacks = vec![AttackInterval::new("A1", ts(10), ts(20))];
        let labeled = label_events(&events(&[9, 10, 20, 21]), &attacks);
        let flags: Vec<bool> = labeled.iter().map(|e| e.is_attack).collect();
        assert_eq!(flags, vec![false, true, true, false]);
    }

    #[test]
    fn test_sub_second_inside_end_second() {
        let attacks = vec![AttackInterval::new("A1", ts(10), ts(20))];
        let late = Event::new(ts(20) + Duration::milliseconds(999), "sig", 50.0);
        assert!(label_events(&[late], &attacks)[0].is_attack);
    }

    #[test]
    fn test_overlapping_intervals() {
        let attacks = vec![
            AttackInterval::new("A1", ts(0), ts(10)),
            AttackInterval::new("A2", ts(5), ts(15)),
        ];
        let labeled = label_events(&events(&[7, 12, 30]), &attacks);
        assert!(labeled[0].is_attack);
        assert!(labeled[1].is_attack);
        assert!(!labeled[2].is_attack);
    }

    #[test]
    fn test_no_intervals_all_benign() {
        let labeled = label_events(&events(&[1, 2, 3]), &[]);
        assert!(labeled.iter().all(|e| !e.is_attack));
    }

    #[test]
    fn test_empty_stream() {
        let attacks = vec![AttackInterval::new("A1", ts(0), ts(10))];
        assert!(label_events(&[], &attacks).is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let input = events(&[5]);
        let attacks = vec![AttackInterval::new("A1", ts(0), ts(10))];
        let labeled = label_events(&input, &attacks);
        assert!(labeled[0].is_attack);
        assert!(!input[0].is_attack);
    }
}
