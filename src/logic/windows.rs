//! Attack window aggregation
//!
//! Groups the events that fall inside each attack interval into one
//! [`WindowAggregate`] with severity statistics.

use crate::constants::NO_ATTACKS_MESSAGE;
use crate::logic::dataset::record::{AttackInterval, Event, WindowAggregate};

/// One aggregate per attack interval that contains at least one event, in
/// attack log order. Window bounds are inclusive on both ends.
pub fn build_window_aggregates(events: &[Event], attacks: &[AttackInterval]) -> Vec<WindowAggregate> {
    let mut windows = Vec::new();

    for attack in attacks {
        let mut window = WindowAggregate::new(&attack.code);
        for event in events
            .iter()
            .filter(|e| e.timestamp >= attack.start && e.timestamp <= attack.end)
        {
            window.push(event);
        }

        if window.is_empty() {
            log::debug!("Attack {} has no events in its window", attack.code);
            continue;
        }
        window.refresh_severity_stats();
        windows.push(window);
    }

    if windows.is_empty() {
        log::info!("{}", NO_ATTACKS_MESSAGE);
    } else {
        log::info!("Aggregated {} of {} attack windows", windows.len(), attacks.len());
    }
    windows
}
