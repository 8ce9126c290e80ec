use crate::value_objects::direction::Direction;
use chrono::{NaiveTime, Timelike};

const LONDON_OPEN_MINUTES: u32 = 8 * 60;
const LONDON_CLOSE_MINUTES: u32 = 12 * 60;
const NEW_YORK_OPEN_MINUTES: u32 = 14 * 60 + 30;
const NEW_YORK_CLOSE_MINUTES: u32 = 18 * 60;

/// Maps a local `HH:MM` time onto the session label recorded in the journal.
/// Unparseable input falls through to `Other`.
pub fn detect_session(local_time: &str) -> String {
    let minutes = match NaiveTime::parse_from_str(local_time.trim(), "%H:%M") {
        Ok(time) => time.hour() * 60 + time.minute(),
        Err(_) => return "Other".to_string(),
    };
    if (LONDON_OPEN_MINUTES..=LONDON_CLOSE_MINUTES).contains(&minutes) {
        return "London".to_string();
    }
    if (NEW_YORK_OPEN_MINUTES..=NEW_YORK_CLOSE_MINUTES).contains(&minutes) {
        return "New York".to_string();
    }
    "Other".to_string()
}

/// Risk-reward ratio, rounded to two decimals. `None` when the risk is zero
/// or the inputs are not finite.
pub fn compute_rr(entry: f64, stop: f64, take_profit: f64) -> Option<f64> {
    if !entry.is_finite() || !stop.is_finite() || !take_profit.is_finite() {
        return None;
    }
    let risk = (entry - stop).abs();
    if risk == 0.0 {
        return None;
    }
    let reward = (take_profit - entry).abs();
    Some(round2(reward / risk))
}

/// Signed result of a closed trade in price units.
pub fn compute_result(direction: Direction, entry: f64, exit: f64) -> f64 {
    match direction {
        Direction::Long => exit - entry,
        Direction::Short => entry - exit,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
