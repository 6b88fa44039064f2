//! # Board Utilities
//!
//! Pure helpers: sort comparators, date-window filter predicates,
//! immutable list-item replacement, and date formatting.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::board::events::FilterType;
use crate::board::models::Point;

/// Compare two points by end date, ascending.
///
/// Points without an end date rank after every dated point; two undated
/// points compare equal.
pub fn sort_days(a: &Point, b: &Point) -> Ordering {
    match (a.date_to, b.date_to) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(end_a), Some(end_b)) => end_a.cmp(&end_b),
    }
}

/// Compare two points by base price, descending
pub fn sort_prices(a: &Point, b: &Point) -> Ordering {
    b.base_price.cmp(&a.base_price)
}

/// A point that has not started yet
pub fn is_future(point: &Point, now: DateTime<Utc>) -> bool {
    point.date_from.is_some_and(|from| from > now)
}

/// A point whose date window contains `now`
pub fn is_present(point: &Point, now: DateTime<Utc>) -> bool {
    match (point.date_from, point.date_to) {
        (Some(from), Some(to)) => from <= now && now <= to,
        _ => false,
    }
}

/// A point that already ended
pub fn is_past(point: &Point, now: DateTime<Utc>) -> bool {
    point.date_to.is_some_and(|to| to < now)
}

/// Whether a point satisfies the given filter at `now`
pub fn matches_filter(point: &Point, filter: FilterType, now: DateTime<Utc>) -> bool {
    match filter {
        FilterType::Everything => true,
        FilterType::Future => is_future(point, now),
        FilterType::Present => is_present(point, now),
        FilterType::Past => is_past(point, now),
    }
}

/// Filter a point list, preserving input order
pub fn filter_points(points: &[Point], filter: FilterType, now: DateTime<Utc>) -> Vec<Point> {
    points
        .iter()
        .filter(|point| matches_filter(point, filter, now))
        .cloned()
        .collect()
}

/// Replace the element whose id matches `update`, leaving the rest of
/// the list untouched. Returns the input unchanged when the id is
/// absent.
pub fn update_item(items: &[Point], update: Point) -> Vec<Point> {
    let mut result = items.to_vec();
    if let Some(slot) = result.iter_mut().find(|item| item.id == update.id) {
        *slot = update;
    }
    result
}

/// Short calendar date, e.g. "Mar 18"
pub fn short_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

/// Clock time, e.g. "10:30"
pub fn clock_time(date: DateTime<Utc>) -> String {
    date.format("%H:%M").to_string()
}

/// Full date and time for form fields, e.g. "18/03/23 10:30"
pub fn full_date_time(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%y %H:%M").to_string()
}
