//! Geometry helpers for contact tracking.
//!
//! This module provides:
//! - Centroid computation across simultaneous contacts
//! - Dominant-axis swipe classification

use crate::input::{Contact, Direction};

// ============================================================================
// Centroid
// ============================================================================

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Arithmetic mean of all contact positions.
///
/// Returns `None` for an empty contact set or one with a non-finite
/// coordinate, so callers can ignore malformed events instead of tracking a
/// bogus origin.
pub fn centroid(contacts: &[Contact]) -> Option<Point> {
    if contacts.is_empty() || contacts.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return None;
    }
    let count = contacts.len() as f64;
    let (sum_x, sum_y) = contacts
        .iter()
        .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
    Some(Point {
        x: sum_x / count,
        y: sum_y / count,
    })
}

// ============================================================================
// Swipe Classification
// ============================================================================

/// Classifies movement from `origin` to `current` into a swipe direction.
///
/// Displacement is measured as origin minus current, so a contact moving
/// towards smaller x reads as `Left` and towards smaller y as `Up`. One axis
/// must lead the other by more than `threshold`; anything closer stays
/// undecided and returns `None`.
pub fn swipe_direction(origin: Point, current: Point, threshold: f64) -> Option<Direction> {
    let dx = origin.x - current.x;
    let dy = origin.y - current.y;

    if (dx.abs() - dy.abs()).abs() <= threshold {
        return None;
    }

    let direction = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dy > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some(direction)
}
