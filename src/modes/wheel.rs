//! Quiz Wheel: spin for a category, then play a standard session.
//!
//! The wheel itself is pure arithmetic. A spin picks a category segment
//! uniformly and a whole number of revolutions, and reports the final
//! rotation angle so the host can animate the needle landing mid-segment.
//! The chosen category belongs to the host's content request (its
//! supplier carries it); the engine only sees the questions that come
//! back.

use std::time::Duration;

use crate::core::SessionRng;

/// Wheel segments, in wheel order.
pub const WHEEL_CATEGORIES: [&str; 5] = ["Verbs", "Nouns", "Articles", "Prepositions", "Tenses"];

/// How long the host animates the spin before the category locks in.
pub const SPIN_DURATION: Duration = Duration::from_secs(4);

/// Result of one spin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    category_index: usize,
    revolutions: u32,
    rotation_degrees: f32,
}

impl Spin {
    /// The category the wheel landed on.
    #[must_use]
    pub fn category(&self) -> &'static str {
        WHEEL_CATEGORIES[self.category_index]
    }

    /// Index of the landed segment.
    #[must_use]
    pub fn category_index(&self) -> usize {
        self.category_index
    }

    /// Full turns before settling.
    #[must_use]
    pub fn revolutions(&self) -> u32 {
        self.revolutions
    }

    /// Total rotation for the host's animation, in degrees. Lands the
    /// needle on the middle of the chosen segment.
    #[must_use]
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }
}

/// Spin the wheel: 8 to 11 full revolutions, uniform over segments.
#[must_use]
pub fn spin(rng: &mut SessionRng) -> Spin {
    let revolutions = rng.gen_range_u32(8..=11);
    let category_index = rng.gen_range_usize(0..WHEEL_CATEGORIES.len());

    let segment_angle = 360.0 / WHEEL_CATEGORIES.len() as f32;
    let rotation_degrees =
        revolutions as f32 * 360.0 + category_index as f32 * segment_angle - segment_angle / 2.0;

    Spin {
        category_index,
        revolutions,
        rotation_degrees,
    }
}
