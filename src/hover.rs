//! Hover points and the proximity hit-test used by the multi-point variant.
//!
//! Coordinates are in CSS pixels relative to the container's top-left corner.
//! Hover points are declared as percentages of the container size and resolved
//! against the current bounding box on every test, so they follow resizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

/// Pointer distance (px) at which a hover point counts as active.
pub const DEFAULT_HIT_RADIUS_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of the container's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A CSS-style percentage such as `"25%"`. Stores the percent value, not the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percent(f64);

impl Percent {
    pub fn new(percent: f64) -> Self {
        Self(percent)
    }

    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    pub fn of(self, length: f64) -> f64 {
        self.fraction() * length
    }
}

impl FromStr for Percent {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EffectError::Config(format!("`{s}` is not a percentage"));
        let number = s.trim().strip_suffix('%').ok_or_else(invalid)?;
        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(EffectError::Config(format!("`{s}` is not finite")));
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for Percent {
    type Error = EffectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percent> for String {
    fn from(value: Percent) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A named location on the container tied to an alternate image for texture B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub name: String,
    pub x: Percent,
    pub y: Percent,
    pub image: String,
}

impl HoverPoint {
    pub fn new(name: &str, x: &str, y: &str, image: &str) -> Result<Self, EffectError> {
        Ok(Self {
            name: name.to_owned(),
            x: x.parse()?,
            y: y.parse()?,
            image: image.to_owned(),
        })
    }

    /// Pixel position of this point inside a box of the given size.
    pub fn resolve(&self, size: BoxSize) -> Point {
        Point::new(self.x.of(size.width), self.y.of(size.height))
    }
}

/// Index of the active hover point, if any.
///
/// A point is active when the pointer is within `radius` pixels of it, boundary
/// included. When several are active the nearest wins; exact ties keep the
/// earlier point.
pub fn hit_test(
    points: &[HoverPoint],
    pointer: Point,
    size: BoxSize,
    radius: f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        let d = point.resolve(size).distance(pointer);
        if d > radius {
            continue;
        }
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: &str, y: &str) -> HoverPoint {
        HoverPoint::new("p", x, y, "p.png").unwrap()
    }

    #[test]
    fn parses_percentages() {
        assert_eq!("25%".parse::<Percent>().unwrap(), Percent::new(25.0));
        assert_eq!(" 12.5 % ".parse::<Percent>().unwrap(), Percent::new(12.5));
        assert_eq!("-10%".parse::<Percent>().unwrap(), Percent::new(-10.0));
        assert!("25".parse::<Percent>().is_err());
        assert!("abc%".parse::<Percent>().is_err());
        assert!("%".parse::<Percent>().is_err());
    }

    #[test]
    fn percent_displays_like_css() {
        assert_eq!(Percent::new(30.0).to_string(), "30%");
    }

    #[test]
    fn tie_goes_to_earlier_point() {
        let points = [point("50%", "50%"), point("50%", "50%")];
        let size = BoxSize::new(100.0, 100.0);
        let hit = hit_test(&points, Point::new(55.0, 50.0), size, 20.0);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn zero_radius_only_matches_exact_position() {
        let points = [point("10%", "10%")];
        let size = BoxSize::new(200.0, 100.0);
        let exact = Point::new(20.0, 10.0);
        let near = Point::new(20.5, 10.0);
        assert_eq!(hit_test(&points, exact, size, 0.0), Some(0));
        assert_eq!(hit_test(&points, near, size, 0.0), None);
    }
}
