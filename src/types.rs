// Strong typing over raw numbers. Newtypes for host timestamps, pixel geometry,
// navigation direction and the top-level view/section identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Host timestamp in microseconds. Newtype for type safety.
///
/// The shell hands us `performance.now()` milliseconds; they are stored as
/// whole microseconds so timer arithmetic stays integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    /// Negative and non-finite host values collapse to zero.
    pub fn from_millis(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Timestamp((ms * 1000.0).round() as u64)
        } else {
            Timestamp(0)
        }
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// The timestamp `ms` milliseconds after this one.
    pub fn after_millis(&self, ms: u64) -> Self {
        Timestamp(self.0.saturating_add(ms.saturating_mul(1000)))
    }
}

/// Point in CSS pixels (client coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in CSS pixels, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Translation applied to an element relative to its resting layout position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Offset { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Most recent navigation intent. Only consumed by the next slide transition.
///
/// Serialized as the integers `-1`, `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Backward,
    #[default]
    Neutral,
    Forward,
}

impl Direction {
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Neutral => 0,
            Direction::Forward => 1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = EngineError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Backward),
            0 => Ok(Direction::Neutral),
            1 => Ok(Direction::Forward),
            other => Err(EngineError::InvalidConfig(format!(
                "direction must be -1, 0 or 1, got {other}"
            ))),
        }
    }
}

/// Top-level experience state. Transitions only ever go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Gate,
    Loading,
    Content,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Gate => "gate",
            ViewState::Loading => "loading",
            ViewState::Content => "content",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every independently mounted section of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Gateway,
    Loading,
    Intro,
    Gallery,
    Note,
}

impl SectionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Gateway => "gateway",
            SectionId::Loading => "loading",
            SectionId::Intro => "intro",
            SectionId::Gallery => "gallery",
            SectionId::Note => "note",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gateway" => Ok(SectionId::Gateway),
            "loading" => Ok(SectionId::Loading),
            "intro" => Ok(SectionId::Intro),
            "gallery" => Ok(SectionId::Gallery),
            "note" => Ok(SectionId::Note),
            other => Err(EngineError::UnknownSection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversions() {
        let ts = Timestamp::from_millis(1500.25);
        assert_eq!(ts.as_micros(), 1_500_250);
        assert!((ts.as_millis() - 1500.25).abs() < 0.0001);
        assert_eq!(ts.after_millis(50).as_micros(), 1_550_250);
    }

    #[test]
    fn timestamp_rejects_negative_and_nan() {
        assert_eq!(Timestamp::from_millis(-4.0), Timestamp::from_micros(0));
        assert_eq!(Timestamp::from_millis(f64::NAN), Timestamp::from_micros(0));
    }

    #[test]
    fn rect_center() {
        let rect = Rect::new(100.0, 50.0, 80.0, 40.0);
        assert_eq!(rect.center(), Point::new(140.0, 70.0));
    }

    #[test]
    fn direction_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Direction::Backward).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Direction::Forward).unwrap(), "1");
        let parsed: Direction = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, Direction::Neutral);
        assert!(serde_json::from_str::<Direction>("2").is_err());
    }

    #[test]
    fn section_ids_round_trip_through_strings() {
        for section in [
            SectionId::Gateway,
            SectionId::Loading,
            SectionId::Intro,
            SectionId::Gallery,
            SectionId::Note,
        ] {
            assert_eq!(section.as_str().parse::<SectionId>().unwrap(), section);
        }
        assert!(matches!(
            "footer".parse::<SectionId>(),
            Err(EngineError::UnknownSection(_))
        ));
    }
}
