#![forbid(unsafe_code)]

//! Declarative sizing values: how big a child wants to be on each axis,
//! the bounds it must stay within, and how it is aligned in leftover space.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sizing rule for one axis of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SizeSpec {
    /// Exact size in pixels.
    Fixed(i32),
    /// Intrinsic size, computed by the child from its content.
    #[default]
    Auto,
    /// A share of the remaining space, weighted against sibling stretch
    /// children. The weight is a percentage but siblings need not sum to 100.
    Stretch(u16),
}

impl SizeSpec {
    /// Full-weight stretch.
    pub const FILL: Self = Self::Stretch(100);

    /// Whether this spec takes a share of remaining space.
    #[inline]
    pub const fn is_stretch(&self) -> bool {
        matches!(self, SizeSpec::Stretch(_))
    }

    /// Stretch weight, or 0 for fixed/auto. A zero percentage still counts as
    /// weight 1 so the child is not starved entirely.
    #[inline]
    pub const fn stretch_weight(&self) -> u32 {
        match self {
            SizeSpec::Stretch(0) => 1,
            SizeSpec::Stretch(w) => *w as u32,
            _ => 0,
        }
    }

    /// Pixel value of a fixed spec.
    #[inline]
    pub const fn fixed(&self) -> Option<i32> {
        match self {
            SizeSpec::Fixed(px) => Some(*px),
            _ => None,
        }
    }

    /// Resolve `Auto` with the given intrinsic size; other variants pass
    /// through unchanged.
    #[inline]
    #[must_use]
    pub const fn resolve_auto(self, intrinsic: i32) -> Self {
        match self {
            SizeSpec::Auto => SizeSpec::Fixed(intrinsic),
            other => other,
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeSpec::Fixed(px) => write!(f, "{px}"),
            SizeSpec::Auto => f.write_str("auto"),
            SizeSpec::Stretch(100) => f.write_str("stretch"),
            SizeSpec::Stretch(w) => write!(f, "{w}%"),
        }
    }
}

/// Error returned when a [`SizeSpec`] string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSizeSpecError {
    input: String,
}

impl fmt::Display for ParseSizeSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid size spec {:?} (expected pixels, \"auto\", \"stretch\" or \"N%\")",
            self.input
        )
    }
}

impl std::error::Error for ParseSizeSpecError {}

impl FromStr for SizeSpec {
    type Err = ParseSizeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseSizeSpecError {
            input: s.to_owned(),
        };
        match trimmed {
            "auto" => Ok(SizeSpec::Auto),
            "stretch" => Ok(SizeSpec::FILL),
            _ => {
                if let Some(pct) = trimmed.strip_suffix('%') {
                    pct.trim()
                        .parse::<u16>()
                        .map(SizeSpec::Stretch)
                        .map_err(|_| err())
                } else {
                    trimmed
                        .parse::<i32>()
                        .ok()
                        .filter(|px| *px >= 0)
                        .map(SizeSpec::Fixed)
                        .ok_or_else(err)
                }
            }
        }
    }
}

/// A child's answer to "how big would you be": one spec per axis with
/// `Auto` already resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeEstimate {
    pub width: SizeSpec,
    pub height: SizeSpec,
}

impl SizeEstimate {
    /// Create an estimate from two specs.
    #[inline]
    pub const fn new(width: SizeSpec, height: SizeSpec) -> Self {
        Self { width, height }
    }

    /// A fixed-pixel estimate on both axes.
    #[inline]
    pub const fn fixed(width: i32, height: i32) -> Self {
        Self::new(SizeSpec::Fixed(width), SizeSpec::Fixed(height))
    }
}

/// Min/max bounds for a child's placed size (margin excluded).
///
/// `None` is the only "no maximum" value. When a minimum exceeds its
/// maximum, the minimum wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeLimits {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
}

impl SizeLimits {
    /// No bounds at all.
    pub const NONE: Self = Self {
        min_width: 0,
        min_height: 0,
        max_width: None,
        max_height: None,
    };

    /// Exact bounds (min == max).
    pub const fn exact(width: i32, height: i32) -> Self {
        Self {
            min_width: width,
            min_height: height,
            max_width: Some(width),
            max_height: Some(height),
        }
    }

    /// Clamp a width to these bounds.
    #[inline]
    pub fn clamp_width(&self, width: i32) -> i32 {
        clamp_axis(width, self.min_width, self.max_width)
    }

    /// Clamp a height to these bounds.
    #[inline]
    pub fn clamp_height(&self, height: i32) -> i32 {
        clamp_axis(height, self.min_height, self.max_height)
    }
}

#[inline]
fn clamp_axis(value: i32, min: i32, max: Option<i32>) -> i32 {
    let capped = match max {
        Some(max) => value.min(max),
        None => value,
    };
    capped.max(min).max(0)
}

/// Horizontal alignment of a child inside the space given to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Fill the full width.
    Justify,
}

/// Vertical alignment of a child inside the space given to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
    /// Fill the full height.
    Justify,
}

impl FromStr for HorizontalAlign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "justify" => Ok(Self::Justify),
            _ => Err(()),
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            "justify" => Ok(Self::Justify),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_weight_treats_zero_as_one() {
        assert_eq!(SizeSpec::Stretch(0).stretch_weight(), 1);
        assert_eq!(SizeSpec::Stretch(40).stretch_weight(), 40);
        assert_eq!(SizeSpec::Fixed(40).stretch_weight(), 0);
        assert_eq!(SizeSpec::Auto.stretch_weight(), 0);
    }

    #[test]
    fn resolve_auto_only_touches_auto() {
        assert_eq!(SizeSpec::Auto.resolve_auto(12), SizeSpec::Fixed(12));
        assert_eq!(SizeSpec::Fixed(3).resolve_auto(12), SizeSpec::Fixed(3));
        assert_eq!(SizeSpec::FILL.resolve_auto(12), SizeSpec::FILL);
    }

    #[test]
    fn size_spec_parses_attribute_strings() {
        assert_eq!("auto".parse(), Ok(SizeSpec::Auto));
        assert_eq!("stretch".parse(), Ok(SizeSpec::Stretch(100)));
        assert_eq!("30%".parse(), Ok(SizeSpec::Stretch(30)));
        assert_eq!(" 120 ".parse(), Ok(SizeSpec::Fixed(120)));
        assert!("-5".parse::<SizeSpec>().is_err());
        assert!("wide".parse::<SizeSpec>().is_err());
    }

    #[test]
    fn size_spec_display_round_trips_common_values() {
        for spec in [SizeSpec::Auto, SizeSpec::FILL, SizeSpec::Stretch(25), SizeSpec::Fixed(7)] {
            assert_eq!(spec.to_string().parse::<SizeSpec>(), Ok(spec));
        }
    }

    #[test]
    fn limits_clamp_within_range() {
        let limits = SizeLimits {
            min_width: 10,
            min_height: 5,
            max_width: Some(50),
            max_height: None,
        };
        assert_eq!(limits.clamp_width(3), 10);
        assert_eq!(limits.clamp_width(30), 30);
        assert_eq!(limits.clamp_width(80), 50);
        assert_eq!(limits.clamp_height(1_000_000), 1_000_000);
        assert_eq!(limits.clamp_height(-4), 5);
    }

    #[test]
    fn limits_minimum_wins_over_maximum() {
        let limits = SizeLimits {
            min_width: 40,
            min_height: 0,
            max_width: Some(20),
            max_height: None,
        };
        assert_eq!(limits.clamp_width(30), 40);
    }

    #[test]
    fn limits_never_negative() {
        assert_eq!(SizeLimits::NONE.clamp_width(-7), 0);
        assert_eq!(SizeLimits::exact(4, 6).clamp_height(100), 6);
    }

    #[test]
    fn alignment_parsing() {
        assert_eq!("center".parse(), Ok(HorizontalAlign::Center));
        assert_eq!("justify".parse(), Ok(VerticalAlign::Justify));
        assert!("middle".parse::<VerticalAlign>().is_err());
    }
}
