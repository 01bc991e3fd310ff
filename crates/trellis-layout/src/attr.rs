#![forbid(unsafe_code)]

//! Textual configuration helpers shared by every strategy.

use std::ops::BitOr;
use std::str::FromStr;

use trellis_core::{HorizontalAlign, VerticalAlign};

use crate::error::AttributeError;

/// Outcome of a configuration setter.
///
/// Setters never re-arrange on their own; the owning container inspects
/// this value and schedules a pass when it is [`ConfigChange::Changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use]
pub enum ConfigChange {
    #[default]
    Unchanged,
    Changed,
}

impl ConfigChange {
    #[inline]
    pub const fn is_changed(self) -> bool {
        matches!(self, ConfigChange::Changed)
    }
}

impl BitOr for ConfigChange {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        if self.is_changed() || rhs.is_changed() {
            ConfigChange::Changed
        } else {
            ConfigChange::Unchanged
        }
    }
}

/// Store `value` into `slot`, reporting whether anything changed.
pub(crate) fn update<T: PartialEq>(slot: &mut T, value: T) -> ConfigChange {
    if *slot == value {
        ConfigChange::Unchanged
    } else {
        *slot = value;
        ConfigChange::Changed
    }
}

/// A non-negative pixel or count value.
pub(crate) fn parse_int<T>(name: &str, value: &str) -> Result<T, AttributeError>
where
    T: FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v >= T::default())
        .ok_or_else(|| AttributeError::invalid(name, value))
}

/// `"x,y"`, or a single value used for both.
pub(crate) fn parse_pair(name: &str, value: &str) -> Result<(i32, i32), AttributeError> {
    match value.split_once(',') {
        Some((x, y)) => Ok((parse_int(name, x)?, parse_int(name, y)?)),
        None => {
            let v = parse_int(name, value)?;
            Ok((v, v))
        }
    }
}

pub(crate) fn parse_bool(name: &str, value: &str) -> Result<bool, AttributeError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AttributeError::invalid(name, value)),
    }
}

pub(crate) fn parse_halign(name: &str, value: &str) -> Result<HorizontalAlign, AttributeError> {
    value
        .parse()
        .map_err(|()| AttributeError::invalid(name, value))
}

pub(crate) fn parse_valign(name: &str, value: &str) -> Result<VerticalAlign, AttributeError> {
    value
        .parse()
        .map_err(|()| AttributeError::invalid(name, value))
}

/// Rescale a pixel value between two percent scale factors, rounding to
/// nearest. A zero `old` scale leaves the value alone.
pub(crate) fn rescale(value: i32, old: u32, new: u32) -> i32 {
    if old == 0 || old == new {
        return value;
    }
    let old = i64::from(old);
    let scaled = (i64::from(value) * i64::from(new) + old / 2) / old;
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
