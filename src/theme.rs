use crate::storage::{THEME_COLOR_KEY, Store};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub const ACCENT_LIGHTEN: i32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("theme color must look like #RRGGBB, got {0:?}")]
    InvalidColor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// CSS values the page assigns to `--primary` and `--accent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeVars {
    pub primary: String,
    pub accent: String,
}

impl ThemeVars {
    pub fn from_base(base: &str) -> Result<Self, ThemeError> {
        Ok(Self {
            primary: base.to_string(),
            accent: lighten(base, ACCENT_LIGHTEN)?.to_string(),
        })
    }
}

pub fn apply_theme(store: &mut Store, base: &str) -> Result<ThemeVars, ThemeError> {
    let vars = ThemeVars::from_base(base)?;
    store.set(THEME_COLOR_KEY, base);
    Ok(vars)
}

pub fn restore_theme(store: &Store) -> Option<ThemeVars> {
    let base = store.get(THEME_COLOR_KEY)?;
    match ThemeVars::from_base(base) {
        Ok(vars) => Some(vars),
        Err(err) => {
            warn!("ignoring saved theme: {err}");
            None
        }
    }
}

/// Adds `percent` to every channel and clamps, rather than lightening in HSL.
pub fn lighten(color: &str, percent: i32) -> Result<Rgb, ThemeError> {
    let num = parse_hex(color)?;
    let channel = |shift: u32| {
        let value = ((num >> shift) & 0xff) as i32 + percent;
        value.clamp(0, 255) as u8
    };

    Ok(Rgb {
        r: channel(16),
        g: channel(8),
        b: channel(0),
    })
}

fn parse_hex(color: &str) -> Result<u32, ThemeError> {
    let invalid = || ThemeError::InvalidColor(color.to_string());
    let digits = color.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u32::from_str_radix(digits, 16).map_err(|_| invalid())
}
