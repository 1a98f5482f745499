//! Style system for table text attributes.
//!
//! A [`Style`] carries colors and attributes (bold, dim, reverse, ...). Styles
//! cascade through the layout tree: a row style set by the caller is combined
//! under each cell's own style, so a selection background spans the whole row
//! while a bold header title stays bold.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use bitflags::bitflags;
use lru::LruCache;

use crate::color::{Color, ColorParseError, ColorSystem};

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u16 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DIM       = 1 << 1;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 2;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 3;
        /// Reverse video (SGR 7).
        const REVERSE   = 1 << 4;
        /// Strikethrough text (SGR 9).
        const STRIKE    = 1 << 5;
    }
}

impl Attributes {
    const SGR_CODES: [(Self, u8); 6] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::REVERSE, 7),
        (Self::STRIKE, 9),
    ];

    const NAMES: [(Self, &'static str); 6] = [
        (Self::BOLD, "bold"),
        (Self::DIM, "dim"),
        (Self::ITALIC, "italic"),
        (Self::UNDERLINE, "underline"),
        (Self::REVERSE, "reverse"),
        (Self::STRIKE, "strike"),
    ];

    /// Get the ANSI SGR codes for enabled attributes.
    #[must_use]
    pub fn to_sgr_codes(&self) -> Vec<u8> {
        Self::SGR_CODES
            .iter()
            .filter(|(attr, _)| self.contains(*attr))
            .map(|(_, code)| *code)
            .collect()
    }
}

/// Visual style for terminal text.
///
/// `set_attributes` records which attributes were explicitly chosen, so that
/// combining can switch an inherited attribute off (`not bold`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
    /// Which attributes are explicitly set (vs inherited).
    pub set_attributes: Attributes,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the style changes nothing.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.set_attributes.is_empty()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    fn with(mut self, attr: Attributes) -> Self {
        self.attributes.insert(attr);
        self.set_attributes.insert(attr);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.with(Attributes::BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.with(Attributes::DIM)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.with(Attributes::ITALIC)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.with(Attributes::UNDERLINE)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.with(Attributes::REVERSE)
    }

    #[must_use]
    pub fn strike(self) -> Self {
        self.with(Attributes::STRIKE)
    }

    /// Explicitly disable an attribute, overriding inherited styles.
    #[must_use]
    pub fn not(mut self, attr: Attributes) -> Self {
        self.attributes.remove(attr);
        self.set_attributes.insert(attr);
        self
    }

    /// Combine this style with another, with the other style taking precedence.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        if other.is_plain() {
            return self.clone();
        }
        if self.is_plain() {
            return other.clone();
        }

        Style {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            attributes: (self.attributes & !other.set_attributes)
                | (other.attributes & other.set_attributes),
            set_attributes: self.set_attributes | other.set_attributes,
        }
    }

    /// Generate the SGR parameter list for this style.
    #[must_use]
    pub fn make_ansi_codes(&self, color_system: ColorSystem) -> String {
        let mut codes: Vec<String> = self
            .attributes
            .to_sgr_codes()
            .into_iter()
            .map(|code| code.to_string())
            .collect();

        if let Some(color) = &self.color {
            codes.extend(color.downgrade(color_system).get_ansi_codes(true));
        }
        if let Some(bgcolor) = &self.bgcolor {
            codes.extend(bgcolor.downgrade(color_system).get_ansi_codes(false));
        }

        codes.join(";")
    }

    /// Render text with this style applied.
    #[must_use]
    pub fn render(&self, text: &str, color_system: ColorSystem) -> String {
        let codes = self.make_ansi_codes(color_system);
        if codes.is_empty() {
            return text.to_string();
        }
        format!("\x1b[{codes}m{text}\x1b[0m")
    }

    /// Parse a style from a string (cached).
    ///
    /// Supported formats:
    /// - Empty/none: `""`, `"none"` -> plain style
    /// - Attribute: `"bold"`, `"dim"`, `"reverse"`
    /// - Negative: `"not bold"`
    /// - Color: `"red"`, `"#ff0000"`
    /// - Background: `"on blue"`
    /// - Combined: `"bold white on blue"`
    ///
    /// # Errors
    ///
    /// Returns [`StyleParseError`] for unknown words, dangling `not`/`on`, or
    /// invalid colors.
    pub fn parse(style: &str) -> Result<Self, StyleParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Style>>> = LazyLock::new(|| {
            Mutex::new(LruCache::new(NonZeroUsize::new(256).expect("non-zero")))
        });

        let normalized = style.trim().to_lowercase();

        if let Ok(mut cache) = CACHE.lock()
            && let Some(cached) = cache.get(&normalized)
        {
            return Ok(cached.clone());
        }

        let result = Self::parse_uncached(&normalized)?;

        if let Ok(mut cache) = CACHE.lock() {
            cache.put(normalized, result.clone());
        }

        Ok(result)
    }

    fn parse_uncached(style: &str) -> Result<Self, StyleParseError> {
        if style.is_empty() || style == "none" {
            return Ok(Self::new());
        }

        let mut result = Style::new();
        let mut words = style.split_whitespace();

        while let Some(word) = words.next() {
            match word {
                "not" => {
                    let name = words.next().ok_or_else(|| {
                        StyleParseError::InvalidFormat("'not' requires an attribute".to_string())
                    })?;
                    let attr = parse_attribute(name)
                        .ok_or_else(|| StyleParseError::UnknownAttribute(name.to_string()))?;
                    result = result.not(attr);
                }
                "on" => {
                    let name = words.next().ok_or_else(|| {
                        StyleParseError::InvalidFormat("'on' requires a color".to_string())
                    })?;
                    result = result.bgcolor(Color::parse(name)?);
                }
                _ => {
                    if let Some(attr) = parse_attribute(word) {
                        result = result.with(attr);
                    } else if let Ok(color) = Color::parse(word) {
                        result = result.color(color);
                    } else {
                        return Err(StyleParseError::UnknownToken(word.to_string()));
                    }
                }
            }
        }

        Ok(result)
    }
}

impl std::ops::Add<&Style> for &Style {
    type Output = Style;

    fn add(self, rhs: &Style) -> Self::Output {
        self.combine(rhs)
    }
}

impl std::ops::Add for Style {
    type Output = Style;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();
        for (attr, name) in Attributes::NAMES {
            if self.set_attributes.contains(attr) {
                if self.attributes.contains(attr) {
                    parts.push(name.to_string());
                } else {
                    parts.push(format!("not {name}"));
                }
            }
        }
        if let Some(color) = &self.color {
            parts.push(color.to_string());
        }
        if let Some(bgcolor) = &self.bgcolor {
            parts.push(format!("on {bgcolor}"));
        }

        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_attribute(name: &str) -> Option<Attributes> {
    match name {
        "bold" | "b" => Some(Attributes::BOLD),
        "dim" | "d" => Some(Attributes::DIM),
        "italic" | "i" => Some(Attributes::ITALIC),
        "underline" | "u" => Some(Attributes::UNDERLINE),
        "reverse" | "r" => Some(Attributes::REVERSE),
        "strike" | "s" => Some(Attributes::STRIKE),
        _ => None,
    }
}

/// Error type for style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    InvalidFormat(String),
    UnknownAttribute(String),
    UnknownToken(String),
    Color(ColorParseError),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid style format: {s}"),
            Self::UnknownAttribute(s) => write!(f, "Unknown attribute: {s}"),
            Self::UnknownToken(s) => write!(f, "Unknown style token: {s}"),
            Self::Color(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StyleParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorParseError> for StyleParseError {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}
