//! Terminal colors for table styling.
//!
//! Colors are stored as the terminal would address them (default, a palette
//! number, or 24-bit RGB) and downgraded to the detected [`ColorSystem`] when
//! ANSI escapes are produced.
//!
//! ```
//! use rich_table::color::{Color, ColorSystem};
//!
//! let header = Color::parse("bright_cyan").unwrap();
//! let accent = Color::parse("#ff8800").unwrap();
//!
//! assert_eq!(header.get_ansi_codes(true), vec!["96"]);
//! assert_eq!(accent.downgrade(ColorSystem::EightBit), Color::from_ansi(208));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Terminal color system capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum ColorSystem {
    /// 4-bit ANSI colors (16 colors).
    #[default]
    Standard,
    /// 8-bit colors (256 colors).
    EightBit,
    /// 24-bit RGB colors.
    TrueColor,
}

impl ColorSystem {
    /// Get the name of this color system.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::EightBit => "256",
            Self::TrueColor => "truecolor",
        }
    }
}

/// RGB components of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// CSS-style hex representation (`#rrggbb`).
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    fn distance(&self, other: &Self) -> u32 {
        let dr = i32::from(self.red) - i32::from(other.red);
        let dg = i32::from(self.green) - i32::from(other.green);
        let db = i32::from(self.blue) - i32::from(other.blue);
        (dr * dr + dg * dg + db * db).unsigned_abs()
    }
}

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's own foreground/background.
    #[default]
    Default,
    /// Palette color 0-255 (0-15 are the standard colors).
    Ansi(u8),
    /// 24-bit color.
    Rgb(ColorTriplet),
}

/// The 16 standard colors, approximating the xterm palette.
const STANDARD_PALETTE: [ColorTriplet; 16] = [
    ColorTriplet::new(0, 0, 0),
    ColorTriplet::new(128, 0, 0),
    ColorTriplet::new(0, 128, 0),
    ColorTriplet::new(128, 128, 0),
    ColorTriplet::new(0, 0, 128),
    ColorTriplet::new(128, 0, 128),
    ColorTriplet::new(0, 128, 128),
    ColorTriplet::new(192, 192, 192),
    ColorTriplet::new(128, 128, 128),
    ColorTriplet::new(255, 0, 0),
    ColorTriplet::new(0, 255, 0),
    ColorTriplet::new(255, 255, 0),
    ColorTriplet::new(0, 0, 255),
    ColorTriplet::new(255, 0, 255),
    ColorTriplet::new(0, 255, 255),
    ColorTriplet::new(255, 255, 255),
];

const NAMED_COLORS: [(&str, u8); 18] = [
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("white", 7),
    ("bright_black", 8),
    ("grey", 8),
    ("gray", 8),
    ("bright_red", 9),
    ("bright_green", 10),
    ("bright_yellow", 11),
    ("bright_blue", 12),
    ("bright_magenta", 13),
    ("bright_cyan", 14),
    ("bright_white", 15),
];

/// Channel levels of the 6x6x6 cube in the 256-color palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl Color {
    /// Create a palette color.
    #[must_use]
    pub const fn from_ansi(number: u8) -> Self {
        Self::Ansi(number)
    }

    /// Create a 24-bit color.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::Rgb(ColorTriplet::new(red, green, blue))
    }

    /// The least capable color system that can show this color exactly.
    #[must_use]
    pub const fn system(&self) -> ColorSystem {
        match self {
            Self::Default => ColorSystem::Standard,
            Self::Ansi(n) if *n < 16 => ColorSystem::Standard,
            Self::Ansi(_) => ColorSystem::EightBit,
            Self::Rgb(_) => ColorSystem::TrueColor,
        }
    }

    /// Approximate RGB value of this color.
    #[must_use]
    pub fn triplet(&self) -> ColorTriplet {
        match *self {
            Self::Default => ColorTriplet::default(),
            Self::Rgb(triplet) => triplet,
            Self::Ansi(n) if n < 16 => STANDARD_PALETTE[usize::from(n)],
            Self::Ansi(n) if n < 232 => {
                let index = n - 16;
                ColorTriplet::new(
                    CUBE_LEVELS[usize::from(index / 36)],
                    CUBE_LEVELS[usize::from((index / 6) % 6)],
                    CUBE_LEVELS[usize::from(index % 6)],
                )
            }
            Self::Ansi(n) => {
                let level = 8 + (n - 232) * 10;
                ColorTriplet::new(level, level, level)
            }
        }
    }

    /// SGR parameters selecting this color as foreground or background.
    #[must_use]
    pub fn get_ansi_codes(&self, foreground: bool) -> Vec<String> {
        match *self {
            Self::Default => vec![if foreground { "39" } else { "49" }.to_string()],
            Self::Ansi(n) if n < 8 => {
                let base: u16 = if foreground { 30 } else { 40 };
                vec![(base + u16::from(n)).to_string()]
            }
            Self::Ansi(n) if n < 16 => {
                let base: u16 = if foreground { 82 } else { 92 };
                vec![(base + u16::from(n)).to_string()]
            }
            Self::Ansi(n) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "5".to_string(),
                n.to_string(),
            ],
            Self::Rgb(triplet) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "2".to_string(),
                triplet.red.to_string(),
                triplet.green.to_string(),
                triplet.blue.to_string(),
            ],
        }
    }

    /// Downgrade to the closest color the given system can show.
    #[must_use]
    pub fn downgrade(&self, system: ColorSystem) -> Self {
        if self.system() <= system {
            return *self;
        }
        let triplet = self.triplet();
        match system {
            ColorSystem::TrueColor => *self,
            ColorSystem::EightBit => Self::Ansi(rgb_to_eight_bit(triplet)),
            ColorSystem::Standard => Self::Ansi(rgb_to_standard(triplet)),
        }
    }

    /// Parse a color string.
    ///
    /// Supported formats: `default`, named colors (`red`, `bright_blue`),
    /// `#rrggbb`, `#rgb`, `color(N)` and `rgb(r, g, b)`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] when the string matches none of the formats
    /// or a component is out of range.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static COLOR_NUM_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^color\((\d{1,3})\)$").expect("valid regex"));
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
                .expect("valid regex")
        });

        let color = color.trim().to_lowercase();
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if color == "default" {
            return Ok(Self::Default);
        }

        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(color.clone()));
        }

        if let Some(caps) = COLOR_NUM_RE.captures(&color) {
            return caps[1]
                .parse::<u8>()
                .map(Self::Ansi)
                .map_err(|_| ColorParseError::InvalidColorNumber(color.clone()));
        }

        if let Some(caps) = RGB_RE.captures(&color) {
            return match (
                caps[1].parse::<u8>(),
                caps[2].parse::<u8>(),
                caps[3].parse::<u8>(),
            ) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb(r, g, b)),
                _ => Err(ColorParseError::InvalidRgb(color.clone())),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == color)
            .map(|&(_, number)| Self::Ansi(number))
            .ok_or(ColorParseError::UnknownColor(color))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 if hex.is_ascii() => Some(Color::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 if hex.is_ascii() => {
            let doubled = |i: usize| channel(&hex[i..=i].repeat(2));
            Some(Color::from_rgb(doubled(0)?, doubled(1)?, doubled(2)?))
        }
        _ => None,
    }
}

/// Nearest 256-color palette entry (cube or grayscale ramp).
#[must_use]
pub fn rgb_to_eight_bit(triplet: ColorTriplet) -> u8 {
    let nearest_level = |value: u8| -> u8 {
        let mut best = 0;
        for (i, level) in CUBE_LEVELS.iter().enumerate() {
            if value.abs_diff(*level) < value.abs_diff(CUBE_LEVELS[best]) {
                best = i;
            }
        }
        u8::try_from(best).unwrap_or(0)
    };
    let (r, g, b) = (
        nearest_level(triplet.red),
        nearest_level(triplet.green),
        nearest_level(triplet.blue),
    );
    let cube = 16 + 36 * r + 6 * g + b;

    let average = (u16::from(triplet.red) + u16::from(triplet.green) + u16::from(triplet.blue)) / 3;
    let gray = 232 + u8::try_from((average.saturating_sub(3) / 10).min(23)).unwrap_or(23);

    if Color::Ansi(gray).triplet().distance(&triplet) < Color::Ansi(cube).triplet().distance(&triplet) {
        gray
    } else {
        cube
    }
}

/// Nearest of the 16 standard colors.
#[must_use]
pub fn rgb_to_standard(triplet: ColorTriplet) -> u8 {
    let mut best = 0;
    for (i, candidate) in STANDARD_PALETTE.iter().enumerate() {
        if candidate.distance(&triplet) < STANDARD_PALETTE[best].distance(&triplet) {
            best = i;
        }
    }
    u8::try_from(best).unwrap_or(0)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Ansi(n) => match NAMED_COLORS.iter().find(|(_, number)| number == n) {
                Some((name, _)) => write!(f, "{name}"),
                None => write!(f, "color({n})"),
            },
            Self::Rgb(triplet) => write!(f, "{}", triplet.hex()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidColorNumber(String),
    InvalidRgb(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidColorNumber(s) => write!(f, "Invalid color number: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
