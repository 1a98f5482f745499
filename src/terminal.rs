//! Terminal color capability detection.
//!
//! Tables render to plain strings or to ANSI-styled strings. Callers that
//! print straight to stdout can ask [`detect_color_system`] which palette the
//! terminal understands and pass the result to
//! [`Table::render_ansi`](crate::table::Table::render_ansi).

use std::io::IsTerminal;

use crate::color::ColorSystem;

/// Snapshot of the environment variables that influence color output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorEnv {
    pub no_color: Option<String>,
    pub force_color: Option<String>,
    pub colorterm: Option<String>,
    pub term: Option<String>,
}

impl ColorEnv {
    /// Read the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            no_color: std::env::var("NO_COLOR").ok(),
            force_color: std::env::var("FORCE_COLOR").ok(),
            colorterm: std::env::var("COLORTERM").ok(),
            term: std::env::var("TERM").ok(),
        }
    }

    fn forces_terminal(&self) -> bool {
        // Empty and "0" count as unset.
        self.force_color
            .as_deref()
            .map(str::trim)
            .is_some_and(|value| !value.is_empty() && value != "0")
    }
}

/// Detect the color system supported by stdout.
///
/// Checks environment variables to determine color capabilities:
/// - `NO_COLOR` (non-empty): no colors
/// - `COLORTERM=truecolor` or `24bit`: 24-bit color
/// - `TERM` suffix `-256color` / `-kitty`: 256 colors
/// - `TERM` suffix `-16color`: standard colors
/// - `TERM=dumb` or `TERM=unknown`: no colors
/// - Otherwise: standard colors when stdout is a terminal (or `FORCE_COLOR`
///   is set), none when it is not
#[must_use]
pub fn detect_color_system() -> Option<ColorSystem> {
    detect_color_system_with(&ColorEnv::from_env(), std::io::stdout().is_terminal())
}

/// Pure form of [`detect_color_system`] over an explicit environment.
#[must_use]
pub fn detect_color_system_with(env: &ColorEnv, is_tty: bool) -> Option<ColorSystem> {
    // https://no-color.org/
    if env.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
        return None;
    }

    if let Some(colorterm) = env.colorterm.as_deref() {
        let colorterm = colorterm.trim().to_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return Some(ColorSystem::TrueColor);
        }
    }

    let term = env
        .term
        .as_deref()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();
    if term == "dumb" || term == "unknown" {
        return None;
    }
    // "xterm-256color" -> "256color"
    match term.rsplit('-').next().unwrap_or("") {
        "kitty" | "256color" => return Some(ColorSystem::EightBit),
        "16color" => return Some(ColorSystem::Standard),
        _ => {}
    }

    (is_tty || env.forces_terminal()).then_some(ColorSystem::Standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_env(no_color: Option<&str>, colorterm: Option<&str>, term: Option<&str>) -> ColorEnv {
        ColorEnv {
            no_color: no_color.map(String::from),
            force_color: None,
            colorterm: colorterm.map(String::from),
            term: term.map(String::from),
        }
    }

    #[test]
    fn test_detect_color_system_runs() {
        let _ = detect_color_system();
    }

    #[test]
    fn test_no_color_disables_colors() {
        let env = make_env(Some("1"), Some("truecolor"), Some("xterm-256color"));
        assert_eq!(detect_color_system_with(&env, true), None);
    }

    #[test]
    fn test_no_color_empty_string_ignored() {
        let env = make_env(Some(""), Some("truecolor"), None);
        assert_eq!(
            detect_color_system_with(&env, true),
            Some(ColorSystem::TrueColor)
        );
    }

    #[test]
    fn test_colorterm() {
        for value in ["truecolor", "24bit", "TRUECOLOR"] {
            let env = make_env(None, Some(value), Some("xterm"));
            assert_eq!(
                detect_color_system_with(&env, false),
                Some(ColorSystem::TrueColor),
                "COLORTERM={value}"
            );
        }
    }

    #[test]
    fn test_term_suffixes() {
        let cases = [
            ("xterm-256color", Some(ColorSystem::EightBit)),
            ("xterm-kitty", Some(ColorSystem::EightBit)),
            ("xterm-16color", Some(ColorSystem::Standard)),
            ("dumb", None),
            ("UNKNOWN", None),
        ];
        for (term, expected) in cases {
            let env = make_env(None, None, Some(term));
            assert_eq!(detect_color_system_with(&env, true), expected, "TERM={term}");
        }
    }

    #[test]
    fn test_tty_fallback() {
        let env = make_env(None, None, Some("xterm"));
        assert_eq!(
            detect_color_system_with(&env, true),
            Some(ColorSystem::Standard)
        );
        assert_eq!(detect_color_system_with(&env, false), None);
    }

    #[test]
    fn test_force_color() {
        let mut env = make_env(None, None, None);
        env.force_color = Some("1".to_string());
        assert_eq!(
            detect_color_system_with(&env, false),
            Some(ColorSystem::Standard)
        );

        env.force_color = Some(" 0 ".to_string());
        assert_eq!(detect_color_system_with(&env, false), None);
    }
}
