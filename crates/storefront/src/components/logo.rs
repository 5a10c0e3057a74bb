//! Prier Tire Supply wordmark.

use std::fmt;

use askama::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoSize {
    Small,
    #[default]
    Large,
}

impl fmt::Display for LogoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "small",
            Self::Large => "large",
        })
    }
}

/// Color scheme, matched to the background the logo sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoMode {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for LogoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Logo display data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogoView {
    pub size: LogoSize,
    pub mode: LogoMode,
    /// Spin the tire on load.
    pub animate: bool,
}

impl LogoView {
    #[must_use]
    pub const fn new(size: LogoSize, mode: LogoMode) -> Self {
        Self {
            size,
            mode,
            animate: false,
        }
    }

    #[must_use]
    pub const fn animated(mut self) -> Self {
        self.animate = true;
        self
    }
}

#[derive(Template)]
#[template(path = "components/logo.html")]
pub struct LogoTemplate<'a> {
    pub logo: &'a LogoView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_renders_both_lines_and_attributes() {
        let logo = LogoView::new(LogoSize::Small, LogoMode::Dark);
        let html = LogoTemplate { logo: &logo }.render().unwrap();

        assert!(html.contains(r#"<span class="logo-line-1">Prier</span>"#));
        assert!(html.contains(r#"<span class="logo-line-2">Tire Supply</span>"#));
        assert!(html.contains(r#"logo-size="small""#));
        assert!(html.contains(r#"logo-mode="dark""#));
        assert!(html.contains(r#"logo-animate="false""#));
    }

    #[test]
    fn test_animated_logo() {
        let logo = LogoView::default().animated();
        let html = LogoTemplate { logo: &logo }.render().unwrap();
        assert!(html.contains(r#"logo-size="large""#));
        assert!(html.contains(r#"logo-animate="true""#));
    }
}
