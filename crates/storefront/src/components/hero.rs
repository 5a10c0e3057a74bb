//! Full-width hero banner.

use std::fmt;

use askama::Template;

use super::ImageView;

/// Default hero image height in pixels.
pub const DEFAULT_HERO_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroTheme {
    LightOverlay,
    DarkOverlay,
}

impl fmt::Display for HeroTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LightOverlay => "light-overlay",
            Self::DarkOverlay => "dark-overlay",
        })
    }
}

/// Where the hero content sits over the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroPosition {
    #[default]
    BottomLeft,
    Center,
}

impl fmt::Display for HeroPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BottomLeft => "bottom-left",
            Self::Center => "center",
        })
    }
}

/// Hero display data.
#[derive(Debug, Clone)]
pub struct HeroView {
    pub theme: HeroTheme,
    pub image: Option<ImageView>,
    pub height: u32,
    pub position: HeroPosition,
    pub title: Option<String>,
    pub copy: Option<String>,
    pub cta: String,
    pub cta_url: String,
}

impl HeroView {
    #[must_use]
    pub fn new(theme: HeroTheme, cta: impl Into<String>, cta_url: impl Into<String>) -> Self {
        Self {
            theme,
            image: None,
            height: DEFAULT_HERO_HEIGHT,
            position: HeroPosition::default(),
            title: None,
            copy: None,
            cta: cta.into(),
            cta_url: cta_url.into(),
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<ImageView>) -> Self {
        self.image = image;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_copy(mut self, copy: impl Into<String>) -> Self {
        self.copy = Some(copy.into());
        self
    }

    #[must_use]
    pub const fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: HeroPosition) -> Self {
        self.position = position;
        self
    }
}

#[derive(Template)]
#[template(path = "components/hero.html")]
pub struct HeroTemplate<'a> {
    pub hero: &'a HeroView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_renders_theme_and_position() {
        let hero = HeroView::new(HeroTheme::DarkOverlay, "Shop now", "/collections/all")
            .with_height(540)
            .with_title("Spring");
        let html = HeroTemplate { hero: &hero }.render().unwrap();

        assert!(html.contains(r#"hero-theme="dark-overlay""#));
        assert!(html.contains(r#"hero-position="bottom-left""#));
        assert!(html.contains("Spring"));
        assert!(html.contains(r#"href="/collections/all""#));
        assert!(!html.contains("hero-copy"));
    }
}
