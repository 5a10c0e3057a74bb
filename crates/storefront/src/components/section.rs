//! Titled content section wrapping other markup.

use std::fmt;

use askama::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionTheme {
    #[default]
    Default,
    /// Product listing page.
    Plp,
}

impl fmt::Display for SectionTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Plp => "plp",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionView {
    pub theme: SectionTheme,
    pub title: Option<String>,
    pub copy: Option<String>,
}

impl SectionView {
    #[must_use]
    pub fn new(theme: SectionTheme, title: impl Into<String>) -> Self {
        Self {
            theme,
            title: Some(title.into()),
            copy: None,
        }
    }

    /// Set the copy line; empty text is dropped.
    #[must_use]
    pub fn with_copy(mut self, copy: impl Into<String>) -> Self {
        let copy = copy.into();
        self.copy = (!copy.is_empty()).then_some(copy);
        self
    }
}

/// A section with pre-rendered `body` markup.
#[derive(Template)]
#[template(path = "components/section.html")]
pub struct SectionTemplate<'a> {
    pub section: &'a SectionView,
    pub body: &'a str,
}
