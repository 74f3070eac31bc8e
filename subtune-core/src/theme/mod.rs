//! Theme lookup for the renderer.
//!
//! A [`Theme`] maps symbolic names (colors per variant, icons, sizes, text
//! styles) to concrete values. [`DefaultTheme`] covers every name;
//! [`AppTheme`] overrides a handful of them and defers the rest to a fallback.

mod font;
mod icon;

pub use font::{read_ttf_file, FontCache};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Light or dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Symbolic color names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    Background,
    Button,
    DisabledButton,
    Disabled,
    Error,
    Focus,
    Foreground,
    Hover,
    InputBackground,
    InputBorder,
    Placeholder,
    Pressed,
    Primary,
    ScrollBar,
    Selection,
    Separator,
    Shadow,
    Success,
    Warning,
    /// Background of the main content pages, distinct from chrome
    PageBackground,
}

/// Symbolic icon names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconName {
    Home,
    Search,
    Settings,
    Menu,
    MediaPlay,
    MediaPause,
    MediaSkipNext,
    MediaSkipPrevious,
    VolumeUp,
    VolumeMute,
    NowPlaying,
    Favorite,
    NotFavorite,
    Album,
    Artist,
    Genre,
    Playlist,
    Shuffle,
}

/// Symbolic size names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeName {
    Text,
    HeadingText,
    SubHeadingText,
    CaptionText,
    Padding,
    InnerPadding,
    LineSpacing,
    IconInline,
    ScrollBar,
    ScrollBarSmall,
    Separator,
    InputBorder,
    InputRadius,
    SelectionRadius,
}

/// Text style flags used to pick a font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub symbol: bool,
}

impl TextStyle {
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
        monospace: false,
        symbol: false,
    };

    pub const BOLD: Self = Self {
        bold: true,
        ..Self::REGULAR
    };
}

/// A named blob of bytes (icon image or font file)
#[derive(Clone, PartialEq, Eq)]
pub struct Resource {
    name: Cow<'static, str>,
    content: Cow<'static, [u8]>,
}

impl Resource {
    #[must_use]
    pub const fn from_static(name: &'static str, content: &'static [u8]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            content: Cow::Borrowed(content),
        }
    }

    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            content: Cow::Owned(content),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Font to render a text style with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontResource {
    /// The renderer's built-in font for this style
    Builtin(TextStyle),
    /// A font file loaded from disk
    Custom(Arc<Resource>),
}

/// Resolves symbolic theme names to concrete values
pub trait Theme {
    fn color(&self, name: ColorName, variant: ThemeVariant) -> Color;
    fn icon(&self, name: IconName) -> Resource;
    fn font(&self, style: TextStyle) -> FontResource;
    fn size(&self, name: SizeName) -> f32;
}

impl<T: Theme + ?Sized> Theme for &T {
    fn color(&self, name: ColorName, variant: ThemeVariant) -> Color {
        (**self).color(name, variant)
    }

    fn icon(&self, name: IconName) -> Resource {
        (**self).icon(name)
    }

    fn font(&self, style: TextStyle) -> FontResource {
        (**self).font(style)
    }

    fn size(&self, name: SizeName) -> f32 {
        (**self).size(name)
    }
}

/// Built-in theme that knows every name
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn color(&self, name: ColorName, variant: ThemeVariant) -> Color {
        let dark = variant == ThemeVariant::Dark;
        let pick = |d: Color, l: Color| if dark { d } else { l };
        match name {
            ColorName::Background | ColorName::PageBackground => {
                pick(Color::rgb(23, 24, 26), Color::rgb(255, 255, 255))
            }
            ColorName::Button => pick(Color::rgb(40, 41, 46), Color::rgb(245, 245, 245)),
            ColorName::DisabledButton => pick(Color::rgb(38, 38, 40), Color::rgb(229, 229, 229)),
            ColorName::Disabled => pick(Color::rgb(57, 57, 58), Color::rgb(227, 227, 227)),
            ColorName::Error => Color::rgb(244, 67, 54),
            ColorName::Focus => Color::rgba(41, 111, 246, 127),
            ColorName::Foreground => pick(Color::rgb(243, 243, 243), Color::rgb(86, 86, 86)),
            ColorName::Hover => pick(Color::rgba(255, 255, 255, 15), Color::rgba(0, 0, 0, 15)),
            ColorName::InputBackground => pick(Color::rgb(32, 32, 35), Color::rgb(243, 243, 243)),
            ColorName::InputBorder => pick(Color::rgb(57, 57, 58), Color::rgb(227, 227, 227)),
            ColorName::Placeholder => pick(Color::rgb(178, 178, 178), Color::rgb(136, 136, 136)),
            ColorName::Pressed => pick(Color::rgba(255, 255, 255, 102), Color::rgba(0, 0, 0, 25)),
            ColorName::Primary => Color::rgb(41, 111, 246),
            ColorName::ScrollBar => pick(Color::rgba(255, 255, 255, 153), Color::rgba(0, 0, 0, 153)),
            ColorName::Selection => Color::rgba(41, 111, 246, 63),
            ColorName::Separator => pick(Color::rgb(0, 0, 0), Color::rgb(227, 227, 227)),
            ColorName::Shadow => pick(Color::rgba(0, 0, 0, 102), Color::rgba(0, 0, 0, 51)),
            ColorName::Success => Color::rgb(67, 244, 54),
            ColorName::Warning => Color::rgb(255, 152, 0),
        }
    }

    fn icon(&self, name: IconName) -> Resource {
        icon::builtin(name)
    }

    fn font(&self, style: TextStyle) -> FontResource {
        FontResource::Builtin(style)
    }

    fn size(&self, name: SizeName) -> f32 {
        match name {
            SizeName::Text => 14.0,
            SizeName::HeadingText => 24.0,
            SizeName::SubHeadingText => 18.0,
            SizeName::CaptionText => 11.0,
            SizeName::Padding | SizeName::LineSpacing => 4.0,
            SizeName::InnerPadding => 8.0,
            SizeName::IconInline => 20.0,
            SizeName::ScrollBar => 16.0,
            SizeName::ScrollBarSmall => 3.0,
            SizeName::Separator | SizeName::InputBorder => 1.0,
            SizeName::InputRadius => 5.0,
            SizeName::SelectionRadius => 3.0,
        }
    }
}

/// The application's theme: a few color, icon and font overrides on top of
/// a fallback theme.
#[derive(Debug)]
pub struct AppTheme<F = DefaultTheme> {
    fallback: F,
    fonts: FontCache,
}

impl AppTheme<DefaultTheme> {
    #[must_use]
    pub const fn new(fonts: FontCache) -> Self {
        Self::with_fallback(DefaultTheme, fonts)
    }
}

impl<F: Theme> AppTheme<F> {
    pub const fn with_fallback(fallback: F, fonts: FontCache) -> Self {
        Self { fallback, fonts }
    }

    #[must_use]
    pub const fn fonts(&self) -> &FontCache {
        &self.fonts
    }
}

impl<F: Theme> Theme for AppTheme<F> {
    fn color(&self, name: ColorName, variant: ThemeVariant) -> Color {
        let dark = variant == ThemeVariant::Dark;
        let pick = |d: Color, l: Color| if dark { d } else { l };
        let overridden = match name {
            ColorName::PageBackground => Some(pick(Color::rgb(15, 15, 15), Color::rgb(255, 255, 255))),
            ColorName::Background => Some(pick(Color::rgb(35, 35, 35), Color::rgb(240, 240, 240))),
            ColorName::ScrollBar => Some(self.fallback.color(ColorName::Foreground, variant)),
            ColorName::Button => Some(pick(
                Color::rgba(20, 20, 20, 50),
                Color::rgba(200, 200, 200, 240),
            )),
            ColorName::InputBackground if dark => Some(Color::rgba(20, 20, 20, 50)),
            ColorName::Foreground if !dark => Some(Color::rgb(10, 10, 10)),
            ColorName::Primary if !dark => Some(Color::rgb(25, 25, 250)),
            _ => None,
        };
        overridden.unwrap_or_else(|| self.fallback.color(name, variant))
    }

    fn icon(&self, name: IconName) -> Resource {
        icon::app(name).unwrap_or_else(|| self.fallback.icon(name))
    }

    fn font(&self, style: TextStyle) -> FontResource {
        if style == TextStyle::REGULAR {
            if let Some(font) = self.fonts.normal() {
                return FontResource::Custom(font);
            }
        } else if style == TextStyle::BOLD {
            if let Some(font) = self.fonts.bold().or_else(|| self.fonts.normal()) {
                return FontResource::Custom(font);
            }
        }
        self.fallback.font(style)
    }

    fn size(&self, name: SizeName) -> f32 {
        self.fallback.size(name)
    }
}
