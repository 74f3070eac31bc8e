//! Draws the lyrics pane to a terminal using theme colors.

use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use subtune_core::{Color, ColorName, LyricsPane, MediaItemMetadata, Theme, ThemeVariant};

/// Terminal colors resolved from the theme once at startup
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub heading: Color,
    pub active: Color,
    pub inactive: Color,
    pub placeholder: Color,
}

impl Palette {
    pub fn from_theme(theme: &impl Theme, variant: ThemeVariant) -> Self {
        Self {
            heading: theme.color(ColorName::Foreground, variant),
            active: theme.color(ColorName::Primary, variant),
            inactive: theme.color(ColorName::Disabled, variant),
            placeholder: theme.color(ColorName::Placeholder, variant),
        }
    }
}

const fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Format seconds as m:ss
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Redraw the whole view: a "now playing" heading and the lyrics window
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn draw(
    out: &mut impl Write,
    now_playing: &MediaItemMetadata,
    pane: &LyricsPane,
    rows: usize,
    palette: &Palette,
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let mut heading = now_playing.name.clone();
    if !now_playing.artists.is_empty() {
        heading.push_str(" - ");
        heading.push_str(&now_playing.artists.join(", "));
    }
    if now_playing.duration > 0 {
        heading.push_str(&format!(" [{}]", format_duration(now_playing.duration)));
    }
    queue!(
        out,
        SetForegroundColor(term_color(palette.heading)),
        SetAttribute(Attribute::Bold),
        Print(heading),
        SetAttribute(Attribute::Reset),
        MoveToNextLine(2),
    )?;

    if pane.is_empty() {
        queue!(
            out,
            SetForegroundColor(term_color(palette.placeholder)),
            Print(pane.placeholder()),
            MoveToNextLine(1),
        )?;
    } else {
        for line in pane.visible_lines(rows) {
            let color = if line.active || !pane.is_synced() {
                palette.active
            } else {
                palette.inactive
            };
            queue!(out, SetForegroundColor(term_color(color)))?;
            if line.active {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                out,
                Print(line.text),
                SetAttribute(Attribute::Reset),
                MoveToNextLine(1),
            )?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtune_core::{ActiveLinePosition, AppTheme, FontCache, LyricsDisplay};

    fn palette() -> Palette {
        Palette::from_theme(&AppTheme::new(FontCache::default()), ThemeVariant::Dark)
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(215), "3:35");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn test_draw_placeholder() {
        let pane = LyricsPane::new("Lyrics not available", ActiveLinePosition::TopThird);
        let meta = MediaItemMetadata {
            name: "Song".to_string(),
            ..Default::default()
        };
        let mut out = Vec::new();
        draw(&mut out, &meta, &pane, 5, &palette()).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Song"));
        assert!(text.contains("Lyrics not available"));
    }

    #[test]
    fn test_draw_lines() {
        let mut pane = LyricsPane::new("none", ActiveLinePosition::Center);
        pane.show_lyrics(&["First".to_string(), "Second".to_string()], true);
        pane.set_current_line(2);
        let meta = MediaItemMetadata {
            name: "Song".to_string(),
            artists: vec!["A".to_string(), "B".to_string()],
            duration: 75,
            ..Default::default()
        };
        let mut out = Vec::new();
        draw(&mut out, &meta, &pane, 5, &palette()).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Song - A, B [1:15]"));
        assert!(text.contains("First"));
        assert!(text.contains("Second"));
        assert!(!text.contains("none"));
    }
}
