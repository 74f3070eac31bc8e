//! Lyrics viewer: keeps a highlighted line in step with playback position.
//!
//! [`LyricsViewer`] owns a cursor over the loaded [`Lyrics`] and translates
//! position updates into calls on a [`LyricsDisplay`]. In the common case a
//! position update only looks at the next line; the full line list is scanned
//! only after a seek.

use crate::media::Lyrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const LOG_TARGET: &str = "subtune::lyrics";

/// Display side of the lyrics viewer.
///
/// Line numbers passed to [`set_current_line`](Self::set_current_line) are
/// one-indexed: `n` highlights the `n`th line and `0` highlights nothing.
pub trait LyricsDisplay {
    /// Show the "no lyrics" placeholder instead of any lines
    fn show_placeholder(&mut self);

    /// Replace the displayed lines. Unsynced lyrics are shown without highlight.
    fn show_lyrics(&mut self, lines: &[String], synced: bool);

    /// Move the highlight down one line
    fn next_line(&mut self);

    /// Jump the highlight to a one-indexed line
    fn set_current_line(&mut self, line: usize);
}

/// Cursor over a set of lyrics, driven by playback position.
///
/// All methods must be called from the thread that owns the display.
#[derive(Debug)]
pub struct LyricsViewer<D> {
    display: D,
    lyrics: Option<Lyrics>,
    /// Next line whose start has not been passed, clamped to the last line
    next_line: usize,
    last_position: f64,
    /// No position update has been seen since the last load
    first_update: bool,
    /// The last line has been highlighted, nothing is left to advance to
    finished: bool,
}

impl<D: LyricsDisplay> LyricsViewer<D> {
    /// Create a viewer showing the placeholder
    pub fn new(mut display: D) -> Self {
        display.show_placeholder();
        Self {
            display,
            lyrics: None,
            next_line: 0,
            last_position: 0.0,
            first_update: true,
            finished: false,
        }
    }

    /// Replace the current lyrics.
    ///
    /// `None` or lyrics without lines switch the display to the placeholder.
    pub fn load(&mut self, lyrics: Option<Lyrics>) {
        self.next_line = 0;
        self.last_position = 0.0;
        self.first_update = true;
        self.finished = false;

        match lyrics.filter(|lyrics| !lyrics.is_empty()) {
            Some(lyrics) => {
                let lines: Vec<String> = lyrics.lines.iter().map(|l| l.text.clone()).collect();
                debug!(
                    target: LOG_TARGET,
                    "Loaded {} lyric lines (synced: {})",
                    lines.len(),
                    lyrics.synced
                );
                self.display.show_lyrics(&lines, lyrics.synced);
                self.lyrics = Some(lyrics);
            }
            None => {
                debug!(target: LOG_TARGET, "No lyrics to show");
                self.lyrics = None;
                self.display.show_placeholder();
            }
        }
    }

    /// Report the current playback position in seconds.
    ///
    /// Advances the highlight by at most one line per call, so callers must
    /// report often enough (every render tick) that no two line starts fall
    /// between consecutive calls. The first update after a load, and any
    /// update that goes backwards, are handled as a seek.
    pub fn advance_to(&mut self, time_secs: f64) {
        let Some(lyrics) = self.synced_lyrics() else {
            return;
        };
        let line_count = lyrics.lines.len();
        let next_start = lyrics.lines.get(self.next_line).map(|line| line.start);

        if self.first_update || time_secs < self.last_position {
            self.first_update = false;
            self.on_seeked(time_secs);
            return;
        }

        self.last_position = time_secs;
        if self.finished {
            return;
        }

        if next_start.is_some_and(|start| start <= time_secs) {
            trace!(target: LOG_TARGET, "Advancing past line {}", self.next_line);
            self.display.next_line();
            if self.next_line + 1 < line_count {
                self.next_line += 1;
            } else {
                self.finished = true;
            }
        }
    }

    /// Recompute the cursor after playback jumped to `time_secs`.
    ///
    /// The cursor lands on the first line starting after `time_secs`, and the
    /// display is told to highlight that same number one-indexed, which is
    /// the line just before it. Past the last start the final line is
    /// highlighted.
    pub fn on_seeked(&mut self, time_secs: f64) {
        self.last_position = time_secs;
        let Some(lyrics) = self.synced_lyrics() else {
            return;
        };
        let line_count = lyrics.lines.len();
        let upcoming = lyrics.lines.iter().position(|line| line.start > time_secs);

        match upcoming {
            Some(index) => {
                self.next_line = index;
                self.finished = false;
                self.display.set_current_line(index);
            }
            None => {
                self.next_line = line_count.saturating_sub(1);
                self.finished = true;
                self.display.set_current_line(line_count);
            }
        }
        trace!(
            target: LOG_TARGET,
            "Seeked to {time_secs:.2}s, next line {}",
            self.next_line
        );
    }

    fn synced_lyrics(&self) -> Option<&Lyrics> {
        self.lyrics.as_ref().filter(|lyrics| lyrics.synced)
    }
}

impl<D> LyricsViewer<D> {
    /// Currently loaded lyrics, `None` when the placeholder is shown
    #[must_use]
    pub const fn lyrics(&self) -> Option<&Lyrics> {
        self.lyrics.as_ref()
    }

    /// Index of the next line to be highlighted
    #[must_use]
    pub const fn next_line_index(&self) -> usize {
        self.next_line
    }

    /// Last reported playback position in seconds
    #[must_use]
    pub const fn last_position(&self) -> f64 {
        self.last_position
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

/// Where the highlighted line sits within the visible window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveLinePosition {
    #[default]
    TopThird,
    Center,
}

impl ActiveLinePosition {
    /// Row of the highlighted line in a window of `rows` rows
    #[must_use]
    pub const fn anchor_row(self, rows: usize) -> usize {
        match self {
            Self::TopThird => rows / 3,
            Self::Center => rows / 2,
        }
    }
}

/// A line as laid out for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneLine<'a> {
    pub text: &'a str,
    pub active: bool,
}

/// Toolkit-independent display model for lyrics.
///
/// Holds what a renderer needs to draw the lyrics view: either the
/// placeholder text or the lines plus the one-indexed highlighted line.
#[derive(Debug, Clone)]
pub struct LyricsPane {
    placeholder: String,
    active_position: ActiveLinePosition,
    lines: Vec<String>,
    synced: bool,
    current_line: usize,
    empty: bool,
}

impl LyricsPane {
    pub fn new(placeholder: impl Into<String>, active_position: ActiveLinePosition) -> Self {
        Self {
            placeholder: placeholder.into(),
            active_position,
            lines: Vec::new(),
            synced: false,
            current_line: 0,
            empty: true,
        }
    }

    /// Whether the placeholder is shown
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.synced
    }

    /// One-indexed highlighted line, 0 when nothing is highlighted
    #[must_use]
    pub const fn current_line(&self) -> usize {
        self.current_line
    }

    /// Text of the highlighted line
    #[must_use]
    pub fn current_text(&self) -> Option<&str> {
        if self.empty || !self.synced {
            return None;
        }
        self.current_line
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// Lines around the highlight, for a window of `rows` rows.
    ///
    /// Unsynced lyrics are shown from the top with no highlight. Before the
    /// first line is reached the window starts at the first line.
    #[must_use]
    pub fn visible_lines(&self, rows: usize) -> Vec<PaneLine<'_>> {
        if self.empty || rows == 0 {
            return Vec::new();
        }
        if !self.synced {
            return self
                .lines
                .iter()
                .take(rows)
                .map(|text| PaneLine {
                    text: text.as_str(),
                    active: false,
                })
                .collect();
        }

        let active = self.current_line.checked_sub(1);
        let anchor = self.active_position.anchor_row(rows);
        let start = active.map_or(0, |i| i.saturating_sub(anchor));
        let end = (start + rows).min(self.lines.len());

        self.lines[start..end]
            .iter()
            .enumerate()
            .map(|(offset, text)| PaneLine {
                text: text.as_str(),
                active: active == Some(start + offset),
            })
            .collect()
    }
}

impl LyricsDisplay for LyricsPane {
    fn show_placeholder(&mut self) {
        self.empty = true;
        self.lines.clear();
        self.current_line = 0;
    }

    fn show_lyrics(&mut self, lines: &[String], synced: bool) {
        self.empty = false;
        self.lines = lines.to_vec();
        self.synced = synced;
        self.current_line = 0;
    }

    fn next_line(&mut self) {
        if self.current_line < self.lines.len() {
            self.current_line += 1;
        }
    }

    fn set_current_line(&mut self, line: usize) {
        self.current_line = line.min(self.lines.len());
    }
}
