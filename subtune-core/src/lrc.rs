//! LRC lyrics loading.
//!
//! Turns `.lrc` text into [`Lyrics`]. Timestamped lines produce synced lyrics;
//! text with no timestamps at all is kept as unsynced lyrics so it can still be
//! shown as static text.

use crate::error::{CoreError, Result};
use crate::media::{LyricLine, Lyrics};
use std::fs;
use std::path::Path;
use tracing::debug;

const LOG_TARGET: &str = "subtune::lrc";

/// ID tags found in the LRC header
#[derive(Debug, Clone, Default)]
struct LrcHeader {
    title: Option<String>,
    artist: Option<String>,
    /// Milliseconds, can be negative
    offset: i64,
}

/// Parse LRC text into lyrics.
///
/// # Errors
///
/// Returns [`CoreError::LrcParseError`] if the input contains no lyric text.
pub fn parse_lyrics(input: &str) -> Result<Lyrics> {
    let mut header = LrcHeader::default();
    let mut timed = Vec::new();
    let mut plain = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((tag, value)) = parse_id_tag(line) {
            match tag.to_lowercase().as_str() {
                "ti" => header.title = Some(value),
                "ar" => header.artist = Some(value),
                "offset" => {
                    if let Ok(offset) = value.parse::<i64>() {
                        header.offset = offset;
                    }
                }
                _ => {} // al, au, length, by, re, ve: not needed for display
            }
            continue;
        }

        match parse_lyric_line(line) {
            Some(lines) => timed.extend(lines),
            None => plain.push(line.to_string()),
        }
    }

    let title = header.title.unwrap_or_default();
    let artist = header.artist.unwrap_or_default();

    if timed.is_empty() {
        if plain.is_empty() {
            return Err(CoreError::LrcParseError {
                reason: "no lyric lines found".to_string(),
            });
        }
        debug!(target: LOG_TARGET, "Parsed {} unsynced lines", plain.len());
        return Ok(Lyrics {
            title,
            artist,
            synced: false,
            lines: plain.into_iter().map(|text| LyricLine::new(text, 0.0)).collect(),
        });
    }

    if header.offset != 0 {
        for line in &mut timed {
            line.start = apply_offset(line.start, header.offset);
        }
    }

    if !plain.is_empty() {
        debug!(
            target: LOG_TARGET,
            "Dropped {} line(s) without a timestamp from synced lyrics",
            plain.len()
        );
    }

    timed.sort_by(|a, b| a.start.total_cmp(&b.start));
    debug!(target: LOG_TARGET, "Parsed {} synced lines", timed.len());

    Ok(Lyrics {
        title,
        artist,
        synced: true,
        lines: timed,
    })
}

/// Read and parse an `.lrc` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains no lyrics.
pub fn load_lyrics_file(path: &Path) -> Result<Lyrics> {
    let content = fs::read_to_string(path)?;
    parse_lyrics(&content)
}

/// Parse an ID tag like [ti:Title] or [ar:Artist]
fn parse_id_tag(line: &str) -> Option<(String, String)> {
    if !line.starts_with('[') || !line.ends_with(']') {
        return None;
    }

    let content = &line[1..line.len() - 1];
    let (tag, value) = content.split_once(':')?;

    // A numeric tag is a timestamp, not an ID tag
    if tag.is_empty() || tag.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some((tag.to_string(), value.trim().to_string()))
}

/// Parse a lyric line like [00:12.34]Hello world or [00:12.34][00:15.67]Same lyrics
fn parse_lyric_line(line: &str) -> Option<Vec<LyricLine>> {
    let mut remaining = line;
    let mut timestamps = Vec::new();

    while let Some(rest) = remaining.strip_prefix('[') {
        let Some(end) = rest.find(']') else {
            break;
        };
        let Some(time) = parse_timestamp(&rest[..end]) else {
            break;
        };
        timestamps.push(time);
        remaining = &rest[end + 1..];
    }

    if timestamps.is_empty() {
        return None;
    }

    let text = strip_word_timestamps(remaining.trim());

    Some(
        timestamps
            .into_iter()
            .map(|start| LyricLine::new(text.clone(), start))
            .collect(),
    )
}

/// Parse a timestamp like "00:12.34", "00:12:34" or "00:12" into seconds
fn parse_timestamp(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();

    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes: u32 = minutes.parse().ok()?;
            let seconds: f64 = seconds.parse().ok()?;
            if !seconds.is_finite() || seconds < 0.0 {
                return None;
            }
            Some(f64::from(minutes) * 60.0 + seconds)
        }
        [minutes, seconds, hundredths] => {
            let minutes: u32 = minutes.parse().ok()?;
            let seconds: u32 = seconds.parse().ok()?;
            let hundredths: u32 = hundredths.parse().ok()?;
            Some(f64::from(minutes) * 60.0 + f64::from(seconds) + f64::from(hundredths) / 100.0)
        }
        _ => None,
    }
}

/// Drop enhanced-LRC word timings (`<mm:ss.xx>`), keeping the words
fn strip_word_timestamps(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }

    let mut words = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if let Some(rest) = remaining.strip_prefix('<') {
            if let Some(end) = rest.find('>') {
                if parse_timestamp(&rest[..end]).is_some() {
                    remaining = &rest[end + 1..];
                    continue;
                }
            }
        }
        let first = remaining.chars().next().map_or(0, char::len_utf8);
        let next = remaining[first..]
            .find('<')
            .map_or(remaining.len(), |i| i + first);
        let word = remaining[..next].trim();
        if !word.is_empty() {
            words.push(word);
        }
        remaining = &remaining[next..];
    }

    words.join(" ")
}

/// Apply a millisecond offset to a start time, never going below zero
fn apply_offset(start: f64, offset_ms: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let offset_secs = offset_ms as f64 / 1000.0;
    (start + offset_secs).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_secs(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_simple_lrc() {
        let lyrics = parse_lyrics("[00:12.34]Hello world").unwrap();
        assert!(lyrics.synced);
        assert_eq!(lyrics.lines.len(), 1);
        assert_secs(lyrics.lines[0].start, 12.34);
        assert_eq!(lyrics.lines[0].text, "Hello world");
    }

    #[test]
    fn test_parse_header_tags() {
        let input = r"
[ti:Song Title]
[ar:Artist Name]
[al:Album Name]
[00:05.00]Lyrics here
";
        let lyrics = parse_lyrics(input).unwrap();
        assert_eq!(lyrics.title, "Song Title");
        assert_eq!(lyrics.artist, "Artist Name");
        assert_eq!(lyrics.lines.len(), 1);
    }

    #[test]
    fn test_parse_offset() {
        let input = "[offset:500]\n[00:10.00]Test";
        let lyrics = parse_lyrics(input).unwrap();
        assert_secs(lyrics.lines[0].start, 10.5);
    }

    #[test]
    fn test_negative_offset_clamps_at_zero() {
        let input = "[offset:-2000]\n[00:01.00]Early\n[00:10.00]Late";
        let lyrics = parse_lyrics(input).unwrap();
        assert_secs(lyrics.lines[0].start, 0.0);
        assert_secs(lyrics.lines[1].start, 8.0);
    }

    #[test]
    fn test_multi_timestamp_line_is_sorted() {
        let input = "[00:15.00][00:05.00]Chorus\n[00:10.00]Verse";
        let lyrics = parse_lyrics(input).unwrap();
        let texts: Vec<_> = lyrics.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Chorus", "Verse", "Chorus"]);
        assert_secs(lyrics.lines[0].start, 5.0);
        assert_secs(lyrics.lines[2].start, 15.0);
    }

    #[test]
    fn test_alternative_timestamp_format() {
        let lyrics = parse_lyrics("[00:12:34]Hello world").unwrap();
        assert_secs(lyrics.lines[0].start, 12.34);
    }

    #[test]
    fn test_enhanced_word_timing_is_stripped() {
        let lyrics = parse_lyrics("[00:12.34] <00:12.34> Hello <00:13.00> world").unwrap();
        assert_eq!(lyrics.lines[0].text, "Hello world");
    }

    #[test]
    fn test_empty_instrumental_line_kept() {
        let lyrics = parse_lyrics("[00:01.00]Start\n[00:05.00]\n[00:09.00]End").unwrap();
        assert_eq!(lyrics.lines.len(), 3);
        assert_eq!(lyrics.lines[1].text, "");
    }

    #[test]
    fn test_plain_text_is_unsynced() {
        let lyrics = parse_lyrics("First line\nSecond line\n").unwrap();
        assert!(!lyrics.synced);
        assert_eq!(lyrics.lines.len(), 2);
        assert_eq!(lyrics.lines[1].text, "Second line");
    }

    #[test]
    fn test_untimed_lines_dropped_from_synced_lyrics() {
        let lyrics = parse_lyrics("[00:01.00]One\nstray text\n[00:02.00]Two").unwrap();
        assert!(lyrics.synced);
        let texts: Vec<_> = lyrics.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_cjk_lyrics() {
        let lyrics = parse_lyrics("[00:05.00]你好世界").unwrap();
        assert_eq!(lyrics.lines[0].text, "你好世界");
    }

    #[test]
    fn test_only_tags_is_error() {
        let result = parse_lyrics("[ti:Nothing]\n[ar:Nobody]\n");
        assert!(matches!(result, Err(CoreError::LrcParseError { .. })));
    }
}
