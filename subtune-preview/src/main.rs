mod clock;
mod render;

use crate::clock::{PlaybackClock, SeekRequest, SeekSchedule};
use crate::render::Palette;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use subtune_core::{
    AppTheme, CoreError, FontCache, FontResource, LyricsPane, LyricsViewer, MediaItem,
    MediaItemMetadata, Playable, SubtuneConfig, TextStyle, Theme, ThemeVariant, Track,
    load_lyrics_file,
};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Seconds of playback after the last lyric line before the preview stops
const TAIL_SECS: f64 = 5.0;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info";

/// Play an .lrc file against a simulated clock and show the highlighted line
#[derive(Debug, Parser)]
#[command(name = "subtune-preview", version, about)]
struct Args {
    /// Lyrics file to play
    lrc_file: PathBuf,

    /// Start playback at this position (seconds)
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Jump from AT to TO seconds when playback reaches AT. Repeatable.
    #[arg(long = "seek", value_name = "AT=TO")]
    seeks: Vec<SeekRequest>,

    /// Position update interval in milliseconds, overrides the config
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Stop after this many seconds of playback position
    #[arg(long)]
    duration: Option<f64>,

    /// Use the dark palette
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Use the light palette
    #[arg(long)]
    light: bool,
}

#[allow(clippy::too_many_lines)]
fn main() {
    let args = Args::parse();

    let file_logging_enabled = check_file_logging_enabled();
    init_tracing(file_logging_enabled);

    // A missing config is written as a template; this run uses defaults
    let config = match SubtuneConfig::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigNotFound { path }) => {
            info!(
                "Created config template at {}, using defaults",
                path.display()
            );
            SubtuneConfig::default()
        }
        Err(CoreError::ConfigParseError(parse_error)) => {
            error!(
                "Invalid config at {}: {parse_error}",
                SubtuneConfig::config_path().display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    for problem in config.validate() {
        warn!("{problem}");
    }

    let variant = if args.light {
        ThemeVariant::Light
    } else if args.dark {
        ThemeVariant::Dark
    } else {
        config.theme.variant
    };

    let theme = AppTheme::new(FontCache::from_config(&config.theme));
    log_font(&theme, TextStyle::REGULAR);
    log_font(&theme, TextStyle::BOLD);
    let palette = Palette::from_theme(&theme, variant);

    let lyrics = match load_lyrics_file(&args.lrc_file) {
        Ok(lyrics) => {
            info!(
                "Loaded {} line(s) from {} (synced: {})",
                lyrics.lines.len(),
                args.lrc_file.display(),
                lyrics.synced
            );
            Some(lyrics)
        }
        Err(e) => {
            warn!("No lyrics for {}: {e}", args.lrc_file.display());
            None
        }
    };

    let now_playing = now_playing(&args, lyrics.as_ref());
    let end = args.duration.unwrap_or_else(|| {
        lyrics
            .as_ref()
            .and_then(|l| l.lines.last())
            .map_or(TAIL_SECS, |line| line.start + TAIL_SECS)
    });

    let tick_ms = args
        .tick_ms
        .unwrap_or(config.lyrics.tick_interval_ms)
        .max(1);
    let rows = config.lyrics.visible_lines.max(1);

    let mut viewer = LyricsViewer::new(LyricsPane::new(
        config.lyrics.placeholder_text.clone(),
        config.lyrics.active_line_position,
    ));
    viewer.load(lyrics);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    let cancel_token = CancellationToken::new();

    let ctrlc_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down...");
        ctrlc_token.cancel();
    }) {
        error!("Failed to set Ctrl+C handler: {e}");
    }

    let session = PlaySession {
        start: args.start,
        end,
        tick: Duration::from_millis(tick_ms),
        rows,
        seeks: SeekSchedule::new(args.seeks),
        now_playing,
        palette,
    };

    let mut stdout = io::stdout();
    if let Err(e) = runtime.block_on(play(&mut viewer, session, &mut stdout, &cancel_token)) {
        error!("Failed to draw lyrics: {e}");
        std::process::exit(1);
    }
}

struct PlaySession {
    start: f64,
    end: f64,
    tick: Duration,
    rows: usize,
    seeks: SeekSchedule,
    now_playing: MediaItemMetadata,
    palette: Palette,
}

/// Feed simulated playback positions to the viewer until the end position or
/// cancellation, redrawing whenever the highlight changes
async fn play(
    viewer: &mut LyricsViewer<LyricsPane>,
    mut session: PlaySession,
    out: &mut impl Write,
    cancel_token: &CancellationToken,
) -> io::Result<()> {
    let mut clock = PlaybackClock::start_at(session.start);
    let mut interval = tokio::time::interval(session.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut drawn: Option<(bool, usize)> = None;

    loop {
        tokio::select! {
            biased;
            () = cancel_token.cancelled() => {
                debug!("Playback cancelled");
                break;
            }
            _ = interval.tick() => {}
        }

        let mut position = clock.position();
        if let Some(seek) = session.seeks.due(position) {
            info!("Seeking from {:.2}s to {:.2}s", position, seek.to);
            clock.jump_to(seek.to);
            position = seek.to;
            viewer.on_seeked(position);
        } else {
            viewer.advance_to(position);
        }

        let pane = viewer.display();
        let state = (pane.is_empty(), pane.current_line());
        if drawn != Some(state) {
            render::draw(out, &session.now_playing, pane, session.rows, &session.palette)?;
            drawn = Some(state);
        }

        if position >= session.end {
            info!("Reached end of preview at {:.2}s", position);
            break;
        }
    }

    Ok(())
}

/// Heading metadata for the preview, from LRC tags with the file name as a
/// fallback title
fn now_playing(args: &Args, lyrics: Option<&subtune_core::Lyrics>) -> MediaItemMetadata {
    let title = lyrics
        .map(|l| l.title.clone())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            args.lrc_file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    let artist_names = lyrics
        .map(|l| l.artist.clone())
        .filter(|a| !a.is_empty())
        .into_iter()
        .collect();

    MediaItem::from(Track {
        id: args.lrc_file.display().to_string(),
        title,
        artist_names,
        file_path: args.lrc_file.display().to_string(),
        ..Default::default()
    })
    .metadata()
}

fn log_font(theme: &impl Theme, style: TextStyle) {
    match theme.font(style) {
        FontResource::Builtin(_) => info!("Using built-in font for {style:?}"),
        FontResource::Custom(resource) => info!("Using font {} for {style:?}", resource.name()),
    }
}

/// Check if file logging is enabled by reading just the logging section.
/// Runs before tracing is set up, so errors are ignored.
fn check_file_logging_enabled() -> bool {
    #[derive(serde::Deserialize)]
    struct PartialConfig {
        #[serde(default)]
        logging: PartialLoggingConfig,
    }
    #[derive(serde::Deserialize, Default)]
    struct PartialLoggingConfig {
        #[serde(default)]
        enabled: bool,
    }

    let Ok(content) = std::fs::read_to_string(SubtuneConfig::config_path()) else {
        return false;
    };

    toml::from_str::<PartialConfig>(&content)
        .map(|c| c.logging.enabled)
        .unwrap_or(false)
}

fn init_tracing(file_logging_enabled: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Console logs go to stderr so they do not mix with the drawn lyrics
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    if file_logging_enabled {
        let log_path = subtune_core::log_file_path();

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtune_core::{ActiveLinePosition, DefaultTheme, parse_lyrics};

    fn session(end: f64, seeks: Vec<SeekRequest>) -> PlaySession {
        PlaySession {
            start: 0.0,
            end,
            tick: Duration::from_millis(100),
            rows: 5,
            seeks: SeekSchedule::new(seeks),
            now_playing: MediaItemMetadata::default(),
            palette: Palette::from_theme(&DefaultTheme, ThemeVariant::Dark),
        }
    }

    fn viewer(lrc: &str) -> LyricsViewer<LyricsPane> {
        let mut viewer =
            LyricsViewer::new(LyricsPane::new("none", ActiveLinePosition::TopThird));
        viewer.load(Some(parse_lyrics(lrc).unwrap()));
        viewer
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "subtune-preview",
            "song.lrc",
            "--start",
            "12.5",
            "--seek",
            "20=5",
            "--seek",
            "30=40",
            "--light",
        ])
        .unwrap();
        assert_eq!(args.lrc_file, PathBuf::from("song.lrc"));
        assert!((args.start - 12.5).abs() < f64::EPSILON);
        assert_eq!(args.seeks.len(), 2);
        assert!(args.light);
        assert!(!args.dark);
    }

    #[test]
    fn test_default_log_filter_shows_info() {
        let filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::INFO)
        );
    }

    #[test]
    fn test_args_reject_both_variants() {
        assert!(Args::try_parse_from(["subtune-preview", "a.lrc", "--dark", "--light"]).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_reaches_last_line() {
        let mut viewer = viewer("[00:00.50]one\n[00:01.00]two\n[00:01.50]three\n");
        let mut out = Vec::new();

        play(&mut viewer, session(2.0, Vec::new()), &mut out, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(viewer.display().current_line(), 3);
        assert_eq!(viewer.display().current_text(), Some("three"));
        assert!(String::from_utf8_lossy(&out).contains("three"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_applies_seek() {
        let mut viewer = viewer("[00:01.00]one\n[00:02.00]two\n[00:10.00]three\n");
        let mut out = Vec::new();
        let seeks = vec![SeekRequest { at: 0.5, to: 9.0 }];

        play(&mut viewer, session(9.5, seeks), &mut out, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(viewer.display().current_line(), 2);
        assert!(viewer.last_position() >= 9.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_stops_when_cancelled() {
        let mut viewer = viewer("[00:01.00]one\n");
        let mut out = Vec::new();
        let token = CancellationToken::new();
        token.cancel();

        play(&mut viewer, session(100.0, Vec::new()), &mut out, &token)
            .await
            .unwrap();

        assert_eq!(viewer.display().current_line(), 0);
        assert!(out.is_empty());
    }
}
