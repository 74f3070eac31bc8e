pub mod config;
pub mod error;
pub mod lrc;
pub mod lyrics;
pub mod media;
pub mod paths;
pub mod theme;

pub use config::{LoggingConfig, LyricsConfig, SubtuneConfig, ThemeConfig};

pub use error::CoreError;
pub use lrc::{load_lyrics_file, parse_lyrics};
pub use lyrics::{ActiveLinePosition, LyricsDisplay, LyricsPane, LyricsViewer, PaneLine};
pub use media::{
    Album, AlbumInfo, AlbumWithTracks, Artist, ArtistInfo, ArtistWithAlbums, ContentType, Genre,
    LyricLine, Lyrics, MediaItem, MediaItemMetadata, MediaItemType, Playable, Playlist,
    PlaylistWithTracks, RadioStation, ReleaseTypes, SavedPlayQueue, SearchResult, Track,
};
pub use paths::{config_dir, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME};
pub use theme::{
    AppTheme, Color, ColorName, DefaultTheme, FontCache, FontResource, IconName, Resource,
    SizeName, TextStyle, Theme, ThemeVariant,
};
