//! Media entities as reported by a Subsonic-style media server.
//!
//! These are plain value types. A media-provider client populates them (the
//! field names follow the server's `camelCase` JSON), and display components
//! read them. The only behavior lives on [`Playable`] and [`MediaItem`], which
//! give the play queue and "now playing" views a uniform view over tracks and
//! radio stations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Bit set of MusicBrainz release-group types attached to an album.
///
/// See <https://musicbrainz.org/doc/Release_Group/Type>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseTypes(u32);

impl ReleaseTypes {
    pub const ALBUM: Self = Self(0x0001);
    pub const AUDIOBOOK: Self = Self(0x0002);
    pub const AUDIO_DRAMA: Self = Self(0x0004);
    pub const BROADCAST: Self = Self(0x0008);
    pub const COMPILATION: Self = Self(0x0010);
    pub const DEMO: Self = Self(0x0020);
    pub const DJ_MIX: Self = Self(0x0040);
    pub const EP: Self = Self(0x0080);
    pub const FIELD_RECORDING: Self = Self(0x0100);
    pub const INTERVIEW: Self = Self(0x0200);
    pub const LIVE: Self = Self(0x0400);
    pub const MIXTAPE: Self = Self(0x0800);
    pub const REMIX: Self = Self(0x1000);
    pub const SINGLE: Self = Self(0x2000);
    pub const SOUNDTRACK: Self = Self(0x4000);
    pub const SPOKEN_WORD: Self = Self(0x8000);

    const NAMED: [(Self, &'static str); 16] = [
        (Self::ALBUM, "Album"),
        (Self::AUDIOBOOK, "Audiobook"),
        (Self::AUDIO_DRAMA, "Audio drama"),
        (Self::BROADCAST, "Broadcast"),
        (Self::COMPILATION, "Compilation"),
        (Self::DEMO, "Demo"),
        (Self::DJ_MIX, "DJ-mix"),
        (Self::EP, "EP"),
        (Self::FIELD_RECORDING, "Field recording"),
        (Self::INTERVIEW, "Interview"),
        (Self::LIVE, "Live"),
        (Self::MIXTAPE, "Mixtape"),
        (Self::REMIX, "Remix"),
        (Self::SINGLE, "Single"),
        (Self::SOUNDTRACK, "Soundtrack"),
        (Self::SPOKEN_WORD, "Spoken word"),
    ];

    /// An empty set
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from raw bits, dropping bits that name no release type
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & 0xFFFF)
    }

    /// Raw bit value
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every type in `other` is also in `self`
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Display names of the contained types, in bit order
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl std::ops::BitOr for ReleaseTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Album {
    pub id: String,
    pub cover_art_id: String,
    pub name: String,
    /// Total length in seconds
    pub duration: u32,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    pub year: i32,
    pub reissue_year: i32,
    pub genres: Vec<String>,
    pub track_count: u32,
    pub favorite: bool,
    pub release_types: ReleaseTypes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumWithTracks {
    #[serde(flatten)]
    pub album: Album,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumInfo {
    pub notes: String,
    pub last_fm_url: String,
    pub music_brainz_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artist {
    pub id: String,
    pub cover_art_id: String,
    pub name: String,
    pub favorite: bool,
    pub album_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistWithAlbums {
    #[serde(flatten)]
    pub artist: Artist,
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistInfo {
    pub biography: String,
    pub last_fm_url: String,
    pub image_url: String,
    pub similar_artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Genre {
    pub name: String,
    pub album_count: u32,
    pub track_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    pub id: String,
    pub cover_art_id: String,
    pub parent_id: String,
    pub title: String,
    /// Length in seconds
    pub duration: u32,
    pub track_number: u32,
    pub disc_number: u32,
    pub genre: String,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    pub album: String,
    pub album_id: String,
    pub year: i32,
    pub rating: u32,
    pub favorite: bool,
    /// File size in bytes
    pub size: u64,
    pub play_count: u32,
    pub file_path: String,
    /// Kilobits per second
    pub bit_rate: u32,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Playlist {
    pub id: String,
    pub cover_art_id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub owner: String,
    pub duration: u32,
    pub track_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistWithTracks {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub tracks: Vec<Track>,
}

/// Lyrics for a single track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lyrics {
    pub title: String,
    pub artist: String,
    /// Whether line start times are meaningful.
    /// Unsynced lyrics are shown as static text.
    pub synced: bool,
    /// Lines in ascending `start` order
    pub lines: Vec<LyricLine>,
}

impl Lyrics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A single lyric line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LyricLine {
    pub text: String,
    /// Start time in seconds
    pub start: f64,
}

impl LyricLine {
    pub fn new(text: impl Into<String>, start: f64) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }
}

/// Play queue as saved on the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedPlayQueue {
    pub tracks: Vec<Track>,
    pub track_pos: usize,
    /// Position within the current track, in seconds
    pub time_pos: u32,
}

/// An internet radio station.
///
/// Stations have no mutable state that other owners can observe, so
/// [`MediaItem`] shares them instead of copying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioStation {
    pub name: String,
    pub id: String,
    pub home_page_url: String,
    pub stream_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaItemType {
    #[default]
    Track,
    RadioStation,
}

/// Uniform summary of something playable, for "now playing" displays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItemMetadata {
    pub kind: MediaItemType,
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub artist_ids: Vec<String>,
    pub album: String,
    pub album_id: String,
    pub cover_art_id: String,
    /// Length in seconds, zero for streams
    pub duration: u32,
}

/// Anything that can be summarized for playback display.
pub trait Playable {
    fn metadata(&self) -> MediaItemMetadata;
}

impl Playable for Track {
    fn metadata(&self) -> MediaItemMetadata {
        MediaItemMetadata {
            kind: MediaItemType::Track,
            id: self.id.clone(),
            name: self.title.clone(),
            artists: self.artist_names.clone(),
            artist_ids: self.artist_ids.clone(),
            album: self.album.clone(),
            album_id: self.album_id.clone(),
            cover_art_id: self.cover_art_id.clone(),
            duration: self.duration,
        }
    }
}

impl Playable for RadioStation {
    fn metadata(&self) -> MediaItemMetadata {
        MediaItemMetadata {
            kind: MediaItemType::RadioStation,
            id: self.id.clone(),
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

/// An absent item summarizes to the zero-valued record.
impl<T: Playable> Playable for Option<T> {
    fn metadata(&self) -> MediaItemMetadata {
        self.as_ref().map(Playable::metadata).unwrap_or_default()
    }
}

impl<T: Playable + ?Sized> Playable for &T {
    fn metadata(&self) -> MediaItemMetadata {
        (**self).metadata()
    }
}

impl<T: Playable + ?Sized> Playable for Arc<T> {
    fn metadata(&self) -> MediaItemMetadata {
        (**self).metadata()
    }
}

/// A playable entry in the play queue.
#[derive(Debug, PartialEq, Eq)]
pub enum MediaItem {
    Track(Track),
    RadioStation(Arc<RadioStation>),
}

impl MediaItem {
    #[must_use]
    pub const fn kind(&self) -> MediaItemType {
        match self {
            Self::Track(_) => MediaItemType::Track,
            Self::RadioStation(_) => MediaItemType::RadioStation,
        }
    }

    #[must_use]
    pub const fn as_track(&self) -> Option<&Track> {
        match self {
            Self::Track(track) => Some(track),
            Self::RadioStation(_) => None,
        }
    }

    #[must_use]
    pub fn as_track_mut(&mut self) -> Option<&mut Track> {
        match self {
            Self::Track(track) => Some(track),
            Self::RadioStation(_) => None,
        }
    }

    /// Produce a value that shares no mutable state with `self`.
    ///
    /// Tracks are deep-copied. Radio stations are the one exception: they
    /// are immutable, so the copy hands out the same shared instance.
    #[must_use]
    pub fn copy(&self) -> Self {
        match self {
            Self::Track(track) => Self::Track(track.clone()),
            Self::RadioStation(station) => Self::RadioStation(Arc::clone(station)),
        }
    }
}

impl Clone for MediaItem {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl Playable for MediaItem {
    fn metadata(&self) -> MediaItemMetadata {
        match self {
            Self::Track(track) => track.metadata(),
            Self::RadioStation(station) => station.metadata(),
        }
    }
}

impl From<Track> for MediaItem {
    fn from(track: Track) -> Self {
        Self::Track(track)
    }
}

impl From<RadioStation> for MediaItem {
    fn from(station: RadioStation) -> Self {
        Self::RadioStation(Arc::new(station))
    }
}

impl From<Arc<RadioStation>> for MediaItem {
    fn from(station: Arc<RadioStation>) -> Self {
        Self::RadioStation(station)
    }
}

/// Kind of entity a search result or browse page refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Album,
    Artist,
    Playlist,
    Track,
    Genre,
    RadioStation,
}

impl ContentType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "Album",
            Self::Artist => "Artist",
            Self::Playlist => "Playlist",
            Self::Track => "Track",
            Self::Genre => "Genre",
            Self::RadioStation => "Radio station",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub cover_id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    /// Album/playlist: track count. Artist/genre: album count.
    /// Track: length in seconds. Radio station: unused.
    #[serde(default)]
    pub size: u32,
    /// Only set for albums and tracks
    #[serde(default)]
    pub artist_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Track {
        Track {
            id: "tr-1".to_string(),
            cover_art_id: "al-9".to_string(),
            title: "Song".to_string(),
            duration: 215,
            artist_ids: vec!["ar-1".to_string(), "ar-2".to_string()],
            artist_names: vec!["First".to_string(), "Second".to_string()],
            album: "Record".to_string(),
            album_id: "al-9".to_string(),
            year: 2001,
            ..Default::default()
        }
    }

    #[test]
    fn test_track_metadata() {
        let meta = sample_track().metadata();
        assert_eq!(meta.kind, MediaItemType::Track);
        assert_eq!(meta.id, "tr-1");
        assert_eq!(meta.name, "Song");
        assert_eq!(meta.artists, vec!["First", "Second"]);
        assert_eq!(meta.artist_ids, vec!["ar-1", "ar-2"]);
        assert_eq!(meta.album, "Record");
        assert_eq!(meta.album_id, "al-9");
        assert_eq!(meta.cover_art_id, "al-9");
        assert_eq!(meta.duration, 215);
    }

    #[test]
    fn test_radio_metadata() {
        let station = RadioStation {
            name: "Jazz FM".to_string(),
            id: "rs-1".to_string(),
            home_page_url: "https://example.org".to_string(),
            stream_url: "https://example.org/stream".to_string(),
        };
        let meta = station.metadata();
        assert_eq!(meta.kind, MediaItemType::RadioStation);
        assert_eq!(meta.id, "rs-1");
        assert_eq!(meta.name, "Jazz FM");
        assert!(meta.artists.is_empty());
        assert_eq!(meta.duration, 0);
    }

    #[test]
    fn test_absent_metadata_is_zero_valued() {
        let track: Option<Track> = None;
        let station: Option<&RadioStation> = None;
        let item: Option<MediaItem> = None;
        assert_eq!(track.metadata(), MediaItemMetadata::default());
        assert_eq!(station.metadata(), MediaItemMetadata::default());
        assert_eq!(item.metadata(), MediaItemMetadata::default());
    }

    #[test]
    fn test_track_copy_is_independent() {
        let original = MediaItem::from(sample_track());
        let mut copy = original.copy();
        assert_eq!(copy, original);

        if let Some(track) = copy.as_track_mut() {
            track.title = "Changed".to_string();
            track.artist_names.push("Third".to_string());
            track.favorite = true;
        }

        let track = original.as_track().unwrap();
        assert_eq!(track.title, "Song");
        assert_eq!(track.artist_names.len(), 2);
        assert!(!track.favorite);
    }

    #[test]
    fn test_radio_copy_shares_instance() {
        let station = Arc::new(RadioStation {
            name: "News".to_string(),
            id: "rs-2".to_string(),
            ..Default::default()
        });
        let item = MediaItem::from(Arc::clone(&station));
        let copy = item.copy();

        assert!(matches!(
            &copy,
            MediaItem::RadioStation(copied) if Arc::ptr_eq(copied, &station)
        ));
        assert_eq!(copy.metadata().name, "News");
    }

    #[test]
    fn test_media_item_kind() {
        assert_eq!(MediaItem::from(sample_track()).kind(), MediaItemType::Track);
        assert_eq!(
            MediaItem::from(RadioStation::default()).kind(),
            MediaItemType::RadioStation
        );
    }

    #[test]
    fn test_content_type_display() {
        assert_eq!(ContentType::Album.to_string(), "Album");
        assert_eq!(ContentType::RadioStation.to_string(), "Radio station");
        assert_eq!(ContentType::Genre.to_string(), "Genre");
    }

    #[test]
    fn test_release_types() {
        let mut types = ReleaseTypes::ALBUM | ReleaseTypes::LIVE;
        assert!(types.contains(ReleaseTypes::LIVE));
        assert!(!types.contains(ReleaseTypes::EP));
        types.insert(ReleaseTypes::EP);
        types.remove(ReleaseTypes::ALBUM);
        assert_eq!(types.names().collect::<Vec<_>>(), vec!["EP", "Live"]);
        assert_eq!(ReleaseTypes::from_bits_truncate(0x1_0001), ReleaseTypes::ALBUM);
        assert!(ReleaseTypes::empty().is_empty());
    }

    #[test]
    fn test_track_from_json() {
        let json = r#"{
            "id": "tr-7",
            "title": "From Server",
            "duration": 301,
            "artistIds": ["ar-3"],
            "artistNames": ["Someone"],
            "albumId": "al-4",
            "bitRate": 320
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "tr-7");
        assert_eq!(track.title, "From Server");
        assert_eq!(track.album_id, "al-4");
        assert_eq!(track.bit_rate, 320);
        assert_eq!(track.disc_number, 0);
    }

    #[test]
    fn test_album_with_tracks_flattened() {
        let json = r#"{
            "id": "al-1",
            "name": "Live at Home",
            "releaseTypes": 1025,
            "tracks": [{ "id": "tr-1", "title": "Intro" }]
        }"#;
        let album: AlbumWithTracks = serde_json::from_str(json).unwrap();
        assert_eq!(album.album.name, "Live at Home");
        assert!(album.album.release_types.contains(ReleaseTypes::LIVE));
        assert!(album.album.release_types.contains(ReleaseTypes::ALBUM));
        assert_eq!(album.tracks.len(), 1);
        assert_eq!(album.tracks[0].title, "Intro");
    }

    #[test]
    fn test_search_result_from_json() {
        let json = r#"{ "name": "Genre X", "id": "g", "type": "genre", "size": 12 }"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.kind, ContentType::Genre);
        assert_eq!(result.size, 12);
        assert!(result.artist_name.is_empty());
    }
}
