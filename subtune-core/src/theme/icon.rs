//! Bundled SVG icons.

use super::{IconName, Resource};

macro_rules! icon {
    ($file:literal) => {
        Resource::from_static($file, include_bytes!(concat!("../../assets/icons/", $file)))
    };
}

/// Icons the application theme overrides, `None` for everything else
pub(super) fn app(name: IconName) -> Option<Resource> {
    let resource = match name {
        IconName::Album => icon!("disc_invert.svg"),
        IconName::Artist => icon!("people_invert.svg"),
        IconName::Favorite => icon!("heart_filled_invert.svg"),
        IconName::NotFavorite => icon!("heart_outline_invert.svg"),
        IconName::Genre => icon!("theatermasks_invert.svg"),
        IconName::NowPlaying => icon!("headphones_invert.svg"),
        IconName::Playlist => icon!("playlist_invert.svg"),
        IconName::Shuffle => icon!("shuffle_invert.svg"),
        _ => return None,
    };
    Some(resource)
}

/// Icons of the built-in theme
pub(super) fn builtin(name: IconName) -> Resource {
    match name {
        IconName::Home => icon!("home.svg"),
        IconName::Search => icon!("search.svg"),
        IconName::Settings => icon!("settings.svg"),
        IconName::Menu => icon!("menu.svg"),
        IconName::MediaPlay => icon!("media_play.svg"),
        IconName::MediaPause => icon!("media_pause.svg"),
        IconName::MediaSkipNext => icon!("media_skip_next.svg"),
        IconName::MediaSkipPrevious => icon!("media_skip_previous.svg"),
        IconName::VolumeUp => icon!("volume_up.svg"),
        IconName::VolumeMute => icon!("volume_mute.svg"),
        // Application icons have no built-in artwork
        _ => icon!("missing.svg"),
    }
}
