//! Simulated playback position for previewing lyrics without an audio player.

use std::collections::VecDeque;
use std::str::FromStr;
use thiserror::Error;
use tokio::time::Instant;

/// Playback position that advances with wall-clock time
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    origin: Instant,
    offset_secs: f64,
}

impl PlaybackClock {
    /// Start playing from `secs`
    pub fn start_at(secs: f64) -> Self {
        Self {
            origin: Instant::now(),
            offset_secs: secs,
        }
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.offset_secs + self.origin.elapsed().as_secs_f64()
    }

    /// Continue playing from `secs`
    pub fn jump_to(&mut self, secs: f64) {
        self.origin = Instant::now();
        self.offset_secs = secs;
    }
}

/// A scripted seek: when playback reaches `at`, jump to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRequest {
    pub at: f64,
    pub to: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected AT=TO in seconds, got {0:?}")]
pub struct ParseSeekError(String);

impl FromStr for SeekRequest {
    type Err = ParseSeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeekError(s.to_string());
        let (at, to) = s.split_once('=').ok_or_else(err)?;
        let at: f64 = at.trim().parse().map_err(|_| err())?;
        let to: f64 = to.trim().parse().map_err(|_| err())?;
        if !at.is_finite() || !to.is_finite() {
            return Err(err());
        }
        Ok(Self { at, to })
    }
}

/// Pending seeks, fired in order of the position they trigger at
#[derive(Debug, Default)]
pub struct SeekSchedule {
    pending: VecDeque<SeekRequest>,
}

impl SeekSchedule {
    pub fn new(mut seeks: Vec<SeekRequest>) -> Self {
        seeks.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            pending: seeks.into(),
        }
    }

    /// Take the next seek if playback has reached it
    pub fn due(&mut self, position: f64) -> Option<SeekRequest> {
        if self.pending.front().is_some_and(|seek| position >= seek.at) {
            self.pending.pop_front()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_clock_advances_with_time() {
        let clock = PlaybackClock::start_at(12.0);
        assert!((clock.position() - 12.0).abs() < 1e-6);

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert!((clock.position() - 13.5).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_jump() {
        let mut clock = PlaybackClock::start_at(0.0);
        tokio::time::advance(Duration::from_secs(30)).await;
        clock.jump_to(5.0);
        assert!((clock.position() - 5.0).abs() < 1e-6);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!((clock.position() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_seek_request() {
        let seek: SeekRequest = "30=10.5".parse().unwrap();
        assert_eq!(seek, SeekRequest { at: 30.0, to: 10.5 });
        assert!("30".parse::<SeekRequest>().is_err());
        assert!("a=b".parse::<SeekRequest>().is_err());
        assert!("inf=1".parse::<SeekRequest>().is_err());
    }

    #[test]
    fn test_parse_seek_error_message() {
        let err = "30".parse::<SeekRequest>().unwrap_err();
        assert_eq!(err, ParseSeekError("30".to_string()));
        assert_eq!(err.to_string(), r#"expected AT=TO in seconds, got "30""#);
    }

    #[test]
    fn test_schedule_fires_in_order_once() {
        let mut schedule = SeekSchedule::new(vec![
            SeekRequest { at: 40.0, to: 0.0 },
            SeekRequest { at: 20.0, to: 35.0 },
        ]);

        assert_eq!(schedule.due(10.0), None);
        assert_eq!(schedule.due(20.0), Some(SeekRequest { at: 20.0, to: 35.0 }));
        assert_eq!(schedule.due(35.0), None);
        assert_eq!(schedule.due(41.0), Some(SeekRequest { at: 40.0, to: 0.0 }));
        assert_eq!(schedule.due(100.0), None);
    }
}
