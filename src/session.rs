//! Playback session state machine.
//!
//! [`Session::apply`] is a reducer: it mutates the session for one event and
//! returns the media commands needed to mirror the new intent onto the engine.
//! Commands are derived by comparing intent before and after the event, so a
//! change is mirrored exactly once no matter how many events produced it.

use crate::catalog::ChapterId;
use crate::error::MediaError;

pub const DEFAULT_VOLUME: f64 = 0.8;

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Paused,
    Playing,
}

/// User actions and engine notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Select(ChapterId),
    TogglePlayPause,
    Next,
    Previous,
    Seek(f64),
    SetVolume(f64),
    PositionChanged(f64),
    DurationKnown(f64),
    Ended,
    /// Stop playing without deselecting (sleep timer expiry).
    ForcePause,
}

/// Instructions for the media engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    SetSource(ChapterId),
    Load,
    Play { token: u64 },
    Pause,
    Seek(f64),
    SetVolume(f64),
}

#[derive(Debug, Clone)]
pub struct Session {
    current: Option<ChapterId>,
    playing: bool,
    position: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    play_token: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl Session {
    pub fn new(volume: f64) -> Self {
        let volume = sanitize_level(volume);
        Self {
            current: None,
            playing: false,
            position: 0.0,
            duration: 0.0,
            volume,
            muted: volume == 0.0,
            play_token: 0,
        }
    }

    pub fn current(&self) -> Option<ChapterId> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration in seconds, 0 while unknown.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume actually sent to the engine.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn state(&self) -> PlaybackState {
        match (self.current, self.playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Paused,
            (Some(_), true) => PlaybackState::Playing,
        }
    }

    /// Apply one event and return the commands that mirror it onto the engine.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<MediaCommand> {
        let before = Intent::of(self);
        let mut commands = Vec::new();

        match event {
            SessionEvent::Select(id) => self.select(id),
            SessionEvent::TogglePlayPause => {
                if self.current.is_some() {
                    self.playing = !self.playing;
                }
            }
            SessionEvent::Next => {
                if let Some(id) = self.current {
                    self.select(id.next());
                }
            }
            SessionEvent::Previous => {
                if let Some(id) = self.current {
                    self.select(id.previous());
                }
            }
            SessionEvent::Ended => {
                if let Some(id) = self.current {
                    log::info!("Chapter {id} ended, advancing");
                    self.select(id.next());
                }
            }
            SessionEvent::ForcePause => self.playing = false,
            SessionEvent::Seek(seconds) => {
                if self.current.is_some() {
                    let target = self.clamp_position(seconds);
                    self.position = target;
                    commands.push(MediaCommand::Seek(target));
                }
            }
            SessionEvent::SetVolume(level) => {
                self.volume = sanitize_level(level);
                self.muted = self.volume == 0.0;
            }
            SessionEvent::PositionChanged(seconds) => {
                self.position = self.clamp_position(seconds);
            }
            SessionEvent::DurationKnown(seconds) => {
                self.duration = if seconds.is_finite() && seconds > 0.0 {
                    seconds
                } else {
                    0.0
                };
                self.position = self.clamp_position(self.position);
            }
        }

        let after = Intent::of(self);
        if after.chapter != before.chapter {
            if let Some(id) = after.chapter {
                commands.insert(0, MediaCommand::Load);
                commands.insert(0, MediaCommand::SetSource(id));
            }
        }
        if after.chapter != before.chapter || after.playing != before.playing {
            if after.playing {
                self.play_token += 1;
                commands.push(MediaCommand::Play {
                    token: self.play_token,
                });
            } else {
                commands.push(MediaCommand::Pause);
            }
        }
        if after.volume != before.volume {
            commands.push(MediaCommand::SetVolume(after.volume));
        }
        commands
    }

    /// Reconcile the outcome of a play request issued with `token`.
    pub fn on_play_resolved(
        &mut self,
        token: u64,
        outcome: Result<(), MediaError>,
    ) -> Vec<MediaCommand> {
        if token != self.play_token {
            log::debug!("Discarding stale play result (token {token}, current {})", self.play_token);
            return match outcome {
                Ok(()) if !self.playing => vec![MediaCommand::Pause],
                _ => Vec::new(),
            };
        }

        match outcome {
            Ok(()) => {
                if !self.playing {
                    return vec![MediaCommand::Pause];
                }
            }
            Err(MediaError::Interrupted) => {
                log::debug!("Play request {token} interrupted");
            }
            Err(MediaError::Failed(reason)) => {
                log::error!("Playback failed: {reason}");
                self.playing = false;
            }
        }
        Vec::new()
    }

    fn select(&mut self, id: ChapterId) {
        if self.current == Some(id) {
            self.playing = !self.playing;
            return;
        }
        log::info!("Selected chapter {id}");
        self.current = Some(id);
        self.playing = true;
        self.position = 0.0;
        self.duration = 0.0;
    }

    fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        if self.duration > 0.0 {
            seconds.min(self.duration)
        } else {
            seconds
        }
    }
}

fn sanitize_level(level: f64) -> f64 {
    if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// The part of the session mirrored onto the engine.
#[derive(PartialEq)]
struct Intent {
    chapter: Option<ChapterId>,
    playing: bool,
    volume: f64,
}

impl Intent {
    fn of(session: &Session) -> Self {
        Self {
            chapter: session.current,
            playing: session.playing,
            volume: session.effective_volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(raw: u16) -> ChapterId {
        ChapterId::new(raw).unwrap()
    }

    fn playing(raw: u16) -> Session {
        let mut session = Session::default();
        session.apply(SessionEvent::Select(id(raw)));
        session
    }

    #[test]
    fn starts_idle() {
        let session = Session::default();
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.volume(), DEFAULT_VOLUME);
        assert!(!session.is_muted());
    }

    #[test]
    fn select_loads_and_plays() {
        let mut session = Session::default();
        let commands = session.apply(SessionEvent::Select(id(5)));
        assert_eq!(
            commands,
            vec![
                MediaCommand::SetSource(id(5)),
                MediaCommand::Load,
                MediaCommand::Play { token: 1 },
            ]
        );
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(session.current(), Some(id(5)));
    }

    #[test]
    fn reselect_while_playing_toggles_without_reset() {
        let mut session = playing(5);
        session.apply(SessionEvent::DurationKnown(300.0));
        session.apply(SessionEvent::PositionChanged(42.0));

        let commands = session.apply(SessionEvent::Select(id(5)));
        assert_eq!(commands, vec![MediaCommand::Pause]);
        assert_eq!(session.state(), PlaybackState::Paused);
        assert_eq!(session.position(), 42.0);

        let commands = session.apply(SessionEvent::Select(id(5)));
        assert_eq!(commands, vec![MediaCommand::Play { token: 2 }]);
        assert_eq!(session.position(), 42.0);
    }

    #[test]
    fn selecting_another_chapter_resets_position() {
        let mut session = playing(5);
        session.apply(SessionEvent::DurationKnown(300.0));
        session.apply(SessionEvent::PositionChanged(42.0));

        let commands = session.apply(SessionEvent::Select(id(9)));
        assert_eq!(session.position(), 0.0);
        assert_eq!(session.duration(), 0.0);
        assert_eq!(session.current(), Some(id(9)));
        assert!(commands.contains(&MediaCommand::SetSource(id(9))));
    }

    #[test]
    fn selecting_from_paused_starts_playing() {
        let mut session = playing(5);
        session.apply(SessionEvent::TogglePlayPause);
        let commands = session.apply(SessionEvent::Select(id(6)));
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(commands.last(), Some(&MediaCommand::Play { token: 2 }));
    }

    #[test]
    fn idle_ignores_transport_controls() {
        let mut session = Session::default();
        assert!(session.apply(SessionEvent::TogglePlayPause).is_empty());
        assert!(session.apply(SessionEvent::Next).is_empty());
        assert!(session.apply(SessionEvent::Previous).is_empty());
        assert!(session.apply(SessionEvent::Seek(10.0)).is_empty());
        assert!(session.apply(SessionEvent::Ended).is_empty());
        assert_eq!(session.state(), PlaybackState::Idle);
    }

    #[test]
    fn toggle_play_pause() {
        let mut session = playing(1);
        assert_eq!(
            session.apply(SessionEvent::TogglePlayPause),
            vec![MediaCommand::Pause]
        );
        assert_eq!(
            session.apply(SessionEvent::TogglePlayPause),
            vec![MediaCommand::Play { token: 2 }]
        );
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut session = playing(114);
        session.apply(SessionEvent::Next);
        assert_eq!(session.current(), Some(id(1)));
        session.apply(SessionEvent::Previous);
        assert_eq!(session.current(), Some(id(114)));
    }

    #[test]
    fn ended_advances_to_next_chapter() {
        let mut session = playing(2);
        let commands = session.apply(SessionEvent::Ended);
        assert_eq!(session.current(), Some(id(3)));
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(commands[0], MediaCommand::SetSource(id(3)));
    }

    #[test]
    fn seek_is_clamped_and_mirrored() {
        let mut session = playing(1);
        session.apply(SessionEvent::DurationKnown(120.0));
        assert_eq!(
            session.apply(SessionEvent::Seek(500.0)),
            vec![MediaCommand::Seek(120.0)]
        );
        assert_eq!(session.position(), 120.0);
        assert_eq!(
            session.apply(SessionEvent::Seek(-3.0)),
            vec![MediaCommand::Seek(0.0)]
        );
    }

    #[test]
    fn position_never_exceeds_known_duration() {
        let mut session = playing(1);
        session.apply(SessionEvent::PositionChanged(90.0));
        assert_eq!(session.position(), 90.0);
        session.apply(SessionEvent::DurationKnown(60.0));
        assert_eq!(session.position(), 60.0);
        session.apply(SessionEvent::PositionChanged(75.0));
        assert_eq!(session.position(), 60.0);
    }

    #[test]
    fn non_finite_duration_is_unknown() {
        let mut session = playing(1);
        session.apply(SessionEvent::DurationKnown(f64::NAN));
        assert_eq!(session.duration(), 0.0);
        session.apply(SessionEvent::DurationKnown(f64::INFINITY));
        assert_eq!(session.duration(), 0.0);
    }

    #[test]
    fn zero_volume_mutes_and_nonzero_unmutes() {
        let mut session = Session::default();
        assert_eq!(
            session.apply(SessionEvent::SetVolume(0.0)),
            vec![MediaCommand::SetVolume(0.0)]
        );
        assert!(session.is_muted());

        assert_eq!(
            session.apply(SessionEvent::SetVolume(0.35)),
            vec![MediaCommand::SetVolume(0.35)]
        );
        assert!(!session.is_muted());
        assert_eq!(session.effective_volume(), 0.35);
    }

    #[test]
    fn volume_is_clamped() {
        let mut session = Session::default();
        session.apply(SessionEvent::SetVolume(3.0));
        assert_eq!(session.volume(), 1.0);
        assert!(session.apply(SessionEvent::SetVolume(1.0)).is_empty());
    }

    #[test]
    fn force_pause_keeps_selection() {
        let mut session = playing(36);
        assert_eq!(
            session.apply(SessionEvent::ForcePause),
            vec![MediaCommand::Pause]
        );
        assert_eq!(session.state(), PlaybackState::Paused);
        assert_eq!(session.current(), Some(id(36)));
        assert!(session.apply(SessionEvent::ForcePause).is_empty());
    }

    #[test]
    fn stale_play_success_is_discarded() {
        let mut session = playing(5);
        session.apply(SessionEvent::Select(id(9)));
        assert!(session.on_play_resolved(1, Ok(())).is_empty());
        assert_eq!(session.current(), Some(id(9)));
        assert!(session.is_playing());
    }

    #[test]
    fn late_play_success_after_pause_pauses_engine() {
        let mut session = playing(5);
        session.apply(SessionEvent::TogglePlayPause);
        assert_eq!(
            session.on_play_resolved(1, Ok(())),
            vec![MediaCommand::Pause]
        );
    }

    #[test]
    fn interrupted_play_is_swallowed() {
        let mut session = playing(5);
        assert!(session
            .on_play_resolved(1, Err(MediaError::Interrupted))
            .is_empty());
        assert!(session.is_playing());
    }

    #[test]
    fn failed_play_degrades_to_paused() {
        let mut session = playing(5);
        let commands =
            session.on_play_resolved(1, Err(MediaError::Failed("unsupported format".into())));
        assert!(commands.is_empty());
        assert_eq!(session.state(), PlaybackState::Paused);
    }

    #[test]
    fn stale_failure_does_not_touch_current_session() {
        let mut session = playing(5);
        session.apply(SessionEvent::Next);
        session.on_play_resolved(1, Err(MediaError::Failed("gone".into())));
        assert!(session.is_playing());
        assert_eq!(session.current(), Some(id(6)));
    }

    proptest! {
        #[test]
        fn next_cycles_through_all_chapters(start in 1u16..=114) {
            let mut session = playing(start);
            for _ in 0..114 {
                session.apply(SessionEvent::Next);
            }
            prop_assert_eq!(session.current(), Some(id(start)));
        }

        #[test]
        fn previous_inverts_next(start in 1u16..=114) {
            let mut session = playing(start);
            session.apply(SessionEvent::Next);
            session.apply(SessionEvent::Previous);
            prop_assert_eq!(session.current(), Some(id(start)));

            session.apply(SessionEvent::Previous);
            session.apply(SessionEvent::Next);
            prop_assert_eq!(session.current(), Some(id(start)));
        }
    }
}
