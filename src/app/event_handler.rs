use std::cell::RefCell;
use std::rc::Rc;

use super::pipeline::dispatch_summary;
use super::playback::apply_media_commands;
use super::state::{gemini_client, AppState, UiEvent};
use crate::media::MediaEvent;
use crate::session::SessionEvent;
use crate::sleep_timer::TimerTick;
use crate::ui;

/// Handle one UI event. Events are processed one at a time on the main loop.
pub fn handle_ui_event(state: &Rc<RefCell<AppState>>, event: UiEvent) {
    match event {
        UiEvent::ChapterActivated(id) => dispatch_session(state, SessionEvent::Select(id)),
        UiEvent::TogglePlayPause => dispatch_session(state, SessionEvent::TogglePlayPause),
        UiEvent::Next => dispatch_session(state, SessionEvent::Next),
        UiEvent::Previous => dispatch_session(state, SessionEvent::Previous),
        UiEvent::SeekRequested(seconds) => dispatch_session(state, SessionEvent::Seek(seconds)),
        UiEvent::VolumeChanged(level) => dispatch_session(state, SessionEvent::SetVolume(level)),
        UiEvent::Media(MediaEvent::TimeUpdate(seconds)) => {
            dispatch_session(state, SessionEvent::PositionChanged(seconds))
        }
        UiEvent::Media(MediaEvent::DurationChange(seconds)) => {
            dispatch_session(state, SessionEvent::DurationKnown(seconds))
        }
        UiEvent::Media(MediaEvent::Ended) => dispatch_session(state, SessionEvent::Ended),
        UiEvent::PlayResolved { token, outcome } => {
            let commands = state.borrow_mut().session.on_play_resolved(token, outcome);
            apply_media_commands(state, commands);
            let s = state.borrow();
            ui::refresh_player(&s);
            ui::refresh_rows(&s);
        }
        UiEvent::SearchChanged(query) => {
            let mut s = state.borrow_mut();
            s.query = query;
            ui::refresh_chapter_list(&mut s);
        }
        UiEvent::FavoritesOnlyToggled(enabled) => {
            let mut s = state.borrow_mut();
            s.favorites_only = enabled;
            ui::refresh_chapter_list(&mut s);
        }
        UiEvent::FavoriteToggled(id) => {
            let mut s = state.borrow_mut();
            let now_favorite = s.favorites.toggle(id);
            log::info!("Chapter {id} favorite: {now_favorite}");
            if s.favorites_only {
                ui::refresh_chapter_list(&mut s);
            } else {
                ui::refresh_rows(&s);
            }
        }
        UiEvent::SummaryRequested(id) => {
            dispatch_summary(state, id);
            ui::refresh_rows(&state.borrow());
        }
        UiEvent::SummaryReady(ticket, text) => {
            let applied = state.borrow_mut().summaries.complete(ticket, text);
            if applied {
                ui::refresh_rows(&state.borrow());
            }
        }
        UiEvent::SleepTimerToggled => {
            let mut s = state.borrow_mut();
            let minutes = s.config.sleep_timer_minutes;
            s.sleep_timer.toggle(minutes);
            ui::refresh_player(&s);
        }
        UiEvent::TimerTick => {
            let tick = {
                let mut s = state.borrow_mut();
                let playing = s.session.is_playing();
                s.sleep_timer.tick(playing)
            };
            match tick {
                TimerTick::Expired => dispatch_session(state, SessionEvent::ForcePause),
                TimerTick::Running(_) => ui::refresh_player(&state.borrow()),
                TimerTick::Held(_) | TimerTick::Inactive => {}
            }
        }
        UiEvent::PreferencesRequested => {
            let s = state.borrow();
            if let Some(ref window) = s.window {
                ui::preferences::show_preferences(&window.window, &s.config, s.ui_sender.clone());
            }
        }
        UiEvent::ApiKeyChanged(key) => {
            let mut s = state.borrow_mut();
            s.config.gemini_api_key = key;
            if let Err(e) = s.config.save() {
                log::warn!("Failed to save config: {e}");
            }
            s.summary_provider = gemini_client(&s.config);
        }
        UiEvent::SleepMinutesChanged(minutes) => {
            let mut s = state.borrow_mut();
            s.config.sleep_timer_minutes = minutes;
            if let Err(e) = s.config.save() {
                log::warn!("Failed to save config: {e}");
            }
            ui::refresh_player(&s);
        }
    }
}

/// Run one session transition, mirror it onto the engine and refresh the views.
fn dispatch_session(state: &Rc<RefCell<AppState>>, event: SessionEvent) {
    let (commands, selection_changed) = {
        let mut s = state.borrow_mut();
        let before = (s.session.current(), s.session.is_playing());
        let commands = s.session.apply(event);
        let after = (s.session.current(), s.session.is_playing());
        (commands, before != after)
    };
    apply_media_commands(state, commands);

    let s = state.borrow();
    ui::refresh_player(&s);
    if selection_changed {
        ui::refresh_rows(&s);
    }
}
