use std::cell::RefCell;
use std::rc::Rc;

use gtk4::glib;

use super::state::{AppState, UiEvent};
use crate::session::MediaCommand;

/// Mirror session commands onto the media engine.
///
/// Play requests resolve asynchronously; their outcome comes back as
/// `UiEvent::PlayResolved` carrying the token they were issued with.
pub fn apply_media_commands(state: &Rc<RefCell<AppState>>, commands: Vec<MediaCommand>) {
    let mut s = state.borrow_mut();
    for command in commands {
        match command {
            MediaCommand::SetSource(id) => {
                let url = s.catalog.get(id).map(|c| c.audio_url.clone());
                match url {
                    Some(url) => s.media.set_source(&url),
                    None => log::warn!("No audio for chapter {id}"),
                }
            }
            MediaCommand::Load => s.media.load(),
            MediaCommand::Play { token } => {
                let request = s.media.play();
                let sender = s.ui_sender.clone();
                glib::spawn_future_local(async move {
                    let outcome = request.await;
                    let _ = sender.send(UiEvent::PlayResolved { token, outcome }).await;
                });
            }
            MediaCommand::Pause => s.media.pause(),
            MediaCommand::Seek(seconds) => s.media.set_current_time(seconds),
            MediaCommand::SetVolume(level) => s.media.set_volume(level),
        }
    }
}
