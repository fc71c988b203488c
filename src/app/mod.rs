mod event_handler;
mod pipeline;
mod playback;
mod state;

pub use event_handler::handle_ui_event;
pub use state::{AppState, UiEvent};
