//! Boundary to the native media backend.
//!
//! The playback session never touches a backend directly; it emits
//! [`crate::session::MediaCommand`]s which the app layer applies to a
//! [`MediaEngine`]. Progress flows back as [`MediaEvent`]s.

mod gtk;

pub use gtk::GtkMediaEngine;

use futures_util::future::LocalBoxFuture;

use crate::error::MediaError;

/// Operations the session needs from a media backend.
pub trait MediaEngine {
    fn set_source(&mut self, url: &str);
    fn load(&mut self);
    /// Request playback. The returned future resolves once the backend has
    /// either started playing or given up.
    fn play(&mut self) -> LocalBoxFuture<'static, Result<(), MediaError>>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, level: f64);
}

/// Notifications emitted by a media backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate(f64),
    DurationChange(f64),
    Ended,
}
