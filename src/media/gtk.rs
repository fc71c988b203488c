use std::rc::Rc;
use std::time::Duration;

use futures_util::future::{FutureExt, LocalBoxFuture};
use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;

use super::{MediaEngine, MediaEvent};
use crate::error::MediaError;

/// How long a play request is given to take effect before it is judged.
const PLAY_SETTLE: Duration = Duration::from_millis(250);

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// [`MediaEngine`] over a GStreamer-backed `gtk4::MediaFile`.
pub struct GtkMediaEngine {
    stream: gtk4::MediaFile,
    source: Option<String>,
    loaded: Option<String>,
}

impl GtkMediaEngine {
    /// Create the engine; `on_event` receives position, duration and end-of-track
    /// notifications on the GTK main thread.
    pub fn new<F>(on_event: F) -> Self
    where
        F: Fn(MediaEvent) + 'static,
    {
        let stream = gtk4::MediaFile::new();
        let on_event: Rc<dyn Fn(MediaEvent)> = Rc::new(on_event);

        let notify = on_event.clone();
        stream.connect_timestamp_notify(move |s| {
            notify(MediaEvent::TimeUpdate(s.timestamp() as f64 / MICROS_PER_SECOND));
        });

        let notify = on_event.clone();
        stream.connect_duration_notify(move |s| {
            notify(MediaEvent::DurationChange(s.duration() as f64 / MICROS_PER_SECOND));
        });

        let notify = on_event;
        stream.connect_ended_notify(move |s| {
            if s.is_ended() {
                notify(MediaEvent::Ended);
            }
        });

        stream.connect_error_notify(|s| {
            if let Some(err) = s.error() {
                log::error!("Media stream error: {err}");
            }
        });

        Self {
            stream,
            source: None,
            loaded: None,
        }
    }
}

impl MediaEngine for GtkMediaEngine {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn load(&mut self) {
        if self.loaded == self.source {
            return;
        }
        if let Some(ref url) = self.source {
            log::debug!("Loading {url}");
            self.stream.set_file(Some(&gio::File::for_uri(url)));
        }
        self.loaded = self.source.clone();
    }

    fn play(&mut self) -> LocalBoxFuture<'static, Result<(), MediaError>> {
        self.stream.play();
        let stream = self.stream.clone();
        async move {
            glib::timeout_future(PLAY_SETTLE).await;
            if let Some(err) = stream.error() {
                return Err(MediaError::Failed(err.to_string()));
            }
            if !stream.is_playing() {
                return Err(MediaError::Interrupted);
            }
            Ok(())
        }
        .boxed_local()
    }

    fn pause(&mut self) {
        self.stream.pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        if self.stream.is_seekable() {
            self.stream.seek((seconds * MICROS_PER_SECOND) as i64);
        }
    }

    fn set_volume(&mut self, level: f64) {
        self.stream.set_volume(level);
    }
}
