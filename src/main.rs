mod app;
mod catalog;
mod config;
mod error;
mod favorites;
mod media;
mod search;
mod session;
mod sleep_timer;
mod storage;
mod summary;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;

use app::{AppState, UiEvent};

fn main() {
    env_logger::init();
    log::info!("Quran Player starting");

    let application = libadwaita::Application::builder()
        .application_id("io.github.quran-player")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    gtk4::Widget::set_default_direction(gtk4::TextDirection::Rtl);

    // Every widget, media notification and background task reports here
    let (ui_tx, ui_rx) = async_channel::unbounded::<UiEvent>();

    // Build app state
    let state = Rc::new(RefCell::new(AppState::new(ui_tx.clone())));

    // Build UI
    let window = ui::window::build_window(app, state.borrow().session.volume(), ui_tx.clone());
    state.borrow_mut().window = Some(window);
    ui::refresh_chapter_list(&mut state.borrow_mut());
    ui::refresh_player(&state.borrow());

    // App actions
    {
        let prefs_tx = ui_tx.clone();
        let preferences = gio::SimpleAction::new("preferences", None);
        preferences.connect_activate(move |_, _| {
            let _ = prefs_tx.try_send(UiEvent::PreferencesRequested);
        });
        app.add_action(&preferences);

        let app_for_quit = app.clone();
        let quit = gio::SimpleAction::new("quit", None);
        quit.connect_activate(move |_, _| app_for_quit.quit());
        app.add_action(&quit);

        app.set_accels_for_action("app.preferences", &["<Control>comma"]);
        app.set_accels_for_action("app.quit", &["<Control>q"]);
    }

    // Show the window with the search entry focused
    {
        let s = state.borrow();
        if let Some(ref window) = s.window {
            window.window.present();
            window.search_entry.grab_focus();
        }
    }

    // One-second tick for the sleep timer
    {
        let tick_tx = ui_tx.clone();
        glib::timeout_add_seconds_local(1, move || {
            let _ = tick_tx.try_send(UiEvent::TimerTick);
            glib::ControlFlow::Continue
        });
    }

    // Attach UI event handler
    {
        let state_clone = state.clone();
        glib::spawn_future_local(async move {
            while let Ok(event) = ui_rx.recv().await {
                app::handle_ui_event(&state_clone, event);
            }
        });
    }
}
