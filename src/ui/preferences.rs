use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::app::UiEvent;
use crate::config::Config;

/// Show the preferences window: Gemini API key and sleep timer length.
/// Every change is sent back as a `UiEvent` and saved by the handler.
pub fn show_preferences(
    parent: &impl IsA<gtk4::Window>,
    config: &Config,
    sender: async_channel::Sender<UiEvent>,
) {
    let window = libadwaita::Window::builder()
        .title("الإعدادات")
        .default_width(420)
        .default_height(360)
        .transient_for(parent)
        .modal(true)
        .build();

    let toolbar_view = libadwaita::ToolbarView::new();
    toolbar_view.add_top_bar(&libadwaita::HeaderBar::new());

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    // --- API Key group ---
    let api_group = libadwaita::PreferencesGroup::new();
    api_group.set_title("Gemini API");
    api_group.set_description(Some("تُستخدم لتوليد نبذة مختصرة عن كل سورة"));

    let api_key_row = libadwaita::PasswordEntryRow::builder()
        .title("API Key")
        .text(config.gemini_api_key.as_str())
        .build();
    let key_sender = sender.clone();
    api_key_row.connect_changed(move |row| {
        let _ = key_sender.try_send(UiEvent::ApiKeyChanged(row.text().to_string()));
    });
    api_group.add(&api_key_row);
    content.append(&api_group);

    // --- Sleep timer group ---
    let timer_group = libadwaita::PreferencesGroup::new();
    timer_group.set_title("مؤقت النوم");

    let minutes_row = libadwaita::SpinRow::with_range(1.0, 240.0, 5.0);
    minutes_row.set_title("المدة بالدقائق");
    minutes_row.set_value(f64::from(config.sleep_timer_minutes));
    minutes_row.connect_value_notify(move |row| {
        let _ = sender.try_send(UiEvent::SleepMinutesChanged(row.value().round() as u32));
    });
    timer_group.add(&minutes_row);
    content.append(&timer_group);

    toolbar_view.set_content(Some(&content));
    window.set_content(Some(&toolbar_view));
    window.present();
}
