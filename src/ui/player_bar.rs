use gtk4::glib;
use gtk4::prelude::*;

use super::format_clock;
use crate::app::UiEvent;
use crate::catalog::Chapter;
use crate::session::PlaybackState;

/// Handles returned from building the player bar.
pub struct PlayerBarWidgets {
    pub root: gtk4::Box,
    pub title_label: gtk4::Label,
    pub subtitle_label: gtk4::Label,
    pub play_button: gtk4::Button,
    pub seek_scale: gtk4::Scale,
    pub elapsed_label: gtk4::Label,
    pub duration_label: gtk4::Label,
    pub volume_icon: gtk4::Image,
    pub timer_button: gtk4::Button,
    pub timer_label: gtk4::Label,
}

/// Snapshot of what the player bar displays.
pub struct PlayerView<'a> {
    pub chapter: Option<&'a Chapter>,
    pub playback: PlaybackState,
    pub position: f64,
    pub duration: f64,
    pub muted: bool,
    pub timer_remaining: Option<u32>,
    pub timer_minutes: u32,
}

/// Build the bottom player bar.
pub fn build_player_bar(
    initial_volume: f64,
    sender: async_channel::Sender<UiEvent>,
) -> PlayerBarWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Horizontal, 24);
    root.add_css_class("player-bar");
    root.set_margin_start(16);
    root.set_margin_end(16);
    root.set_margin_top(12);
    root.set_margin_bottom(12);

    // --- Now playing ---
    let info = gtk4::Box::new(gtk4::Orientation::Vertical, 2);
    info.set_width_request(180);
    info.set_valign(gtk4::Align::Center);
    let title_label = gtk4::Label::new(Some("اختر سورة"));
    title_label.add_css_class("title-3");
    title_label.set_halign(gtk4::Align::Start);
    title_label.set_ellipsize(gtk4::pango::EllipsizeMode::End);
    let subtitle_label = gtk4::Label::new(Some("القارئ ماهر المعيقلي"));
    subtitle_label.add_css_class("dim-label");
    subtitle_label.set_halign(gtk4::Align::Start);
    info.append(&title_label);
    info.append(&subtitle_label);
    root.append(&info);

    // --- Transport and progress ---
    let center = gtk4::Box::new(gtk4::Orientation::Vertical, 6);
    center.set_hexpand(true);

    let transport = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    transport.set_halign(gtk4::Align::Center);

    let prev_button = gtk4::Button::from_icon_name("media-skip-backward-symbolic");
    prev_button.add_css_class("flat");
    prev_button.add_css_class("circular");
    let prev_sender = sender.clone();
    prev_button.connect_clicked(move |_| {
        let _ = prev_sender.try_send(UiEvent::Previous);
    });

    let play_button = gtk4::Button::from_icon_name("media-playback-start-symbolic");
    play_button.add_css_class("suggested-action");
    play_button.add_css_class("circular");
    play_button.add_css_class("play-button");
    let play_sender = sender.clone();
    play_button.connect_clicked(move |_| {
        let _ = play_sender.try_send(UiEvent::TogglePlayPause);
    });

    let next_button = gtk4::Button::from_icon_name("media-skip-forward-symbolic");
    next_button.add_css_class("flat");
    next_button.add_css_class("circular");
    let next_sender = sender.clone();
    next_button.connect_clicked(move |_| {
        let _ = next_sender.try_send(UiEvent::Next);
    });

    transport.append(&prev_button);
    transport.append(&play_button);
    transport.append(&next_button);
    center.append(&transport);

    let progress = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    let elapsed_label = gtk4::Label::new(Some("0:00"));
    elapsed_label.add_css_class("numeric");
    let seek_scale = gtk4::Scale::with_range(gtk4::Orientation::Horizontal, 0.0, 100.0, 1.0);
    seek_scale.set_hexpand(true);
    seek_scale.set_draw_value(false);
    seek_scale.set_sensitive(false);
    // change-value only fires for user interaction, not for set_value().
    let seek_sender = sender.clone();
    seek_scale.connect_change_value(move |_, _, value| {
        let _ = seek_sender.try_send(UiEvent::SeekRequested(value));
        glib::Propagation::Proceed
    });
    let duration_label = gtk4::Label::new(Some("0:00"));
    duration_label.add_css_class("numeric");
    progress.append(&elapsed_label);
    progress.append(&seek_scale);
    progress.append(&duration_label);
    center.append(&progress);

    root.append(&center);

    // --- Sleep timer and volume ---
    let extras = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    extras.set_valign(gtk4::Align::Center);

    let timer_content = gtk4::Box::new(gtk4::Orientation::Horizontal, 6);
    timer_content.append(&gtk4::Image::from_icon_name("alarm-symbolic"));
    let timer_label = gtk4::Label::new(None);
    timer_label.add_css_class("numeric");
    timer_label.set_visible(false);
    timer_content.append(&timer_label);
    let timer_button = gtk4::Button::builder().child(&timer_content).build();
    let timer_sender = sender.clone();
    timer_button.connect_clicked(move |_| {
        let _ = timer_sender.try_send(UiEvent::SleepTimerToggled);
    });
    extras.append(&timer_button);

    let volume_icon = gtk4::Image::from_icon_name("audio-volume-high-symbolic");
    let volume_scale = gtk4::Scale::with_range(gtk4::Orientation::Horizontal, 0.0, 1.0, 0.01);
    volume_scale.set_width_request(140);
    volume_scale.set_draw_value(false);
    volume_scale.set_value(initial_volume);
    volume_scale.connect_value_changed(move |scale| {
        let _ = sender.try_send(UiEvent::VolumeChanged(scale.value()));
    });
    extras.append(&volume_icon);
    extras.append(&volume_scale);

    root.append(&extras);

    PlayerBarWidgets {
        root,
        title_label,
        subtitle_label,
        play_button,
        seek_scale,
        elapsed_label,
        duration_label,
        volume_icon,
        timer_button,
        timer_label,
    }
}

/// Update player bar widgets to reflect `view`.
pub fn update_player_bar(bar: &PlayerBarWidgets, view: &PlayerView) {
    match view.chapter {
        Some(chapter) => {
            bar.title_label.set_text(chapter.name);
            bar.subtitle_label
                .set_text(&format!("{} · القارئ ماهر المعيقلي", chapter.english_name));
        }
        None => {
            bar.title_label.set_text("اختر سورة");
            bar.subtitle_label.set_text("القارئ ماهر المعيقلي");
        }
    }

    bar.play_button.set_icon_name(match view.playback {
        PlaybackState::Playing => "media-playback-pause-symbolic",
        PlaybackState::Paused | PlaybackState::Idle => "media-playback-start-symbolic",
    });

    let upper = if view.duration > 0.0 { view.duration } else { 100.0 };
    bar.seek_scale.set_sensitive(view.playback != PlaybackState::Idle);
    bar.seek_scale.set_range(0.0, upper);
    bar.seek_scale.set_value(view.position);
    bar.elapsed_label.set_text(&format_clock(view.position));
    bar.duration_label.set_text(&format_clock(view.duration));

    bar.volume_icon.set_icon_name(Some(if view.muted {
        "audio-volume-muted-symbolic"
    } else {
        "audio-volume-high-symbolic"
    }));

    match view.timer_remaining {
        Some(remaining) => {
            bar.timer_label.set_text(&format_clock(f64::from(remaining)));
            bar.timer_label.set_visible(true);
            bar.timer_button.add_css_class("suggested-action");
            let stop_at = chrono::Local::now() + chrono::TimeDelta::seconds(i64::from(remaining));
            bar.timer_button.set_tooltip_text(Some(&format!(
                "يتوقف التشغيل قرابة {} (مؤقت {} دقيقة)",
                stop_at.format("%H:%M"),
                view.timer_minutes
            )));
        }
        None => {
            bar.timer_label.set_visible(false);
            bar.timer_button.remove_css_class("suggested-action");
            bar.timer_button.set_tooltip_text(Some(&format!(
                "مؤقت النوم: {} دقيقة",
                view.timer_minutes
            )));
        }
    }
}
