use std::collections::BTreeSet;

use gtk4::prelude::*;

use crate::app::UiEvent;
use crate::catalog::{Chapter, ChapterId};
use crate::summary::SummaryView;

/// Widgets of one chapter row that change after it is built.
pub struct ChapterRowWidgets {
    pub id: ChapterId,
    pub row: gtk4::ListBoxRow,
    pub play_icon: gtk4::Image,
    pub favorite_button: gtk4::Button,
    pub summary_box: gtk4::Box,
    pub summary_spinner: gtk4::Spinner,
    pub summary_label: gtk4::Label,
}

/// Handles for the chapter list.
pub struct ChapterListWidgets {
    pub list_box: gtk4::ListBox,
    pub rows: Vec<ChapterRowWidgets>,
}

/// Build the (empty) chapter list. Activating a row selects its chapter.
pub fn build_chapter_list(sender: async_channel::Sender<UiEvent>) -> ChapterListWidgets {
    let list_box = gtk4::ListBox::new();
    list_box.set_selection_mode(gtk4::SelectionMode::None);
    list_box.add_css_class("boxed-list");

    let placeholder = gtk4::Label::new(Some("لا توجد سور مطابقة"));
    placeholder.add_css_class("dim-label");
    placeholder.set_margin_top(24);
    placeholder.set_margin_bottom(24);
    list_box.set_placeholder(Some(&placeholder));

    // Rows carry their chapter id as the widget name.
    list_box.connect_row_activated(move |_, row| {
        let id = row
            .widget_name()
            .parse::<u16>()
            .ok()
            .and_then(ChapterId::new);
        if let Some(id) = id {
            let _ = sender.try_send(UiEvent::ChapterActivated(id));
        }
    });

    ChapterListWidgets {
        list_box,
        rows: Vec::new(),
    }
}

/// Replace all rows with `chapters`, in order.
pub fn populate(
    list: &mut ChapterListWidgets,
    chapters: &[&Chapter],
    sender: &async_channel::Sender<UiEvent>,
) {
    list.list_box.remove_all();
    list.rows.clear();
    for chapter in chapters {
        let row = build_row(chapter, sender.clone());
        list.list_box.append(&row.row);
        list.rows.push(row);
    }
}

fn build_row(chapter: &Chapter, sender: async_channel::Sender<UiEvent>) -> ChapterRowWidgets {
    let id = chapter.id;

    let row = gtk4::ListBoxRow::builder().activatable(true).build();
    row.set_widget_name(&id.to_string());

    let vbox = gtk4::Box::new(gtk4::Orientation::Vertical, 8);
    vbox.set_margin_start(12);
    vbox.set_margin_end(12);
    vbox.set_margin_top(10);
    vbox.set_margin_bottom(10);

    let hbox = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);

    let badge = gtk4::Label::new(Some(&id.to_string()));
    badge.add_css_class("chapter-badge");
    badge.set_valign(gtk4::Align::Center);
    hbox.append(&badge);

    let names = gtk4::Box::new(gtk4::Orientation::Vertical, 2);
    names.set_hexpand(true);
    let name_label = gtk4::Label::new(Some(chapter.name));
    name_label.add_css_class("chapter-name");
    name_label.set_halign(gtk4::Align::Start);
    let details = format!(
        "{} · {} · {} آية",
        chapter.english_name,
        chapter.classification.label(),
        chapter.verses
    );
    let details_label = gtk4::Label::new(Some(&details));
    details_label.add_css_class("dim-label");
    details_label.add_css_class("caption");
    details_label.set_halign(gtk4::Align::Start);
    names.append(&name_label);
    names.append(&details_label);
    hbox.append(&names);

    let summary_button = gtk4::Button::from_icon_name("dialog-information-symbolic");
    summary_button.add_css_class("flat");
    summary_button.set_valign(gtk4::Align::Center);
    summary_button.set_tooltip_text(Some("نبذة ذكية"));
    let summary_sender = sender.clone();
    summary_button.connect_clicked(move |_| {
        let _ = summary_sender.try_send(UiEvent::SummaryRequested(id));
    });
    hbox.append(&summary_button);

    let favorite_button = gtk4::Button::from_icon_name("non-starred-symbolic");
    favorite_button.add_css_class("flat");
    favorite_button.set_valign(gtk4::Align::Center);
    favorite_button.connect_clicked(move |_| {
        let _ = sender.try_send(UiEvent::FavoriteToggled(id));
    });
    hbox.append(&favorite_button);

    let play_icon = gtk4::Image::from_icon_name("media-playback-start-symbolic");
    play_icon.set_valign(gtk4::Align::Center);
    hbox.append(&play_icon);

    vbox.append(&hbox);

    let summary_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    summary_box.add_css_class("summary-panel");
    summary_box.set_visible(false);
    let summary_spinner = gtk4::Spinner::new();
    let summary_label = gtk4::Label::new(None);
    summary_label.set_wrap(true);
    summary_label.set_xalign(0.0);
    summary_label.set_hexpand(true);
    summary_box.append(&summary_spinner);
    summary_box.append(&summary_label);
    vbox.append(&summary_box);

    row.set_child(Some(&vbox));

    ChapterRowWidgets {
        id,
        row,
        play_icon,
        favorite_button,
        summary_box,
        summary_spinner,
        summary_label,
    }
}

/// Sync row decorations with the session, favorites and summary state.
pub fn update_rows(
    list: &ChapterListWidgets,
    current: Option<ChapterId>,
    playing: bool,
    favorites: &BTreeSet<ChapterId>,
    summary: Option<&SummaryView>,
) {
    for row in &list.rows {
        let is_current = current == Some(row.id);
        if is_current {
            row.row.add_css_class("current-chapter");
        } else {
            row.row.remove_css_class("current-chapter");
        }
        row.play_icon.set_icon_name(Some(if is_current && playing {
            "media-playback-pause-symbolic"
        } else {
            "media-playback-start-symbolic"
        }));

        let is_favorite = favorites.contains(&row.id);
        row.favorite_button.set_icon_name(if is_favorite {
            "starred-symbolic"
        } else {
            "non-starred-symbolic"
        });
        row.favorite_button.set_tooltip_text(Some(if is_favorite {
            "إزالة من المفضلة"
        } else {
            "إضافة إلى المفضلة"
        }));

        match summary.filter(|s| s.chapter == row.id && (s.loading || s.text.is_some())) {
            Some(view) => {
                row.summary_box.set_visible(true);
                row.summary_spinner.set_visible(view.loading);
                row.summary_spinner.set_spinning(view.loading);
                row.summary_label.set_text(view.text.as_deref().unwrap_or(""));
            }
            None => {
                row.summary_box.set_visible(false);
                row.summary_spinner.set_spinning(false);
            }
        }
    }
}
