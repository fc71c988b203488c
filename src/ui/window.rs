use gtk4::prelude::*;
use libadwaita::prelude::*;

use super::chapter_list::{build_chapter_list, ChapterListWidgets};
use super::player_bar::{build_player_bar, PlayerBarWidgets};
use crate::app::UiEvent;

const STYLE: &str = r#"
    .chapter-badge {
        background-color: alpha(@accent_bg_color, 0.15);
        color: @accent_color;
        border-radius: 12px;
        min-width: 40px;
        min-height: 40px;
        font-weight: 800;
    }
    .chapter-name {
        font-size: 20px;
        font-weight: 800;
    }
    row.current-chapter {
        background-color: alpha(@accent_bg_color, 0.12);
    }
    .summary-panel {
        background-color: alpha(@view_fg_color, 0.06);
        border-radius: 12px;
        padding: 10px 14px;
    }
    .player-bar .play-button {
        min-width: 48px;
        min-height: 48px;
    }
"#;

/// Handles returned from building the main window.
pub struct MainWindow {
    pub window: libadwaita::ApplicationWindow,
    pub search_entry: gtk4::SearchEntry,
    pub chapters: ChapterListWidgets,
    pub player: PlayerBarWidgets,
}

/// Build the main window: search header, chapter list and player bar.
pub fn build_window(
    app: &libadwaita::Application,
    initial_volume: f64,
    sender: async_channel::Sender<UiEvent>,
) -> MainWindow {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("القرآن الكريم")
        .default_width(960)
        .default_height(720)
        .build();

    let css_provider = gtk4::CssProvider::new();
    css_provider.load_from_string(STYLE);
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &css_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let search_entry = gtk4::SearchEntry::builder()
        .placeholder_text("ابحث برقم السورة أو اسمها (مثال: 114 أو الناس)")
        .hexpand(true)
        .build();
    let search_sender = sender.clone();
    search_entry.connect_search_changed(move |entry| {
        let _ = search_sender.try_send(UiEvent::SearchChanged(entry.text().to_string()));
    });
    let search_clamp = libadwaita::Clamp::builder()
        .maximum_size(560)
        .child(&search_entry)
        .build();
    header.set_title_widget(Some(&search_clamp));

    let favorites_button = gtk4::ToggleButton::builder()
        .icon_name("starred-symbolic")
        .tooltip_text("المفضلة")
        .build();
    let favorites_sender = sender.clone();
    favorites_button.connect_toggled(move |button| {
        let _ = favorites_sender.try_send(UiEvent::FavoritesOnlyToggled(button.is_active()));
    });
    header.pack_start(&favorites_button);

    // Add menu button
    let menu_button = gtk4::MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");

    let menu = gtk4::gio::Menu::new();
    menu.append(Some("الإعدادات"), Some("app.preferences"));
    menu.append(Some("خروج"), Some("app.quit"));

    menu_button.set_menu_model(Some(&menu));
    header.pack_end(&menu_button);

    toolbar_view.add_top_bar(&header);

    let chapters = build_chapter_list(sender.clone());
    let list_clamp = libadwaita::Clamp::builder()
        .maximum_size(900)
        .margin_top(12)
        .margin_bottom(12)
        .margin_start(12)
        .margin_end(12)
        .child(&chapters.list_box)
        .build();
    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .vexpand(true)
        .child(&list_clamp)
        .build();
    toolbar_view.set_content(Some(&scrolled));

    let player = build_player_bar(initial_volume, sender);
    toolbar_view.add_bottom_bar(&player.root);
    toolbar_view.set_bottom_bar_style(libadwaita::ToolbarStyle::Raised);

    window.set_content(Some(&toolbar_view));

    MainWindow {
        window,
        search_entry,
        chapters,
        player,
    }
}
