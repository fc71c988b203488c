pub mod chapter_list;
pub mod player_bar;
pub mod preferences;
pub mod window;

use crate::app::AppState;
use player_bar::PlayerView;

/// `m:ss`, rounding down. Minutes are not wrapped into hours.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Rebuild the chapter list from the current search and favorites filter.
pub fn refresh_chapter_list(state: &mut AppState) {
    let chapters = crate::search::filter(
        &state.catalog,
        &state.query,
        state.favorites_only,
        state.favorites.ids(),
    );
    if let Some(window) = state.window.as_mut() {
        chapter_list::populate(&mut window.chapters, &chapters, &state.ui_sender);
    }
    refresh_rows(state);
}

/// Update per-row decorations: current chapter, favorites, summary panel.
pub fn refresh_rows(state: &AppState) {
    if let Some(ref window) = state.window {
        chapter_list::update_rows(
            &window.chapters,
            state.session.current(),
            state.session.is_playing(),
            state.favorites.ids(),
            state.summaries.visible(),
        );
    }
}

pub fn refresh_player(state: &AppState) {
    if let Some(ref window) = state.window {
        let view = PlayerView {
            chapter: state.current_chapter(),
            playback: state.session.state(),
            position: state.session.position(),
            duration: state.session.duration(),
            muted: state.session.is_muted(),
            timer_remaining: state.sleep_timer.remaining(),
            timer_minutes: state
                .sleep_timer
                .minutes()
                .unwrap_or(state.config.sleep_timer_minutes),
        };
        player_bar::update_player_bar(&window.player, &view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(59.9), "0:59");
        assert_eq!(format_clock(61.0), "1:01");
        assert_eq!(format_clock(3725.0), "62:05");
    }

    #[test]
    fn clock_handles_unknown_values() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(-4.0), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }
}
