use std::path::Path;
use std::time::Duration;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::DeckWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

impl App {
    pub(super) fn make_deck_watcher(path: &Path) -> notify::Result<DeckWatcher> {
        DeckWatcher::new(path, WATCH_DEBOUNCE)
    }

    /// Work that touches the outside world after `update` has run.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        deck_watcher: &mut Option<DeckWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match Self::make_deck_watcher(&model.file_path) {
                        Ok(watcher) => {
                            *deck_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching deck for changes");
                        }
                        Err(err) => {
                            model.watch_enabled = false;
                            *deck_watcher = None;
                            tracing::warn!(path = %model.file_path.display(), %err, "watcher.error");
                            model.show_toast(
                                ToastLevel::Warning,
                                format!("Watch unavailable: {err}"),
                            );
                        }
                    }
                } else {
                    *deck_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::FileChanged => {
                let before = model.deck.slide_count();
                match model.reload_from_disk() {
                    Ok(()) => {
                        let after = model.deck.slide_count();
                        tracing::info!(path = %model.file_path.display(), before, after, "reload.ok");
                        if before == after {
                            model.show_toast(ToastLevel::Info, "Reloaded");
                        } else {
                            model.show_toast(
                                ToastLevel::Info,
                                format!("Reloaded: {after} slides (was {before})"),
                            );
                        }
                    }
                    Err(err) => {
                        tracing::warn!(path = %model.file_path.display(), error = %err, "reload.error");
                        model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                    }
                }
            }
            _ => {}
        }
    }
}
