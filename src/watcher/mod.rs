//! Deck file watching for live reload.
//!
//! The parent directory is watched rather than the file itself because many
//! editors save by writing a temp file and renaming it over the original.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches one deck file and reports debounced changes.
pub struct DeckWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    deck_path: PathBuf,
    deck_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl DeckWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or the
    /// deck's directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // OS events carry canonical paths.
        let deck_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let deck_name = deck_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&deck_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(deck = %deck_path.display(), root = %watch_root.display(), "watcher.start");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            deck_path,
            deck_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn deck_path(&self) -> &Path {
        &self.deck_path
    }

    /// Drain pending events; true once a change has been quiet for the
    /// debounce window.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut ignored = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(_) => ignored += 1,
                Err(err) => tracing::warn!(%err, "watcher.error"),
            }
        }
        if relevant + ignored > 0 {
            tracing::trace!(relevant, ignored, "watcher.poll");
        }
        self.settle(relevant > 0, Instant::now())
    }

    fn settle(&mut self, saw_change: bool, now: Instant) -> bool {
        if saw_change {
            self.pending_since = Some(now);
        }
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.deck_path
                || self
                    .deck_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event(paths: Vec<PathBuf>) -> Event {
        Event {
            kind: EventKind::Any,
            paths,
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_directory_event_counts_for_deck() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let path = root.join("talk.md");
        std::fs::write(&path, "# Cover").unwrap();
        let watcher = DeckWatcher::new(&path, Duration::from_millis(10)).unwrap();

        assert!(watcher.is_relevant(&event(vec![root])));
    }

    #[test]
    fn test_sibling_file_event_is_ignored() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let path = root.join("talk.md");
        std::fs::write(&path, "# Cover").unwrap();
        let watcher = DeckWatcher::new(&path, Duration::from_millis(10)).unwrap();

        assert!(!watcher.is_relevant(&event(vec![root.join("notes.txt")])));
        assert!(watcher.is_relevant(&event(vec![root.join("talk.md")])));
    }

    #[test]
    fn test_relative_deck_matches_canonical_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slides.md");
        std::fs::write(&path, "# Cover").unwrap();
        let watcher = DeckWatcher::new(&path, Duration::from_millis(10)).unwrap();

        let canonical = dir.path().canonicalize().unwrap().join("slides.md");
        assert_eq!(watcher.deck_path(), canonical.as_path());
        assert!(watcher.is_relevant(&event(vec![canonical])));
    }

    #[test]
    fn test_watch_root_for_bare_file_name_is_dot() {
        assert_eq!(watch_root_for(Path::new("talk.md")), PathBuf::from("."));
    }

    #[test]
    fn test_settle_waits_for_quiet_window() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("talk.md");
        std::fs::write(&path, "# Cover").unwrap();
        let mut watcher = DeckWatcher::new(&path, Duration::from_millis(200)).unwrap();

        let start = Instant::now();
        assert!(!watcher.settle(true, start));
        assert!(!watcher.settle(true, start + Duration::from_millis(150)));
        assert!(!watcher.settle(false, start + Duration::from_millis(300)));
        assert!(watcher.settle(false, start + Duration::from_millis(350)));
        assert!(!watcher.settle(false, start + Duration::from_millis(900)));
    }

    #[test]
    fn test_real_deck_save_is_detected() {
        let dir = tempdir().unwrap();
        let path = dir.path().canonicalize().unwrap().join("deck.md");
        std::fs::write(&path, "# One\n").unwrap();
        let mut watcher = DeckWatcher::new(&path, Duration::from_millis(200)).unwrap();

        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "# One\n---\n# Two\n").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.take_change_ready() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        assert!(detected, "deck save should be reported within 5 seconds");
    }
}
