use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEvent {
    /// The recipients file changed on disk.
    Changed,
}

/// Watches a single recipients file.
///
/// The parent directory is watched rather than the file itself so that
/// editors which save by rename keep triggering events.
pub struct RowsWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl RowsWatcher {
    /// Start watching `file`.
    /// Returns a `RowsWatcher` whose `poll()` method should be called each tick.
    pub fn start(file: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let target_name = file.file_name().map(|n| n.to_os_string());
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let touches_target = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == target_name);

                if touches_target {
                    let _ = tx.send(FileEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(RowsWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll: true if the file changed since the last poll.
    /// Bursts of events collapse into one reload.
    pub fn poll(&self) -> bool {
        drain(&self.rx)
    }
}

fn drain(rx: &mpsc::Receiver<FileEvent>) -> bool {
    let mut changed = false;
    while let Ok(FileEvent::Changed) = rx.try_recv() {
        changed = true;
    }
    changed
}
