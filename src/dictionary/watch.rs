//! Word list file watching
//!
//! Reports changes to a local word list so it can be reloaded.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Events from the word list watcher
#[derive(Debug)]
pub enum WatchEvent {
    WordListChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Watch the directory containing `path` and report events touching that file
///
/// The directory is watched instead of the file so that a word list which
/// does not exist yet, or is replaced by an editor's atomic save, is still
/// picked up. The returned watcher must be kept alive.
pub fn watch_word_list(
    path: &Path,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<WatchEvent>)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let file_name = path
        .file_name()
        .with_context(|| format!("Word list path has no file name: {}", path.display()))?
        .to_os_string();

    let (tx, rx) = mpsc::unbounded_channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                    event.kind
                {
                    for path in event.paths {
                        if path.file_name() == Some(file_name.as_os_str()) {
                            let _ = tx.send(WatchEvent::WordListChanged(path));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatchEvent::WatcherError(e));
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;

    Ok((watcher, rx))
}
