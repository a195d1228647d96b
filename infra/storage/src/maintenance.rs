use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Removes orphaned `.tmp` files left in the root by interrupted writes.
///
/// Cleanup is best-effort: a failure to list the root or to remove a single
/// orphan is logged at `warn` and never aborts the store open.
pub(crate) fn sweep_orphaned_tmp(root: &Path) {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(root = %root.display(), error = %err, "Orphan sweep skipped: cannot list root");
            return;
        },
    };

    let mut removed = 0usize;
    for entry in entries.flatten() {
        let path = entry.path();
        let is_tmp = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.') && name.ends_with(".tmp"));
        if !is_tmp {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to remove orphaned temp file");
            },
        }
    }

    if removed > 0 {
        debug!(root = %root.display(), removed, "Orphaned temp files reclaimed");
    }
}
