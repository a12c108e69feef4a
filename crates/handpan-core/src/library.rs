use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::DEFAULT_IMAGE_EXTENSIONS;
use crate::error::Result;

/// Which files count as images when scanning a folder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionFilter {
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    /// When false, `.PNG` matches `png`.
    pub case_sensitive: bool,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            case_sensitive: false,
        }
    }
}

impl ExtensionFilter {
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|wanted| {
            if self.case_sensitive {
                wanted == ext
            } else {
                wanted.eq_ignore_ascii_case(ext)
            }
        })
    }
}

/// List the image files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. A folder without matches yields an empty list.
pub fn scan_folder(dir: &Path, filter: &ExtensionFilter) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && filter.matches(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), count = images.len(), "scanned folder");
    Ok(images)
}

/// Ordered image paths of the chosen folder plus the index of the one on screen.
#[derive(Clone, Debug, Default)]
pub struct ImageList {
    paths: Vec<PathBuf>,
    current: usize,
    filter: ExtensionFilter,
}

impl ImageList {
    pub fn new(filter: ExtensionFilter) -> Self {
        Self {
            paths: Vec::new(),
            current: 0,
            filter,
        }
    }

    /// Scan `dir` and, if it holds any images, replace the list and select the first one.
    ///
    /// A folder without images leaves the current list untouched. Returns the number of
    /// images found.
    pub fn load_folder(&mut self, dir: &Path) -> Result<usize> {
        let images = scan_folder(dir, &self.filter)?;
        let count = images.len();
        if count > 0 {
            info!(dir = %dir.display(), count, "loaded image folder");
            self.paths = images;
            self.current = 0;
        }
        Ok(count)
    }

    /// Replace the list directly, e.g. from a saved session.
    pub fn set_paths(&mut self, paths: Vec<PathBuf>) {
        self.paths = paths;
        self.current = 0;
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Index of the current image; meaningless when the list is empty.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.paths.get(self.current).map(PathBuf::as_path)
    }

    /// Advance with wraparound. Returns the new current path, or `None` when the list has
    /// fewer than two entries and nothing moved.
    pub fn next(&mut self) -> Option<&Path> {
        if self.paths.len() < 2 {
            return None;
        }
        self.current = (self.current + 1) % self.paths.len();
        self.current()
    }

    /// Step back with wraparound. Same contract as [`ImageList::next`].
    pub fn previous(&mut self) -> Option<&Path> {
        if self.paths.len() < 2 {
            return None;
        }
        let len = self.paths.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }
}
