use crate::error::LoadError;
use crate::io::obj_loader::is_obj_path;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// The `.obj` files available in the resources directory.
#[derive(Debug, Clone)]
pub struct ModelLibrary {
    dir: PathBuf,
    entries: Vec<String>,
    selected: Option<usize>,
}

impl ModelLibrary {
    /// Lists the `.obj` files in `dir`, sorted by name.
    /// The directory is created when it does not exist yet.
    pub fn scan(dir: &Path) -> Result<Self, LoadError> {
        let io_err = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(io_err)?;
            warn!(
                "Created '{}'. Place your .obj model files there.",
                dir.display()
            );
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && is_obj_path(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort();

        info!("Found {} model(s) in '{}'", entries.len(), dir.display());
        Ok(Self::from_entries(dir, entries))
    }

    pub fn from_entries(dir: &Path, entries: Vec<String>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            entries,
            selected: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry currently on screen; `None` when the mesh on
    /// screen did not come from this library.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Marks `index` as the entry on screen. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn path(&self, index: usize) -> Option<PathBuf> {
        self.entries.get(index).map(|name| self.dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("orbit_viewer_library_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn scan_lists_obj_files_sorted() {
        let dir = scratch_dir("scan");
        fs::create_dir_all(dir.join("nested.obj")).unwrap();
        for name in ["teapot.obj", "Bunny.OBJ", "notes.txt", "cube.obj"] {
            fs::write(dir.join(name), "").unwrap();
        }

        let library = ModelLibrary::scan(&dir).unwrap();
        assert_eq!(library.entries(), ["Bunny.OBJ", "cube.obj", "teapot.obj"]);
        assert_eq!(library.path(1), Some(dir.join("cube.obj")));
        assert_eq!(library.path(3), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn scan_creates_missing_directory() {
        let dir = scratch_dir("missing");
        let library = ModelLibrary::scan(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(library.is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn selection_ignores_out_of_range() {
        let mut library = ModelLibrary::from_entries(Path::new("res"), vec!["a.obj".into(), "b.obj".into()]);
        assert_eq!(library.selected(), None);
        library.select(1);
        assert_eq!(library.selected(), Some(1));
        library.select(7);
        assert_eq!(library.selected(), Some(1));
        assert_eq!(library.name(0), Some("a.obj"));
        library.clear_selection();
        assert_eq!(library.selected(), None);
    }
}
