//! Directory-backed content source.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use super::LoadError;

/// A directory of `*.json` content files, tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
    tag: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tag: tag.into(),
        }
    }

    /// Tag named after the directory itself, as used for mods.
    pub fn named_after_dir(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let tag = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Self { root, tag }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// All JSON files under the root, recursively, in path order.
    ///
    /// Symlinked directories are not descended into.
    pub fn json_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| self.walk_error(e))?;
            let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
            if is_json && entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn walk_error(&self, error: walkdir::Error) -> LoadError {
        let path = error
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        LoadError::Io {
            path,
            error: error.into(),
        }
    }

    /// Reads and parses one file from this source.
    pub fn read(&self, path: &Path) -> Result<Value, LoadError> {
        let text = fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        serde_json::from_str(&text).map_err(|error| LoadError::Json {
            path: path.to_path_buf(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_json_files_recursively_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("limbs")).unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("limbs").join("arms.json"), "[]").unwrap();

        let source = DirectorySource::new(dir.path(), "base");
        let files = source.json_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.json"),
                PathBuf::from("b.json"),
                PathBuf::from("limbs").join("arms.json"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_walked() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let source = DirectorySource::new(dir.path(), "base");
        assert_eq!(source.json_files().unwrap(), vec![dir.path().join("a.json")]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let source = DirectorySource::new("/definitely/not/here", "base");
        assert!(matches!(source.json_files(), Err(LoadError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let source = DirectorySource::new(dir.path(), "base");
        assert!(matches!(source.read(&path), Err(LoadError::Json { .. })));
    }

    #[test]
    fn mod_tag_is_the_directory_name() {
        let source = DirectorySource::named_after_dir("/data/mods/cyborgs");
        assert_eq!(source.tag(), "cyborgs");
    }
}
