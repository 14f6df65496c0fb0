//! Flat-directory store for camera snapshots. Filenames are
//! `{camera_id}_{unix_timestamp}.jpg`, so a plain reverse sort lists newest
//! first and a `{camera_id}_` prefix scopes a listing to one camera.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ApiError;

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reject anything that could escape the image directory. Must run
    /// before any filesystem access, including existence probes.
    pub fn safe_name(name: &str) -> Result<(), ApiError> {
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(ApiError::PathTraversal);
        }
        Ok(())
    }

    /// Validated path of a stored (or to-be-stored) snapshot.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, ApiError> {
        Self::safe_name(name)?;
        Ok(self.root.join(name))
    }

    pub fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// All stored snapshots, newest first.
    pub fn list(&self) -> Result<Vec<String>, ApiError> {
        if !self.root.exists() {
            self.ensure_root()?;
            return Ok(Vec::new());
        }

        let mut images: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_image(name))
            .collect();

        images.sort_by(|a, b| b.cmp(a));
        Ok(images)
    }

    /// Snapshots taken by one camera, newest first.
    pub fn list_for_camera(&self, camera: &str) -> Result<Vec<String>, ApiError> {
        let prefix = format!("{camera}_");
        Ok(self
            .list()?
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect())
    }

    pub fn delete(&self, name: &str) -> Result<(), ApiError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(ApiError::NotFound("File"));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

fn is_image(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_files(names: &[&str]) -> (SnapshotStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"jpegdata").unwrap();
        }
        (SnapshotStore::new(dir.path()), dir)
    }

    #[test]
    fn traversal_names_are_rejected() {
        for bad in ["../../etc/passwd", "a/b.jpg", "a\\b.jpg", "..", ""] {
            assert!(
                matches!(SnapshotStore::safe_name(bad), Err(ApiError::PathTraversal)),
                "accepted {bad:?}"
            );
        }
        assert!(SnapshotStore::safe_name("cam1_1700000000.jpg").is_ok());
    }

    #[test]
    fn traversal_is_checked_before_the_filesystem() {
        // Root does not exist; a traversal name must still fail with the
        // traversal error, not a not-found or I/O error.
        let store = SnapshotStore::new("/nonexistent/feeder-test");
        let err = store.delete("../../etc/passwd").unwrap_err();
        assert!(matches!(err, ApiError::PathTraversal));
    }

    #[test]
    fn listing_filters_non_images_and_sorts_newest_first() {
        let (store, _dir) = store_with_files(&[
            "cam1_100.jpg",
            "cam1_300.jpg",
            "cam2_200.png",
            "notes.txt",
        ]);

        let images = store.list().unwrap();
        assert_eq!(images, vec!["cam2_200.png", "cam1_300.jpg", "cam1_100.jpg"]);
    }

    #[test]
    fn camera_listing_uses_the_filename_prefix() {
        let (store, _dir) = store_with_files(&[
            "cam1_100.jpg",
            "cam1_300.jpg",
            "cam10_200.jpg",
            "cam2_200.jpg",
        ]);

        let images = store.list_for_camera("cam1").unwrap();
        assert_eq!(images, vec!["cam1_300.jpg", "cam1_100.jpg"]);
    }

    #[test]
    fn listing_a_missing_root_creates_it_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("images"));
        assert!(store.list().unwrap().is_empty());
        assert!(dir.path().join("images").is_dir());
    }

    #[test]
    fn deleting_a_missing_file_is_not_found() {
        let (store, _dir) = store_with_files(&["cam1_100.jpg"]);
        let err = store.delete("cam1_999.jpg").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        store.delete("cam1_100.jpg").unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
