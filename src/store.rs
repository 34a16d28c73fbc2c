//! Template asset stores.
//!
//! A store exposes template trees addressed by `/`-separated paths relative
//! to the store root, e.g. `aws/src/{{.ProjectName}}/Program.cs`. The walker
//! only needs to list a directory and read a file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use rust_embed::RustEmbed;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Whether an asset is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Directory,
    File,
}

/// One immediate child of an asset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub kind: AssetKind,
}

/// Read-only access to template trees.
pub trait TemplateStore {
    /// Lists the immediate children of `path`, sorted by name.
    ///
    /// # Errors
    /// * `Error::AssetError` if `path` is not a directory in the store
    fn list(&self, path: &str) -> Result<Vec<AssetEntry>>;

    /// Reads the full content of the file at `path`.
    ///
    /// # Errors
    /// * `Error::AssetError` if `path` is not a file in the store
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Joins an asset directory path and a child name.
pub fn join_asset_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct BundledAssets;

/// The template trees shipped inside the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedStore;

impl EmbeddedStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedStore {
    fn list(&self, path: &str) -> Result<Vec<AssetEntry>> {
        // Only files are embedded; directories are implied by file paths.
        let prefix = join_asset_path(path, "");
        let mut children = BTreeMap::new();
        for file in BundledAssets::iter() {
            let Some(rest) = file.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    children
                        .entry(dir.to_string())
                        .or_insert(AssetKind::Directory);
                }
                None => {
                    children.insert(rest.to_string(), AssetKind::File);
                }
            }
        }

        if children.is_empty() {
            return Err(Error::AssetError {
                path: path.to_string(),
                reason: "no such template directory".to_string(),
            });
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| AssetEntry { name, kind })
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        BundledAssets::get(path)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| Error::AssetError {
                path: path.to_string(),
                reason: "no such template file".to_string(),
            })
    }
}

/// Template trees read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl TemplateStore for DirStore {
    fn list(&self, path: &str) -> Result<Vec<AssetEntry>> {
        let dir = self.resolve(path);
        debug!("Listing template directory {}", dir.display());
        if !dir.is_dir() {
            return Err(Error::AssetError {
                path: path.to_string(),
                reason: format!("'{}' is not a directory", dir.display()),
            });
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::AssetError {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| Error::AssetError {
                    path: path.to_string(),
                    reason: format!("non UTF-8 name {:?}", entry.file_name()),
                })?
                .to_string();
            let kind = if entry.file_type().is_dir() {
                AssetKind::Directory
            } else {
                AssetKind::File
            };
            entries.push(AssetEntry { name, kind });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(self.resolve(path)).map_err(|e| Error::AssetError {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_asset_path() {
        assert_eq!(join_asset_path("aws", "src"), "aws/src");
        assert_eq!(join_asset_path("aws/", "src"), "aws/src");
        assert_eq!(join_asset_path("", "aws"), "aws");
        assert_eq!(join_asset_path("aws", ""), "aws/");
    }

    #[test]
    fn test_embedded_store_lists_bundled_roots() {
        let store = EmbeddedStore::new();
        let root = store.list("aws").unwrap();
        assert!(root
            .iter()
            .any(|e| e.name == "src" && e.kind == AssetKind::Directory));
        assert!(root
            .iter()
            .any(|e| e.name == "Dockerfile" && e.kind == AssetKind::File));

        let names: Vec<_> = root.iter().map(|e| e.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_embedded_store_missing_paths() {
        let store = EmbeddedStore::new();
        assert!(matches!(store.list("heroku"), Err(Error::AssetError { .. })));
        assert!(matches!(
            store.read("aws/nope.txt"),
            Err(Error::AssetError { .. })
        ));
    }
}
