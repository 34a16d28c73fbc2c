#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ndc::config::ProjectOptions;
use ndc::context::IdGenerator;
use walkdir::WalkDir;

/// Hands out `00000000-0000-0000-0000-00000000000N` identifiers in order.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u32,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("00000000-0000-0000-0000-{:012}", self.next)
    }
}

pub fn options(name: &str, template: &str, output_dir: &Path) -> ProjectOptions {
    ProjectOptions {
        name: name.to_string(),
        template: template.to_string(),
        output_dir: output_dir.to_path_buf(),
        ..ProjectOptions::default()
    }
}

/// Writes `files` (relative path, content) below `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Every entry below `root`, relative to it, sorted.
pub fn relative_entries(root: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    entries.sort();
    entries
}
