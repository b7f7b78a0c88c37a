use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::GeneratedFile;
use crate::error::{Result, ScaffoldError};

/// Write `files` into `dir`, creating it when needed
///
/// Existing files are overwritten without backup. Files are written in order
/// and the first failure stops the run; earlier files stay on disk.
///
/// # Errors
///
/// [`ScaffoldError::Io`] naming the directory or file that could not be written.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| ScaffoldError::io(dir, e))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        let existed = path.exists();
        fs::write(&path, &file.contents).map_err(|e| ScaffoldError::io(&path, e))?;
        info!(
            path = %path.display(),
            bytes = file.contents.len(),
            overwritten = existed,
            "generated file"
        );
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_directory_and_overwrites() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("Services");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("PostService.cs"), "stale").unwrap();

        let files = [
            GeneratedFile::new("IPostService.cs", "interface"),
            GeneratedFile::new("PostService.cs", "class"),
        ];
        let written = write_files(&out, &files).unwrap();

        assert_eq!(written, [out.join("IPostService.cs"), out.join("PostService.cs")]);
        assert_eq!(fs::read_to_string(out.join("PostService.cs")).unwrap(), "class");
    }

    #[test]
    fn test_write_failure_names_the_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let err = write_files(&blocker, &[GeneratedFile::new("A.cs", "")]).unwrap_err();
        match err {
            ScaffoldError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {other}"),
        }
    }
}
