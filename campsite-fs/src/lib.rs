//! Shared filesystem helpers built on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a directory using ambient authority.
pub fn open_dir(path: &Utf8Path) -> io::Result<fs_utf8::Dir> {
    fs_utf8::Dir::open_ambient_dir(path, ambient_authority())
}

/// Resolve the ambient parent directory of `path` and return it with the final
/// component. Paths without a parent resolve against the current directory.
pub fn open_parent_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should end in a file or directory name"))?
        .to_owned();
    Ok((open_dir(parent)?, name))
}

/// Return whether an existing path is a directory using capability-based IO.
///
/// A missing path yields an [`io::ErrorKind::NotFound`] error so callers can
/// tell it apart from a path that exists but is not a directory.
pub fn dir_is_dir(path: &Utf8Path) -> io::Result<bool> {
    if path.file_name().is_none() {
        // Dot paths and the root have no final name; opening them is the check.
        return open_dir(path).map(|_| true);
    }
    let (parent, name) = open_parent_and_name(path)?;
    parent.metadata(name.as_str()).map(|meta| meta.is_dir())
}

/// Create or truncate a file inside `dir`.
pub fn create_file(dir: &fs_utf8::Dir, name: &str) -> io::Result<fs_utf8::File> {
    dir.create(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path")
    }

    #[rstest]
    fn existing_directories_are_directories(temp_dir: TempDir) {
        assert!(dir_is_dir(&utf8(&temp_dir)).expect("metadata"));
        assert!(dir_is_dir(Utf8Path::new(".")).expect("current dir"));
    }

    #[rstest]
    fn regular_files_are_not_directories(temp_dir: TempDir) {
        let file = utf8(&temp_dir).join("gpx");
        std::fs::write(&file, b"").expect("write file");
        assert!(!dir_is_dir(&file).expect("metadata"));
    }

    #[rstest]
    fn missing_paths_report_not_found(temp_dir: TempDir) {
        let missing = utf8(&temp_dir).join("missing");
        let err = dir_is_dir(&missing).expect_err("path does not exist");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn created_files_are_truncated(temp_dir: TempDir) {
        let dir = open_dir(&utf8(&temp_dir)).expect("open dir");
        create_file(&dir, "de_standard.gpx")
            .and_then(|mut file| file.write_all(b"first run, longer"))
            .expect("first write");
        create_file(&dir, "de_standard.gpx")
            .and_then(|mut file| file.write_all(b"second"))
            .expect("second write");

        let mut contents = String::new();
        dir.open("de_standard.gpx")
            .and_then(|mut file| file.read_to_string(&mut contents))
            .expect("read back");
        assert_eq!(contents, "second");
    }
}
