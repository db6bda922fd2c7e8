//! Filesystem helpers built on `cap-std` and `camino`.
//!
//! Waymark touches the filesystem in two places: the parent directory of the
//! SQLite database and the JSON session document. Both go through these
//! helpers so that every access is scoped to an explicitly opened directory.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Resolve an ambient directory for the given path and return the directory with the file name.
///
/// # Errors
/// Fails when the path has no file name or the parent directory cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists.
///
/// # Errors
/// Propagates I/O failures raised while creating missing directories.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_os_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Read a UTF-8 file, returning `None` when it (or its directory) does not exist.
///
/// # Errors
/// Returns I/O failures other than `NotFound`.
pub fn read_utf8_file_if_exists(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(name.as_str()) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the contents of `path`, creating parent directories as needed.
///
/// The payload is written to a sibling temporary file first and renamed into
/// place, so readers never observe a half-written document.
///
/// # Errors
/// Propagates directory creation, write and rename failures.
pub fn write_utf8_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(staging.as_str(), contents)?;
    dir.rename(staging.as_str(), &dir, name.as_str())
}

/// Remove `path` if it exists. Returns whether a file was removed.
///
/// # Errors
/// Returns I/O failures other than `NotFound`.
pub fn remove_file_if_exists(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.remove_file(name.as_str()) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Split an absolute or relative parent path into an ambient base directory and a relative suffix.
///
/// # Errors
/// Fails when the base directory cannot be opened or the path is not UTF-8.
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows absolute path with a drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;

            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;

    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    #[rstest]
    fn write_creates_missing_parents(workspace: (TempDir, Utf8PathBuf)) {
        let (_dir, root) = workspace;
        let target = root.join("nested/deeper/session.json");
        write_utf8_file(&target, "{}").expect("write file");
        assert_eq!(
            read_utf8_file_if_exists(&target).expect("read file"),
            Some(String::from("{}"))
        );
    }

    #[rstest]
    fn write_replaces_existing_contents(workspace: (TempDir, Utf8PathBuf)) {
        let (_dir, root) = workspace;
        let target = root.join("session.json");
        write_utf8_file(&target, "first").expect("write first");
        write_utf8_file(&target, "second").expect("write second");
        assert_eq!(
            read_utf8_file_if_exists(&target).expect("read file"),
            Some(String::from("second"))
        );
    }

    #[rstest]
    fn read_missing_file_returns_none(workspace: (TempDir, Utf8PathBuf)) {
        let (_dir, root) = workspace;
        assert_eq!(
            read_utf8_file_if_exists(&root.join("absent.json")).expect("read"),
            None
        );
        assert_eq!(
            read_utf8_file_if_exists(&root.join("absent-dir/absent.json")).expect("read"),
            None
        );
    }

    #[rstest]
    fn remove_is_idempotent(workspace: (TempDir, Utf8PathBuf)) {
        let (_dir, root) = workspace;
        let target = root.join("session.json");
        write_utf8_file(&target, "{}").expect("write file");
        assert!(remove_file_if_exists(&target).expect("first removal"));
        assert!(!remove_file_if_exists(&target).expect("second removal"));
    }

    #[rstest]
    fn ensure_parent_dir_creates_nested_directories(workspace: (TempDir, Utf8PathBuf)) {
        let (_dir, root) = workspace;
        let nested = root.join("folder/inner/file.db");
        ensure_parent_dir(&nested).expect("create parent");
        assert!(root.join("folder/inner").is_dir());
        ensure_parent_dir(&nested).expect("second call succeeds");
    }
}
