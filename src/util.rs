use crate::error::{Error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Replace `path` with `contents` through a temp file in the same directory
/// and a rename, so readers see either the old or the new file. A symlinked
/// `path` is resolved first so the link keeps pointing at the updated file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(Error::io(path, e)),
    };
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(path, e))?;

    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| Error::io(path, e))?;
    }

    tmp.persist(&target).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_replaces_contents_without_leftovers() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("menu.js");
        fs::write(&target, "old").expect("seed");

        write_atomic(&target, "new contents").expect("write");

        assert_eq!(read_text(&target).expect("read"), "new contents");
        let names = fs::read_dir(tmp.path())
            .expect("read dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["menu.js".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("menu.js");
        fs::write(&target, "old").expect("seed");
        fs::set_permissions(&target, fs::Permissions::from_mode(0o640)).expect("chmod");

        write_atomic(&target, "new").expect("write");

        let mode = fs::metadata(&target).expect("meta").permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_follows_symlinked_host() {
        let tmp = TempDir::new().expect("tempdir");
        let shared = tmp.path().join("shared");
        fs::create_dir_all(&shared).expect("mkdir");
        let real = shared.join("menu.js");
        fs::write(&real, "old").expect("seed");
        let link = tmp.path().join("menu.js");
        std::os::unix::fs::symlink(&real, &link).expect("symlink");

        write_atomic(&link, "new").expect("write");

        assert!(
            fs::symlink_metadata(&link)
                .expect("link meta")
                .file_type()
                .is_symlink(),
            "link was replaced by a regular file"
        );
        assert_eq!(read_text(&real).expect("read real"), "new");
        assert_eq!(read_text(&link).expect("read through link"), "new");
    }

    #[test]
    fn write_atomic_creates_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("fresh.js");

        write_atomic(&target, "body").expect("write");

        assert_eq!(read_text(&target).expect("read"), "body");
    }

    #[test]
    fn read_text_reports_path() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope.js");
        let err = read_text(&missing).expect_err("missing file");
        assert!(err.to_string().contains("nope.js"), "{err}");
    }
}
