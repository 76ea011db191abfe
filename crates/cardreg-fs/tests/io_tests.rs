use cardreg_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("checksums.txt"));

    io::write_atomic(&path, b"abc  agents/a.json\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "abc  agents/a.json\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("checksums.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("meta/nested/out.txt"));

    io::write_atomic(&path, b"x").unwrap();

    assert!(path.to_native().is_file());
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("checksums.txt"));

    io::write_atomic(&path, b"content").unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["checksums.txt".to_string()]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.txt"));
    assert!(io::read_text(&path).is_err());
}

#[test]
fn test_read_text_if_exists_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.txt"));
    assert_eq!(io::read_text_if_exists(&path).unwrap(), None);
}

#[test]
fn test_read_text_if_exists_returns_content_verbatim() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("checksums.txt");
    fs::write(&file_path, "line\n\n").unwrap();

    let path = NormalizedPath::new(&file_path);
    assert_eq!(
        io::read_text_if_exists(&path).unwrap().as_deref(),
        Some("line\n\n")
    );
}

#[test]
fn test_read_text_if_exists_directory_is_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path());
    assert!(io::read_text_if_exists(&path).is_err());
}

#[test]
fn test_read_bytes_if_exists() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("checksums.txt"));
    assert_eq!(io::read_bytes_if_exists(&path).unwrap(), None);

    fs::write(path.to_native(), [0xff, 0xfe, b'\n']).unwrap();
    assert_eq!(
        io::read_bytes_if_exists(&path).unwrap(),
        Some(vec![0xff, 0xfe, b'\n'])
    );
}
