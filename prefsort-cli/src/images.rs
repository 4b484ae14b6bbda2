/// Image discovery: turn a directory and/or explicit paths into engine items.
///
/// Files are only matched by extension. Decoding and thumbnails are the
/// viewer's business, not ours.
use prefsort_core::ItemInput;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 10] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic", "avif"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect image files from `dir` (non-recursive, sorted by name) followed by
/// `extra` paths in the order given. Duplicates are dropped.
pub fn collect_images(dir: Option<&Path>, extra: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if let Some(dir) = dir {
        let mut found: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image_path(&path) {
                found.push(path);
            }
        }
        found.sort();
        paths.extend(found);
    }

    for path in extra {
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a file", path.display()),
            ));
        }
        paths.push(path.clone());
    }

    let mut seen = HashSet::new();
    paths.retain(|p| seen.insert(p.clone()));
    Ok(paths)
}

/// Assign IDs 1..=N in order. Name is the file name, the ref is the full path.
pub fn to_inputs(paths: &[PathBuf]) -> Vec<ItemInput> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| ItemInput {
            id: i as i64 + 1,
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            image_ref: path.display().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"not really an image").unwrap();
        path
    }

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("a/b/cat.JPG")));
        assert!(is_image_path(Path::new("dog.webp")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("no_extension")));
    }

    #[test]
    fn test_collect_from_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "readme.md");
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let paths = collect_images(Some(dir.path()), &[]).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_explicit_paths_are_appended_once() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.jpg");
        let other = tempfile::tempdir().unwrap();
        let c = touch(other.path(), "c.gif");

        let paths = collect_images(Some(dir.path()), &[c.clone(), a.clone()]).unwrap();
        assert_eq!(paths, vec![a, c]);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = collect_images(None, &[PathBuf::from("/definitely/not/here.png")]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_to_inputs_assigns_sequential_ids() {
        let inputs = to_inputs(&[PathBuf::from("/x/one.png"), PathBuf::from("/y/two.jpg")]);
        assert_eq!(inputs[0].id, 1);
        assert_eq!(inputs[1].id, 2);
        assert_eq!(inputs[0].name, "one.png");
        assert_eq!(inputs[1].image_ref, "/y/two.jpg");
    }
}
