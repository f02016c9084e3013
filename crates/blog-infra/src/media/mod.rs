//! Media storage backends.

mod local;
mod memory;

pub use local::LocalMediaStorage;
pub use memory::InMemoryMediaStorage;

use std::path::{Component, Path};

use uuid::Uuid;

use blog_core::ports::MediaError;

/// Reject anything but a plain relative path such as `posts_images/a.png`.
pub(crate) fn check_relative(path: &str) -> Result<(), MediaError> {
    let invalid = || MediaError::InvalidPath(path.to_string());
    if path.is_empty() {
        return Err(invalid());
    }
    for component in Path::new(path).components() {
        if !matches!(component, Component::Normal(_)) {
            return Err(invalid());
        }
    }
    Ok(())
}

/// Fresh relative path for a stored file.
pub(crate) fn new_file_path(directory: &str, extension: &str) -> Result<String, MediaError> {
    let path = format!("{directory}/{}.{extension}", Uuid::new_v4().simple());
    check_relative(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths() {
        assert!(check_relative("posts_images/a.png").is_ok());
        assert!(check_relative("../etc/passwd").is_err());
        assert!(check_relative("posts_images/../../secret").is_err());
        assert!(check_relative("/etc/passwd").is_err());
        assert!(check_relative("").is_err());
    }

    #[test]
    fn test_new_file_path() {
        let path = new_file_path("posts_images", "jpg").unwrap();
        assert!(path.starts_with("posts_images/"));
        assert!(path.ends_with(".jpg"));
        assert!(new_file_path("../up", "jpg").is_err());
    }
}
