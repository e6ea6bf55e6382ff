//! Asset error types
//!
//! Provides error handling for texture loading and decoding.

use std::io;
use std::fmt;

/// Error type for asset operations
#[derive(Debug)]
pub enum AssetError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// The file was read but could not be decoded as an image
    Decode(image::ImageError),
    /// The loader went away before delivering a result
    Disconnected(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::Decode(err) => write!(f, "Asset decode error: {}", err),
            AssetError::Disconnected(path) => write!(f, "Asset loader disconnected: {}", path),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            AssetError::Decode(err) => Some(err),
            AssetError::Disconnected(_) => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io_err) => AssetError::Io(io_err),
            other => AssetError::Decode(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let asset_err = AssetError::Io(io_err);
        let msg = format!("{}", asset_err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn test_disconnected_display() {
        let err = AssetError::Disconnected("textures/moon.jpg".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("disconnected"));
        assert!(msg.contains("textures/moon.jpg"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let asset_err: AssetError = io_err.into();
        match asset_err {
            AssetError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_image_io_error_becomes_io() {
        let img_err = image::ImageError::IoError(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let asset_err: AssetError = img_err.into();
        assert!(matches!(asset_err, AssetError::Io(_)));
    }

    #[test]
    fn test_decode_error_from_bad_bytes() {
        let img_err = image::load_from_memory(b"definitely not an image").unwrap_err();
        let asset_err: AssetError = img_err.into();
        assert!(matches!(asset_err, AssetError::Decode(_)));
        assert!(asset_err.source().is_some());
    }

    #[test]
    fn test_error_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(AssetError::Io(io_err).source().is_some());
        assert!(AssetError::Disconnected("path".to_string()).source().is_none());
    }
}
