//! Error types for field construction and configuration loading.

/// Errors raised while building a field or loading its configuration.
///
/// Per-frame simulation never fails; only the setup paths report errors.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Surface dimensions were non-finite or not strictly positive.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },

    /// A tuning value was out of its allowed range.
    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    /// Failed to read a settings or tuning file.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON settings or tuning.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to encode a raster snapshot.
    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Validate a surface size, returning it unchanged when usable.
pub fn check_surface(width: f32, height: f32) -> Result<(f32, f32), FieldError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok((width, height))
    } else {
        Err(FieldError::InvalidSurface { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_surface() {
        assert!(check_surface(800.0, 600.0).is_ok());
        assert!(matches!(
            check_surface(0.0, 600.0),
            Err(FieldError::InvalidSurface { .. })
        ));
        assert!(check_surface(800.0, f32::NAN).is_err());
        assert!(check_surface(-1.0, 10.0).is_err());
        assert!(check_surface(f32::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = FieldError::InvalidSurface {
            width: 0.0,
            height: 600.0,
        };
        assert_eq!(err.to_string(), "invalid surface size 0x600");

        let err = FieldError::InvalidConfig("friction must be in (0, 1]".into());
        assert!(err.to_string().contains("friction"));
    }
}
