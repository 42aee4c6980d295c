/// Resource limits checked when opening or encoding a bitmap.
///
/// All fields default to `None` (no limit). Dimensions are compared by
/// magnitude, so a top-down bitmap with a negative height is limited the
/// same way as a bottom-up one.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the full-file copy buffer or encode output.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions, by magnitude, against the limits.
    pub(crate) fn check_signed(&self, width: i32, height: i32) -> Result<(), crate::BmpEditError> {
        self.check(width.unsigned_abs(), height.unsigned_abs())
    }

    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::BmpEditError> {
        let pixels = u64::from(width) * u64::from(height);
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
        ];
        match checks
            .into_iter()
            .find(|&(_, value, max)| max.is_some_and(|max| value > max))
        {
            Some((what, value, Some(max))) => Err(crate::BmpEditError::LimitExceeded(format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        }
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), crate::BmpEditError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(crate::BmpEditError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_accept_anything() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(u64::MAX).is_ok());
    }

    #[test]
    fn negative_height_is_limited_by_magnitude() {
        let limits = Limits {
            max_height: Some(10),
            ..Limits::default()
        };
        assert!(limits.check_signed(4, -10).is_ok());
        assert!(matches!(
            limits.check_signed(4, -11),
            Err(crate::BmpEditError::LimitExceeded(_))
        ));
    }

    #[test]
    fn first_exceeded_limit_is_reported() {
        let limits = Limits {
            max_width: Some(8),
            max_height: Some(8),
            ..Limits::default()
        };
        match limits.check_signed(-9, 9) {
            Err(crate::BmpEditError::LimitExceeded(msg)) => {
                assert_eq!(msg, "width 9 exceeds limit 8");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(limits.check_signed(-8, -8).is_ok());
    }

    #[test]
    fn pixel_count_limit() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Limits::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(limits.check(10, 11).is_err());
    }
}
