//! Path utilities

/// Path helpers for repository-relative, slash-separated paths
pub struct PathUtil;

impl PathUtil {
    /// Split on `/`, skipping empty and `.` segments (zero-copy iterator)
    ///
    /// `..` is kept as an ordinary segment.
    #[inline]
    pub fn components(path: &str) -> impl Iterator<Item = &str> {
        path.split('/').filter(|s| !s.is_empty() && *s != ".")
    }

    /// Canonicalize a path for matching against contents locators
    ///
    /// `"./src//lib/./mod.rs/"` becomes `"src/lib/mod.rs"`.
    pub fn normalize(path: &str) -> String {
        let mut buf = String::with_capacity(path.len());
        for (i, segment) in Self::components(path).enumerate() {
            if i > 0 {
                buf.push('/');
            }
            buf.push_str(segment);
        }
        buf
    }

    /// True when `normalize` would return the input unchanged
    #[inline]
    pub fn is_normalized(path: &str) -> bool {
        path.is_empty() || path.split('/').all(|s| !s.is_empty() && s != ".")
    }
}
