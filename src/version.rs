//! Crate version helpers.

/// The full crate version, e.g. `0.1.0`.
pub fn full_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The major and minor components of the crate version, e.g. `0.1`.
pub fn major_minor_version() -> String {
    major_minor(full_version())
}

fn major_minor(version: &str) -> String {
    version.splitn(3, '.').take(2).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version_matches_package() {
        assert_eq!(full_version(), env!("CARGO_PKG_VERSION"));
        assert!(full_version().starts_with(&major_minor_version()));
    }

    #[test]
    fn test_major_minor() {
        assert_eq!(major_minor("1.4.2"), "1.4");
        assert_eq!(major_minor("1.4.2-beta.1"), "1.4");
        assert_eq!(major_minor("2.0"), "2.0");
        assert_eq!(major_minor("3"), "3");
    }
}
