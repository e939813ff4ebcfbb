//! Filename generation and sanitization
//!
//! Generated names must be collision-resistant across concurrent uploads
//! without coordination, so they combine wall-clock millis with a random
//! suffix rather than a counter.

use rand::Rng;

const MAX_REMOTE_NAME_LEN: usize = 100;

/// Extension of an original filename, lowercased. Empty when there is none.
pub fn extension_of(original_name: &str) -> String {
    original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_default()
}

/// Generate a collision-resistant filename: `<prefix>-<millis>-<random>.<ext>`.
pub fn generate_filename(prefix: &str, original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = extension_of(original_name);

    if ext.is_empty() {
        format!("{}-{}-{}", prefix, millis, random)
    } else {
        format!("{}-{}-{}.{}", prefix, millis, random, ext)
    }
}

/// Sanitize an original filename into a safe identifier for the remote
/// service: strip any path components, keep only alphanumerics, dashes and
/// underscores, and cap the length. The extension is dropped since the
/// remote service tracks format separately.
pub fn sanitize_remote_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let stem = base.rsplit_once('.').map(|(s, _)| s).unwrap_or(base);

    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_REMOTE_NAME_LEN)
        .collect();

    if sanitized.trim_matches('_').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_name_carries_prefix_and_extension() {
        let name = generate_filename("blog", "My Photo.JPG");
        assert!(name.starts_with("blog-"));
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.matches('.').count(), 1);
    }

    #[test]
    fn generated_name_without_extension() {
        let name = generate_filename("career", "README");
        assert!(name.starts_with("career-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn generated_names_differ_across_calls() {
        let a = generate_filename("event", "flyer.png");
        let b = generate_filename("event", "flyer.png");
        assert_ne!(a, b);
    }

    #[test]
    fn extension_rejects_garbage() {
        assert_eq!(extension_of("photo.jpeg"), "jpeg");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("no_extension"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of("weird.j%g"), "");
    }

    #[test]
    fn remote_name_strips_paths_and_specials() {
        assert_eq!(
            sanitize_remote_name("../../etc/passwd role.pdf"),
            "passwd_role"
        );
        assert_eq!(sanitize_remote_name("C:\\docs\\Job Spec.pdf"), "Job_Spec");
        assert_eq!(sanitize_remote_name("résumé.pdf"), "r_sum_");
    }

    #[test]
    fn remote_name_caps_length() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_remote_name(&long).len(), 100);
    }

    #[test]
    fn remote_name_falls_back_when_empty() {
        assert_eq!(sanitize_remote_name("...."), "file");
        assert_eq!(sanitize_remote_name(""), "file");
    }
}
