//! Storage backend selection
//!
//! Pure routing policy, resolved from configuration at process start and
//! applied per file category. Images always go remote in hybrid mode so
//! image serving never depends on the compute host's disk; PDFs stay local
//! unless the deployment filesystem is ephemeral.

use gazette_core::StorageMode;

use crate::traits::FileCategory;

/// Which backend a file should land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    Local,
    Remote,
}

pub fn select_backend(
    mode: StorageMode,
    ephemeral_filesystem: bool,
    category: FileCategory,
) -> BackendChoice {
    match mode {
        StorageMode::Local => BackendChoice::Local,
        StorageMode::Remote => BackendChoice::Remote,
        StorageMode::Hybrid => match category {
            FileCategory::Image => BackendChoice::Remote,
            FileCategory::Pdf => {
                if ephemeral_filesystem {
                    BackendChoice::Remote
                } else {
                    BackendChoice::Local
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mode_keeps_everything_local() {
        for category in [FileCategory::Image, FileCategory::Pdf] {
            for ephemeral in [false, true] {
                assert_eq!(
                    select_backend(StorageMode::Local, ephemeral, category),
                    BackendChoice::Local
                );
            }
        }
    }

    #[test]
    fn remote_mode_sends_everything_remote() {
        for category in [FileCategory::Image, FileCategory::Pdf] {
            assert_eq!(
                select_backend(StorageMode::Remote, false, category),
                BackendChoice::Remote
            );
        }
    }

    #[test]
    fn hybrid_always_sends_images_remote() {
        assert_eq!(
            select_backend(StorageMode::Hybrid, false, FileCategory::Image),
            BackendChoice::Remote
        );
        assert_eq!(
            select_backend(StorageMode::Hybrid, true, FileCategory::Image),
            BackendChoice::Remote
        );
    }

    #[test]
    fn hybrid_routes_pdfs_by_filesystem_durability() {
        assert_eq!(
            select_backend(StorageMode::Hybrid, false, FileCategory::Pdf),
            BackendChoice::Local
        );
        assert_eq!(
            select_backend(StorageMode::Hybrid, true, FileCategory::Pdf),
            BackendChoice::Remote
        );
    }
}
