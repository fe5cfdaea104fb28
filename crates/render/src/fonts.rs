//! Process-wide font registration

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};
use tracing::{debug, info, warn};

static INSTALLED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register the first readable TrueType font in `candidates` as `sans-serif`
///
/// Only the first call does any work; later calls return the same outcome.
/// When nothing can be registered, text falls back to the built-in bitmap
/// font of [`crate::FontSafeBackend`].
pub fn install_fonts<P: AsRef<Path>>(candidates: &[P]) -> Option<&'static Path> {
    INSTALLED
        .get_or_init(|| {
            candidates
                .iter()
                .map(AsRef::as_ref)
                .find(|path| try_register(path))
                .map(Path::to_path_buf)
                .or_else(|| {
                    warn!("No usable font found; using built-in bitmap glyphs");
                    None
                })
        })
        .as_deref()
}

/// Font registered by [`install_fonts`], if any
pub fn installed_font() -> Option<&'static Path> {
    INSTALLED.get().and_then(|p| p.as_deref())
}

fn try_register(path: &Path) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font candidate not readable");
            return false;
        }
    };

    // plotters keeps a 'static reference for the process lifetime
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font("sans-serif", FontStyle::Normal, bytes) {
        Ok(()) => {
            info!(path = %path.display(), "Registered chart font");
            true
        }
        Err(_) => {
            warn!(path = %path.display(), "Font candidate is not a valid TrueType font");
            false
        }
    }
}
