use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

pub struct UIHandler;

impl UIHandler {
    /// Static files from the built Web UI; unknown paths get `index.html`
    /// so the client-side router can resolve them.
    pub fn service(dist_dir: &Path) -> ServeDir<ServeFile> {
        ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")))
    }
}
