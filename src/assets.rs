// SPDX-License-Identifier: MPL-2.0
//! Static resources shipped with the client.
//!
//! Everything under `static/` is embedded at compile time and served
//! verbatim. Public URLs are prefixed with the base path of the current
//! [`BuildMode`].

use crate::config::BuildMode;
use crate::error::Result;
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "static/"]
pub struct StaticAssets;

/// File name of the map style resource.
pub const MAP_STYLE: &str = "map.json";

/// Raw bytes of the map style, exactly as shipped.
#[must_use]
pub fn map_style() -> Option<Cow<'static, [u8]>> {
    StaticAssets::get(MAP_STYLE).map(|file| file.data)
}

/// Public URL of an asset for the compiled-in build mode.
#[must_use]
pub fn asset_url(name: &str) -> String {
    asset_url_for(BuildMode::current(), name)
}

/// Public URL of an asset for `mode`.
#[must_use]
pub fn asset_url_for(mode: BuildMode, name: &str) -> String {
    format!("{}{}", mode.base_path(), name.trim_start_matches('/'))
}

/// Writes every embedded asset into `dir`, byte for byte.
///
/// Returns the paths written, in embedding order.
pub fn export_to(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for name in StaticAssets::iter() {
        let Some(file) = StaticAssets::get(&name) else {
            continue;
        };
        let target = dir.join(&*name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &file.data)?;
        log::debug!("exported asset {}", target.display());
        written.push(target);
    }
    Ok(written)
}
