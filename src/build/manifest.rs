use serde::Deserialize;

/// Manifest version this builder understands.
pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json` at the root of the build input directory.
///
/// The site generator writes one JSON file per post and lists them here in
/// site order. That order becomes corpus order.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    #[serde(alias = "documents")]
    pub posts: Vec<String>,
}
