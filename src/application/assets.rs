//! Photo reference to asset URL derivation

use crate::config::Settings;
use crate::domain::Person;

/// Join `base_url`, `asset_dir` and a photo reference.
///
/// A leading `/` on the reference is dropped so `/photos/mit.jpeg` resolves
/// under the asset directory rather than the site root.
pub fn photo_url(base_url: &str, asset_dir: &str, photo_ref: &str) -> String {
    let photo = photo_ref.trim_start_matches('/');
    let dir = asset_dir.trim_matches('/');
    let mut url = base_url.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    if !dir.is_empty() {
        url.push_str(dir);
        url.push('/');
    }
    url.push_str(photo);
    url
}

/// Resolves person photos against configured asset locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoResolver {
    base_url: String,
    asset_dir: String,
}

impl PhotoResolver {
    pub fn new(base_url: impl Into<String>, asset_dir: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            asset_dir: asset_dir.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.base_url, &settings.asset_dir)
    }

    /// `None` for persons without a photo; render their initials instead.
    pub fn resolve(&self, person: &Person) -> Option<String> {
        person
            .photo_ref
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| photo_url(&self.base_url, &self.asset_dir, p))
    }
}
