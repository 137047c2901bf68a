//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::TreeService;
use crate::application::PhotoResolver;
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Tree loading and search
    pub tree_service: TreeService,

    /// Photo asset resolution
    pub photos: PhotoResolver,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> InfraResult<Self> {
        let tree_service = TreeService::from_settings(Arc::clone(&fs), &settings)?;
        let photos = PhotoResolver::from_settings(&settings);
        let settings = Arc::new(settings);

        Ok(Self {
            settings,
            fs,
            tree_service,
            photos,
        })
    }
}
