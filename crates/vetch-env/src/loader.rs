//! Scanning site-packages directories into an environment

use crate::discovery::SiteDiscovery;
use crate::metadata::{parse_metadata, parse_requires_txt, DistributionMetadata};
use camino::{Utf8Path, Utf8PathBuf};
use pep508_rs::MarkerEnvironment;
use tracing::{debug, info, warn};
use vetch_core::{StaticEnvironment, VetchError, VetchResult};
use walkdir::WalkDir;

/// Reads every distribution installed in a list of directories
#[derive(Debug, Clone)]
pub struct SitePackagesLoader {
    paths: Vec<Utf8PathBuf>,
    markers: Option<MarkerEnvironment>,
}

impl SitePackagesLoader {
    pub fn new(paths: Vec<Utf8PathBuf>) -> Self {
        Self {
            paths,
            markers: None,
        }
    }

    /// Evaluate requirement markers against `markers`
    pub fn with_markers(mut self, markers: MarkerEnvironment) -> Self {
        self.markers = Some(markers);
        self
    }

    pub fn paths(&self) -> &[Utf8PathBuf] {
        &self.paths
    }

    /// Scan the directories in order. A distribution found in more than
    /// one place keeps its first occurrence.
    pub fn load(&self) -> VetchResult<StaticEnvironment> {
        let mut environment = StaticEnvironment::new();

        for path in &self.paths {
            let before = environment.len();
            for metadata in scan_directory(path)? {
                environment.insert(metadata.into_distribution(self.markers.as_ref()));
            }
            debug!("Found {} distributions in {}", environment.len() - before, path);
        }

        info!("Loaded {} installed distributions", environment.len());
        Ok(environment)
    }
}

/// Discover site-packages and load every installed distribution, with
/// markers evaluated for the target interpreter when it can be queried
pub fn load_environment(site_packages: &[Utf8PathBuf]) -> VetchResult<StaticEnvironment> {
    let discovery = SiteDiscovery::from_env(site_packages.to_vec());
    let loader = SitePackagesLoader::new(discovery.discover()?);

    let loader = match discovery.marker_environment() {
        Ok(markers) => loader.with_markers(markers),
        Err(e) => {
            warn!("Environment markers not evaluated: {}", e);
            loader
        }
    };

    loader.load()
}

fn scan_directory(path: &Utf8Path) -> VetchResult<Vec<DistributionMetadata>> {
    let mut found = Vec::new();

    let entries = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry.map_err(|e| VetchError::Metadata {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let Ok(entry_path) = Utf8PathBuf::try_from(entry.into_path()) else {
            continue;
        };
        let Some(file_name) = entry_path.file_name() else {
            continue;
        };

        let metadata = if file_name.ends_with(".dist-info") && entry_path.is_dir() {
            read_metadata(&entry_path.join("METADATA"))
        } else if file_name.ends_with(".egg-info") {
            read_egg_info(&entry_path)
        } else {
            continue;
        };

        match metadata {
            Ok(Some(metadata)) => found.push(metadata),
            Ok(None) => warn!("No metadata in {}, skipping", entry_path),
            Err(e) => warn!("Skipping {}: {}", entry_path, e),
        }
    }

    Ok(found)
}

fn read_metadata(path: &Utf8Path) -> VetchResult<Option<DistributionMetadata>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = read(path)?;
    parse_metadata(&content, path.as_str()).map(Some)
}

/// Directory form (`PKG-INFO` plus `requires.txt`) or a single file
fn read_egg_info(path: &Utf8Path) -> VetchResult<Option<DistributionMetadata>> {
    if path.is_file() {
        return read_metadata(path);
    }

    let Some(mut metadata) = read_metadata(&path.join("PKG-INFO"))? else {
        return Ok(None);
    };

    let requires = path.join("requires.txt");
    if requires.is_file() {
        metadata.requires_dist.extend(parse_requires_txt(&read(&requires)?));
    }

    Ok(Some(metadata))
}

fn read(path: &Utf8Path) -> VetchResult<String> {
    std::fs::read_to_string(path).map_err(|e| VetchError::io(format!("Failed to read {}", path), e))
}
