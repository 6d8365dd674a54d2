//! Requirement and lock file reading and writing

mod pip;

pub use pip::PipFormat;

use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};
use vetch_core::error::VetchError;
use vetch_core::{IgnoreList, RequirementCollection};

/// A requirement file syntax
pub trait RequirementFormat {
    /// Name used in the `format` setting
    fn name(&self) -> &'static str;

    /// Parse file content; `origin` is reported in errors
    fn parse(&self, content: &str, origin: &Utf8Path) -> ConfigResult<RequirementCollection>;

    /// Render requirements as lock file content
    fn render_lock(&self, requirements: &RequirementCollection) -> String;
}

/// Implementation registered under `name`
pub fn format_for(name: &str) -> ConfigResult<Box<dyn RequirementFormat>> {
    match name {
        "pip" => Ok(Box::new(PipFormat)),
        other => Err(VetchError::ConfigValidation {
            field: "format".to_string(),
            reason: format!("Unknown requirement format '{}', expected 'pip'", other),
        }),
    }
}

/// Read one requirement file
pub fn load_requirements_file(
    format: &dyn RequirementFormat,
    path: &Utf8Path,
    ignore_list: &IgnoreList,
) -> ConfigResult<RequirementCollection> {
    if !path.is_file() {
        return Err(VetchError::FileNotFound {
            path: path.to_string(),
        });
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;
    let requirements = format.parse(&content, path)?;

    debug!("Read {} requirements from {}", requirements.len(), path);
    Ok(requirements.with_ignore_list(ignore_list))
}

/// Read several requirement files into one collection, in order
pub fn load_requirements_files<P: AsRef<Utf8Path>>(
    format: &dyn RequirementFormat,
    paths: &[P],
    ignore_list: &IgnoreList,
) -> ConfigResult<RequirementCollection> {
    let mut requirements = RequirementCollection::default();
    for path in paths {
        requirements.extend(load_requirements_file(format, path.as_ref(), ignore_list)?);
    }
    Ok(requirements)
}

/// Write requirements as a lock file
pub fn save_lock_file(
    format: &dyn RequirementFormat,
    requirements: &RequirementCollection,
    path: &Utf8Path,
) -> ConfigResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| VetchError::io(format!("Failed to create {}", parent), e))?;
    }

    std::fs::write(path, format.render_lock(requirements))
        .map_err(|e| VetchError::io(format!("Failed to write {}", path), e))?;

    info!("Lock file written to {}", path);
    Ok(())
}

/// Every path that does not exist
pub fn missing_files<P: AsRef<Utf8Path>>(paths: &[P]) -> Vec<Utf8PathBuf> {
    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| !path.exists())
        .map(Utf8Path::to_path_buf)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vetch_core::{ignore_list, Distribution, Requirement, StaticEnvironment};

    fn temp_dir() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_format_for() {
        assert_eq!(format_for("pip").unwrap().name(), "pip");
        assert!(matches!(
            format_for("conda"),
            Err(VetchError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_load_requirements_files_in_order() {
        let (_dir, root) = temp_dir();
        let base = root.join("base.txt");
        let dev = root.join("dev.txt");
        std::fs::write(&base, "django>=4.0\nrequests\n").unwrap();
        std::fs::write(&dev, "pytest==7.4.0\nrequests\n").unwrap();

        let requirements =
            load_requirements_files(&PipFormat, &[base, dev], &IgnoreList::default()).unwrap();

        assert_eq!(requirements.keys(), vec!["django", "requests", "pytest"]);
        assert_eq!(requirements.len(), 3);
    }

    #[test]
    fn test_load_applies_ignore_list() {
        let (_dir, root) = temp_dir();
        let path = root.join("requirements.txt");
        std::fs::write(&path, "app\n").unwrap();

        let env: StaticEnvironment = [
            Distribution::new("app", "1.0")
                .requiring("pip")
                .unwrap()
                .requiring("six")
                .unwrap(),
        ]
        .into_iter()
        .collect();

        let requirements =
            load_requirements_file(&PipFormat, &path, &ignore_list(["pip"])).unwrap();
        let app = requirements.get("app").unwrap();
        let children: Vec<String> = app
            .requirements(&env)
            .iter()
            .map(|requirement| requirement.key.clone())
            .collect();
        assert_eq!(children, vec!["six"]);
    }

    #[test]
    fn test_missing_file() {
        let (_dir, root) = temp_dir();
        let path = root.join("nope.txt");

        let err = load_requirements_file(&PipFormat, &path, &IgnoreList::default()).unwrap_err();
        assert!(matches!(err, VetchError::FileNotFound { .. }));
        assert_eq!(missing_files(&[path.clone()]), vec![path]);
    }

    #[test]
    fn test_missing_files_reports_every_path() {
        let (_dir, root) = temp_dir();
        let present = root.join("requirements.txt");
        std::fs::write(&present, "").unwrap();
        let absent_a = root.join("a.lock");
        let absent_b = root.join("b.lock");

        let missing = missing_files(&[absent_a.clone(), present, absent_b.clone()]);
        assert_eq!(missing, vec![absent_a, absent_b]);
    }

    #[test]
    fn test_lock_file_round_trip() {
        let (_dir, root) = temp_dir();
        let path = root.join("locks").join("requirements.lock");
        let locked = RequirementCollection::new(vec![
            Requirement::from_requirement_string("zope==5.0").unwrap(),
            Requirement::from_requirement_string("Attrs==23.1.0").unwrap(),
            Requirement::from_requirement_string("six").unwrap(),
        ]);

        save_lock_file(&PipFormat, &locked, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "attrs==23.1.0\nsix\nzope==5.0\n");

        let reloaded = load_requirements_file(&PipFormat, &path, &IgnoreList::default()).unwrap();
        assert_eq!(reloaded.keys(), vec!["attrs", "six", "zope"]);
        for requirement in &locked {
            let read_back = reloaded.get(&requirement.key).unwrap();
            assert_eq!(read_back.specified_version(), requirement.specified_version());
        }
    }
}
