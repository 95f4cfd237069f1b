/* 📖 # When is a package dirty?

A package needs CI work when it, or anything it imports transitively, contains a changed file.
`go list` already reports the transitive dependency closure, so a package is dirty when its own
import path or one of its dependencies is among the dirty import paths.
Only packages with a Makefile are considered: the Makefile is the entry point CI invokes.
*/

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, instrument, warn};

use heustics_base::{FilePath, HeusticsResult, PalHandle, ResultExt};

use crate::golist::GoPackage;

/// File that marks a package as buildable by CI.
pub const MAKEFILE: &str = "Makefile";

/// Selects the packages affected by the dirty import paths.
///
/// `pal` is rooted at `repos_root`; results are package directories relative to it, `.` for
/// the root itself.
#[instrument(
    skip_all,
    fields(packages = packages.len(), dirty_import_paths = dirty_import_paths.len())
)]
pub fn find_dirty_pkgs(
    pal: &PalHandle,
    packages: &[GoPackage],
    dirty_import_paths: &BTreeSet<String>,
    repos_root: &Path,
) -> HeusticsResult<BTreeSet<FilePath>> {
    let mut dirty_pkgs = BTreeSet::new();
    for package in packages {
        let Ok(relative) = package.dir.strip_prefix(repos_root) else {
            warn!(
                dir = %package.dir.display(),
                repos_root = %repos_root.display(),
                "package lies outside the repos root, skipping"
            );
            continue;
        };
        let relative = FilePath::from(relative);

        let has_makefile = pal
            .file_exists(&relative.join(MAKEFILE))
            .with_context(|| format!("Failed to check for Makefile in {}", relative))?;
        if !has_makefile {
            debug!(dir = %relative, "package has no Makefile");
            continue;
        }

        if package.import_path.is_empty() {
            debug!(dir = %relative, "package has no import path");
            continue;
        }

        let is_dirty = dirty_import_paths.contains(&package.import_path)
            || package
                .deps
                .iter()
                .any(|dep| dirty_import_paths.contains(dep));
        if !is_dirty {
            debug!(dir = %relative, "package has no dirty dependencies");
            continue;
        }

        debug!(dir = %relative, "package has dirty dependencies");
        if relative.as_relative().as_str().is_empty() {
            dirty_pkgs.insert(FilePath::from("."));
        } else {
            dirty_pkgs.insert(relative);
        }
    }
    Ok(dirty_pkgs)
}
