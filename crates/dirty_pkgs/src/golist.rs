use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use heustics_base::{ErrorKind, HeusticsError, HeusticsResult, PalHandle};

/// `go list` template printing one import path per package.
pub const IMPORT_PATH_FORMAT: &str = "{{ .ImportPath }}";

/// `go list` template printing `dir,import path,space separated deps` per package.
pub const PACKAGE_FORMAT: &str = "{{ .Dir }},{{ .ImportPath }},{{ range .Deps }}{{ . }} {{end}}\n";

/// A Go package as reported by `go list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoPackage {
    /// Absolute package directory.
    pub dir: PathBuf,
    pub import_path: String,
    /// Import paths of all transitive dependencies.
    pub deps: BTreeSet<String>,
}

/// Package pattern matching `dir` and everything below it, relative to the working directory.
pub fn package_pattern(dir: &str) -> String {
    if dir.is_empty() {
        "./...".to_string()
    } else {
        format!("./{}/...", dir)
    }
}

fn go_list_args(format: &str, pattern: String) -> Vec<String> {
    vec!["list".to_string(), "-f".to_string(), format.to_string(), pattern]
}

/// Resolves dirty directories to the import paths of the packages they contain.
///
/// Directories for which `go list` fails are skipped with a warning, since a deleted
/// directory or one without Go sources is a legitimate part of a change set.
#[instrument(skip(pal, dirty_dirs), fields(dirs = dirty_dirs.len()))]
pub fn find_dirty_import_paths(
    pal: &PalHandle,
    dirty_dirs: &BTreeSet<String>,
) -> HeusticsResult<BTreeSet<String>> {
    let mut import_paths = BTreeSet::new();
    for dir in dirty_dirs {
        let args = go_list_args(IMPORT_PATH_FORMAT, package_pattern(dir));
        let output = pal.run_command("go", &args)?;
        if !output.is_success() {
            warn!(
                dir = %dir,
                status = ?output.status,
                stderr = %output.stderr.trim(),
                "go list for import paths returned an error"
            );
            continue;
        }
        let found = output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());
        for import_path in found {
            debug!(dir = %dir, import_path, "found dirty import path");
            import_paths.insert(import_path.to_string());
        }
    }
    Ok(import_paths)
}

/// Lists every package below `src_dir` together with its dependencies.
#[instrument(skip(pal))]
pub fn list_packages(pal: &PalHandle, src_dir: &str) -> HeusticsResult<Vec<GoPackage>> {
    let pattern = format!("{}/...", src_dir.trim_end_matches('/'));
    let args = go_list_args(PACKAGE_FORMAT, pattern);
    let output = pal.run_command("go", &args)?;
    if !output.is_success() {
        return Err(Box::new(
            HeusticsError::new(ErrorKind::CommandError {
                command: format!("go {}", args.join(" ")),
                status: output.status,
                stderr: output.stderr,
            })
            .context(format!("Failed to list packages in {}", src_dir)),
        ));
    }
    let packages = parse_packages(&output.stdout);
    debug!(count = packages.len(), "listed packages");
    Ok(packages)
}

/// Parses output produced with [`PACKAGE_FORMAT`]. Blank lines and entries without a
/// directory are skipped.
pub fn parse_packages(stdout: &str) -> Vec<GoPackage> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = line.splitn(3, ',');
            let dir = fields.next().unwrap_or_default().trim();
            if dir.is_empty() {
                debug!(line, "skipping package without directory");
                return None;
            }
            let import_path = fields.next().unwrap_or_default().trim();
            let deps = fields
                .next()
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            Some(GoPackage {
                dir: PathBuf::from(dir),
                import_path: import_path.to_string(),
                deps,
            })
        })
        .collect()
}
