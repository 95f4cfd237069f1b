/* 📖 # What does dirty_pkgs do?

It runs in CI after the changed-files step and decides which packages of the monorepo have to
be built and tested for a change set:

1. load the changed files and reduce them to dirty directories (changes.rs)
2. resolve those directories to dirty import paths with `go list` (golist.rs)
3. select every package with a Makefile that is, or depends on, a dirty import path (dirty.rs)
4. split the result into one work list per CI runner (shard.rs)
*/

pub mod changes;
pub mod config;
pub mod dirty;
pub mod golist;
pub mod ignore;
pub mod shard;

use std::path::PathBuf;

use tracing::{info, instrument};

use heustics_base::{FilePath, HeusticsResult, PalHandle};

pub use changes::load_dirty_dirs;
pub use config::{Config, IgnoreConfig, load_config};
pub use dirty::find_dirty_pkgs;
pub use golist::{GoPackage, find_dirty_import_paths, list_packages};
pub use ignore::IgnoreRules;
pub use shard::output_dirty_sharded_pkgs;

/// Inputs of a dirty package search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Source tree passed to `go list`.
    pub src_dir: String,
    /// Root that dirty package paths are reported relative to.
    pub repos_root: PathBuf,
    pub num_shards: usize,
}

/// Runs the whole search and returns the written shard files.
///
/// `home` is rooted at the CI home directory holding `files.json` and receiving the shard
/// files; `repo` is rooted at the repos root, where `go list` runs.
#[instrument(skip_all, fields(src_dir = %options.src_dir, num_shards = options.num_shards))]
pub fn run(
    home: &PalHandle,
    repo: &PalHandle,
    rules: &IgnoreRules,
    options: &SearchOptions,
) -> HeusticsResult<Vec<FilePath>> {
    let dirty_dirs = load_dirty_dirs(home, rules)?;
    info!("Found dirty dirs: {:?}", dirty_dirs);

    let dirty_import_paths = find_dirty_import_paths(repo, &dirty_dirs)?;
    info!("Found dirty import paths: {:?}", dirty_import_paths);

    let packages = list_packages(repo, &options.src_dir)?;
    let dirty_pkgs = find_dirty_pkgs(repo, &packages, &dirty_import_paths, &options.repos_root)?;
    info!(
        "Found dirty pkgs: {:?}",
        dirty_pkgs.iter().map(FilePath::to_string).collect::<Vec<_>>()
    );

    let shard_paths = output_dirty_sharded_pkgs(home, &dirty_pkgs, options.num_shards)?;
    info!(
        "Outputted dirty sharded pkg paths: {:?}",
        shard_paths.iter().map(FilePath::to_string).collect::<Vec<_>>()
    );
    Ok(shard_paths)
}
