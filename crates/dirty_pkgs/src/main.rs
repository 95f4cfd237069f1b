/* 📖 # How is dirty_pkgs invoked?

CI calls it right after the changed-files step:

    dirty_pkgs $GITHUB_HOME $REPOS_ROOT/heustics/src $REPOS_ROOT $NUM_SHARDS

The shard files land next to `files.json` in $GITHUB_HOME for the next CI step to pick up.
Log verbosity follows LOGGING_LEVEL (CRITICAL, ERROR, WARNING, INFO, DEBUG or NOTSET).

Exit codes:
- 0: shard files written
- 1: any error (missing or malformed inputs, `go list` failure, unwritable output)
- 2: invalid command line
*/

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use dirty_pkgs::{IgnoreRules, SearchOptions, load_config};
use heustics_base::tracing::{LevelFilter, init_tracing, level_from_env};
use heustics_base::{ErrorKind, FilePath, HeusticsError, HeusticsResult, PalHandle, RealPal};

/// Find the packages affected by a change set and shard them into CI work lists
#[derive(Parser, Debug)]
#[command(name = "dirty_pkgs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding files.json; receives the dirty_pkgs-<n>.txt files
    github_home: PathBuf,

    /// Source tree to list packages in
    src_dir: PathBuf,

    /// Root that reported package paths are relative to; `go list` runs here
    repos_root: PathBuf,

    /// Number of shard files to write
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    num_shards: u32,

    /// TOML file with additional ignore patterns
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(e) = init_tracing(level_from_env("LOGGING_LEVEL", LevelFilter::INFO)) {
        eprintln!("Warning: {}", e);
    }

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:?}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> HeusticsResult<()> {
    let repos_root = canonicalize(&cli.repos_root)?;
    let src_dir = canonicalize(&cli.src_dir)?;

    let rules = match &cli.config {
        Some(path) => {
            let (dir, file) = split_file_path(path)?;
            let config = load_config(&PalHandle::new(RealPal::new(dir)), &file)?;
            IgnoreRules::from_config(&config.ignore)?
        }
        None => IgnoreRules::defaults()?,
    };

    let home = PalHandle::new(RealPal::new(cli.github_home.clone()));
    let repo = PalHandle::new(RealPal::new(repos_root.clone()));
    let options = SearchOptions {
        src_dir: src_dir.to_string_lossy().into_owned(),
        repos_root,
        num_shards: cli.num_shards as usize,
    };
    dirty_pkgs::run(&home, &repo, &rules, &options)?;
    Ok(())
}

/// `go list` reports absolute, symlink-free directories; inputs are brought into that form.
fn canonicalize(path: &Path) -> HeusticsResult<PathBuf> {
    std::fs::canonicalize(path).map_err(|source| {
        Box::new(HeusticsError::new(ErrorKind::FileError {
            path: path.to_path_buf(),
            source,
        }))
    })
}

fn split_file_path(path: &Path) -> HeusticsResult<(PathBuf, FilePath)> {
    let file = path
        .file_name()
        .ok_or_else(|| heustics_base::err!("Not a file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, FilePath::from(Path::new(file))))
}
