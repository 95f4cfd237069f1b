use std::collections::BTreeSet;
use std::io::Write;

use tracing::{debug, instrument};

use heustics_base::{ErrorKind, FilePath, HeusticsError, HeusticsResult, PalHandle};

/// Name of the work list for shard `n`.
pub fn shard_file_name(n: usize) -> String {
    format!("dirty_pkgs-{}.txt", n)
}

/// Splits the dirty packages round-robin over `num_shards` work lists and writes one file per
/// shard, one package per line.
///
/// Every shard file is written, even when it receives no packages, so that each CI runner
/// finds its list. `pal` is rooted at the CI home directory. Returns the written paths in
/// shard order.
#[instrument(skip(pal, dirty_pkgs), fields(packages = dirty_pkgs.len()))]
pub fn output_dirty_sharded_pkgs(
    pal: &PalHandle,
    dirty_pkgs: &BTreeSet<FilePath>,
    num_shards: usize,
) -> HeusticsResult<Vec<FilePath>> {
    if num_shards == 0 {
        heustics_base::bail!("Number of shards must be at least 1");
    }

    let mut shards: Vec<Vec<&FilePath>> = vec![Vec::new(); num_shards];
    for (i, pkg) in dirty_pkgs.iter().enumerate() {
        shards[i % num_shards].push(pkg);
    }

    let mut paths = Vec::with_capacity(num_shards);
    for (n, shard) in shards.iter().enumerate() {
        let path = FilePath::from(shard_file_name(n));
        let mut writer = pal.create_file(&path)?;
        let write_error = |source| {
            Box::new(HeusticsError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source,
            }))
        };
        for pkg in shard {
            writeln!(writer, "{}", pkg).map_err(write_error)?;
        }
        writer.flush().map_err(write_error)?;
        debug!(shard = n, packages = shard.len(), path = %path, "wrote shard");
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use heustics_base::MockPal;

    fn pkgs(paths: &[&str]) -> BTreeSet<FilePath> {
        paths.iter().map(|p| FilePath::from(*p)).collect()
    }

    fn contents(mock: &MockPal, n: usize) -> String {
        let bytes = mock
            .file_contents(&FilePath::from(shard_file_name(n)))
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_round_robin_in_sorted_order() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());
        let dirty = pkgs(&[
            "heustics/src/services/payroll",
            "heustics/src/libs/helloworld",
            "heustics/src/services/billing",
        ]);

        let paths = output_dirty_sharded_pkgs(&pal, &dirty, 2).unwrap();

        assert_eq!(
            paths,
            vec![FilePath::from("dirty_pkgs-0.txt"), FilePath::from("dirty_pkgs-1.txt")]
        );
        expect![[r#"
            heustics/src/libs/helloworld
            heustics/src/services/payroll
        "#]]
        .assert_eq(&contents(&mock, 0));
        expect![[r#"
            heustics/src/services/billing
        "#]]
        .assert_eq(&contents(&mock, 1));
    }

    #[test]
    fn test_empty_shards_are_still_written() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());

        let paths = output_dirty_sharded_pkgs(&pal, &pkgs(&["libs/helloworld"]), 3).unwrap();

        assert_eq!(paths.len(), 3);
        assert_eq!(contents(&mock, 0), "libs/helloworld\n");
        assert_eq!(contents(&mock, 1), "");
        assert_eq!(contents(&mock, 2), "");
    }

    #[test]
    fn test_no_dirty_packages_single_shard() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());

        output_dirty_sharded_pkgs(&pal, &BTreeSet::new(), 1).unwrap();

        assert_eq!(mock.file_paths(), vec![FilePath::from("dirty_pkgs-0.txt")]);
        assert_eq!(contents(&mock, 0), "");
    }

    #[test]
    fn test_zero_shards_is_an_error() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());

        let err = output_dirty_sharded_pkgs(&pal, &pkgs(&["libs/helloworld"]), 0).unwrap_err();

        assert_eq!(err.to_string(), "Number of shards must be at least 1");
        assert!(mock.file_paths().is_empty());
    }
}
