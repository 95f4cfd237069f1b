/* 📖 # Where does the list of changed files come from?

The CI workflow runs a changed-files action before this tool, which leaves a JSON array of
repository-relative paths in `files.json` inside the CI home directory. Only the directories
of those files matter here: a directory is dirty when at least one non-ignored file in it changed.
*/

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use heustics_base::{FilePath, HeusticsResult, PalHandle, ResultExt};

use crate::ignore::IgnoreRules;

/// Name of the changed files list inside the CI home directory.
pub const CHANGED_FILES: &str = "files.json";

/// Loads the set of directories containing changed, non-ignored files.
///
/// `pal` is rooted at the CI home directory. Files at the repository root yield the empty
/// string.
#[instrument(skip(pal, rules))]
pub fn load_dirty_dirs(pal: &PalHandle, rules: &IgnoreRules) -> HeusticsResult<BTreeSet<String>> {
    let path = FilePath::from(CHANGED_FILES);
    let content = pal
        .read_file_to_string(&path)
        .context("Failed to read changed files list")?;
    let files: Vec<String> = serde_json::from_str(&content)
        .map_err(|e| heustics_base::err!("Malformed changed files list {}: {}", path, e))?;
    debug!(count = files.len(), "loaded changed files");

    let mut dirty_dirs = BTreeSet::new();
    for file in &files {
        if rules.is_ignored(file) {
            debug!(file = %file, "ignoring dirty file");
            continue;
        }
        dirty_dirs.insert(parent_dir(file).to_string());
    }
    Ok(dirty_dirs)
}

fn parent_dir(file: &str) -> &str {
    match file.rfind('/') {
        Some(0) => "/",
        Some(idx) => &file[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heustics_base::MockPal;

    fn home_with_files(json: &str) -> PalHandle {
        let mock = MockPal::new();
        mock.add_file(FilePath::from(CHANGED_FILES), json.as_bytes().to_vec());
        PalHandle::new(mock)
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("libs/helloworld/message.go"), "libs/helloworld");
        assert_eq!(parent_dir("go.mod"), "");
        assert_eq!(parent_dir("/go.mod"), "/");
    }

    #[test]
    fn test_load_dirty_dirs_deduplicates_and_ignores() {
        let pal = home_with_files(
            r#"[
                "heustics/src/libs/helloworld/message.go",
                "heustics/src/libs/helloworld/message_test.go",
                "heustics/src/libs/helloworld/README",
                "heustics/src/services/payroll/main.go",
                "heustics/src/services/payroll/docs/design.txt",
                "heustics/CHANGELOG.md",
                "go.mod"
            ]"#,
        );
        let rules = IgnoreRules::defaults().unwrap();

        let dirs = load_dirty_dirs(&pal, &rules).unwrap();
        let dirs: Vec<&str> = dirs.iter().map(String::as_str).collect();
        assert_eq!(
            dirs,
            vec![
                "",
                "heustics/src/libs/helloworld",
                "heustics/src/services/payroll"
            ]
        );
    }

    #[test]
    fn test_load_dirty_dirs_only_ignored_files() {
        let pal = home_with_files(r#"["README", "LICENSE", "notes.md"]"#);
        let rules = IgnoreRules::defaults().unwrap();

        assert!(load_dirty_dirs(&pal, &rules).unwrap().is_empty());
    }

    #[test]
    fn test_load_dirty_dirs_missing_file() {
        let pal = PalHandle::new(MockPal::new());
        let rules = IgnoreRules::defaults().unwrap();

        let err = load_dirty_dirs(&pal, &rules).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Failed to read changed files list: File error at files.json")
        );
    }

    #[test]
    fn test_load_dirty_dirs_malformed_json() {
        let pal = home_with_files(r#"{"files": []}"#);
        let rules = IgnoreRules::defaults().unwrap();

        let err = load_dirty_dirs(&pal, &rules).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Malformed changed files list files.json: ")
        );
    }
}
