//! Key-value output file for the calling automation (GitHub Actions
//! `$GITHUB_OUTPUT`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::types::VersionSuggestion;

/// Environment variable naming the output file.
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

// Consumers of the action compare against `True`/`False`.
fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Render the four `key=value` output lines for a suggestion.
pub fn format_outputs(suggestion: &VersionSuggestion) -> String {
    format!(
        "version={}\nis_breaking_change={}\nis_new_feature={}\nis_patch_change={}\n",
        suggestion.version,
        flag(suggestion.is_breaking),
        flag(suggestion.is_feature),
        flag(suggestion.is_patch),
    )
}

/// Append the output lines for `suggestion` to the file at `path`,
/// creating it if needed.
pub fn append_outputs(path: &Path, suggestion: &VersionSuggestion) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_outputs(suggestion).as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn feature_suggestion() -> VersionSuggestion {
        VersionSuggestion {
            version: "0.2.0".into(),
            is_breaking: false,
            is_feature: true,
            is_patch: false,
        }
    }

    #[test]
    fn format_outputs_uses_capitalised_flags() {
        assert_eq!(
            format_outputs(&feature_suggestion()),
            "version=0.2.0\nis_breaking_change=False\nis_new_feature=True\nis_patch_change=False\n"
        );
    }

    #[test]
    fn append_outputs_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");

        append_outputs(&path, &feature_suggestion()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert!(content.starts_with("version=0.2.0\n"));
    }

    #[test]
    fn append_outputs_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        fs::write(&path, "previous=step\n").unwrap();

        append_outputs(&path, &feature_suggestion()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "previous=step",
                "version=0.2.0",
                "is_breaking_change=False",
                "is_new_feature=True",
                "is_patch_change=False",
            ]
        );
    }

    #[test]
    fn append_outputs_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("github_output");
        assert!(append_outputs(&path, &feature_suggestion()).is_err());
    }
}
