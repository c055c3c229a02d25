use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::path::Path;

/// Name of the single substitution point in a report template
pub const TABLE_PLACEHOLDER: &str = "table_json";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/report.html");

lazy_static! {
    // `$$` is matched so an escaped dollar never starts a placeholder
    static ref PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\$\$|\$table_json\b|\$\{table_json\}").unwrap();
}

/// Report page with a `$table_json` placeholder for the rendered table
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    source: String,
}

impl ReportTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The HTML report page shipped with the crate
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TEMPLATE)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading report template from: {}", path.display());

        let source = std::fs::read_to_string(path).map_err(|source| Error::ReadTemplate {
            path: path.to_path_buf(),
            source,
        })?;

        if !PLACEHOLDER_PATTERN
            .find_iter(&source)
            .any(|m| m.as_str() != "$$")
        {
            tracing::warn!(
                "Report template {} has no ${} placeholder",
                path.display(),
                TABLE_PLACEHOLDER
            );
        }

        Ok(Self::new(source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace every table placeholder with `table_json`
    ///
    /// Any other `$` token is copied through untouched.
    pub fn substitute(&self, table_json: &str) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(&self.source, |caps: &Captures| {
                if &caps[0] == "$$" {
                    "$$".to_string()
                } else {
                    table_json.to_string()
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_substitute_plain_and_braced() {
        let template = ReportTemplate::new("a=$table_json; b=${table_json};");
        assert_eq!(template.substitute("[]"), "a=[]; b=[];");
    }

    #[test]
    fn test_substitute_leaves_other_tokens() {
        let template = ReportTemplate::new(
            "$(document).ready(); $table_jsonx $other ${missing} $$table_json $ $table_json",
        );
        assert_eq!(
            template.substitute("[1]"),
            "$(document).ready(); $table_jsonx $other ${missing} $$table_json $ [1]"
        );
    }

    #[test]
    fn test_substitute_does_not_expand_replacement() {
        let template = ReportTemplate::new("$table_json");
        assert_eq!(
            template.substitute(r#"[{"url":"/$1/${name}"}]"#),
            r#"[{"url":"/$1/${name}"}]"#
        );
    }

    #[test]
    fn test_builtin_template_has_placeholder() {
        let template = ReportTemplate::builtin();
        assert!(template.source().contains("$table_json"));

        let body = template.substitute("[]");
        assert!(!body.contains("$table_json"));
        assert!(body.contains("[]"));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.html");
        std::fs::write(&path, "<p>$table_json</p>").unwrap();

        let template = ReportTemplate::from_file(&path).unwrap();
        assert_eq!(template.substitute("[]"), "<p>[]</p>");
    }

    #[test]
    fn test_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ReportTemplate::from_file(&temp_dir.path().join("missing.html"));
        assert!(matches!(result, Err(Error::ReadTemplate { .. })));
    }
}
