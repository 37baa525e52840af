use crate::output::PlanResult;
use crate::plan::{plan_directory, NamingOptions};
use crate::preview::{render_plan, Preview};
use crate::scanner::validate_directory;
use anyhow::{Context, Result};
use std::path::Path;

/// Plan operation - computes the renames for `directory` without touching it
pub fn plan_operation(
    directory: &Path,
    prefix: &str,
    naming: &NamingOptions,
    preview: Option<Preview>,
    use_color: bool,
) -> Result<(PlanResult, Option<String>)> {
    validate_directory(directory)?;

    let plan = plan_directory(directory, prefix, naming)
        .with_context(|| format!("Failed to plan renames in {}", directory.display()))?;

    let preview_output = match preview {
        Some(Preview::None) | None => None,
        Some(_) if plan.is_empty() => Some("No compatible image files found".to_string()),
        Some(format) => Some(render_plan(&plan, format, Some(use_color))),
    };

    Ok((
        PlanResult {
            directory: directory.display().to_string(),
            prefix: prefix.to_string(),
            files: plan.len(),
            dry_run: true,
            plan: Some(plan),
        },
        preview_output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plan_operation_does_not_touch_files() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.png", "b.jpg"] {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }

        let (result, preview) = plan_operation(
            temp_dir.path(),
            "img_",
            &NamingOptions::default(),
            Some(Preview::Summary),
            false,
        )
        .unwrap();

        assert_eq!(result.files, 2);
        assert!(result.plan.is_some());
        assert!(preview.unwrap().contains("Files: 2"));
        assert!(temp_dir.path().join("a.png").exists());
        assert!(temp_dir.path().join("b.jpg").exists());
    }

    #[test]
    fn test_plan_operation_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let (result, preview) = plan_operation(
            temp_dir.path(),
            "img_",
            &NamingOptions::default(),
            Some(Preview::Table),
            false,
        )
        .unwrap();

        assert_eq!(result.files, 0);
        assert_eq!(preview.as_deref(), Some("No compatible image files found"));
    }

    #[test]
    fn test_plan_operation_invalid_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = plan_operation(
            &temp_dir.path().join("missing"),
            "img_",
            &NamingOptions::default(),
            None,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid directory"));
    }
}
