//! Inspect command implementation — show checkpoint contents without uploading

use crate::checkpoint::ProbeCheckpoint;
use crate::cli::LogLevel;
use crate::config::{InspectArgs, OutputFormat};
use crate::naming::{self, FilenameCheck};

pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    let ckpt = ProbeCheckpoint::load(&args.checkpoint).map_err(|e| e.to_string())?;

    let slug = naming::slug_from_model_name(ckpt.model_name()).to_string();
    let res = ckpt.image_size();
    let repo_id = naming::repo_id(naming::HUB_OWNER, &slug, res);

    match args.format {
        OutputFormat::Text => print_text(&ckpt, &slug, res, &repo_id, level),
        OutputFormat::Json => {
            let summary = build_summary(&ckpt, &slug, &repo_id);
            let rendered = serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("JSON rendering: {e}"))?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn print_text(ckpt: &ProbeCheckpoint, slug: &str, res: u32, repo_id: &str, level: LogLevel) {
    let val = ckpt.val_results();

    level.log(LogLevel::Normal, &format!("Model: {}", ckpt.model_name()));
    level.log(LogLevel::Normal, &format!("Slug: {slug}"));
    level.log(LogLevel::Normal, &format!("Resolution: {res}x{res}"));
    level.log(
        LogLevel::Normal,
        &format!("IN1k val top-1: {:.2}%", val.top1 * 100.0),
    );
    level.log(
        LogLevel::Normal,
        &format!("IN1k-ReAL top-1: {:.2}%", val.real_top1 * 100.0),
    );

    level.log(LogLevel::Normal, "Tensors:");
    for (name, tensor) in ckpt.state_dict() {
        level.log(
            LogLevel::Normal,
            &format!("  {name}: {:?} ({} params)", tensor.shape, tensor.numel()),
        );
    }

    if let Some(file_name) = ckpt.file_name() {
        match naming::check_filename(file_name, slug, res) {
            Ok(FilenameCheck::Verified) => {
                level.log(LogLevel::Normal, "✓ Filename matches checkpoint metadata");
            }
            Ok(FilenameCheck::Skipped) => {
                level.log(
                    LogLevel::Verbose,
                    "Filename does not follow the probe naming convention",
                );
            }
            // Inspect reports, it does not abort
            Err(mismatch) => level.log(LogLevel::Normal, &format!("⚠ {mismatch}")),
        }
    }

    level.log(LogLevel::Normal, &format!("Would publish to: {repo_id}"));
}

fn build_summary(ckpt: &ProbeCheckpoint, slug: &str, repo_id: &str) -> serde_json::Value {
    let tensors: serde_json::Map<String, serde_json::Value> = ckpt
        .state_dict()
        .iter()
        .map(|(name, tensor)| (name.clone(), serde_json::json!(tensor.shape)))
        .collect();

    serde_json::json!({
        "model_name": ckpt.model_name(),
        "slug": slug,
        "image_size": ckpt.image_size(),
        "val_results": ckpt.metadata_entries().get("val_results"),
        "tensors": tensors,
        "repo_id": repo_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::{to_safetensors, StateDict, TensorData};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn write_fixture(dir: &Path) -> PathBuf {
        let mut state = StateDict::new();
        state.insert(
            "weight".to_string(),
            TensorData::new(vec![10, 32], vec![0.0; 320]),
        );
        state.insert("bias".to_string(), TensorData::new(vec![10], vec![0.0; 10]));

        let mut meta = HashMap::new();
        meta.insert(
            "config_metadata".to_string(),
            r#"{"model_name":"dinov3_vits16","image_size":256}"#.to_string(),
        );
        meta.insert(
            "val_results".to_string(),
            r#"{"top1":0.77,"real_top1":0.81}"#.to_string(),
        );

        let bytes = to_safetensors(&state, Some(meta)).unwrap();
        let path = dir.join("probe.safetensors");
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_run_inspect_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());
        let args = InspectArgs {
            checkpoint: path,
            format: OutputFormat::Text,
        };
        assert!(run_inspect(args, LogLevel::Quiet).is_ok());
    }

    #[test]
    fn test_run_inspect_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());
        let args = InspectArgs {
            checkpoint: path,
            format: OutputFormat::Json,
        };
        assert!(run_inspect(args, LogLevel::Quiet).is_ok());
    }

    #[test]
    fn test_run_inspect_missing_file() {
        let args = InspectArgs {
            checkpoint: PathBuf::from("/tmp/nope.safetensors"),
            format: OutputFormat::Text,
        };
        let result = run_inspect(args, LogLevel::Quiet);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not found"));
    }

    #[test]
    fn test_build_summary_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());
        let ckpt = ProbeCheckpoint::load(&path).unwrap();

        let summary = build_summary(
            &ckpt,
            "vits16",
            "yberreby/dinov3-vits16-lvd1689m-in1k-256x256-linear-clf-probe",
        );
        assert_eq!(summary["model_name"], "dinov3_vits16");
        assert_eq!(summary["slug"], "vits16");
        assert_eq!(summary["image_size"], 256);
        assert_eq!(summary["tensors"]["weight"], serde_json::json!([10, 32]));
        assert!(summary["repo_id"]
            .as_str()
            .unwrap()
            .ends_with("256x256-linear-clf-probe"));
    }
}
