//! Publish command implementation — upload a probe checkpoint to HuggingFace Hub

use crate::checkpoint::ProbeCheckpoint;
use crate::cli::LogLevel;
use crate::config::PublishArgs;
use crate::hub::model_card::CardMetric;
use crate::hub::{HfPublisher, ModelCard, PublishConfig};
use crate::naming::{self, FilenameCheck};
use crate::probe::LinearProbe;

pub fn run_publish(args: PublishArgs, level: LogLevel) -> Result<(), String> {
    level.log(
        LogLevel::Normal,
        &format!("Checkpoint: {}", args.checkpoint.display()),
    );

    level.log(LogLevel::Normal, "Loading checkpoint...");
    let ckpt = ProbeCheckpoint::load(&args.checkpoint).map_err(|e| e.to_string())?;

    let model_name = ckpt.model_name().to_string();
    let slug = naming::slug_from_model_name(&model_name).to_string();
    let res = ckpt.image_size();
    let val = ckpt.val_results();

    level.log(LogLevel::Normal, &format!("Model: {model_name}"));
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

    // Sanity check: a filename following the probe naming convention must
    // agree with the checkpoint's own metadata. Other filenames are
    // informational only.
    if let Some(file_name) = ckpt.file_name() {
        match naming::check_filename(file_name, &slug, res).map_err(|e| e.to_string())? {
            FilenameCheck::Verified => {
                level.log(LogLevel::Normal, "✓ Filename matches checkpoint metadata");
            }
            FilenameCheck::Skipped => {}
        }
    }

    let (out_features, in_features) = ckpt.weight_dims().map_err(|e| e.to_string())?;
    level.log(
        LogLevel::Normal,
        &format!("Dimensions: in_features={in_features}, out_features={out_features}"),
    );

    let mut probe = LinearProbe::new(in_features, out_features);
    probe
        .load_state_dict(ckpt.state_dict())
        .map_err(|e| e.to_string())?;

    let config = build_config(&ckpt, in_features, out_features);
    if let Ok(pretty) = serde_json::to_string_pretty(&config) {
        level.log(LogLevel::Verbose, &format!("Full config:\n{pretty}"));
    }

    let repo_id = naming::repo_id(&args.owner, &slug, res);

    if args.dry_run {
        level.log(
            LogLevel::Normal,
            &format!("Dry run — would push to {repo_id}"),
        );
        return Ok(());
    }

    let publish_config = PublishConfig {
        repo_id: repo_id.clone(),
        private: args.private,
        ..Default::default()
    };
    let publisher =
        HfPublisher::new(publish_config).map_err(|e| format!("Publisher initialization: {e}"))?;

    let model_card = if args.no_model_card {
        None
    } else {
        Some(build_model_card(&ckpt, &repo_id))
    };

    level.log(LogLevel::Normal, &format!("Pushing to {repo_id}..."));
    let result = publisher
        .publish_model(&probe, &config, model_card.as_ref())
        .map_err(|e| format!("Upload failed: {e}"))?;

    level.log(
        LogLevel::Normal,
        &format!("✓ Successfully pushed to {}", result.repo_id),
    );
    Ok(())
}

/// Assemble the config.json payload: probe dimensions plus every checkpoint
/// metadata entry. The tensor state never appears here.
fn build_config(
    ckpt: &ProbeCheckpoint,
    in_features: usize,
    out_features: usize,
) -> serde_json::Value {
    let mut config = serde_json::Map::new();
    config.insert("in_features".to_string(), serde_json::json!(in_features));
    config.insert("out_features".to_string(), serde_json::json!(out_features));
    for (key, value) in ckpt.metadata_entries() {
        config.insert(key.clone(), value.clone());
    }
    serde_json::Value::Object(config)
}

/// Build the model card from checkpoint metadata
fn build_model_card(ckpt: &ProbeCheckpoint, repo_id: &str) -> ModelCard {
    let val = ckpt.val_results();
    let repo_name = repo_id.rsplit('/').next().unwrap_or(repo_id).to_string();

    ModelCard {
        model_name: repo_name,
        description: format!(
            "Linear classification probe trained on frozen {} features, \
             evaluated on ImageNet-1k at {res}x{res}.",
            ckpt.model_name(),
            res = ckpt.image_size()
        ),
        license: None,
        tags: vec![
            "image-classification".to_string(),
            "linear-probe".to_string(),
            "dinov3".to_string(),
        ],
        metrics: vec![
            CardMetric {
                name: "IN1k val top-1".to_string(),
                value: val.top1,
            },
            CardMetric {
                name: "IN1k-ReAL top-1".to_string(),
                value: val.real_top1,
            },
        ],
        base_model: Some(ckpt.model_name().to_string()),
    }
}
