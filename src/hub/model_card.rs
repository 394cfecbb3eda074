//! Model card generation
//!
//! Renders the README.md uploaded alongside the probe: YAML front matter
//! for the Hub's metadata indexing, then a human-readable body with the
//! probe's validation results.

/// A named evaluation metric, stored as a fraction in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct CardMetric {
    /// Display name, e.g. "IN1k val top-1"
    pub name: String,
    /// Metric value in [0, 1]
    pub value: f64,
}

/// Model card content for a published probe
#[derive(Debug, Clone, Default)]
pub struct ModelCard {
    /// Model name (repository name, not the full id)
    pub model_name: String,
    /// One-paragraph description
    pub description: String,
    /// License identifier (e.g., "mit")
    pub license: Option<String>,
    /// Hub tags
    pub tags: Vec<String>,
    /// Evaluation metrics
    pub metrics: Vec<CardMetric>,
    /// Backbone the probe was trained on (Hub repo id or model name)
    pub base_model: Option<String>,
}

impl ModelCard {
    /// Render the card as markdown with YAML front matter
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("---\n");

        if let Some(license) = &self.license {
            md.push_str(&format!("license: {license}\n"));
        }
        if let Some(base_model) = &self.base_model {
            md.push_str(&format!("base_model: {base_model}\n"));
        }
        if !self.tags.is_empty() {
            md.push_str("tags:\n");
            for tag in &self.tags {
                md.push_str(&format!("- {tag}\n"));
            }
        }
        if !self.metrics.is_empty() {
            md.push_str("model-index:\n");
            md.push_str(&format!("- name: {}\n", self.model_name));
            md.push_str("  results:\n");
            md.push_str("  - task:\n");
            md.push_str("      type: image-classification\n");
            md.push_str("    dataset:\n");
            md.push_str("      name: ImageNet-1k\n");
            md.push_str("      type: imagenet-1k\n");
            md.push_str("    metrics:\n");
            for metric in &self.metrics {
                md.push_str("    - type: accuracy\n");
                md.push_str(&format!("      name: {}\n", metric.name));
                md.push_str(&format!("      value: {}\n", metric.value));
            }
        }
        md.push_str("---\n\n");

        md.push_str(&format!("# {}\n\n", self.model_name));
        if !self.description.is_empty() {
            md.push_str(&format!("{}\n\n", self.description));
        }

        if !self.metrics.is_empty() {
            md.push_str("## Evaluation Results\n\n");
            md.push_str("| Metric | Value |\n");
            md.push_str("|--------|-------|\n");
            for metric in &self.metrics {
                md.push_str(&format!(
                    "| {} | {:.2}% |\n",
                    metric.name,
                    metric.value * 100.0
                ));
            }
            md.push('\n');
        }

        md
    }
}
