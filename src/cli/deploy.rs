//! Deployment command flow

use crate::cli::commands::CliArgs;
use crate::cli::display::TableRenderer;
use crate::domain::config::{resolve_prefix, DeployAction, DeployConfig};
use crate::domain::pipeline::PipelineDescriptor;
use crate::infrastructure::constants::MANIFESTS_DIR;
use crate::shared::error::DeployError;
use std::path::PathBuf;

impl CliArgs {
    pub async fn execute(self) -> anyhow::Result<()> {
        let config = self.resolve_config()?;
        let descriptor = PipelineDescriptor::new(config);
        run(&descriptor).await
    }

    /// Resolve the command line into the immutable deploy configuration.
    ///
    /// The action group guarantees exactly one of --update/--delete-devel;
    /// everything left to check here is the developer prefix.
    pub fn resolve_config(&self) -> Result<DeployConfig, DeployError> {
        let action = if self.update {
            DeployAction::Update
        } else {
            DeployAction::DeleteDevel
        };

        let raw_prefix = match &self.prefix {
            Some(prefix) => prefix.clone(),
            None => std::env::var("USER").map_err(|_| {
                DeployError::usage("--prefix not given and $USER is not set")
            })?,
        };
        let prefix = resolve_prefix(&raw_prefix)?;

        Ok(DeployConfig {
            action,
            official: self.official,
            all: self.all || self.official,
            dry_run: self.dry_run,
            prefix,
            start: self.start,
            pipeline: self.pipeline.clone(),
            config_repo: self.config.clone(),
            bucket: self.bucket.clone(),
            gcp_gs_bucket: self.gcp_gs_bucket.clone(),
            cosa_img: self.cosa_img.clone(),
            pvc_size: self.pvc_size.clone(),
            oc_cmd: self.oc_cmd.clone(),
            manifests_dir: PathBuf::from(MANIFESTS_DIR),
        })
    }
}

/// Drive one full run against an already-configured descriptor.
///
/// The official-namespace guard runs first, before any template file is
/// read; a refusal surfaces as `DeployError::OfficialRefused` (exit 1).
pub async fn run(descriptor: &PipelineDescriptor) -> anyhow::Result<()> {
    let config = descriptor.config();

    if descriptor.targeting_official_namespace().await? && !config.official {
        return Err(DeployError::OfficialRefused.into());
    }

    let renderer = TableRenderer::new();

    let params = descriptor.resolve_parameters().await?;
    println!("{}", renderer.render_parameters(&params));

    let resources = descriptor.process_templates(&params).await?;

    let summary = match config.action {
        DeployAction::Update => {
            let summary = descriptor.update_resources(&resources).await?;
            if config.start {
                descriptor.start_pipeline_build().await?;
            }
            summary
        }
        DeployAction::DeleteDevel => descriptor.delete_developer_resources(&resources).await?,
    };

    println!("{}", renderer.render_summary(&summary, config.dry_run));
    Ok(())
}
