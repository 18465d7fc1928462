// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::config::deploy::DeployConfig;
use crate::domain::pipeline::guard;
use crate::domain::pipeline::renderer::TemplateRenderer;
use crate::domain::pipeline::resource::Resource;
use crate::infrastructure::cluster::{ClusterCli, OcCli};
use crate::infrastructure::constants::{NON_UPDATABLE_KINDS, PIPELINE_BUILDCONFIG};
use crate::infrastructure::git::{GitBinary, GitRemote};
use crate::shared::error::Result;
use std::collections::BTreeMap;

/// What the applier decided to do with one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAction {
    Create,
    Replace,
    Skip,
}

/// Counts of what a run did (or, under --dry-run, would have done).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeploySummary {
    pub created: u32,
    pub replaced: u32,
    pub skipped: u32,
    pub deleted: u32,
}

/// Orchestrates one deploy run against the cluster and git clients. All
/// cluster interaction goes through the injected `ClusterCli`, so tests can
/// substitute fakes.
pub struct PipelineDescriptor {
    config: DeployConfig,
    oc: Box<dyn ClusterCli>,
    git: Box<dyn GitRemote>,
}

impl PipelineDescriptor {
    pub fn new(config: DeployConfig) -> Self {
        let oc = Box::new(OcCli::new(config.oc_cmd.clone()));
        Self {
            config,
            oc,
            git: Box::new(GitBinary::new()),
        }
    }

    pub fn with_clients(
        config: DeployConfig,
        oc: Box<dyn ClusterCli>,
        git: Box<dyn GitRemote>,
    ) -> Self {
        Self { config, oc, git }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// True iff the active login targets the official pipeline namespace.
    pub async fn targeting_official_namespace(&self) -> Result<bool> {
        guard::targeting_official_namespace(self.oc.as_ref()).await
    }

    pub async fn resolve_parameters(&self) -> Result<BTreeMap<String, String>> {
        TemplateRenderer::new(&self.config, self.oc.as_ref(), self.git.as_ref())
            .build_parameters()
            .await
    }

    pub async fn process_templates(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<Vec<Resource>> {
        TemplateRenderer::new(&self.config, self.oc.as_ref(), self.git.as_ref())
            .process_templates(params)
            .await
    }

    /// Create or replace each selected resource.
    ///
    /// Resources outside the default set are passed over silently unless
    /// --all is in effect. An existing resource of a non-updatable kind is
    /// skipped with a notice, dry-run or not. The first failing mutation
    /// aborts the run; resources already applied stay applied.
    pub async fn update_resources(&self, resources: &[Resource]) -> Result<DeploySummary> {
        let mut summary = DeploySummary::default();

        for resource in resources {
            if !self.config.all && !resource.deploy_default() {
                continue;
            }

            let exists = self
                .oc
                .resource_exists(resource.kind(), resource.name())
                .await?;

            match plan_action(exists, resource.kind()) {
                ResourceAction::Skip => {
                    println!(
                        "Skipping update of {}/{}",
                        resource.kind(),
                        resource.name()
                    );
                    summary.skipped += 1;
                }
                ResourceAction::Create => {
                    if self.config.dry_run {
                        println!("Would create {}/{}", resource.kind(), resource.name());
                    } else {
                        let output = self.oc.create_resource(resource).await?;
                        print!("{output}");
                    }
                    summary.created += 1;
                }
                ResourceAction::Replace => {
                    if self.config.dry_run {
                        println!("Would replace {}/{}", resource.kind(), resource.name());
                    } else {
                        let output = self.oc.replace_resource(resource).await?;
                        print!("{output}");
                    }
                    summary.replaced += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Delete exactly the resources whose name carries the developer prefix.
    ///
    /// Prefix matching is the only guard on this path; everything else is
    /// left untouched without notice.
    pub async fn delete_developer_resources(&self, resources: &[Resource]) -> Result<DeploySummary> {
        let mut summary = DeploySummary::default();

        for resource in resources {
            if !resource.name().starts_with(&self.config.prefix) {
                continue;
            }

            let output = self.oc.delete_resource(resource).await?;
            print!("{output}");
            summary.deleted += 1;
        }

        Ok(summary)
    }

    /// Kick off the pipeline build once an update has gone through.
    pub async fn start_pipeline_build(&self) -> Result<()> {
        let name = if self.config.official {
            PIPELINE_BUILDCONFIG.to_string()
        } else {
            format!("{}{}", self.config.prefix, PIPELINE_BUILDCONFIG)
        };

        if self.config.dry_run {
            println!("Would start build {name}");
            return Ok(());
        }

        let output = self.oc.start_build(&name).await?;
        print!("{output}");
        Ok(())
    }
}

/// Create, replace or skip, from existence and kind. Existing resources of
/// a non-updatable kind are never touched in place.
pub fn plan_action(exists: bool, kind: &str) -> ResourceAction {
    if !exists {
        ResourceAction::Create
    } else if NON_UPDATABLE_KINDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(kind))
    {
        ResourceAction::Skip
    } else {
        ResourceAction::Replace
    }
}
