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
use crate::domain::config::refspec::GitRefspec;
use crate::domain::pipeline::resource::Resource;
use crate::infrastructure::cluster::ClusterCli;
use crate::infrastructure::constants::TEMPLATES;
use crate::infrastructure::git::GitRemote;
use crate::shared::error::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// The slice of a template definition this tool reads: the parameter names
/// it declares. Everything else in the file belongs to the processor.
#[derive(Debug, Deserialize)]
struct TemplateDefinition {
    #[serde(default)]
    parameters: Vec<TemplateParameter>,
}

#[derive(Debug, Deserialize)]
struct TemplateParameter {
    name: String,
}

/// Renders the fixed template set through the external processor.
pub struct TemplateRenderer<'a> {
    config: &'a DeployConfig,
    oc: &'a dyn ClusterCli,
    git: &'a dyn GitRemote,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(config: &'a DeployConfig, oc: &'a dyn ClusterCli, git: &'a dyn GitRemote) -> Self {
        Self { config, oc, git }
    }

    /// Assemble the parameter set from the configuration, resolving git
    /// refspecs as needed. The developer prefix is omitted in official mode
    /// so the rendered resources come out unprefixed.
    pub async fn build_parameters(&self) -> Result<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();

        if !self.config.official {
            params.insert("DEVELOPER_PREFIX".to_string(), self.config.prefix.clone());
        }

        if let Some(refspec) = &self.config.pipeline {
            let pipeline = GitRefspec::resolve(refspec, self.git).await?;
            params.insert("JENKINS_S2I_URL".to_string(), pipeline.url.clone());
            params.insert("JENKINS_S2I_REF".to_string(), pipeline.reference.clone());
            params.insert("JENKINS_JOBS_URL".to_string(), pipeline.url);
            params.insert("JENKINS_JOBS_REF".to_string(), pipeline.reference);
        }

        if let Some(refspec) = &self.config.config_repo {
            let config_repo = GitRefspec::resolve(refspec, self.git).await?;
            params.insert("FCOS_CONFIG_URL".to_string(), config_repo.url);
            params.insert("FCOS_CONFIG_REF".to_string(), config_repo.reference);
        }

        if let Some(bucket) = &self.config.bucket {
            params.insert("S3_BUCKET".to_string(), bucket.clone());
        }
        if let Some(bucket) = &self.config.gcp_gs_bucket {
            params.insert("GCP_GS_BUCKET".to_string(), bucket.clone());
        }
        if let Some(image) = &self.config.cosa_img {
            params.insert("COREOS_ASSEMBLER_IMAGE".to_string(), image.clone());
        }
        if let Some(size) = &self.config.pvc_size {
            params.insert("PVC_SIZE".to_string(), size.clone());
        }

        Ok(params)
    }

    /// Process the fixed templates in order, passing each one only the
    /// subset of `params` it declares. A supplied parameter no template
    /// declares is narrowed out of the invocation, not reported.
    pub async fn process_templates(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<Vec<Resource>> {
        let mut resources = Vec::new();

        for template in TEMPLATES {
            let path = self.config.manifests_dir.join(template);
            let declared = declared_parameters(&path)?;
            let filtered: Vec<(String, String)> = params
                .iter()
                .filter(|(key, _)| declared.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();

            let processed = self.oc.process_template(&path, &filtered).await?;
            resources.extend(Resource::from_processed_list(&processed)?);
        }

        Ok(resources)
    }
}

/// Parameter names a template definition declares.
pub fn declared_parameters(path: &Path) -> Result<HashSet<String>> {
    let raw = std::fs::read_to_string(path)?;
    let definition: TemplateDefinition = serde_yaml::from_str(&raw)?;
    Ok(definition
        .parameters
        .into_iter()
        .map(|parameter| parameter.name)
        .collect())
}
