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

use crate::infrastructure::cluster::ClusterCli;
use crate::infrastructure::constants::{OFFICIAL_NAMESPACE, OFFICIAL_SERVER_URL};
use crate::shared::error::{DeployError, Result};
use serde::Deserialize;

/// The slice of `oc config view -o json` this tool inspects. Unknown fields
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: ContextEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    pub cluster: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: ClusterEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterEntry {
    pub server: String,
}

/// Whether the active login targets the official pipeline namespace on the
/// official cluster. Read-only: two `oc config` queries and no mutation.
pub async fn targeting_official_namespace(oc: &dyn ClusterCli) -> Result<bool> {
    let context_name = oc.current_context().await?;
    let config = oc.login_config().await?;
    official_login(&config, &context_name)
}

/// Core of the guard, split out so it can be checked without a cluster.
///
/// Exactly one context entry must match the active context name and exactly
/// one cluster entry must match that context's cluster; anything else means
/// the login configuration is corrupt or ambiguous.
pub fn official_login(config: &LoginConfig, context_name: &str) -> Result<bool> {
    let mut matches = config.contexts.iter().filter(|c| c.name == context_name);
    let context = match (matches.next(), matches.next()) {
        (Some(entry), None) => &entry.context,
        (None, _) => {
            return Err(DeployError::login_config(format!(
                "no context named '{context_name}'"
            )))
        }
        (Some(_), Some(_)) => {
            return Err(DeployError::login_config(format!(
                "multiple contexts named '{context_name}'"
            )))
        }
    };

    let mut matches = config.clusters.iter().filter(|c| c.name == context.cluster);
    let cluster = match (matches.next(), matches.next()) {
        (Some(entry), None) => &entry.cluster,
        (None, _) => {
            return Err(DeployError::login_config(format!(
                "no cluster named '{}'",
                context.cluster
            )))
        }
        (Some(_), Some(_)) => {
            return Err(DeployError::login_config(format!(
                "multiple clusters named '{}'",
                context.cluster
            )))
        }
    };

    Ok(cluster.server == OFFICIAL_SERVER_URL
        && context.namespace.as_deref() == Some(OFFICIAL_NAMESPACE))
}
