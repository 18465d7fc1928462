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

//! Fake cluster and git clients shared by the integration tests.

use fcos_deploy::domain::pipeline::guard::{
    ClusterEntry, ContextEntry, LoginConfig, NamedCluster, NamedContext,
};
use fcos_deploy::infrastructure::constants::{OFFICIAL_NAMESPACE, OFFICIAL_SERVER_URL};
use fcos_deploy::shared::error::Result;
use fcos_deploy::{ClusterCli, GitRemote, Resource};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<String>>>;

/// `ClusterCli` double that records every invocation and answers existence
/// lookups from a fixed set.
pub struct FakeCluster {
    existing: Vec<(String, String)>,
    calls: CallLog,
    login: LoginConfig,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self {
            existing: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            login: login_config("https://api.example.com:6443", "alice-sandbox"),
        }
    }

    /// A fake whose login targets the official cluster and namespace.
    pub fn official() -> Self {
        Self {
            login: login_config(OFFICIAL_SERVER_URL, OFFICIAL_NAMESPACE),
            ..Self::new()
        }
    }

    pub fn with_existing(mut self, kind: &str, name: &str) -> Self {
        self.existing.push((kind.to_string(), name.to_string()));
        self
    }

    /// Handle on the call log, valid after the fake is boxed away.
    pub fn calls_handle(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn login_config(server: &str, namespace: &str) -> LoginConfig {
    LoginConfig {
        contexts: vec![NamedContext {
            name: "active".to_string(),
            context: ContextEntry {
                cluster: "target".to_string(),
                namespace: Some(namespace.to_string()),
            },
        }],
        clusters: vec![NamedCluster {
            name: "target".to_string(),
            cluster: ClusterEntry {
                server: server.to_string(),
            },
        }],
    }
}

#[async_trait::async_trait]
impl ClusterCli for FakeCluster {
    async fn current_context(&self) -> Result<String> {
        self.log("current-context".to_string());
        Ok("active".to_string())
    }

    async fn login_config(&self) -> Result<LoginConfig> {
        self.log("config-view".to_string());
        Ok(self.login.clone())
    }

    async fn process_template(
        &self,
        template: &Path,
        params: &[(String, String)],
    ) -> Result<Value> {
        let file = template
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        self.log(format!("process {} [{}]", file, keys.join(",")));

        let prefix = params
            .iter()
            .find(|(k, _)| k == "DEVELOPER_PREFIX")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();

        let items = if file == "jenkins-s2i.yaml" {
            json!([
                {"kind": "ImageStream",
                 "metadata": {"name": format!("{prefix}jenkins"),
                              "annotations": {"coreos.com/deploy-default": "true"}}},
                {"kind": "BuildConfig",
                 "metadata": {"name": format!("{prefix}jenkins-s2i"),
                              "annotations": {"coreos.com/deploy-default": "false"}}}
            ])
        } else {
            json!([
                {"kind": "PersistentVolumeClaim",
                 "metadata": {"name": format!("{prefix}coreos-assembler-claim"),
                              "annotations": {"coreos.com/deploy-default": "true"}}},
                {"kind": "BuildConfig",
                 "metadata": {"name": format!("{prefix}fedora-coreos-pipeline"),
                              "annotations": {"coreos.com/deploy-default": "true"}}}
            ])
        };

        Ok(json!({"kind": "List", "items": items}))
    }

    async fn resource_exists(&self, kind: &str, name: &str) -> Result<bool> {
        self.log(format!("get {kind} {name}"));
        Ok(self.existing.iter().any(|(k, n)| k == kind && n == name))
    }

    async fn create_resource(&self, resource: &Resource) -> Result<String> {
        self.log(format!("create {}/{}", resource.kind(), resource.name()));
        Ok(format!("{}/{} created\n", resource.kind(), resource.name()))
    }

    async fn replace_resource(&self, resource: &Resource) -> Result<String> {
        self.log(format!("replace {}/{}", resource.kind(), resource.name()));
        Ok(format!("{}/{} replaced\n", resource.kind(), resource.name()))
    }

    async fn delete_resource(&self, resource: &Resource) -> Result<String> {
        self.log(format!("delete {}/{}", resource.kind(), resource.name()));
        Ok(format!("{}/{} deleted\n", resource.kind(), resource.name()))
    }

    async fn start_build(&self, name: &str) -> Result<String> {
        self.log(format!("start-build {name}"));
        Ok(format!("build {name}-1 started\n"))
    }
}

/// `GitRemote` double reporting a fixed default branch.
pub struct FakeGit {
    branch: String,
    queries: CallLog,
}

impl FakeGit {
    pub fn new(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn queries_handle(&self) -> CallLog {
        Arc::clone(&self.queries)
    }
}

#[async_trait::async_trait]
impl GitRemote for FakeGit {
    async fn default_branch(&self, url: &str) -> Result<String> {
        self.queries.lock().unwrap().push(url.to_string());
        Ok(self.branch.clone())
    }
}
