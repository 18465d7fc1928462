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

use crate::domain::pipeline::guard::LoginConfig;
use crate::domain::pipeline::resource::Resource;
use crate::shared::error::{DeployError, Result};
use serde_json::Value;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[async_trait::async_trait]
pub trait ClusterCli: Send + Sync {
    /// Name of the active login context (`oc config current-context`).
    async fn current_context(&self) -> Result<String>;

    /// Full context/cluster configuration (`oc config view -o json`).
    async fn login_config(&self) -> Result<LoginConfig>;

    /// Render a template with the given parameters (`oc process`), returning
    /// the parsed JSON output.
    async fn process_template(
        &self,
        template: &Path,
        params: &[(String, String)],
    ) -> Result<Value>;

    /// Point lookup of {kind, name} against the live cluster. Any nonzero
    /// exit is reported as nonexistence, not an error.
    async fn resource_exists(&self, kind: &str, name: &str) -> Result<bool>;

    async fn create_resource(&self, resource: &Resource) -> Result<String>;

    async fn replace_resource(&self, resource: &Resource) -> Result<String>;

    async fn delete_resource(&self, resource: &Resource) -> Result<String>;

    async fn start_build(&self, name: &str) -> Result<String>;
}

/// `ClusterCli` backed by the `oc` binary. Every operation is one blocking
/// subprocess invocation; nothing is retried.
pub struct OcCli {
    oc_cmd: String,
}

impl OcCli {
    pub fn new(oc_cmd: impl Into<String>) -> Self {
        Self {
            oc_cmd: oc_cmd.into(),
        }
    }

    async fn output(&self, args: &[String]) -> Result<std::process::Output> {
        debug!("running: {} {}", self.oc_cmd, args.join(" "));
        let output = Command::new(&self.oc_cmd).args(args).output().await?;
        Ok(output)
    }

    fn check(&self, args: &[String], output: std::process::Output) -> Result<String> {
        if !output.status.success() {
            return Err(DeployError::CommandFailed {
                command: format!("{} {}", self.oc_cmd, args.join(" ")),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_checked(&self, args: &[String]) -> Result<String> {
        let output = self.output(args).await?;
        self.check(args, output)
    }

    /// Run with the given string piped to the child's stdin.
    async fn run_with_stdin(&self, args: &[String], input: &str) -> Result<String> {
        debug!("running: {} {} (with stdin)", self.oc_cmd, args.join(" "));
        let mut child = Command::new(&self.oc_cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        self.check(args, output)
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[async_trait::async_trait]
impl ClusterCli for OcCli {
    async fn current_context(&self) -> Result<String> {
        let output = self.run_checked(&argv(&["config", "current-context"])).await?;
        Ok(output.trim().to_string())
    }

    async fn login_config(&self) -> Result<LoginConfig> {
        let output = self
            .run_checked(&argv(&["config", "view", "-o", "json"]))
            .await?;
        let config = serde_json::from_str(&output)?;
        Ok(config)
    }

    async fn process_template(
        &self,
        template: &Path,
        params: &[(String, String)],
    ) -> Result<Value> {
        let mut args = argv(&["process", "--filename"]);
        args.push(template.display().to_string());
        for (key, value) in params {
            args.push("--param".to_string());
            args.push(format!("{key}={value}"));
        }
        let output = self.run_checked(&args).await?;
        let value = serde_json::from_str(&output)?;
        Ok(value)
    }

    async fn resource_exists(&self, kind: &str, name: &str) -> Result<bool> {
        let output = self.output(&argv(&["get", kind, name])).await?;
        Ok(output.status.success())
    }

    async fn create_resource(&self, resource: &Resource) -> Result<String> {
        self.run_with_stdin(&argv(&["create", "--filename", "-"]), &resource.to_json()?)
            .await
    }

    async fn replace_resource(&self, resource: &Resource) -> Result<String> {
        self.run_with_stdin(&argv(&["replace", "--filename", "-"]), &resource.to_json()?)
            .await
    }

    async fn delete_resource(&self, resource: &Resource) -> Result<String> {
        self.run_with_stdin(&argv(&["delete", "--filename", "-"]), &resource.to_json()?)
            .await
    }

    async fn start_build(&self, name: &str) -> Result<String> {
        self.run_checked(&argv(&["start-build", name])).await
    }
}
