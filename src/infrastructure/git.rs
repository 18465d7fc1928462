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

use crate::infrastructure::constants::DEFAULT_GIT_CMD;
use crate::shared::error::{DeployError, Result};
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

const HEADS_PREFIX: &str = "refs/heads/";

#[async_trait::async_trait]
pub trait GitRemote: Send + Sync {
    /// Default branch of the remote repository.
    async fn default_branch(&self, url: &str) -> Result<String>;
}

/// `GitRemote` backed by the `git` binary.
pub struct GitBinary {
    git_cmd: String,
}

impl GitBinary {
    pub fn new() -> Self {
        Self {
            git_cmd: DEFAULT_GIT_CMD.to_string(),
        }
    }
}

impl Default for GitBinary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GitRemote for GitBinary {
    async fn default_branch(&self, url: &str) -> Result<String> {
        let args = ["ls-remote", "--symref", url, "HEAD"];
        debug!("running: {} {}", self.git_cmd, args.join(" "));
        let output = Command::new(&self.git_cmd).args(args).output().await?;

        if !output.status.success() {
            return Err(DeployError::CommandFailed {
                command: format!("{} {}", self.git_cmd, args.join(" ")),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        parse_head_symref(&String::from_utf8_lossy(&output.stdout), url)
    }
}

/// Extract the default branch from `ls-remote --symref <url> HEAD` output.
///
/// The line of interest looks like `ref: refs/heads/main\tHEAD`. A remote
/// whose HEAD does not resolve to a `refs/heads/` branch is an error.
pub fn parse_head_symref(output: &str, url: &str) -> Result<String> {
    let head_line = Regex::new(r"(?m)^ref:\s+(\S+)\s+HEAD$").unwrap();

    let reference = head_line
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            DeployError::invalid_refspec(url, "remote did not report a default branch")
        })?;

    match reference.strip_prefix(HEADS_PREFIX) {
        Some(branch) if !branch.is_empty() => Ok(branch.to_string()),
        _ => Err(DeployError::invalid_refspec(
            url,
            format!("HEAD points at '{reference}', expected a {HEADS_PREFIX} reference"),
        )),
    }
}
