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

use crate::infrastructure::constants::PREFIX_SEPARATOR;
use crate::shared::error::{DeployError, Result};
use std::path::PathBuf;

/// The one mutating action a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    /// Create or replace pipeline resources
    Update,
    /// Delete developer-prefixed pipeline resources
    DeleteDevel,
}

/// Resolved invocation configuration. Constructed once at startup from the
/// command line and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub action: DeployAction,
    pub official: bool,
    pub all: bool,
    pub dry_run: bool,
    /// Developer prefix, separator included (e.g. `alice-`)
    pub prefix: String,
    pub start: bool,
    /// Raw `URL[@REF]` refspec for the pipeline source repository
    pub pipeline: Option<String>,
    /// Raw `URL[@REF]` refspec for the FCOS config repository
    pub config_repo: Option<String>,
    pub bucket: Option<String>,
    pub gcp_gs_bucket: Option<String>,
    pub cosa_img: Option<String>,
    pub pvc_size: Option<String>,
    pub oc_cmd: String,
    pub manifests_dir: PathBuf,
}

/// Validate a raw developer prefix and append the separator.
///
/// The prefix must be non-empty and must not already end in the separator.
pub fn resolve_prefix(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(DeployError::usage("developer prefix must not be empty"));
    }
    if raw.ends_with(PREFIX_SEPARATOR) {
        return Err(DeployError::usage(format!(
            "developer prefix must not end with '{PREFIX_SEPARATOR}'"
        )));
    }
    Ok(format!("{raw}{PREFIX_SEPARATOR}"))
}
