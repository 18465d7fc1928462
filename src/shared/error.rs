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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Refusing to update official resources; use --official to override")]
    OfficialRefused,

    #[error("Command `{command}` failed{}", describe_failure(.code, .stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Login configuration error: {0}")]
    LoginConfig(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid refspec '{refspec}': {reason}")]
    InvalidRefspec { refspec: String, reason: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

fn describe_failure(code: &Option<i32>, stderr: &str) -> String {
    let mut out = match code {
        Some(code) => format!(" with exit code {code}"),
        None => " on a signal".to_string(),
    };
    if !stderr.trim().is_empty() {
        out.push_str(": ");
        out.push_str(stderr.trim_end());
    }
    out
}

impl DeployError {
    pub fn usage(context: impl Into<String>) -> Self {
        Self::Usage(context.into())
    }

    pub fn login_config(context: impl Into<String>) -> Self {
        Self::LoginConfig(context.into())
    }

    pub fn invalid_refspec(refspec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRefspec {
            refspec: refspec.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error. The official-namespace refusal is a
    /// fixed 1; failed subprocess calls propagate the child's exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::OfficialRefused => 1,
            DeployError::CommandFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}
