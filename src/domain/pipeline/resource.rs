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

use crate::infrastructure::constants::DEPLOY_DEFAULT_ANNOTATION;
use crate::shared::error::{DeployError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// One rendered cluster resource: the fields this tool reads, plus the full
/// payload so unknown fields round-trip untouched through create, replace
/// and delete.
#[derive(Debug, Clone)]
pub struct Resource {
    kind: String,
    name: String,
    annotations: BTreeMap<String, String>,
    payload: Value,
}

impl Resource {
    /// Build from one object of the template processor's output.
    pub fn from_object(payload: Value) -> Result<Self> {
        let kind = payload
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| DeployError::InvalidResource("object has no kind".to_string()))?
            .to_string();

        let name = payload
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DeployError::InvalidResource(format!("{kind} object has no metadata.name"))
            })?
            .to_string();

        let annotations = payload
            .pointer("/metadata/annotations")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(key, value)| {
                        value.as_str().map(|v| (key.clone(), v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            kind,
            name,
            annotations,
            payload,
        })
    }

    /// All objects of a processed template's `items` array, preserving order.
    pub fn from_processed_list(value: &Value) -> Result<Vec<Self>> {
        let items = value.get("items").and_then(Value::as_array).ok_or_else(|| {
            DeployError::InvalidResource("processed template has no items array".to_string())
        })?;

        items.iter().cloned().map(Self::from_object).collect()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// True iff the resource is tagged for the default (non `--all`) set.
    pub fn deploy_default(&self) -> bool {
        self.annotation(DEPLOY_DEFAULT_ANNOTATION) == Some("true")
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Serialized payload, as piped to the cluster CLI's stdin.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.payload)?)
    }
}
