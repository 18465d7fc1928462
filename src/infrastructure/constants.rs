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

/// Official pipeline location. Mutating these resources without --official
/// is refused.
pub const OFFICIAL_SERVER_URL: &str = "https://api.ocp.fedoraproject.org:6443";
pub const OFFICIAL_NAMESPACE: &str = "fedora-coreos-pipeline";

/// Template definitions, processed in this order
pub const MANIFESTS_DIR: &str = "manifests";
pub const TEMPLATES: &[&str] = &["jenkins-s2i.yaml", "pipeline.yaml"];

/// Annotation marking a resource as part of the default (non --all) set
pub const DEPLOY_DEFAULT_ANNOTATION: &str = "coreos.com/deploy-default";

/// Kinds that are never replaced in place once created
pub const NON_UPDATABLE_KINDS: &[&str] = &["PersistentVolumeClaim"];

/// Developer prefix settings
pub const PREFIX_SEPARATOR: char = '-';

/// BuildConfig started by --start
pub const PIPELINE_BUILDCONFIG: &str = "fedora-coreos-pipeline";

/// Cluster CLI defaults
pub const DEFAULT_OC_CMD: &str = "oc";
pub const DEFAULT_GIT_CMD: &str = "git";
