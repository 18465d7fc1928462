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

use fcos_deploy::domain::config::{DeployAction, DeployConfig};
use fcos_deploy::domain::pipeline::PipelineDescriptor;
use std::io::Write;
use std::path::PathBuf;

mod test_utils;

use test_utils::{FakeCluster, FakeGit};

fn test_config() -> DeployConfig {
    DeployConfig {
        action: DeployAction::Update,
        official: false,
        all: false,
        dry_run: false,
        prefix: "alice-".to_string(),
        start: false,
        pipeline: None,
        config_repo: None,
        bucket: None,
        gcp_gs_bucket: None,
        cosa_img: None,
        pvc_size: None,
        oc_cmd: "oc".to_string(),
        manifests_dir: PathBuf::from("manifests"),
    }
}

fn descriptor_with_git(
    config: DeployConfig,
    cluster: FakeCluster,
    git: FakeGit,
) -> PipelineDescriptor {
    PipelineDescriptor::with_clients(config, Box::new(cluster), Box::new(git))
}

#[tokio::test]
async fn test_pipeline_refspec_without_ref_resolves_default_branch() {
    let mut config = test_config();
    config.pipeline = Some("https://example/repo".to_string());

    let git = FakeGit::new("main");
    let queries = git.queries_handle();
    let descriptor = descriptor_with_git(config, FakeCluster::new(), git);

    let params = descriptor.resolve_parameters().await.unwrap();

    assert_eq!(params["DEVELOPER_PREFIX"], "alice-");
    assert_eq!(params["JENKINS_S2I_URL"], "https://example/repo");
    assert_eq!(params["JENKINS_S2I_REF"], "main");
    assert_eq!(params["JENKINS_JOBS_URL"], "https://example/repo");
    assert_eq!(params["JENKINS_JOBS_REF"], "main");
    assert_eq!(params.len(), 5);

    // The default branch was resolved with a single remote query
    assert_eq!(*queries.lock().unwrap(), vec!["https://example/repo"]);
}

#[tokio::test]
async fn test_explicit_ref_needs_no_remote_query() {
    let mut config = test_config();
    config.pipeline = Some("https://example/repo@rawhide".to_string());

    let git = FakeGit::new("main");
    let queries = git.queries_handle();
    let descriptor = descriptor_with_git(config, FakeCluster::new(), git);

    let params = descriptor.resolve_parameters().await.unwrap();

    assert_eq!(params["JENKINS_S2I_URL"], "https://example/repo");
    assert_eq!(params["JENKINS_S2I_REF"], "rawhide");
    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_config_refspec_parameters() {
    let mut config = test_config();
    config.config_repo = Some("https://example/fedora-coreos-config@testing-devel".to_string());

    let descriptor = descriptor_with_git(config, FakeCluster::new(), FakeGit::new("main"));
    let params = descriptor.resolve_parameters().await.unwrap();

    assert_eq!(
        params["FCOS_CONFIG_URL"],
        "https://example/fedora-coreos-config"
    );
    assert_eq!(params["FCOS_CONFIG_REF"], "testing-devel");
}

#[tokio::test]
async fn test_official_mode_omits_developer_prefix() {
    let mut config = test_config();
    config.official = true;
    config.all = true;
    config.bucket = Some("fcos-builds".to_string());

    let descriptor = descriptor_with_git(config, FakeCluster::official(), FakeGit::new("main"));
    let params = descriptor.resolve_parameters().await.unwrap();

    assert!(!params.contains_key("DEVELOPER_PREFIX"));
    assert_eq!(params["S3_BUCKET"], "fcos-builds");
}

#[tokio::test]
async fn test_override_parameters_are_passed_verbatim() {
    let mut config = test_config();
    config.bucket = Some("my-builds".to_string());
    config.gcp_gs_bucket = Some("my-uploads".to_string());
    config.cosa_img = Some("quay.io/alice/coreos-assembler:latest".to_string());
    config.pvc_size = Some("200Gi".to_string());

    let descriptor = descriptor_with_git(config, FakeCluster::new(), FakeGit::new("main"));
    let params = descriptor.resolve_parameters().await.unwrap();

    assert_eq!(params["S3_BUCKET"], "my-builds");
    assert_eq!(params["GCP_GS_BUCKET"], "my-uploads");
    assert_eq!(
        params["COREOS_ASSEMBLER_IMAGE"],
        "quay.io/alice/coreos-assembler:latest"
    );
    assert_eq!(params["PVC_SIZE"], "200Gi");
}

#[tokio::test]
async fn test_each_template_receives_only_declared_parameters() {
    let mut config = test_config();
    config.pipeline = Some("https://example/repo@main".to_string());
    config.bucket = Some("fcos-builds".to_string());
    config.pvc_size = Some("200Gi".to_string());

    let cluster = FakeCluster::new();
    let calls = cluster.calls_handle();
    let descriptor = descriptor_with_git(config, cluster, FakeGit::new("main"));

    let params = descriptor.resolve_parameters().await.unwrap();
    let resources = descriptor.process_templates(&params).await.unwrap();

    // Templates are processed in fixed order and within-template item order
    // is preserved
    assert_eq!(resources.len(), 4);
    assert_eq!(resources[0].name(), "alice-jenkins");
    assert_eq!(resources[3].name(), "alice-fedora-coreos-pipeline");

    // The S2I parameters go to jenkins-s2i.yaml only; the jobs, bucket and
    // claim-size parameters go to pipeline.yaml only
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "process jenkins-s2i.yaml [DEVELOPER_PREFIX,JENKINS_S2I_REF,JENKINS_S2I_URL]",
            "process pipeline.yaml [DEVELOPER_PREFIX,JENKINS_JOBS_REF,JENKINS_JOBS_URL,PVC_SIZE,S3_BUCKET]",
        ]
    );
}

#[tokio::test]
async fn test_undeclared_parameters_are_dropped_from_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let mut s2i = std::fs::File::create(dir.path().join("jenkins-s2i.yaml")).unwrap();
    write!(
        s2i,
        "apiVersion: template.openshift.io/v1\nkind: Template\nmetadata:\n  name: s2i\nobjects: []\n"
    )
    .unwrap();
    let mut pipeline = std::fs::File::create(dir.path().join("pipeline.yaml")).unwrap();
    write!(
        pipeline,
        "apiVersion: template.openshift.io/v1\nkind: Template\nmetadata:\n  name: pipeline\n\
         parameters:\n- name: DEVELOPER_PREFIX\n  value: \"\"\nobjects: []\n"
    )
    .unwrap();

    let mut config = test_config();
    config.bucket = Some("fcos-builds".to_string());
    config.manifests_dir = dir.path().to_path_buf();

    let cluster = FakeCluster::new();
    let calls = cluster.calls_handle();
    let descriptor = descriptor_with_git(config, cluster, FakeGit::new("main"));

    let params = descriptor.resolve_parameters().await.unwrap();
    // The bucket is still visible in the resolved set...
    assert_eq!(params["S3_BUCKET"], "fcos-builds");

    descriptor.process_templates(&params).await.unwrap();

    // ...but narrowed out of both invocations, since no template declares it
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "process jenkins-s2i.yaml []",
            "process pipeline.yaml [DEVELOPER_PREFIX]",
        ]
    );
}
