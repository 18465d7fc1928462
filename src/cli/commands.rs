// CLI command definitions

use clap::{ArgGroup, Parser};

use crate::infrastructure::constants::DEFAULT_OC_CMD;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fcos-deploy",
    version,
    about = "Deploy the Fedora CoreOS build pipeline to OpenShift",
    long_about = "Templates and applies the Fedora CoreOS CI pipeline resources by wrapping \
                  the oc CLI. Developer resources are namespaced under a prefix; the shared, \
                  unprefixed resources in the production namespace require --official.",
    group = ArgGroup::new("action").required(true).multiple(false)
)]
pub struct CliArgs {
    /// Create or replace pipeline resources
    #[arg(long, group = "action")]
    pub update: bool,

    /// Delete resources carrying the developer prefix
    #[arg(long, group = "action")]
    pub delete_devel: bool,

    /// Operate on the official, unprefixed resources (implies --all)
    #[arg(long)]
    pub official: bool,

    /// Apply all resources, not just the default-tagged set
    #[arg(long)]
    pub all: bool,

    /// Print intended actions without mutating the cluster
    #[arg(long)]
    pub dry_run: bool,

    /// Developer prefix for resource names [default: $USER]
    #[arg(long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Start the pipeline build once the update completes
    #[arg(long)]
    pub start: bool,

    /// Pipeline source repository to deploy from
    #[arg(long, value_name = "URL[@REF]")]
    pub pipeline: Option<String>,

    /// FCOS config repository to build from
    #[arg(long, value_name = "URL[@REF]")]
    pub config: Option<String>,

    /// S3 bucket for build artifacts
    #[arg(long, value_name = "NAME")]
    pub bucket: Option<String>,

    /// GCP GS bucket for build artifacts
    #[arg(long, value_name = "NAME")]
    pub gcp_gs_bucket: Option<String>,

    /// coreos-assembler image pullspec override
    #[arg(long, value_name = "PULLSPEC")]
    pub cosa_img: Option<String>,

    /// Size of the coreos-assembler cache claim (e.g. "100Gi")
    #[arg(long, value_name = "SIZE")]
    pub pvc_size: Option<String>,

    /// Path to the oc binary
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OC_CMD)]
    pub oc_cmd: String,
}
