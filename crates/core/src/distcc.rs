//! Parallel job estimation from local CPUs and the distcc cluster
//!
//! Only the linux strategy drives compiles directly, so this is the only
//! place the job count heuristic lives. Host discovery is best-effort: a
//! malformed host entry contributes capacity 1 instead of aborting.

use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::Jobs;
use crate::error::CoreError;

const DEFAULT_DISTCC_DIR: &str = "/etc/distcc";
const DEFAULT_CPUINFO: &str = "/proc/cpuinfo";

/// Computes how many concurrent compile jobs to request.
///
/// The inputs (CPU topology file, distcc config directory, `DISTCC_HOSTS`
/// value) are held explicitly so tests can point them at fixtures;
/// [`ParallelismEstimator::from_env`] wires up the real ones.
#[derive(Debug, Clone)]
pub struct ParallelismEstimator {
    cpuinfo: PathBuf,
    distcc_dir: PathBuf,
    hosts_env: Option<String>,
}

impl ParallelismEstimator {
    /// Estimator reading `/proc/cpuinfo`, `$DISTCC_DIR` (default
    /// `/etc/distcc`) and `$DISTCC_HOSTS`
    pub fn from_env() -> Self {
        Self {
            cpuinfo: PathBuf::from(DEFAULT_CPUINFO),
            distcc_dir: env::var_os("DISTCC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DISTCC_DIR)),
            hosts_env: env::var("DISTCC_HOSTS").ok().filter(|v| !v.trim().is_empty()),
        }
    }

    /// Estimator with explicit sources, for tests and unusual setups
    pub fn with_sources(
        cpuinfo: PathBuf,
        distcc_dir: PathBuf,
        hosts_env: Option<String>,
    ) -> Self {
        Self {
            cpuinfo,
            distcc_dir,
            hosts_env,
        }
    }

    /// Resolve the job count.
    ///
    /// An explicit count is used verbatim. Otherwise, without distcc the
    /// count is the local CPU count; with distcc it is the summed declared
    /// capacity of the cluster, oversubscribed by 50% to keep the workers
    /// saturated through I/O and mutex waits: `floor(cpus * 3 / 2)`.
    pub fn estimate(&self, jobs: Jobs, distcc: bool) -> Result<u32, CoreError> {
        if let Jobs::Count(n) = jobs {
            return Ok(n);
        }
        let local = self.local_cpu_count()?;
        if !distcc {
            debug!(jobs = local, "job count from local CPUs");
            return Ok(local);
        }
        let hosts = self.distcc_hosts(local);
        let cpus: u32 = hosts.iter().map(|h| host_capacity(h)).sum();
        let jobs = cpus * 3 / 2;
        debug!(hosts = hosts.len(), cpus, jobs, "job count from distcc cluster");
        Ok(jobs)
    }

    /// Count logical processors: lines matching `processor<ws>:` in the
    /// CPU topology file
    pub fn local_cpu_count(&self) -> Result<u32, CoreError> {
        let listing = fs::read_to_string(&self.cpuinfo)?;
        Ok(listing.lines().filter(|l| is_processor_line(l)).count() as u32)
    }

    /// Enumerate distcc host specs, in order of preference: the hosts
    /// file, the `DISTCC_HOSTS` environment list, then a synthetic
    /// localhost entry declaring the local CPU count.
    fn distcc_hosts(&self, local_cpus: u32) -> Vec<String> {
        if let Ok(contents) = fs::read_to_string(self.distcc_dir.join("hosts")) {
            let hosts: Vec<String> = contents
                .lines()
                .filter_map(|line| {
                    let spec = line.split('#').next().unwrap_or("").trim();
                    (!spec.is_empty()).then(|| spec.to_string())
                })
                .collect();
            if !hosts.is_empty() {
                return hosts;
            }
        }
        if let Some(env_hosts) = &self.hosts_env {
            let hosts: Vec<String> = env_hosts.split_whitespace().map(str::to_string).collect();
            if !hosts.is_empty() {
                return hosts;
            }
        }
        vec![format!("localhost/{local_cpus}")]
    }
}

fn is_processor_line(line: &str) -> bool {
    line.strip_prefix("processor")
        .is_some_and(|rest| rest.trim_start().starts_with(':'))
}

/// Declared capacity of one host spec: the trailing `/<integer>` suffix,
/// defaulting to 1 when absent or unparsable
fn host_capacity(spec: &str) -> u32 {
    spec.rsplit_once('/')
        .and_then(|(_, n)| n.parse::<u32>().ok())
        .unwrap_or(1)
}
