use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;

use crate::directory::HostsFileDirectory;
use crate::input;
use crate::terminal::{print, spinner};
use reachr_common::config::Config;
use reachr_common::probe::target::TargetList;
use reachr_common::{info, success};
use reachr_core::check::{self, CheckProbe, tcp::TcpConnectProbe};
use reachr_core::directory::{self, HostDirectory};
use reachr_core::prober::{self, ProbeOptions, StopSignal};

pub async fn probe(
    targets: Option<TargetList>,
    limit: usize,
    timeout_ms: u64,
    force_tcp: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let targets: TargetList = match targets {
        Some(targets) => targets,
        None => default_targets()?,
    };

    let check_timeout: Duration = Duration::from_millis(timeout_ms);
    let probe: Arc<dyn CheckProbe> = if force_tcp {
        Arc::new(TcpConnectProbe::new())
    } else {
        check::default_probe(check_timeout)
    };
    let opts = ProbeOptions {
        concurrency_limit: limit,
        check_timeout,
    };

    let stop = StopSignal::new();
    let input_guard = input::listen_for_stop(stop.clone());
    let spinner_handle = spinner::start(targets.len());

    let start_time: Instant = Instant::now();
    let result = prober::probe_hosts(targets.clone(), &opts, probe, &stop).await;
    spinner_handle.finish_and_clear();
    drop(input_guard);

    let reachable: Vec<String> = result?;
    probing_ends(targets.len(), &reachable, start_time.elapsed(), cfg);
    Ok(())
}

/// Asks the host directory for everything when the caller gave no targets.
fn default_targets() -> anyhow::Result<TargetList> {
    let records = HostsFileDirectory::system().lookup("*")?;
    let names: Vec<String> = directory::names(records);
    if names.is_empty() {
        anyhow::bail!("host directory yielded no targets; pass them explicitly");
    }
    info!("{} target(s) taken from the host directory", names.len());
    Ok(TargetList::from_names(names))
}

fn probing_ends(probed: usize, reachable: &[String], total_time: Duration, cfg: &Config) {
    if reachable.is_empty() {
        print::header("ZERO HOSTS ANSWERED", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("Reachable Hosts", cfg.quiet);
    for (idx, host) in reachable.iter().enumerate() {
        print::tree_line(idx, host, idx + 1 == reachable.len());
    }
    print_summary(probed, reachable.len(), total_time, cfg);
}

fn print_summary(probed: usize, reachable_len: usize, total_time: Duration, cfg: &Config) {
    let counts: ColoredString = format!("{reachable_len} of {probed} hosts").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&format!("Probe Complete: {counts} answered in {elapsed}"));
        }
        _ => success!("{counts} answered in {elapsed}"),
    }
}
