use colored::*;

use crate::terminal::print;
use reachr_common::config::Config;
use reachr_common::probe::target;
use reachr_core::prober;

pub fn info(_cfg: &Config) -> anyhow::Result<()> {
    let local_host: String = target::local_host_name()?;
    print::aligned_line("Host", local_host.normal());

    let icmp: ColoredString = if is_root::is_root() {
        "available (raw ICMP echo)".green()
    } else {
        "unavailable without root, TCP handshake fallback".yellow()
    };
    print::aligned_line("ICMP", icmp);

    print::aligned_line(
        "Limit",
        format!("{} checks in flight", prober::DEFAULT_CONCURRENCY_LIMIT).normal(),
    );
    print::aligned_line(
        "Deadline",
        format!("{} ms per check", prober::DEFAULT_CHECK_TIMEOUT.as_millis()).normal(),
    );
    Ok(())
}
