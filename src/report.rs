use std::{net::Ipv4Addr, time::Duration};

use crate::{
    probe::{Outcome, ProbeResult, ServiceKind},
    range::NetworkRange,
};

/// Line announcing the range about to be swept.
pub fn banner(range: &NetworkRange) -> String {
    format!("Scanning Local Network Range: {}", range)
}

/// Header printed right before a service sweep starts.
pub fn section(service: ServiceKind) -> String {
    format!("\nScanning for open {}:", service.title())
}

/// Results of one service sweep, in completion order.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub service: ServiceKind,
    pub range: NetworkRange,
    pub elapsed: Duration,
    pub results: Vec<ProbeResult>,
}

impl SweepReport {
    pub(crate) fn new(
        service: ServiceKind,
        range: NetworkRange,
        elapsed: Duration,
        results: Vec<ProbeResult>,
    ) -> Self {
        Self {
            service,
            range,
            elapsed,
            results,
        }
    }

    /// Number of hosts probed.
    #[inline]
    pub fn host_count(&self) -> usize {
        self.results.len()
    }

    pub fn open_hosts(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.results
            .iter()
            .filter(|r| r.reachable())
            .map(|r| r.host)
    }

    pub fn faults(&self) -> impl Iterator<Item = (Ipv4Addr, &str)> + '_ {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Fault(reason) => Some((r.host, reason.as_str())),
            _ => None,
        })
    }
}

/// All sweeps of a run, in the order they ran.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub sweeps: Vec<SweepReport>,
}

impl Report {
    pub fn new(sweeps: Vec<SweepReport>) -> Self {
        Self { sweeps }
    }

    pub fn results(&self) -> impl Iterator<Item = &ProbeResult> {
        self.sweeps.iter().flat_map(|s| s.results.iter())
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.results().map(|r| r.to_string())
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Scan Results:\n");
        self.lines().for_each(|line| {
            out.push_str(&line);
            out.push('\n');
        });

        out
    }
}
