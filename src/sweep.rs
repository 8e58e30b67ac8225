use std::{
    any::Any,
    net::{Ipv4Addr, SocketAddrV4},
    panic::{self, AssertUnwindSafe},
    sync::mpsc,
    time::Instant,
};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    config::Config,
    error::ScanError,
    probe::{Outcome, Probe, ProbeResult, ServiceKind},
    range::NetworkRange,
    report::{Report, SweepReport},
};

/// Maximum number of probes in flight.
pub const WORKERS: usize = 12;

fn panic_reason(cause: Box<dyn Any + Send>) -> String {
    match cause.downcast::<String>() {
        Ok(msg) => *msg,
        Err(cause) => match cause.downcast::<&'static str>() {
            Ok(msg) => String::from(*msg),
            Err(_) => String::from("probe panicked"),
        },
    }
}

/// Probes every host of a range against one service on a bounded pool.
pub struct Sweeper {
    pool: ThreadPool,
    verbose: bool,
}

impl Sweeper {
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(WORKERS)
            .thread_name(|i| format!("probe-{}", i))
            .build()
            .map_err(ScanError::ThreadPoolFailed)?;

        Ok(Self {
            pool,
            verbose: config.verbose,
        })
    }

    fn probe_host(&self, probe: &dyn Probe, host: Ipv4Addr, service: ServiceKind) -> ProbeResult {
        let port = service.port();
        if self.verbose {
            log::info!("Scanning {}: Port {}...", host, port);
        }

        let addr = SocketAddrV4::new(host, port);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| probe.probe(&addr)))
            .unwrap_or_else(|cause| Outcome::Fault(panic_reason(cause)));

        if self.verbose {
            match outcome {
                Outcome::Fault(ref reason) => {
                    log::info!("{}: Port {} is {} ({})", host, port, outcome, reason)
                }
                _ => log::info!("{}: Port {} is {}", host, port, outcome),
            }
        }

        ProbeResult::new(host, service, outcome)
    }

    /// Blocks until every host of `range` was probed. Results come back in
    /// completion order.
    ///
    /// A panicking probe is recorded as a fault, but the default panic hook
    /// still reports it on stderr regardless of verbosity.
    pub fn sweep(&self, range: &NetworkRange, service: ServiceKind, probe: &dyn Probe) -> SweepReport {
        let hosts: Vec<Ipv4Addr> = range.hosts().collect();
        let (tx, rx) = mpsc::channel();

        let now = Instant::now();
        self.pool.scope(|s| {
            for host in hosts {
                let tx = tx.clone();
                s.spawn(move |_| {
                    // Receiver outlives the scope.
                    let _ = tx.send(self.probe_host(probe, host, service));
                });
            }
        });
        drop(tx);
        let elapsed = now.elapsed();

        let report = SweepReport::new(service, *range, elapsed, rx.into_iter().collect());

        log::debug!(
            "{} sweep of `{}` took {:.4}s: {} open out of {} hosts",
            service,
            range,
            elapsed.as_secs_f32(),
            report.open_hosts().count(),
            report.host_count()
        );
        report
            .faults()
            .for_each(|(host, reason)| log::debug!("{} sweep fault on `{}`: {}", service, host, reason));

        report
    }

    /// Sweeps every service in order, one after the other. `on_start` is
    /// called right before each service sweep begins.
    pub fn run<F>(&self, range: &NetworkRange, probe: &dyn Probe, mut on_start: F) -> Report
    where
        F: FnMut(ServiceKind),
    {
        let sweeps = ServiceKind::ALL
            .iter()
            .map(|&service| {
                on_start(service);
                self.sweep(range, service, probe)
            })
            .collect();

        Report::new(sweeps)
    }
}
