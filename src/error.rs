use std::net::Ipv4Addr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no network interface named `en*` or `eth*` with an IPv4 address was found")]
    MissingInterface,
    #[error("network interface `{0}` doesn't exist")]
    InterfaceNotFound(String),
    #[error("make sure the network interface `{0}` has an IPv4")]
    OnlyIpv4InterfaceSupported(String),
    #[error("prefix length `{0}` is invalid (must be between 0 and 32)")]
    InvalidPrefix(u8),
    #[error("netmask `{0}` isn't contiguous")]
    InvalidNetmask(Ipv4Addr),
    #[error("failed to build the worker pool")]
    ThreadPoolFailed(#[source] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use rayon::ThreadPoolBuilder;

    use super::*;

    #[test]
    fn pool_failure_keeps_cause_out_of_message() {
        // A second global pool can't be built.
        let _ = ThreadPoolBuilder::new().build_global();
        let cause = ThreadPoolBuilder::new().build_global().unwrap_err();
        let cause_msg = cause.to_string();

        let error = ScanError::ThreadPoolFailed(cause);

        assert_eq!(error.to_string(), "failed to build the worker pool");
        assert_eq!(error.source().map(|e| e.to_string()), Some(cause_msg));
    }

    #[test]
    fn interface_messages() {
        assert_eq!(
            ScanError::InterfaceNotFound("nope".into()).to_string(),
            "network interface `nope` doesn't exist"
        );
    }
}
