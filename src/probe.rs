use std::{
    fmt::{Debug, Display},
    io,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpStream},
    time::Duration,
};

const TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Smb,
    Ftp,
}

impl ServiceKind {
    /// Sweep order.
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Smb, ServiceKind::Ftp];

    pub fn port(&self) -> u16 {
        match self {
            ServiceKind::Smb => 445,
            ServiceKind::Ftp => 21,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ServiceKind::Smb => "SMB shares",
            ServiceKind::Ftp => "FTP sites",
        }
    }
}

impl Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ServiceKind::Smb => "SMB",
                ServiceKind::Ftp => "FTP",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Open,
    Closed,
    /// Attempt failed for a reason other than the target being unreachable.
    /// Reported as closed.
    Fault(String),
}

impl Outcome {
    #[inline]
    pub fn reachable(&self) -> bool {
        matches!(self, Outcome::Open)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.reachable() { "open" } else { "closed" })
    }
}

pub trait Probe: Debug + Sync {
    fn probe(&self, addr: &SocketAddrV4) -> Outcome;
}

/// Single TCP connect attempt with a fixed timeout.
#[derive(Debug)]
pub struct TcpProbe;

fn is_unreachable(e: &io::Error) -> bool {
    use io::ErrorKind::*;

    match e.kind() {
        ConnectionRefused | TimedOut | WouldBlock | ConnectionReset | ConnectionAborted => true,
        _ => matches!(
            e.raw_os_error(),
            Some(libc::EHOSTUNREACH | libc::ENETUNREACH | libc::EHOSTDOWN)
        ),
    }
}

impl Probe for TcpProbe {
    fn probe(&self, addr: &SocketAddrV4) -> Outcome {
        match TcpStream::connect_timeout(&SocketAddr::V4(*addr), TIMEOUT) {
            // Dropping the stream closes the connection.
            Ok(_) => Outcome::Open,
            Err(e) if is_unreachable(&e) => Outcome::Closed,
            Err(e) => Outcome::Fault(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub host: Ipv4Addr,
    pub service: ServiceKind,
    pub outcome: Outcome,
}

impl ProbeResult {
    pub fn new(host: Ipv4Addr, service: ServiceKind, outcome: Outcome) -> Self {
        Self {
            host,
            service,
            outcome,
        }
    }

    #[inline]
    pub fn reachable(&self) -> bool {
        self.outcome.reachable()
    }
}

impl Display for ProbeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} share is {}", self.host, self.service, self.outcome)
    }
}
