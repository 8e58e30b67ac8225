use pnet::{
    datalink::{interfaces, NetworkInterface},
    ipnetwork::IpNetwork,
};

use crate::{error::ScanError, range::NetworkRange};

const NAME_PREFIXES: [&str; 2] = ["en", "eth"];

fn ipv4_range(iface: &NetworkInterface) -> Option<Result<NetworkRange, ScanError>> {
    iface.ips.iter().find_map(|ip| match ip {
        IpNetwork::V4(net) => Some(NetworkRange::with_netmask(net.ip(), net.mask())),
        IpNetwork::V6(_) => None,
    })
}

/// Picks the interface to scan from and returns its IPv4 network.
///
/// An explicit `name` must match an existing interface. Otherwise the first
/// `en*`/`eth*` interface that carries an IPv4 address is used.
pub fn select(ifaces: &[NetworkInterface], name: Option<&str>) -> Result<NetworkRange, ScanError> {
    let (iface, range) = match name {
        Some(name) => {
            let iface = ifaces
                .iter()
                .find(|i| i.name == name)
                .ok_or_else(|| ScanError::InterfaceNotFound(name.into()))?;
            let range = ipv4_range(iface)
                .ok_or_else(|| ScanError::OnlyIpv4InterfaceSupported(name.into()))?;

            (iface, range)
        }
        None => ifaces
            .iter()
            .filter(|i| NAME_PREFIXES.iter().any(|p| i.name.starts_with(p)))
            .find_map(|i| ipv4_range(i).map(|r| (i, r)))
            .ok_or(ScanError::MissingInterface)?,
    };
    let range = range?;

    log::debug!("Using network interface `{}` with range `{}`", iface.name, range);

    Ok(range)
}

/// Resolves the network range from the host's interfaces.
pub fn local_range(name: Option<&str>) -> Result<NetworkRange, ScanError> {
    select(&interfaces(), name)
}
