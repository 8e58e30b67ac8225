use std::{fmt::Display, net::Ipv4Addr, ops::RangeInclusive};

use crate::error::ScanError;

/// IPv4 network given by its network address and prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkRange {
    base: Ipv4Addr,
    prefix: u8,
}

#[inline]
fn mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p => u32::MAX << (32 - p),
    }
}

impl NetworkRange {
    /// Builds the range containing `addr`. Host bits of `addr` are dropped.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, ScanError> {
        if prefix > 32 {
            return Err(ScanError::InvalidPrefix(prefix));
        }

        let base = Ipv4Addr::from(u32::from(addr) & mask(prefix));

        Ok(Self { base, prefix })
    }

    pub fn with_netmask(addr: Ipv4Addr, netmask: Ipv4Addr) -> Result<Self, ScanError> {
        let raw = u32::from(netmask);
        let prefix = raw.leading_ones() as u8;
        if raw != mask(prefix) {
            return Err(ScanError::InvalidNetmask(netmask));
        }

        Self::new(addr, prefix)
    }

    #[inline]
    pub fn network(&self) -> Ipv4Addr {
        self.base
    }

    #[inline]
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    #[inline]
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !mask(self.prefix))
    }

    fn bounds(&self) -> RangeInclusive<u32> {
        let network = u32::from(self.base);
        let broadcast = u32::from(self.broadcast());

        match self.prefix {
            // Point-to-point links and single hosts have no
            // network/broadcast address to skip.
            31 | 32 => network..=broadcast,
            _ => network + 1..=broadcast - 1,
        }
    }

    /// Usable host addresses in ascending order.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        self.bounds().map(Ipv4Addr::from)
    }

    pub fn host_count(&self) -> u64 {
        let bounds = self.bounds();
        u64::from(*bounds.end()) - u64::from(*bounds.start()) + 1
    }
}

impl Display for NetworkRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_host_bits() {
        let range = NetworkRange::new(Ipv4Addr::new(192, 168, 1, 42), 24).unwrap();
        assert_eq!(range.network(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(range.broadcast(), Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(range.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn rejects_prefix_above_32() {
        assert!(matches!(
            NetworkRange::new(Ipv4Addr::new(10, 0, 0, 1), 33),
            Err(ScanError::InvalidPrefix(33))
        ));
    }

    #[test]
    fn host_count_excludes_network_and_broadcast() {
        for prefix in 16..=30u8 {
            let range = NetworkRange::new(Ipv4Addr::new(10, 1, 2, 3), prefix).unwrap();
            let expected = 2u64.pow(32 - prefix as u32) - 2;
            assert_eq!(range.host_count(), expected, "prefix /{}", prefix);
            assert_eq!(range.hosts().count() as u64, expected, "prefix /{}", prefix);
        }
    }

    #[test]
    fn host_count_of_whole_space() {
        let range = NetworkRange::new(Ipv4Addr::new(1, 2, 3, 4), 0).unwrap();
        assert_eq!(range.host_count(), (1u64 << 32) - 2);
        assert_eq!(range.hosts().next(), Some(Ipv4Addr::new(0, 0, 0, 1)));
    }

    #[test]
    fn slash_30_hosts() {
        let range = NetworkRange::new(Ipv4Addr::new(192, 168, 1, 0), 30).unwrap();
        let hosts: Vec<_> = range.hosts().collect();
        assert_eq!(
            hosts,
            vec![Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 2)]
        );
    }

    #[test]
    fn slash_31_and_32_are_degenerate() {
        let p2p = NetworkRange::new(Ipv4Addr::new(10, 0, 0, 7), 31).unwrap();
        assert_eq!(
            p2p.hosts().collect::<Vec<_>>(),
            vec![Ipv4Addr::new(10, 0, 0, 6), Ipv4Addr::new(10, 0, 0, 7)]
        );

        let single = NetworkRange::new(Ipv4Addr::new(10, 0, 0, 7), 32).unwrap();
        assert_eq!(single.host_count(), 1);
        assert_eq!(single.hosts().collect::<Vec<_>>(), vec![Ipv4Addr::new(10, 0, 0, 7)]);
    }

    #[test]
    fn parses_netmask() {
        let range = NetworkRange::with_netmask(
            Ipv4Addr::new(172, 16, 5, 10),
            Ipv4Addr::new(255, 255, 240, 0),
        )
        .unwrap();
        assert_eq!(range.to_string(), "172.16.0.0/20");

        let all = NetworkRange::with_netmask(Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::UNSPECIFIED)
            .unwrap();
        assert_eq!(all.prefix(), 0);
    }

    #[test]
    fn rejects_non_contiguous_netmask() {
        let mask = Ipv4Addr::new(255, 0, 255, 0);
        assert!(matches!(
            NetworkRange::with_netmask(Ipv4Addr::new(10, 0, 0, 1), mask),
            Err(ScanError::InvalidNetmask(m)) if m == mask
        ));
    }
}
