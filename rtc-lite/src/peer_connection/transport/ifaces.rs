use std::net::IpAddr;

use shared::error::Result;

/// Lists the local addresses host candidates are gathered on.
pub trait HostInterfaces: Send + Sync {
    fn host_addresses(&self) -> Result<Vec<IpAddr>>;
}

/// SystemInterfaces enumerates the IPv4 addresses of every interface that is
/// up and is not a loopback.
#[derive(Default, Debug, Copy, Clone)]
pub struct SystemInterfaces;

impl HostInterfaces for SystemInterfaces {
    #[cfg(unix)]
    fn host_addresses(&self) -> Result<Vec<IpAddr>> {
        use nix::ifaddrs::getifaddrs;
        use nix::net::if_::InterfaceFlags;
        use shared::error::Error;
        use std::net::SocketAddrV4;

        let mut addrs = vec![];
        for iface in getifaddrs().map_err(Error::from_std)? {
            if !iface.flags.contains(InterfaceFlags::IFF_UP)
                || iface.flags.contains(InterfaceFlags::IFF_LOOPBACK)
            {
                continue;
            }

            if let Some(sin) = iface.address.as_ref().and_then(|a| a.as_sockaddr_in()) {
                let ip = IpAddr::V4(*SocketAddrV4::from(*sin).ip());
                if !addrs.contains(&ip) {
                    addrs.push(ip);
                }
            }
        }

        Ok(addrs)
    }

    #[cfg(not(unix))]
    fn host_addresses(&self) -> Result<Vec<IpAddr>> {
        Err(shared::error::Error::ErrHostInterfacesNotSupported)
    }
}

/// StaticInterfaces returns a fixed address list.
#[derive(Default, Debug, Clone)]
pub struct StaticInterfaces(pub Vec<IpAddr>);

impl HostInterfaces for StaticInterfaces {
    fn host_addresses(&self) -> Result<Vec<IpAddr>> {
        Ok(self.0.clone())
    }
}
