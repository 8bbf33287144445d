use serde::Deserialize;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;

pub const DEFAULT_HTTP_PORT: u16 = 7503;
pub const DEFAULT_SERVICE: &str = "filewatcher";

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_bind_address")]
    pub bind_address: IpAddr,

    #[serde(default = "HttpConfig::default_port")]
    pub port: u16,

    /// Service targeted when a request doesn't name one
    #[serde(default = "HttpConfig::default_service")]
    pub default_service: String,
}

impl HttpConfig {
    fn default_bind_address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_service() -> String {
        DEFAULT_SERVICE.to_string()
    }

    pub fn with_ip_address(self, bind_address: IpAddr) -> Self {
        Self {
            bind_address,
            ..self
        }
    }

    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            port: Self::default_port(),
            default_service: Self::default_service(),
        }
    }
}
