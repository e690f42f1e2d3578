//! Director Connection Model
//!
//! Identifies the director a console session should talk to.

use std::fmt;
use zeroize::Zeroizing;

/// Name, address, port and password of a director instance
///
/// The password lives in a zeroizing buffer and never shows up in `Debug`
/// output.
#[derive(Clone)]
pub struct ConnectionSpec {
    name: String,
    address: String,
    port: u16,
    password: Zeroizing<String>,
}

impl ConnectionSpec {
    /// Build a connection description
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        port: u16,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port,
            password: Zeroizing::new(password.into()),
        }
    }

    /// Director name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Director host name or IP address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Director port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Director password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSpec")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl PartialEq for ConnectionSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.address == other.address
            && self.port == other.port
            && *self.password == *other.password
    }
}

impl Eq for ConnectionSpec {}
