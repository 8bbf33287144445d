use std::fmt;

/// A service known to the host service manager, identified by its unit name.
///
/// The name is not validated: the service manager reports unknown names as inactive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SystemService<'a> {
    name: &'a str,
}

impl<'a> SystemService<'a> {
    pub const fn new(name: &'a str) -> Self {
        Self { name }
    }

    pub fn as_str(&self) -> &'a str {
        self.name
    }
}

impl fmt::Display for SystemService<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
