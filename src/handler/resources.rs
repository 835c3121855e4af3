//! Resource registry module
//!
//! The static dispatch table: every resource this server exposes, with the
//! verbs and filter keys mapped for it. Dispatch matches exhaustively over
//! this enum, so an unmapped (resource, verb) pair cannot slip through
//! silently; the registry is also walked and logged once at startup.

use hyper::Method;

use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Entries,
    Moods,
    Animals,
    Locations,
    Customers,
    Employees,
}

/// Every resource served, in route-table order
pub const ALL: [Resource; 6] = [
    Resource::Entries,
    Resource::Moods,
    Resource::Animals,
    Resource::Locations,
    Resource::Customers,
    Resource::Employees,
];

impl Resource {
    /// Map a parsed resource segment to a registry entry
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "entries" => Some(Self::Entries),
            "moods" => Some(Self::Moods),
            "animals" => Some(Self::Animals),
            "locations" => Some(Self::Locations),
            "customers" => Some(Self::Customers),
            "employees" => Some(Self::Employees),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Entries => "entries",
            Self::Moods => "moods",
            Self::Animals => "animals",
            Self::Locations => "locations",
            Self::Customers => "customers",
            Self::Employees => "employees",
        }
    }

    /// Verbs with a data-access operation behind them. Moods are reference
    /// data and stay read-only.
    pub const fn allowed_methods(self) -> &'static [Method] {
        const READ_ONLY: &[Method] = &[Method::GET];
        const READ_WRITE: &[Method] = &[Method::GET, Method::POST, Method::PUT, Method::DELETE];

        match self {
            Self::Moods => READ_ONLY,
            _ => READ_WRITE,
        }
    }

    /// Query-string keys accepted by the filter form of GET
    pub const fn filter_keys(self) -> &'static [&'static str] {
        match self {
            Self::Entries => &["mood_id", "q"],
            Self::Animals | Self::Employees => &["location_id"],
            Self::Customers => &["email"],
            Self::Moods | Self::Locations => &[],
        }
    }

    /// Value for the `Allow` header; OPTIONS is always answered
    pub fn allow_header(self) -> String {
        let mut verbs: Vec<&str> = self.allowed_methods().iter().map(Method::as_str).collect();
        verbs.push("OPTIONS");
        verbs.join(", ")
    }
}

/// Walk the registry once at startup: every resource must map at least one
/// verb, and each mapping is logged so gaps are visible before traffic.
pub fn log_registry() {
    for resource in ALL {
        assert!(
            !resource.allowed_methods().is_empty(),
            "resource /{} has no verbs mapped",
            resource.name()
        );
        logger::log_route_mapping(
            resource.name(),
            &resource.allow_header(),
            resource.filter_keys(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips() {
        for resource in ALL {
            assert_eq!(Resource::from_name(resource.name()), Some(resource));
        }
        assert_eq!(Resource::from_name("widgets"), None);
    }

    #[test]
    fn test_moods_are_read_only() {
        assert_eq!(Resource::Moods.allowed_methods(), &[Method::GET]);
        assert_eq!(Resource::Moods.allow_header(), "GET, OPTIONS");
    }

    #[test]
    fn test_writable_resources_map_all_verbs() {
        for verb in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            assert!(Resource::Entries.allowed_methods().contains(&verb));
        }
    }
}
