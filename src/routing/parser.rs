//! URL parser module
//!
//! Parses a raw request target (path plus optional query string) into a
//! [`RouteDescriptor`]. No I/O, no state, no knowledge of which resources
//! actually exist.

use std::fmt;

/// Structured result of parsing a request target, exactly one of two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDescriptor {
    /// Path-form route: `/resource` or `/resource/id`
    Path { resource: String, id: Option<i64> },
    /// Query-form route: `/resource?key=value`
    Query {
        resource: String,
        key: String,
        value: String,
    },
}

impl RouteDescriptor {
    pub fn resource(&self) -> &str {
        match self {
            Self::Path { resource, .. } | Self::Query { resource, .. } => resource,
        }
    }
}

/// Targets the parser refuses; the dispatcher answers these with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// More than one `&`-joined query parameter
    MultipleParameters,
    /// Query string that is not a single `key=value` pair
    MalformedQuery,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleParameters => {
                write!(f, "only a single query parameter is supported")
            }
            Self::MalformedQuery => write!(f, "query string must be a single key=value pair"),
        }
    }
}

/// Parse a request target into a route descriptor.
///
/// The segment after the leading slash is the resource name. A `?` inside it
/// switches to the query form, which must carry exactly one `key=value` pair.
/// Otherwise the next segment is tried as an integer id; a missing segment
/// (`/entries`) and a non-numeric one (`/entries/`) both mean "no id", which
/// is a valid outcome rather than an error. Segments past the id are ignored.
pub fn parse_path(target: &str) -> Result<RouteDescriptor, RouteError> {
    let mut segments = target.split('/');
    segments.next(); // leading slash produces an empty first segment
    let candidate = segments.next().unwrap_or("");

    if let Some((resource, query)) = candidate.split_once('?') {
        if query.contains('&') {
            return Err(RouteError::MultipleParameters);
        }
        let Some((key, value)) = query.split_once('=') else {
            return Err(RouteError::MalformedQuery);
        };
        if key.is_empty() {
            return Err(RouteError::MalformedQuery);
        }
        return Ok(RouteDescriptor::Query {
            resource: resource.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    let id = segments.next().and_then(|s| s.parse::<i64>().ok());
    Ok(RouteDescriptor::Path {
        resource: candidate.to_string(),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_with_id() {
        assert_eq!(
            parse_path("/entries/1"),
            Ok(RouteDescriptor::Path {
                resource: "entries".to_string(),
                id: Some(1),
            })
        );
        assert_eq!(
            parse_path("/animals/42"),
            Ok(RouteDescriptor::Path {
                resource: "animals".to_string(),
                id: Some(42),
            })
        );
    }

    #[test]
    fn test_parse_bare_resource_has_no_id() {
        assert_eq!(
            parse_path("/entries"),
            Ok(RouteDescriptor::Path {
                resource: "entries".to_string(),
                id: None,
            })
        );
    }

    #[test]
    fn test_parse_trailing_slash_has_no_id() {
        assert_eq!(
            parse_path("/entries/"),
            Ok(RouteDescriptor::Path {
                resource: "entries".to_string(),
                id: None,
            })
        );
    }

    #[test]
    fn test_parse_non_numeric_id_has_no_id() {
        assert_eq!(
            parse_path("/entries/abc"),
            Ok(RouteDescriptor::Path {
                resource: "entries".to_string(),
                id: None,
            })
        );
    }

    #[test]
    fn test_parse_extra_segments_are_ignored() {
        assert_eq!(
            parse_path("/entries/7/extra/segments"),
            Ok(RouteDescriptor::Path {
                resource: "entries".to_string(),
                id: Some(7),
            })
        );
    }

    #[test]
    fn test_parse_query_form() {
        assert_eq!(
            parse_path("/customers?email=jenna@solis.com"),
            Ok(RouteDescriptor::Query {
                resource: "customers".to_string(),
                key: "email".to_string(),
                value: "jenna@solis.com".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_query_with_empty_value() {
        assert_eq!(
            parse_path("/entries?q="),
            Ok(RouteDescriptor::Query {
                resource: "entries".to_string(),
                key: "q".to_string(),
                value: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_multiple_parameters_rejected() {
        assert_eq!(
            parse_path("/animals?location_id=1&status=treated"),
            Err(RouteError::MultipleParameters)
        );
    }

    #[test]
    fn test_parse_query_without_pair_rejected() {
        assert_eq!(parse_path("/entries?q"), Err(RouteError::MalformedQuery));
        assert_eq!(parse_path("/entries?=v"), Err(RouteError::MalformedQuery));
    }

    #[test]
    fn test_parse_unknown_resource_is_still_valid() {
        // Relevance is the dispatcher's call, not the parser's
        assert_eq!(
            parse_path("/widgets/3"),
            Ok(RouteDescriptor::Path {
                resource: "widgets".to_string(),
                id: Some(3),
            })
        );
    }

    #[test]
    fn test_parse_empty_path() {
        assert_eq!(
            parse_path("/"),
            Ok(RouteDescriptor::Path {
                resource: String::new(),
                id: None,
            })
        );
    }
}
