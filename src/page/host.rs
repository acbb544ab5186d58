//! Host name derivation
//!
//! The page is served under `{group_name}.{domain}`; both halves come from
//! the request host and nothing else.

/// Split a host into `(group_name, domain)` on the first `.`.
///
/// A host without any `.` keeps the whole host as the group name and yields
/// an empty domain, which makes the fragment URL unusable and the fetch fail.
pub fn split_host(host: &str) -> (&str, &str) {
    host.split_once('.').unwrap_or((host, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_subdomain() {
        assert_eq!(split_host("foo.example.org"), ("foo", "example.org"));
    }

    #[test]
    fn test_splits_on_first_dot_only() {
        assert_eq!(split_host("a.b.c"), ("a", "b.c"));
    }

    #[test]
    fn test_parts_rejoin_to_host() {
        for host in ["stops.r-forge.r-project.org", "x.y", "a..b", "g.d:8080"] {
            let (group_name, domain) = split_host(host);
            assert_eq!(format!("{group_name}.{domain}"), host);
        }
    }

    #[test]
    fn test_port_stays_with_domain() {
        assert_eq!(
            split_host("stops.127.0.0.1:8080"),
            ("stops", "127.0.0.1:8080")
        );
    }

    #[test]
    fn test_degenerate_hosts() {
        assert_eq!(split_host("localhost"), ("localhost", ""));
        assert_eq!(split_host(""), ("", ""));
        assert_eq!(split_host(".org"), ("", "org"));
        assert_eq!(split_host("trailing."), ("trailing", ""));
    }
}
