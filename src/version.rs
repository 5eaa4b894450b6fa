use crate::response::VersionDescriptor;
use semver::Version;

/// Normalize a service version such as `"60.0"` into a comparable semantic version.
///
/// Missing minor/patch components count as zero. Anything that still doesn't parse
/// sorts below every valid version.
fn sort_key(version: &str) -> Option<Version> {
    let mut parts: Vec<&str> = version.trim().split('.').collect();

    if parts.len() > 3 {
        return None;
    }

    while parts.len() < 3 {
        parts.push("0");
    }

    Version::parse(&parts.join(".")).ok()
}

/// Pick the highest version from the discovery listing.
pub fn latest(versions: &[VersionDescriptor]) -> Option<&str> {
    versions
        .iter()
        .map(|descriptor| (sort_key(&descriptor.version), descriptor.version.as_str()))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, version)| version)
}

#[cfg(test)]
mod tests {
    use super::latest;
    use crate::response::VersionDescriptor;

    fn descriptors(versions: &[&str]) -> Vec<VersionDescriptor> {
        versions
            .iter()
            .map(|version| VersionDescriptor {
                version: version.to_string(),
                label: None,
                url: None,
            })
            .collect()
    }

    #[test]
    fn picks_highest_version() {
        assert_eq!(latest(&descriptors(&["58.0", "60.0", "59.0"])), Some("60.0"));
    }

    #[test]
    fn compares_numerically_not_lexically() {
        assert_eq!(latest(&descriptors(&["9.0", "10.0", "60.2", "60.10"])), Some("60.10"));
    }

    #[test]
    fn unparseable_versions_lose() {
        assert_eq!(latest(&descriptors(&["garbage", "31.0"])), Some("31.0"));
        assert_eq!(latest(&descriptors(&["garbage"])), Some("garbage"));
    }

    #[test]
    fn empty_listing_has_no_latest() {
        assert_eq!(latest(&[]), None);
    }
}
