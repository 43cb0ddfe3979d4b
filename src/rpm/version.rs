use std::cmp::Ordering;
use std::fmt;

/// Epoch, version and release of a package.
///
/// Equality follows rpmvercmp, so `1.001` and `1.1` are the same version.
#[derive(Debug, Clone)]
pub struct Evr {
    pub epoch: u32,
    pub version: String,
    pub release: String,
}

impl Evr {
    pub fn new(epoch: u32, version: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            epoch,
            version: version.into(),
            release: release.into(),
        }
    }

    /// Parse `[epoch:]version[-release]`.
    pub fn parse(evr: &str) -> Self {
        let (epoch, rest) = match evr.split_once(':') {
            Some((epoch, rest)) if !epoch.is_empty() && epoch.bytes().all(|b| b.is_ascii_digit()) => {
                (epoch.parse::<u32>().unwrap_or(0), rest)
            }
            _ => (0, evr),
        };

        match rest.rsplit_once('-') {
            Some((version, release)) => Self::new(epoch, version, release),
            None => Self::new(epoch, rest, ""),
        }
    }
}

impl fmt::Display for Evr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}:", self.epoch)?;
        }
        f.write_str(&self.version)?;
        if !self.release.is_empty() {
            write!(f, "-{}", self.release)?;
        }
        Ok(())
    }
}

impl PartialEq for Evr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Evr {}

impl PartialOrd for Evr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Evr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| VersionComparator::compare(&self.version, &other.version))
            .then_with(|| VersionComparator::compare(&self.release, &other.release))
    }
}

pub struct VersionComparator;

impl VersionComparator {
    /// Segment-wise comparison of two version (or release) strings.
    ///
    /// Numeric segments compare numerically and beat alphabetic ones, `~`
    /// sorts before anything (including the end of the string) and `^` sorts
    /// after the end of the string but before any further segment.
    pub fn compare(a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let mut one = a.as_bytes();
        let mut two = b.as_bytes();

        while !one.is_empty() || !two.is_empty() {
            one = Self::skip_separators(one);
            two = Self::skip_separators(two);

            let (h1, h2) = (one.first().copied(), two.first().copied());

            if h1 == Some(b'~') || h2 == Some(b'~') {
                if h1 != Some(b'~') {
                    return Ordering::Greater;
                }
                if h2 != Some(b'~') {
                    return Ordering::Less;
                }
                one = &one[1..];
                two = &two[1..];
                continue;
            }

            if h1 == Some(b'^') || h2 == Some(b'^') {
                if one.is_empty() {
                    return Ordering::Less;
                }
                if two.is_empty() {
                    return Ordering::Greater;
                }
                if h1 != Some(b'^') {
                    return Ordering::Greater;
                }
                if h2 != Some(b'^') {
                    return Ordering::Less;
                }
                one = &one[1..];
                two = &two[1..];
                continue;
            }

            if one.is_empty() || two.is_empty() {
                break;
            }

            let numeric = one[0].is_ascii_digit();
            let (seg1, rest1) = Self::take_segment(one, numeric);
            let (seg2, rest2) = Self::take_segment(two, numeric);

            // segments of different kinds: numeric wins
            if seg2.is_empty() {
                return if numeric {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }

            let ordering = if numeric {
                let seg1 = Self::trim_zeros(seg1);
                let seg2 = Self::trim_zeros(seg2);
                seg1.len().cmp(&seg2.len()).then_with(|| seg1.cmp(seg2))
            } else {
                seg1.cmp(seg2)
            };

            if ordering != Ordering::Equal {
                return ordering;
            }

            one = rest1;
            two = rest2;
        }

        match (one.is_empty(), two.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            _ => Ordering::Greater,
        }
    }

    /// Check if version `a` is newer than version `b`
    pub fn is_newer(a: &Evr, b: &Evr) -> bool {
        a > b
    }

    fn skip_separators(s: &[u8]) -> &[u8] {
        let start = s
            .iter()
            .position(|&c| c.is_ascii_alphanumeric() || c == b'~' || c == b'^')
            .unwrap_or(s.len());
        &s[start..]
    }

    fn take_segment(s: &[u8], numeric: bool) -> (&[u8], &[u8]) {
        let end = s
            .iter()
            .position(|c| {
                if numeric {
                    !c.is_ascii_digit()
                } else {
                    !c.is_ascii_alphabetic()
                }
            })
            .unwrap_or(s.len());
        s.split_at(end)
    }

    fn trim_zeros(s: &[u8]) -> &[u8] {
        let start = s.iter().position(|&c| c != b'0').unwrap_or(s.len());
        &s[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segments() {
        assert_eq!(VersionComparator::compare("1.0", "1.0.1"), Ordering::Less);
        assert_eq!(VersionComparator::compare("2.10", "2.9"), Ordering::Greater);
        assert_eq!(VersionComparator::compare("1.001", "1.1"), Ordering::Equal);
    }

    #[test]
    fn test_alpha_segments() {
        assert_eq!(VersionComparator::compare("1.0a", "1.0"), Ordering::Greater);
        assert_eq!(VersionComparator::compare("1.a", "1.1"), Ordering::Less);
        assert_eq!(VersionComparator::compare("fc38", "fc39"), Ordering::Less);
    }

    #[test]
    fn test_tilde_and_caret() {
        assert_eq!(VersionComparator::compare("1.0~rc1", "1.0"), Ordering::Less);
        assert_eq!(VersionComparator::compare("1.0~rc1", "1.0~rc2"), Ordering::Less);
        assert_eq!(VersionComparator::compare("1.0^git1", "1.0"), Ordering::Greater);
        assert_eq!(VersionComparator::compare("1.0^git1", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn test_evr_ordering() {
        let old = Evr::parse("5.2.15-1.fc39");
        let new = Evr::parse("5.2.21-1.fc39");
        assert!(VersionComparator::is_newer(&new, &old));

        let epoch = Evr::parse("1:1.0-1");
        assert!(epoch > new);
        assert_eq!(epoch.epoch, 1);
        assert_eq!(epoch.to_string(), "1:1.0-1");
    }

    #[test]
    fn test_evr_equality_matches_ordering() {
        let padded = Evr::parse("5.02.021-1.fc39");
        let plain = Evr::parse("5.2.21-1.fc39");
        assert_eq!(padded.cmp(&plain), Ordering::Equal);
        assert_eq!(padded, plain);
        assert_ne!(Evr::parse("5.2.21-1.fc39"), Evr::parse("5.2.21-2.fc39"));
    }

    #[test]
    fn test_evr_parse_without_release() {
        let evr = Evr::parse("2.4");
        assert_eq!(evr.version, "2.4");
        assert!(evr.release.is_empty());
        assert_eq!(evr.to_string(), "2.4");
    }
}
