use crate::rpm::version::Evr;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NEVRA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+)-(?:(?P<epoch>\d+):)?(?P<version>[^-:]+)-(?P<release>[^-:]+)\.(?P<arch>[^.\-]+)$")
        .expect("NEVRA pattern is valid")
});

/// Name, epoch, version, release and architecture of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nevra {
    pub name: String,
    pub evr: Evr,
    pub arch: String,
}

impl Nevra {
    pub fn new(name: impl Into<String>, evr: Evr, arch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            evr,
            arch: arch.into(),
        }
    }

    /// Parse `name-[epoch:]version-release.arch`.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = NEVRA_PATTERN.captures(value.trim())?;
        let epoch = caps
            .name("epoch")
            .and_then(|e| e.as_str().parse::<u32>().ok())
            .unwrap_or(0);

        Some(Self {
            name: caps["name"].to_string(),
            evr: Evr::new(epoch, &caps["version"], &caps["release"]),
            arch: caps["arch"].to_string(),
        })
    }

    /// Parse a package file name such as `bash-5.2.21-1.fc39.x86_64.rpm`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let stem = filename.strip_suffix(".rpm")?;
        Self::parse(stem)
    }

    /// Whether a package of this arch can replace one of `installed_arch`.
    pub fn is_arch_compatible(&self, installed_arch: &str) -> bool {
        self.arch == installed_arch || self.arch == "noarch" || installed_arch == "noarch"
    }

    /// Every textual form a package spec may use to select this package.
    pub fn spec_forms(&self) -> Vec<String> {
        let Evr {
            epoch,
            version,
            release,
        } = &self.evr;
        let name = &self.name;
        let arch = &self.arch;

        vec![
            name.clone(),
            format!("{name}.{arch}"),
            format!("{name}-{version}"),
            format!("{name}-{version}-{release}"),
            format!("{name}-{version}-{release}.{arch}"),
            format!("{name}-{epoch}:{version}-{release}.{arch}"),
        ]
    }
}

impl fmt::Display for Nevra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}.{}", self.name, self.evr, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_nevra() {
        let nevra = Nevra::parse("bash-5.2.21-1.fc39.x86_64").unwrap();
        assert_eq!(nevra.name, "bash");
        assert_eq!(nevra.evr.version, "5.2.21");
        assert_eq!(nevra.evr.release, "1.fc39");
        assert_eq!(nevra.arch, "x86_64");
    }

    #[test]
    fn parses_dashed_name_and_epoch() {
        let nevra = Nevra::parse("python3-libs-1:3.12.1-2.fc39.noarch").unwrap();
        assert_eq!(nevra.name, "python3-libs");
        assert_eq!(nevra.evr.epoch, 1);
        assert_eq!(nevra.arch, "noarch");
        assert_eq!(nevra.to_string(), "python3-libs-1:3.12.1-2.fc39.noarch");
    }

    #[test]
    fn parses_package_filename() {
        let nevra = Nevra::from_filename("curl-8.2.1-3.fc39.aarch64.rpm").unwrap();
        assert_eq!(nevra.name, "curl");
        assert_eq!(nevra.arch, "aarch64");
        assert!(Nevra::from_filename("curl-8.2.1-3.fc39.aarch64.tar.gz").is_none());
        assert!(Nevra::from_filename("notes.rpm").is_none());
    }

    #[test]
    fn spec_forms_include_name_arch() {
        let nevra = Nevra::parse("bash-5.2.21-1.fc39.x86_64").unwrap();
        let forms = nevra.spec_forms();
        assert!(forms.contains(&"bash".to_string()));
        assert!(forms.contains(&"bash.x86_64".to_string()));
        assert!(forms.contains(&"bash-5.2.21-1.fc39".to_string()));
        assert!(forms.contains(&"bash-0:5.2.21-1.fc39.x86_64".to_string()));
    }

    #[test]
    fn noarch_is_compatible_with_any_arch() {
        let nevra = Nevra::parse("tzdata-2024a-1.fc39.noarch").unwrap();
        assert!(nevra.is_arch_compatible("x86_64"));
        let native = Nevra::parse("bash-5.2.21-1.fc39.x86_64").unwrap();
        assert!(!native.is_arch_compatible("aarch64"));
    }
}
