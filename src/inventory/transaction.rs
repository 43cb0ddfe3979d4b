use jiff::Timestamp;
use serde::Serialize;

/// Where an upgrade candidate comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UpgradeSource {
    Repository(String),
    LocalFile(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageUpgrade {
    pub name: String,
    pub arch: String,
    pub from: String,
    pub to: String,
    pub source: UpgradeSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamUpgrade {
    pub name: String,
    pub stream: String,
    pub from: String,
    pub to: String,
}

/// Pending changes marked during one upgrade run.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub created_at: String,
    pub security_filter: Option<String>,
    pub upgrade_all: bool,
    pub packages: Vec<PackageUpgrade>,
    pub modules: Vec<StreamUpgrade>,
    pub groups: Vec<String>,
    pub unresolved_files: Vec<String>,
    pub unresolved_groups: Vec<String>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            created_at: Timestamp::now().to_string(),
            security_filter: None,
            upgrade_all: false,
            packages: Vec::new(),
            modules: Vec::new(),
            groups: Vec::new(),
            unresolved_files: Vec::new(),
            unresolved_groups: Vec::new(),
        }
    }

    /// Record a package upgrade. A later marking for the same `name.arch` wins.
    pub fn mark_package(&mut self, upgrade: PackageUpgrade) {
        match self
            .packages
            .iter_mut()
            .find(|p| p.name == upgrade.name && p.arch == upgrade.arch)
        {
            Some(existing) => *existing = upgrade,
            None => self.packages.push(upgrade),
        }
    }

    pub fn mark_stream(&mut self, upgrade: StreamUpgrade) {
        match self
            .modules
            .iter_mut()
            .find(|m| m.name == upgrade.name && m.stream == upgrade.stream)
        {
            Some(existing) => *existing = upgrade,
            None => self.modules.push(upgrade),
        }
    }

    pub fn mark_group(&mut self, id: &str) {
        if !self.groups.iter().any(|g| g == id) {
            self.groups.push(id.to_string());
        }
    }

    /// True when nothing is scheduled to change.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.modules.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.packages.len() + self.modules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upgrade(name: &str, to: &str) -> PackageUpgrade {
        PackageUpgrade {
            name: name.to_string(),
            arch: "x86_64".to_string(),
            from: "1.0-1".to_string(),
            to: to.to_string(),
            source: UpgradeSource::Repository("updates".to_string()),
        }
    }

    #[test]
    fn later_marking_replaces_earlier() {
        let mut transaction = Transaction::new();
        transaction.mark_package(upgrade("bash", "1.1-1"));
        transaction.mark_package(upgrade("bash", "1.2-1"));
        transaction.mark_package(upgrade("curl", "2.0-1"));

        assert_eq!(transaction.packages.len(), 2);
        assert_eq!(transaction.packages[0].to, "1.2-1");
        assert_eq!(transaction.total_changes(), 2);
    }

    #[test]
    fn groups_alone_do_not_make_a_change() {
        let mut transaction = Transaction::new();
        transaction.mark_group("core");
        transaction.mark_group("core");
        assert_eq!(transaction.groups, vec!["core".to_string()]);
        assert!(transaction.is_empty());
    }

    #[test]
    fn serializes_source_with_kind_tag() {
        let mut transaction = Transaction::new();
        transaction.mark_package(upgrade("bash", "1.1-1"));
        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["packages"][0]["source"]["kind"], "repository");
        assert_eq!(json["packages"][0]["source"]["value"], "updates");
    }
}
