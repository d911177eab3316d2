use std::fmt;

/// Module identity: `group:name`, independent of version.
///
/// Two nodes with the same key are the same module even when they were
/// selected at different versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
    pub group: String,
    pub name: String,
}

impl ModuleKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// Fully qualified `group:name:version` string used to key components.
pub fn component_id(group: &str, name: &str, version: &str) -> String {
    format!("{group}:{name}:{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_group_and_name() {
        let key = ModuleKey::new("com.example", "foo");
        assert_eq!(key.to_string(), "com.example:foo");
    }

    #[test]
    fn keys_compare_by_group_and_name() {
        assert_eq!(ModuleKey::new("g", "a"), ModuleKey::new("g", "a"));
        assert_ne!(ModuleKey::new("g", "a"), ModuleKey::new("h", "a"));
    }

    #[test]
    fn component_id_format() {
        assert_eq!(component_id("g", "n", "1.0"), "g:n:1.0");
    }
}
