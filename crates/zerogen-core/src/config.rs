use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Generator configuration supplied by the caller.
///
/// Tables absent from [`Config::tables`] are excluded from the output, as
/// are tables mapped to `false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the ORM schema document, resolved relative to the config
    /// file's directory.
    pub schema: PathBuf,

    /// Version stamped into the generated schema.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Per-table inclusion map.
    pub tables: IndexMap<String, TableSelection>,

    /// Many-to-many overrides: source table → relation name → junction.
    #[serde(default)]
    pub many_to_many: IndexMap<String, IndexMap<String, JunctionConfig>>,
}

/// Per-table selection: all columns, none, or an explicit allow-list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TableSelection {
    All(bool),
    Columns(IndexMap<String, bool>),
}

/// How a many-to-many relation finds its junction.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JunctionConfig {
    /// Name a junction table; the two hops are derived from its foreign
    /// keys.
    Junction(String),

    /// Spell out the two-hop chain explicitly.
    Chain(Vec<JunctionHop>),
}

/// One hop of an explicit many-to-many chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JunctionHop {
    pub source_field: String,
    pub dest_table: String,
    pub dest_field: String,
}

fn default_version() -> u32 {
    1
}

impl Config {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            crate::err!("failed to read config file at {}: {err}", path.display())
        })?;
        contents.parse()
    }

    /// The schema document path, resolved against the config file location.
    pub fn schema_path(&self, config_path: &Path) -> PathBuf {
        if self.schema.is_absolute() {
            self.schema.clone()
        } else {
            match config_path.parent() {
                Some(dir) => dir.join(&self.schema),
                None => self.schema.clone(),
            }
        }
    }

    /// The selection entry for a table, if the table is selected at all.
    pub fn selection(&self, table: &str) -> Option<&TableSelection> {
        self.tables
            .get(table)
            .filter(|selection| selection.is_selected())
    }

    pub fn is_table_selected(&self, table: &str) -> bool {
        self.selection(table).is_some()
    }

    /// The many-to-many override for a relation, if one is configured.
    pub fn junction_config(&self, table: &str, relation: &str) -> Option<&JunctionConfig> {
        self.many_to_many.get(table)?.get(relation)
    }
}

impl TableSelection {
    /// True unless the table is mapped to `false`.
    pub fn is_selected(&self) -> bool {
        match self {
            Self::All(selected) => *selected,
            Self::Columns(_) => true,
        }
    }

    /// True if the selection includes the named column.
    pub fn selects_column(&self, column: &str) -> bool {
        match self {
            Self::All(selected) => *selected,
            Self::Columns(columns) => columns.get(column).copied().unwrap_or(false),
        }
    }

    /// Column names the allow-list mentions with `true`, if this is an
    /// allow-list selection.
    pub fn allow_list(&self) -> Option<impl Iterator<Item = &str>> {
        match self {
            Self::All(_) => None,
            Self::Columns(columns) => Some(
                columns
                    .iter()
                    .filter(|(_, selected)| **selected)
                    .map(|(name, _)| name.as_str()),
            ),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config: Config = r#"
            schema = "schema.toml"

            [tables]
            user = true
        "#
        .parse()
        .unwrap();

        assert_eq!(config.version, 1);
        assert!(config.is_table_selected("user"));
        assert!(!config.is_table_selected("group"));
    }

    #[test]
    fn table_mapped_to_false_is_excluded() {
        let config: Config = r#"
            schema = "schema.toml"

            [tables]
            user = true
            secrets = false
        "#
        .parse()
        .unwrap();

        assert!(!config.is_table_selected("secrets"));
    }

    #[test]
    fn column_allow_list() {
        let config: Config = r#"
            schema = "schema.toml"

            [tables.user]
            id = true
            name = true
            password = false
        "#
        .parse()
        .unwrap();

        let selection = config.selection("user").unwrap();
        assert!(selection.selects_column("id"));
        assert!(!selection.selects_column("password"));
        assert!(!selection.selects_column("unlisted"));

        let allowed: Vec<_> = selection.allow_list().unwrap().collect();
        assert_eq!(allowed, ["id", "name"]);
    }

    #[test]
    fn junction_config_forms() {
        let config: Config = r#"
            schema = "schema.toml"

            [tables]
            user = true
            group = true
            users_to_group = true

            [many_to_many.user]
            groups = "users_to_group"
            teams = [
                { source_field = "id", dest_table = "users_to_team", dest_field = "user_id" },
                { source_field = "team_id", dest_table = "team", dest_field = "id" },
            ]
        "#
        .parse()
        .unwrap();

        match config.junction_config("user", "groups").unwrap() {
            JunctionConfig::Junction(name) => assert_eq!(name, "users_to_group"),
            other => panic!("expected junction name, got {other:?}"),
        }
        match config.junction_config("user", "teams").unwrap() {
            JunctionConfig::Chain(hops) => assert_eq!(hops.len(), 2),
            other => panic!("expected chain, got {other:?}"),
        }
        assert!(config.junction_config("user", "missing").is_none());
    }

    #[test]
    fn schema_path_resolves_relative_to_config() {
        let config: Config = r#"
            schema = "db/schema.toml"

            [tables]
            user = true
        "#
        .parse()
        .unwrap();

        let resolved = config.schema_path(Path::new("/srv/app/zerogen.config.toml"));
        assert_eq!(resolved, Path::new("/srv/app/db/schema.toml"));
    }
}
