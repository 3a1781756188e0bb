use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use sweeper_core::{CellCount, Coord, GameConfig, GameLevel};

/// One named preset of the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub name: String,
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl LevelEntry {
    pub fn config(&self) -> anyhow::Result<GameConfig> {
        GameConfig::new(self.width, self.height, self.mines)
            .with_context(|| format!("level {:?} is not a valid board", self.name))
    }
}

/// Difficulty presets the host can pick from, the built-in levels unless a file replaces them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    #[serde(rename = "level")]
    levels: Vec<LevelEntry>,
}

impl LevelTable {
    pub fn builtin() -> Self {
        let levels = GameLevel::ALL
            .into_iter()
            .map(|level| {
                let config = level.config();
                LevelEntry {
                    name: level.description().to_owned(),
                    width: config.width,
                    height: config.height,
                    mines: config.mines,
                }
            })
            .collect();
        Self { levels }
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let table: Self = toml::from_str(text).context("malformed level table")?;
        if table.levels.is_empty() {
            bail!("level table defines no levels");
        }
        for entry in &table.levels {
            entry.config()?;
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let table = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        log::debug!("Loaded {} levels from {}", table.levels().len(), path.display());
        Ok(table)
    }

    pub fn levels(&self) -> &[LevelEntry] {
        &self.levels
    }

    /// Finds a level by its position in the table or by name, ignoring case, spaces, dashes and underscores.
    pub fn lookup(&self, key: &str) -> anyhow::Result<&LevelEntry> {
        let key = key.trim();
        if let Ok(index) = key.parse::<usize>() {
            return self
                .levels
                .get(index)
                .with_context(|| format!("no level number {index}"));
        }

        let wanted = normalize(key);
        self.levels
            .iter()
            .find(|entry| normalize(&entry.name) == wanted)
            .with_context(|| {
                let names: Vec<_> = self.levels.iter().map(|entry| entry.name.as_str()).collect();
                format!("unknown level {key:?}, expected one of {}", names.join(", "))
            })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_matches_presets() {
        let table = LevelTable::builtin();

        assert_eq!(table.levels().len(), GameLevel::ALL.len());
        for level in GameLevel::ALL {
            let entry = table.lookup(level.description()).unwrap();
            assert_eq!(entry.config().unwrap(), level.config());
            let by_number = table.lookup(&level.number().to_string()).unwrap();
            assert_eq!(by_number, entry);
        }
    }

    #[test]
    fn lookup_ignores_case_and_separators() {
        let table = LevelTable::builtin();

        assert_eq!(table.lookup("super-easy").unwrap().mines, 4);
        assert_eq!(table.lookup("HARD").unwrap().width, 30);
        assert!(table.lookup("nightmare").is_err());
        assert!(table.lookup("12").is_err());
    }

    #[test]
    fn parses_toml_table() {
        let table = LevelTable::from_toml(
            r#"
            [[level]]
            name = "Tiny"
            width = 5
            height = 4
            mines = 3

            [[level]]
            name = "Long Corridor"
            width = 40
            height = 2
            mines = 10
            "#,
        )
        .unwrap();

        assert_eq!(table.levels().len(), 2);
        assert_eq!(
            table.lookup("long_corridor").unwrap().config().unwrap(),
            GameConfig::new(40, 2, 10).unwrap()
        );
        assert_eq!(table.lookup("0").unwrap().name, "Tiny");
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(LevelTable::from_toml("level = []").is_err());
        assert!(LevelTable::from_toml("not toml at all [").is_err());
        assert!(
            LevelTable::from_toml(
                r#"
                [[level]]
                name = "Packed"
                width = 2
                height = 2
                mines = 4
                "#,
            )
            .is_err()
        );
    }
}
