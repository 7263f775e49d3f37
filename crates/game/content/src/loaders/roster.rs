//! Roster loader.
//!
//! A roster names the ally and the opponents it will face, in order. Values
//! omitted from a combatant entry are filled from the [`ExpeditionConfig`].

use std::path::Path;

use game_core::{Combatant, ExpeditionConfig, ExpeditionError, Regeneration};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One combatant as written in a roster file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub max_health: u32,
    pub damage_per_second: f64,
    /// Starting health. Defaults to `max_health`.
    #[serde(default)]
    pub current_health: Option<u32>,
    #[serde(default)]
    pub retreat_threshold: Option<f64>,
    #[serde(default)]
    pub regeneration: Option<Regeneration>,
}

impl CombatantSpec {
    /// Builds a validated combatant, taking unset values from `config`.
    pub fn build(&self, config: &ExpeditionConfig) -> Result<Combatant, ExpeditionError> {
        let mut combatant = Combatant::new(&self.name, self.max_health, self.damage_per_second)?
            .with_retreat_threshold(
                self.retreat_threshold
                    .unwrap_or(config.default_retreat_threshold),
            )?
            .with_regeneration(self.regeneration.unwrap_or(config.default_regeneration))?;

        if let Some(current_health) = self.current_health {
            combatant = combatant.with_current_health(current_health)?;
        }
        Ok(combatant)
    }
}

/// Roster file contents before validation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RosterSpec {
    pub ally: CombatantSpec,
    #[serde(default)]
    pub opponents: Vec<CombatantSpec>,
}

impl RosterSpec {
    /// Builds every combatant, naming the offending entry on failure.
    pub fn build(&self, config: &ExpeditionConfig) -> LoadResult<Roster> {
        let ally = self
            .ally
            .build(config)
            .map_err(|e| anyhow::anyhow!("Invalid ally '{}': {}", self.ally.name, e))?;

        let opponents = self
            .opponents
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.build(config).map_err(|e| {
                    anyhow::anyhow!("Invalid opponent #{} '{}': {}", index, spec.name, e)
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Roster { ally, opponents })
    }
}

/// A validated roster, ready to hand to `ExpeditionController::start_expedition`.
#[derive(Clone, Debug, PartialEq)]
pub struct Roster {
    pub ally: Combatant,
    pub opponents: Vec<Combatant>,
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster from a RON file.
    ///
    /// RON format: `RosterSpec`
    pub fn load(path: &Path, config: &ExpeditionConfig) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let roster = Self::parse(&content, config)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {}", path.display(), e))?;

        tracing::debug!(
            path = %path.display(),
            ally = roster.ally.name(),
            opponents = roster.opponents.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    /// Parse and validate a roster from RON text.
    pub fn parse(content: &str, config: &ExpeditionConfig) -> LoadResult<Roster> {
        let spec: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        spec.build(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOREST: &str = r#"#![enable(implicit_some)]
        (
            ally: (name: "Aria", max_health: 100, damage_per_second: 6.0, retreat_threshold: 0.25),
            opponents: [
                (name: "Slime", max_health: 20, damage_per_second: 1.5),
                (name: "Wolf", max_health: 35, damage_per_second: 4.0, regeneration: Fixed(2)),
            ],
        )
    "#;

    #[test]
    fn parses_roster_in_order() {
        let roster = RosterLoader::parse(FOREST, &ExpeditionConfig::default()).unwrap();

        assert_eq!(roster.ally.name(), "Aria");
        assert_eq!(roster.ally.retreat_threshold(), 0.25);
        let names: Vec<_> = roster.opponents.iter().map(Combatant::name).collect();
        assert_eq!(names, ["Slime", "Wolf"]);
        assert_eq!(roster.opponents[1].regeneration(), Regeneration::Fixed(2));
    }

    #[test]
    fn unset_values_come_from_config() {
        let config = ExpeditionConfig {
            default_retreat_threshold: 0.5,
            default_regeneration: Regeneration::Fixed(3),
            ..ExpeditionConfig::default()
        };
        let roster = RosterLoader::parse(FOREST, &config).unwrap();

        assert_eq!(roster.ally.retreat_threshold(), 0.25);
        assert_eq!(roster.opponents[0].retreat_threshold(), 0.5);
        assert_eq!(roster.opponents[0].regeneration(), Regeneration::Fixed(3));
    }

    #[test]
    fn opponents_may_be_omitted() {
        let roster = RosterLoader::parse(
            r#"(ally: (name: "Aria", max_health: 10, damage_per_second: 1.0))"#,
            &ExpeditionConfig::default(),
        )
        .unwrap();
        assert!(roster.opponents.is_empty());
    }

    #[test]
    fn invalid_entry_is_named() {
        let err = RosterLoader::parse(
            r#"(
                ally: (name: "Aria", max_health: 10, damage_per_second: 1.0),
                opponents: [(name: "Shade", max_health: 0, damage_per_second: 1.0)],
            )"#,
            &ExpeditionConfig::default(),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("opponent #0 'Shade'"), "{message}");
        assert!(message.contains("max_health"), "{message}");
    }

    #[test]
    fn starting_health_above_max_is_rejected() {
        let result = RosterLoader::parse(
            r#"#![enable(implicit_some)]
            (ally: (name: "Aria", max_health: 10, damage_per_second: 1.0, current_health: 11))"#,
            &ExpeditionConfig::default(),
        );
        assert!(result.is_err());
    }
}
