//! Attack catalog: damage values, sounds and overlay effects per attack.
use crate::error::{ConfigError, GameError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub(crate) const DEFAULT_ATTACK_DATA: &str =
    include_str!("../../ragefest-web/static/assets/data/attacks.json");

/// Synthesized tone played when an attack's sound asset cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub gain: f32,
    pub duration_ms: u32,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: 200.0,
            gain: 0.3,
            duration_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub id: String,
    pub label: String,
    pub damage: u32,
    pub sound: String,
    /// Overlay image shown over the buddy while the attack lands.
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub fallback_tone: ToneSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttackCatalog(pub Vec<Attack>);

impl AttackCatalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self(vec![])
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into attacks.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_ATTACK_DATA).unwrap_or_else(|err| {
            log::warn!("bundled attack catalog is invalid: {err}");
            Self::empty()
        })
    }

    /// # Errors
    ///
    /// Returns [`GameError::UnknownAttack`] when `id` is not in the catalog.
    pub fn find(&self, id: &str) -> Result<&Attack, GameError> {
        self.0
            .iter()
            .find(|attack| attack.id == id)
            .ok_or_else(|| GameError::UnknownAttack { id: id.to_string() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attack> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAttack`] for repeated ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for attack in &self.0 {
            if !seen.insert(attack.id.as_str()) {
                return Err(ConfigError::DuplicateAttack {
                    id: attack.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_has_punch_and_kick() {
        let catalog = AttackCatalog::load_from_static();
        assert_eq!(catalog.len(), 2);
        let punch = catalog.find("punch").unwrap();
        assert_eq!(punch.damage, 10);
        assert_eq!(punch.fallback_tone.duration_ms, 300);
        let kick = catalog.find("kick").unwrap();
        assert_eq!(kick.damage, 15);
        assert!((kick.fallback_tone.frequency_hz - 80.0).abs() < f32::EPSILON);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn unknown_attack_is_not_found() {
        let catalog = AttackCatalog::load_from_static();
        assert_eq!(
            catalog.find("suplex"),
            Err(GameError::UnknownAttack {
                id: "suplex".to_string()
            })
        );
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let catalog = AttackCatalog::from_json(
            r#"[{"id":"slap","label":"Slap","damage":3,"sound":"slap.mp3"}]"#,
        )
        .unwrap();
        let slap = catalog.find("slap").unwrap();
        assert!(slap.effect.is_empty());
        assert_eq!(slap.fallback_tone, ToneSpec::default());
    }

    #[test]
    fn duplicate_ids_fail_validation() {
        let catalog = AttackCatalog::from_json(
            r#"[{"id":"a","label":"A","damage":1,"sound":""},{"id":"a","label":"B","damage":2,"sound":""}]"#,
        )
        .unwrap();
        assert_eq!(
            catalog.validate(),
            Err(ConfigError::DuplicateAttack { id: "a".to_string() })
        );
    }
}
