// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use crate::entities::{DamageRelations, PokemonType};

/// Damage multiplier taken from every attacking type
#[derive(Debug, Clone, PartialEq)]
pub struct Effectiveness {
    multipliers: BTreeMap<PokemonType, f64>,
}

impl Effectiveness {
    /// Folds the defensive relations of each of a Pokémon's types; multipliers compound across types
    pub fn from_relations(relations: &[DamageRelations]) -> Self {
        let mut multipliers: BTreeMap<PokemonType, f64> =
            PokemonType::ALL.iter().map(|t| (*t, 1.0)).collect();

        for relation in relations {
            for (types, factor) in [
                (&relation.double_damage_from, 2.0),
                (&relation.half_damage_from, 0.5),
                (&relation.no_damage_from, 0.0),
            ] {
                for attacking in types {
                    if let Some(multiplier) = multipliers.get_mut(attacking) {
                        *multiplier *= factor;
                    }
                }
            }
        }

        Self { multipliers }
    }

    pub fn multiplier(&self, attacking: PokemonType) -> f64 {
        self.multipliers.get(&attacking).copied().unwrap_or(1.0)
    }

    /// Attacking types dealing more than normal damage, strongest first
    pub fn weaknesses(&self) -> Vec<(PokemonType, f64)> {
        let mut weak = self.bucket(|m| m > 1.0);
        weak.sort_by(|a, b| b.1.total_cmp(&a.1));
        weak
    }

    /// Attacking types dealing reduced but non-zero damage, most resisted first
    pub fn resistances(&self) -> Vec<(PokemonType, f64)> {
        let mut resist = self.bucket(|m| m > 0.0 && m < 1.0);
        resist.sort_by(|a, b| a.1.total_cmp(&b.1));
        resist
    }

    pub fn immunities(&self) -> Vec<PokemonType> {
        self.bucket(|m| m == 0.0).into_iter().map(|(t, _)| t).collect()
    }

    fn bucket(&self, keep: impl Fn(f64) -> bool) -> Vec<(PokemonType, f64)> {
        self.multipliers
            .iter()
            .filter(|(_, m)| keep(**m))
            .map(|(t, m)| (*t, *m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PokemonType::*;

    fn water() -> DamageRelations {
        DamageRelations {
            double_damage_from: vec![Electric, Grass],
            half_damage_from: vec![Fire, Water, Ice, Steel],
            ..Default::default()
        }
    }

    fn flying() -> DamageRelations {
        DamageRelations {
            double_damage_from: vec![Rock],
            half_damage_from: vec![Grass, Fighting, Bug],
            no_damage_from: vec![Ground],
            ..Default::default()
        }
    }

    #[test]
    fn relation_from_one_type_is_not_compounded() {
        let effectiveness = Effectiveness::from_relations(&[water(), flying()]);

        assert_eq!(effectiveness.multiplier(Electric), 2.0);
        assert_eq!(effectiveness.multiplier(Rock), 2.0);
    }

    #[test]
    fn opposite_relations_cancel_out() {
        let effectiveness = Effectiveness::from_relations(&[water(), flying()]);

        assert_eq!(effectiveness.multiplier(Grass), 1.0);
        assert!(!effectiveness.weaknesses().iter().any(|(t, _)| *t == Grass));
        assert!(!effectiveness.resistances().iter().any(|(t, _)| *t == Grass));
    }

    #[test]
    fn buckets_by_final_multiplier() {
        let effectiveness = Effectiveness::from_relations(&[water(), flying()]);

        assert_eq!(effectiveness.weaknesses(), vec![(Electric, 2.0), (Rock, 2.0)]);
        assert_eq!(effectiveness.immunities(), vec![Ground]);
        let resisted: Vec<PokemonType> = effectiveness
            .resistances()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(resisted, vec![Fire, Water, Ice, Fighting, Bug, Steel]);
    }

    #[test]
    fn shared_weakness_becomes_quadruple() {
        let grass_ice = [
            DamageRelations {
                double_damage_from: vec![Fire, Ice, Poison, Flying, Bug],
                ..Default::default()
            },
            DamageRelations {
                double_damage_from: vec![Fire, Fighting, Rock, Steel],
                ..Default::default()
            },
        ];

        let effectiveness = Effectiveness::from_relations(&grass_ice);

        assert_eq!(effectiveness.multiplier(Fire), 4.0);
        assert_eq!(effectiveness.weaknesses()[0], (Fire, 4.0));
    }

    #[test]
    fn typeless_pokemon_takes_neutral_damage() {
        let effectiveness = Effectiveness::from_relations(&[]);
        assert!(effectiveness.weaknesses().is_empty());
        assert!(effectiveness.immunities().is_empty());
        assert_eq!(effectiveness.multiplier(Dragon), 1.0);
    }
}
