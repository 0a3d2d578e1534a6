// SPDX-License-Identifier: GPL-3.0-only

use dexplorer::entities::{Generation, PokemonSummary, PokemonType, Stats};

const NAMES: [&str; 12] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "caterpie",
    "metapod",
    "butterfree",
];

/// Twelve Pokémon with ids 1 to 12; every sortable attribute is distinct across them
pub fn dex() -> Vec<PokemonSummary> {
    (1..=12).map(pokemon).collect()
}

fn pokemon(id: i64) -> PokemonSummary {
    use PokemonType::*;

    let (types, ability) = match id {
        1..=3 => (vec![Grass, Poison], "overgrow"),
        4 | 5 => (vec![Fire], "blaze"),
        6 => (vec![Fire, Flying], "blaze"),
        7..=9 => (vec![Water], "torrent"),
        10 | 11 => (vec![Bug], "shield-dust"),
        _ => (vec![Bug, Flying], "compound-eyes"),
    };
    let generation = match id % 3 {
        1 => Generation::One,
        2 => Generation::Two,
        _ => Generation::Three,
    };
    // 13 is prime, so `id * k % 13` never repeats for ids 1..=12
    let stat = |k: i64| (id * k) % 13 * 10 + id;

    PokemonSummary {
        id,
        name: NAMES[(id - 1) as usize].to_string(),
        types,
        generation,
        abilities: vec![ability.to_string()],
        stats: Stats {
            hp: stat(2),
            attack: stat(3),
            defense: stat(4),
            sp_attack: stat(6),
            sp_defense: stat(7),
            speed: stat(8),
        },
        height: (id * 5) % 13,
        weight: (id * 9) % 13 * 10,
        sprite: None,
    }
}
