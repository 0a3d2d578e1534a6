// SPDX-License-Identifier: GPL-3.0-only

mod ability;
mod berry;
mod evolution;
mod item;
mod location;
mod pokemon;
mod pokemon_info;
mod pokemon_type;
mod resource;
mod species;
mod type_info;

pub use ability::Ability;
pub use berry::{Berry, BerryFlavor};
pub use evolution::{EvolutionChain, EvolutionStep};
pub use item::Item;
pub use location::{Encounter, Location, LocationArea};
pub use pokemon::{Pokemon, PokemonAbility, Sprites, StatName, Stats};
pub use pokemon_info::PokemonSummary;
pub use pokemon_type::PokemonType;
pub use resource::{FromApi, NamedResource, ResourceList};
pub use species::{Generation, Species, SpeciesVariety};
pub use type_info::{DamageRelations, TypeInfo};
