//! Defines common items that are specific to optifine resource packs

pub mod string_escape;

use repack_workspace::PredicateType;

/// The directory which contains every cit property file
pub const CIT_PATH: &str = "assets/minecraft/optifine/cit";

const ARMOR_PIECES: [&str; 4] = ["helmet", "chestplate", "leggings", "boots"];

/// The value of the `type` key for the given kind of predicate
pub fn cit_type(kind: PredicateType) -> Option<&'static str> {
    match kind {
        PredicateType::Items => Some("item"),
        PredicateType::Armor | PredicateType::ArmorL1 | PredicateType::ArmorL2 => Some("armor"),
        PredicateType::Elytras => Some("elytra"),
        PredicateType::Match => None,
    }
}

/// Returns whether `id` names a piece of armor that is rendered with layer textures
pub fn is_armor_piece(id: &str) -> bool {
    id.rsplit_once('_')
        .is_some_and(|(_, piece)| ARMOR_PIECES.contains(&piece))
}

/// The material of an armor item, as used in the names of the layer textures.
///
/// `golden_helmet` is made of `gold`, `minecraft:iron_boots` of `iron`.
pub fn armor_material(id: &str) -> &str {
    let id = id.rsplit_once(':').map_or(id, |(_, id)| id);
    let material = id.split_once('_').map_or(id, |(material, _)| material);
    match material {
        "golden" => "gold",
        other => other,
    }
}
