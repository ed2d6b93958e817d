use super::types::MapDef;

/// (name, level range, image, description)
const MAPS: [(&str, [u32; 2], &str, &str); 6] = [
    (
        "Windswept Plains",
        [1, 5],
        "maps/windswept_plains.png",
        "A friendly area for adventurers writing their first lines of code.",
    ),
    (
        "Shadowsong Forest",
        [6, 10],
        "maps/shadowsong_forest.png",
        "A trickier forest that expects a grip on the fundamentals.",
    ),
    (
        "Crystal Abyss",
        [11, 15],
        "maps/crystal_abyss.png",
        "Caverns full of more intricate programming puzzles.",
    ),
    (
        "Gloom Marsh",
        [16, 20],
        "maps/gloom_marsh.png",
        "A dangerous swamp; only solid foundations get you through.",
    ),
    (
        "Molten Rift",
        [21, 25],
        "maps/molten_rift.png",
        "Volcanic ground that tests advanced techniques.",
    ),
    (
        "Raging Tide Corridor",
        [26, 30],
        "maps/raging_tide_corridor.png",
        "The final challenge, conquered only by masters.",
    ),
];

pub fn default_maps() -> Vec<MapDef> {
    MAPS.iter()
        .map(|(name, level_range, image, description)| MapDef {
            name: name.to_string(),
            level_range: *level_range,
            image: image.to_string(),
            description: description.to_string(),
        })
        .collect()
}
