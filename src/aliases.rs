//! Names as they appear in the log, mapped to the names the structured
//! records use.

// Both spellings of draftees are kept; logs differ in their casing.
pub const ALIASES: [(&str, &str); 24] = [
    ("draftees", "military_draftees"),
    ("Draftees", "military_draftees"),
    ("Spies", "military_spies"),
    ("Archspies", "military_assassins"),
    ("Wizards", "military_wizards"),
    ("Archmages", "military_archmages"),
    ("Fire Spirit", "Fire Sprite"),
    ("Ice Beast", "Icebeast"),
    ("Frost Mage", "FrostMage"),
    ("Voodoo Magi", "Voodoo Mage"),
    ("Mermen", "Merman"),
    ("Sirens", "Siren"),
    ("Alchemies", "alchemy"),
    ("Barracks", "barracks"),
    ("Factories", "factory"),
    ("Guilds", "wizard_guild"),
    ("Lumber Yards", "lumberyard"),
    ("Lumberyards", "lumberyard"),
    ("Masonries", "masonry"),
    ("Smithies", "smithy"),
    ("Ares Call", "Ares' Call"),
    ("Gaias Blessing", "Gaia's Blessing"),
    ("Gaias Watch", "Gaia's Watch"),
    ("Miners Sight", "Miner's Sight"),
];

const MILITARY_PREFIX: &str = "military_";

/// Exact-match lookup; unknown names are returned unchanged.
pub fn canonical(name: &str) -> &str {
    for (alias, canonical) in ALIASES {
        if alias == name {
            return canonical;
        }
    }
    name
}

/// Key used in a record's data: the canonical name without its
/// `military_` prefix.
pub fn record_key(name: &str) -> String {
    let name = canonical(name);
    name.strip_prefix(MILITARY_PREFIX).unwrap_or(name).to_string()
}
