//! Fixed sim layout: which columns hold which buildings, lands and spells.

pub const BUILDING_NAMES: [&str; 18] = [
    "Homes",
    "Alchemies",
    "Farms",
    "Smithies",
    "Masonries",
    "Lumber Yards",
    "Ore Mines",
    "Gryphon Nests",
    "Factories",
    "Guard Towers",
    "Barracks",
    "Shrines",
    "Towers",
    "Temples",
    "Wizard Guilds",
    "Diamond Mines",
    "Schools",
    "Docks",
];

// CC is a spacer column in the Construction sheet.
pub const DESTROY_BUILDING_COLUMNS: [&str; 18] = [
    "BW", "BX", "BY", "BZ", "CA", "CB", "CD", "CE", "CF", "CG", "CH", "CI", "CJ", "CK", "CL", "CM",
    "CN", "CO",
];

// U is a spacer column in the Construction sheet.
pub const CREATE_BUILDING_COLUMNS: [&str; 18] = [
    "O", "P", "Q", "R", "S", "T", "V", "W", "X", "Y", "Z", "AA", "AB", "AC", "AD", "AE", "AF", "AG",
];

pub const EXPLORE_LANDS: [(&str, &str); 7] = [
    ("Plains", "T"),
    ("Forest", "U"),
    ("Mountains", "V"),
    ("Hills", "W"),
    ("Swamps", "X"),
    ("Caverns", "Y"),
    ("Water", "Z"),
];

pub const REZONE_LANDS: [(&str, &str); 7] = [
    ("Plains", "L"),
    ("Forest", "M"),
    ("Mountains", "N"),
    ("Hills", "O"),
    ("Swamps", "P"),
    ("Caverns", "Q"),
    ("Water", "R"),
];

/// Military columns released units are read from, in log order. Names sit on row 2.
pub const RELEASE_COLUMNS: [&str; 8] = ["AX", "AY", "AZ", "BA", "BB", "BC", "BD", "BE"];
pub const RELEASE_DRAFTEES_COLUMN: &str = "AW";

/// Military columns trained units are read from. Names sit on row 2.
pub const TRAIN_COLUMNS: [&str; 8] = ["AG", "AH", "AI", "AJ", "AK", "AL", "AM", "AN"];
pub const TRAIN_SPIES_SLOT: usize = 5;
pub const TRAIN_WIZARDS_SLOT: usize = 7;

pub const UNIT_NAME_ROW: usize = 2;

/// Trade columns in Production; negative amounts are given away.
pub const TRADE_RESOURCES: [(&str, &str); 4] = [
    ("platinum", "BC"),
    ("lumber", "BD"),
    ("ore", "BE"),
    ("gems", "BF"),
];

/// Improvement slots in Imps: (amount, resource, target) columns.
pub const IMPROVEMENT_SLOTS: [(&str, &str, &str); 3] =
    [("P", "O", "Q"), ("S", "R", "T"), ("V", "U", "W")];

pub const RACIAL_SPELL: &str = "Racial Spell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellSlot {
    pub name: &'static str,
    /// Activation column in the Magic sheet.
    pub column: &'static str,
    /// Mana multiplier cell in the Constants sheet.
    pub multiplier_cell: &'static str,
}

const fn spell(
    name: &'static str,
    column: &'static str,
    multiplier_cell: &'static str,
) -> SpellSlot {
    SpellSlot {
        name,
        column,
        multiplier_cell,
    }
}

pub const SPELLS: [SpellSlot; 15] = [
    spell("Gaia's Watch", "G", "B75"),
    spell("Mining Strength", "H", "B76"),
    spell("Ares' Call", "I", "B77"),
    spell("Midas Touch", "J", "B78"),
    spell("Harmony", "K", "B79"),
    spell(RACIAL_SPELL, "L", "B80"),
    spell(RACIAL_SPELL, "M", "B80"),
    spell(RACIAL_SPELL, "N", "B80"),
    spell(RACIAL_SPELL, "O", "B80"),
    spell(RACIAL_SPELL, "P", "B80"),
    spell(RACIAL_SPELL, "Q", "B80"),
    spell(RACIAL_SPELL, "R", "B80"),
    spell(RACIAL_SPELL, "S", "B80"),
    spell(RACIAL_SPELL, "T", "B80"),
    spell(RACIAL_SPELL, "U", "B80"),
];

// Overview cells read by the log independent of hour.
pub const START_DATE_CELL: &str = "B15";
pub const HOME_LAND_CELL: &str = "B70";
