//! Per-hour event detection: each extractor reads its cells for one hour and
//! produces at most one kind of narrative sentence, or nothing.

use crate::catalog::{
    BUILDING_NAMES, CREATE_BUILDING_COLUMNS, DESTROY_BUILDING_COLUMNS, EXPLORE_LANDS,
    HOME_LAND_CELL, IMPROVEMENT_SLOTS, RELEASE_COLUMNS, RELEASE_DRAFTEES_COLUMN, REZONE_LANDS,
    SPELLS, START_DATE_CELL, SpellSlot, TRADE_RESOURCES, TRAIN_COLUMNS, TRAIN_SPIES_SLOT,
    TRAIN_WIZARDS_SLOT, UNIT_NAME_ROW,
};
use crate::error::{LogError, Result};
use crate::grid::{GridSource, Sheet, coordinate, read_decimal, read_int, read_text};
use crate::hour::HourIndex;
use crate::settings::Settings;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

const CLOCK_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];
// Tried in order; the first that parses wins.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%m-%d-%y", "%Y/%m/%d"];

/// Everything an extractor may look at for the hour being logged.
pub struct HourContext<'a, G> {
    pub grid: &'a G,
    pub index: HourIndex,
    pub settings: &'a Settings,
}

impl<'a, G: GridSource> HourContext<'a, G> {
    pub fn new(grid: &'a G, hour: usize, settings: &'a Settings) -> Self {
        Self {
            grid,
            index: HourIndex::for_hour(hour, settings.header_rows),
            settings,
        }
    }

    fn text(&self, sheet: Sheet, column: &str, context: &'static str) -> Result<String> {
        read_text(self.grid, sheet, &self.index.cell(column), context)
    }

    fn int(&self, sheet: Sheet, column: &str, context: &'static str) -> Result<i64> {
        read_int(self.grid, sheet, &self.index.cell(column), context)
    }

    fn unit_name(&self, column: &str) -> Result<String> {
        read_text(
            self.grid,
            Sheet::Military,
            &coordinate(column, UNIT_NAME_ROW),
            "error reading unit name",
        )
    }
}

/// The forward extractors, in the order their sentences appear within an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Timeline,
    DraftRate,
    ReleaseUnits,
    CastSpells,
    UnlockTech,
    DailyPlatinum,
    TradeResources,
    Explore,
    DailyLand,
    DestroyBuildings,
    Rezone,
    Construction,
    TrainUnits,
    Improvements,
}

impl Extractor {
    pub const ALL: [Extractor; 14] = [
        Extractor::Timeline,
        Extractor::DraftRate,
        Extractor::ReleaseUnits,
        Extractor::CastSpells,
        Extractor::UnlockTech,
        Extractor::DailyPlatinum,
        Extractor::TradeResources,
        Extractor::Explore,
        Extractor::DailyLand,
        Extractor::DestroyBuildings,
        Extractor::Rezone,
        Extractor::Construction,
        Extractor::TrainUnits,
        Extractor::Improvements,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Extractor::Timeline => "timeline",
            Extractor::DraftRate => "draft rate",
            Extractor::ReleaseUnits => "release units",
            Extractor::CastSpells => "cast spells",
            Extractor::UnlockTech => "unlock tech",
            Extractor::DailyPlatinum => "daily platinum",
            Extractor::TradeResources => "trade resources",
            Extractor::Explore => "explore",
            Extractor::DailyLand => "daily land",
            Extractor::DestroyBuildings => "destroy buildings",
            Extractor::Rezone => "rezone",
            Extractor::Construction => "construction",
            Extractor::TrainUnits => "train units",
            Extractor::Improvements => "improvements",
        }
    }

    /// Sentence(s) for this hour, or an empty string when nothing happened.
    pub fn extract<G: GridSource>(&self, ctx: &HourContext<'_, G>) -> Result<String> {
        match self {
            Extractor::Timeline => timeline(ctx),
            Extractor::DraftRate => draft_rate(ctx),
            Extractor::ReleaseUnits => release_units(ctx),
            Extractor::CastSpells => cast_spells(ctx),
            Extractor::UnlockTech => unlock_tech(ctx),
            Extractor::DailyPlatinum => daily_platinum(ctx),
            Extractor::TradeResources => trade_resources(ctx),
            Extractor::Explore => explore(ctx),
            Extractor::DailyLand => daily_land(ctx),
            Extractor::DestroyBuildings => destroy_buildings(ctx),
            Extractor::Rezone => rezone(ctx),
            Extractor::Construction => construction(ctx),
            Extractor::TrainUnits => train_units(ctx),
            Extractor::Improvements => improvements(ctx),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn timeline<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let local_value = ctx.text(Sheet::Imps, "BY", "error reading local time")?;
    let dom_value = ctx.text(Sheet::Imps, "BZ", "error reading dom time")?;
    let date_value = read_text(ctx.grid, Sheet::Overview, START_DATE_CELL, "error reading date")?;

    let local_time = parse_clock(&local_value, "error parsing local time")?;
    let dom_time = parse_clock(&dom_value, "error parsing dom time")?;
    let date = parse_date(&date_value)?;

    Ok(format!(
        "====== Protection Hour: {} ( Local Time: {} ) ( Domtime: {} ) ======\n",
        ctx.index.hour(),
        timestamp(date.and_time(local_time)),
        timestamp(date.and_time(dom_time)),
    ))
}

pub fn parse_clock(value: &str, context: &'static str) -> Result<NaiveTime> {
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .ok_or_else(|| LogError::DateTimeParse {
            value: value.to_string(),
            context,
        })
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| LogError::DateTimeParse {
            value: value.to_string(),
            context: "error parsing date",
        })
}

/// `6:00:00 PM 5/18/2024`
fn timestamp(at: NaiveDateTime) -> String {
    at.format("%-I:%M:%S %p %-m/%-d/%Y").to_string()
}

fn draft_rate<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let current = ctx.text(Sheet::Military, "Y", "error reading current draftrate")?;
    let previous = read_text(
        ctx.grid,
        Sheet::Military,
        &ctx.index.previous_cell("Z"),
        "error reading previous draftrate",
    )?;

    if current.is_empty() || current == previous {
        return Ok(String::new());
    }

    Ok(format!("Draftrate changed to {}.\n", percent_label(&current)))
}

/// Rates are normally formatted as `90%`; a bare fraction such as `0.9`
/// is turned into the same whole percent.
pub fn percent_label(rate: &str) -> String {
    if rate.ends_with('%') {
        return rate.to_string();
    }

    match Decimal::from_str(rate) {
        Ok(fraction) if fraction <= Decimal::ONE => {
            format!("{}%", (fraction * Decimal::ONE_HUNDRED).round().normalize())
        }
        Ok(whole) => format!("{}%", whole.normalize()),
        Err(_) => rate.to_string(),
    }
}

fn release_units<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let mut released = Vec::new();

    for column in RELEASE_COLUMNS {
        let name = ctx.unit_name(column)?;
        let value = ctx.int(Sheet::Military, column, "error reading unit value")?;

        if value == 0 {
            continue;
        }

        released.push(format!("{} {}", value, name));
    }

    let mut sentences = String::new();
    if !released.is_empty() {
        sentences.push_str(&format!(
            "You successfully released {}.\n",
            released.join(", ")
        ));
    }

    let draftees = ctx.int(
        Sheet::Military,
        RELEASE_DRAFTEES_COLUMN,
        "error reading draftees value",
    )?;
    if draftees > 0 {
        sentences.push_str(&format!(
            "You successfully released {} draftees into the peasantry.\n",
            draftees
        ));
    }

    Ok(sentences)
}

fn cast_spells<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let land_bonus = ctx.int(Sheet::Explore, "S", "error on reading explore cell")?;
    let land_size = ctx.int(Sheet::Explore, "B", "error reading land size")?;

    let mut sentences = String::new();
    for slot in SPELLS {
        let cast = ctx.int(Sheet::Magic, slot.column, "error on reading magic cell")?;
        if cast == 0 {
            continue;
        }

        let multiplier = spell_multiplier(ctx, &slot);
        let bonus = (land_bonus != 0).then_some(ctx.settings.daily_land_bonus);
        let mana = mana_cost(land_size, bonus, multiplier);

        sentences.push_str(&format!(
            "Your wizards successfully cast {} at a cost of {} mana.\n",
            slot.name, mana
        ));
    }

    Ok(sentences)
}

/// Mana for one cast: land (less the daily land bonus on a bonus hour)
/// times the spell's multiplier, rounded half away from zero.
pub fn mana_cost(land_size: i64, land_bonus: Option<i64>, multiplier: Decimal) -> i64 {
    let land = Decimal::from(land_size - land_bonus.unwrap_or(0));
    (land * multiplier)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

// An unreadable multiplier falls back to the configured default rather than
// failing the hour.
fn spell_multiplier<G: GridSource>(ctx: &HourContext<'_, G>, slot: &SpellSlot) -> Decimal {
    match read_decimal(
        ctx.grid,
        Sheet::Constants,
        slot.multiplier_cell,
        "error reading const",
    ) {
        Ok(multiplier) => multiplier,
        Err(err) => {
            let missing = LogError::MissingConfigConstant {
                sheet: Sheet::Constants.to_string(),
                cell: slot.multiplier_cell.to_string(),
                reason: err.to_string(),
            };
            warn!(
                "{}; casting {} with multiplier {}",
                missing, slot.name, ctx.settings.fallback_spell_multiplier
            );
            ctx.settings.fallback_spell_multiplier
        }
    }
}

fn unlock_tech<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let unlocked = ctx.int(Sheet::Techs, "K", "error reading tech status")?;
    if unlocked <= 0 {
        return Ok(String::new());
    }

    let tech = ctx.text(Sheet::Techs, "CA", "error reading tech name")?;
    Ok(format!("You have unlocked {}.\n", tech))
}

fn daily_platinum<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let claimed = ctx.int(Sheet::Production, "C", "error reading platinum bonus")?;
    if claimed == 0 {
        return Ok(String::new());
    }

    let peasants = ctx.int(Sheet::Population, "C", "error reading population")?;
    Ok(format!(
        "You have been awarded with {} platinum.\n",
        peasants * ctx.settings.platinum_per_peasant
    ))
}

fn trade_resources<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let mut given = Vec::new();
    let mut received = Vec::new();

    for (resource, column) in TRADE_RESOURCES {
        let amount = ctx.int(Sheet::Production, column, "can't read value for trading")?;
        if amount < 0 {
            given.push(format!("{} {}", -amount, resource));
        } else if amount > 0 {
            received.push(format!("{} {}", amount, resource));
        }
    }

    let mut sentence = String::new();
    if !given.is_empty() {
        sentence.push_str(&format!("{} have been traded for ", given.join(" and ")));
    }
    if !received.is_empty() {
        sentence.push_str(&format!("{}.\n", received.join(" and ")));
    }

    Ok(sentence)
}

// "10 Plains, 5 Water" for the non-zero cells among `items`.
fn item_list<'n, G: GridSource>(
    ctx: &HourContext<'_, G>,
    sheet: Sheet,
    items: impl IntoIterator<Item = (&'n str, &'n str)>,
    context: &'static str,
) -> Result<Vec<String>> {
    let mut listed = Vec::new();
    for (name, column) in items {
        let value = ctx.int(sheet, column, context)?;
        if value != 0 {
            listed.push(format!("{} {}", value, name));
        }
    }
    Ok(listed)
}

fn explore<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let lands = item_list(ctx, Sheet::Explore, EXPLORE_LANDS, "error on reading land amount")?;
    if lands.is_empty() {
        return Ok(String::new());
    }

    let platinum = ctx.int(Sheet::Explore, "AH", "error reading explore plat cost")?;
    let draftees = ctx.int(Sheet::Explore, "AI", "error reading explore draftees costs")?;

    Ok(format!(
        "Exploration for {} begun at a cost of {} platinum and {} draftees.\n",
        lands.join(", "),
        platinum,
        draftees
    ))
}

fn daily_land<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let claimed = ctx.int(Sheet::Explore, "S", "error on reading land bonus value")?;
    if claimed == 0 {
        return Ok(String::new());
    }

    let land = read_text(ctx.grid, Sheet::Overview, HOME_LAND_CELL, "error reading land type")?;
    Ok(format!(
        "You have been awarded with {} {}.\n",
        ctx.settings.daily_land_bonus, land
    ))
}

fn destroy_buildings<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let buildings = item_list(
        ctx,
        Sheet::Construction,
        BUILDING_NAMES.into_iter().zip(DESTROY_BUILDING_COLUMNS),
        "error on reading destroy value",
    )?;
    if buildings.is_empty() {
        return Ok(String::new());
    }

    Ok(format!("Destruction of {} is complete.\n", buildings.join(", ")))
}

fn rezone<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let platinum = ctx.int(Sheet::Rezone, "Y", "error on reading rezone cost")?;
    if platinum == 0 {
        return Ok(String::new());
    }

    let lands = item_list(ctx, Sheet::Rezone, REZONE_LANDS, "error on reading rezone value")?;
    Ok(format!(
        "Rezoning begun at a cost of {} platinum. The changes in land are as following: {}.\n",
        platinum,
        lands.join(", ")
    ))
}

fn construction<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let buildings = item_list(
        ctx,
        Sheet::Construction,
        BUILDING_NAMES.into_iter().zip(CREATE_BUILDING_COLUMNS),
        "error on reading construction value",
    )?;
    if buildings.is_empty() {
        return Ok(String::new());
    }

    let platinum = ctx.int(Sheet::Construction, "AQ", "error reading platinum cost")?;
    let lumber = ctx.int(Sheet::Construction, "AR", "error reading lumber cost")?;

    Ok(format!(
        "Construction of {} started at a cost of {} platinum and {} lumber.\n",
        buildings.join(", "),
        platinum,
        lumber
    ))
}

fn train_units<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let mut trained = Vec::new();
    let (mut draftees, mut spies, mut wizards) = (0, 0, 0);

    for (slot, column) in TRAIN_COLUMNS.into_iter().enumerate() {
        let name = ctx.unit_name(column)?;
        let value = ctx.int(Sheet::Military, column, "error reading unit value")?;
        if value == 0 {
            continue;
        }

        match slot {
            TRAIN_SPIES_SLOT => spies += value,
            TRAIN_WIZARDS_SLOT => wizards += value,
            _ => draftees += value,
        }
        trained.push(format!("{} {}", value, name));
    }

    if trained.is_empty() {
        return Ok(String::new());
    }

    let platinum = ctx.int(Sheet::Military, "AR", "error reading platinum training cost")?;
    let ore = ctx.int(Sheet::Military, "AS", "error reading ore training cost")?;

    Ok(format!(
        "Training of {} begun at a cost of {} platinum, {} ore, {} draftees, {} spies, and {} wizards.\n",
        trained.join(", "),
        platinum,
        ore,
        draftees,
        spies,
        wizards
    ))
}

fn improvements<G: GridSource>(ctx: &HourContext<'_, G>) -> Result<String> {
    let mut sentences = String::new();

    for (amount_column, resource_column, target_column) in IMPROVEMENT_SLOTS {
        let amount = ctx.int(Sheet::Imps, amount_column, "error on read amount cell")?;
        if amount == 0 {
            continue;
        }

        let resource = ctx.text(Sheet::Imps, resource_column, "error on read resource cell")?;
        let target = ctx.text(Sheet::Imps, target_column, "error on read improvement cell")?;
        sentences.push_str(&format!(
            "You invested {} {} into {}.\n",
            amount, resource, target
        ));
    }

    Ok(sentences)
}
