//! Narrative log parser: follows the protection-hour headers and turns each
//! event sentence back into a [`ParsedAction`].

use crate::actions::{ActionKind, ParsedAction, ParsedLog};
use crate::aliases::record_key;
use crate::error::{LogError, Result};
use crate::scanner::LineSource;
use crate::settings::Settings;
use log::{debug, error, info, warn};
use regex::{Captures, Regex};
use std::sync::LazyLock;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("narrative pattern is valid")
}

static HOUR: LazyLock<Regex> = LazyLock::new(|| pattern(r"Protection Hour: (\d+)"));
static DRAFT_RATE: LazyLock<Regex> = LazyLock::new(|| pattern(r"Draftrate changed to (\d+)%"));
static RELEASE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"You successfully released ([\w\s,]+)"));
static RELEASED_UNIT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\d+)\s+([\w\s]+)"));
static MAGIC: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"Your wizards successfully cast (.+?) at a cost of (\d+) mana"));
static BANK: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^(.+?) have been traded for (.+?)\.$"));
static EXPLORE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"Exploration for (.+) begun at a cost of (\d+) platinum and (\d+) draftees")
});
static DAILY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"You have been awarded with (\d+) ([^.]+)\."));
static DESTRUCTION: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"Destruction of (.+) is complete"));
static REZONE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"Rezoning begun at a cost of (\d+) platinum\. The changes in land are as following: (.*)\.",
    )
});
static CONSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"Construction of (.+) started at a cost of (\d+) platinum and (\d+) lumber")
});
static TRAIN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"Training of (.+) begun at a cost of (\d+) platinum, (\d+) ore, (\d+) draftees, (\d+) spies, and (\d+) wizards",
    )
});
static INVEST: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"You invested (\d+) (\w+) into ([^.]+)\."));
// Rezone lists carry negative amounts for land given up.
static LISTED_ITEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"(-?\d+)\s+([^,]+)"));
static TRADED_ITEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\d+)\s+(\w+)"));

const PEASANTRY_SUFFIX: &str = "into the peasantry";
const TRADE_PHRASE: &str = "have been traded for";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Log every line and the records gathered so far.
    pub debug: bool,
    /// Parsing stops once the log moves past this hour.
    pub last_hour: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), false)
    }
}

impl ParserConfig {
    pub fn from_settings(settings: &Settings, debug: bool) -> Self {
        Self {
            debug,
            last_hour: settings.last_hour,
        }
    }
}

/// What one record extractor found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Nothing,
    /// A timeline header for this 1-based hour.
    Hour(usize),
    Action(ParsedAction),
}

/// The reverse extractors, tried against every line in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordExtractor {
    Timeline,
    DraftRate,
    Release,
    Magic,
    Bank,
    Explore,
    Daily,
    Destruction,
    Rezone,
    Construction,
    Train,
    Invest,
}

impl RecordExtractor {
    pub const ALL: [RecordExtractor; 12] = [
        RecordExtractor::Timeline,
        RecordExtractor::DraftRate,
        RecordExtractor::Release,
        RecordExtractor::Magic,
        RecordExtractor::Bank,
        RecordExtractor::Explore,
        RecordExtractor::Daily,
        RecordExtractor::Destruction,
        RecordExtractor::Rezone,
        RecordExtractor::Construction,
        RecordExtractor::Train,
        RecordExtractor::Invest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordExtractor::Timeline => "timeline",
            RecordExtractor::DraftRate => "draftrate",
            RecordExtractor::Release => "release",
            RecordExtractor::Magic => "magic",
            RecordExtractor::Bank => "bank",
            RecordExtractor::Explore => "explore",
            RecordExtractor::Daily => "daily",
            RecordExtractor::Destruction => "destruction",
            RecordExtractor::Rezone => "rezone",
            RecordExtractor::Construction => "construction",
            RecordExtractor::Train => "train",
            RecordExtractor::Invest => "invest",
        }
    }

    pub fn extract(&self, line: &str) -> Result<Extracted> {
        match self {
            RecordExtractor::Timeline => timeline(line),
            RecordExtractor::DraftRate => draft_rate(line),
            RecordExtractor::Release => release(line),
            RecordExtractor::Magic => magic(line),
            RecordExtractor::Bank => bank(line),
            RecordExtractor::Explore => explore(line),
            RecordExtractor::Daily => daily(line),
            RecordExtractor::Destruction => destruction(line),
            RecordExtractor::Rezone => rezone(line),
            RecordExtractor::Construction => construction(line),
            RecordExtractor::Train => train(line),
            RecordExtractor::Invest => invest(line),
        }
    }
}

/// Records gathered by a parse, and the error that stopped it, if any.
#[derive(Debug)]
pub struct ParseOutcome {
    pub log: ParsedLog,
    pub failure: Option<LogError>,
}

impl ParseOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

pub struct NarrativeParser {
    config: ParserConfig,
    current_hour: usize,
    results: ParsedLog,
}

impl NarrativeParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            current_hour: 0,
            results: ParsedLog::new(),
        }
    }

    /// Zero-based hour records are currently filed under.
    pub fn current_hour(&self) -> usize {
        self.current_hour
    }

    pub fn results(&self) -> &ParsedLog {
        &self.results
    }

    /// Run every record extractor over one trimmed line.
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        for extractor in RecordExtractor::ALL {
            match extractor.extract(line)? {
                Extracted::Nothing => {}
                Extracted::Hour(hour) => {
                    if hour <= self.current_hour {
                        return Err(LogError::OutOfOrderHour { hour });
                    }
                    self.current_hour = hour - 1;
                }
                Extracted::Action(action) => {
                    if self.config.debug {
                        debug!("{} => {}", extractor.name(), action);
                    }
                    self.results.push(self.current_hour, action);
                }
            }
        }
        Ok(())
    }

    /// Consume `source` until it ends, the log passes the last hour, or a
    /// line fails to parse.
    pub fn parse<L: LineSource>(mut self, source: &mut L) -> ParseOutcome {
        info!("Parsing...");

        loop {
            let (line_number, text) = match source.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    error!("Error scanning log: {}", err);
                    return self.finish(Some(err));
                }
            };

            if self.config.debug {
                debug!("Current line {} => {}", line_number, text);
            }

            if let Err(err) = self.process_line(&text) {
                let err = LogError::Line {
                    hour: self.current_hour,
                    line_number,
                    text,
                    source: Box::new(err),
                };
                error!("{}", err);
                return self.finish(Some(err));
            }

            if self.config.debug {
                match self.results.to_json() {
                    Ok(snapshot) => debug!("Records so far: {}", snapshot),
                    Err(err) => warn!("Error marshalling results: {}", err),
                }
            }

            if self.current_hour > self.config.last_hour {
                warn!(
                    "Stopping at hour {}, past the last hour {}",
                    self.current_hour + 1,
                    self.config.last_hour
                );
                break;
            }
        }

        info!("Parsed {} records", self.results.len());
        self.finish(None)
    }

    fn finish(self, failure: Option<LogError>) -> ParseOutcome {
        ParseOutcome {
            log: self.results,
            failure,
        }
    }
}

fn amount(text: &str, context: &'static str) -> Result<i64> {
    text.parse().map_err(|_| LogError::ValueFormat {
        location: "log".to_string(),
        value: text.to_string(),
        context,
    })
}

// Items of a comma separated "10 Plains, 5 Water" list.
fn add_listed_items(action: &mut ParsedAction, list: &str, context: &'static str) -> Result<()> {
    for item in LISTED_ITEM.captures_iter(list) {
        action.insert(record_key(item[2].trim()), amount(&item[1], context)?);
    }
    Ok(())
}

fn add_cost(action: &mut ParsedAction, caps: &Captures<'_>, group: usize, key: &str) -> Result<()> {
    action.insert(key, amount(&caps[group], "error parsing cost")?);
    Ok(())
}

fn timeline(line: &str) -> Result<Extracted> {
    let Some(caps) = HOUR.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let hour = amount(&caps[1], "error parsing hour")?;
    usize::try_from(hour)
        .map(Extracted::Hour)
        .map_err(|_| LogError::ValueFormat {
            location: "log".to_string(),
            value: caps[1].to_string(),
            context: "error parsing hour",
        })
}

fn draft_rate(line: &str) -> Result<Extracted> {
    let Some(caps) = DRAFT_RATE.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let rate = amount(&caps[1], "error parsing draftrate")?;
    Ok(Extracted::Action(
        ParsedAction::new(ActionKind::Draftrate).with("value", rate),
    ))
}

fn release(line: &str) -> Result<Extracted> {
    let Some(caps) = RELEASE.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Release);
    for unit in RELEASED_UNIT.captures_iter(&caps[1]) {
        let released = amount(&unit[1], "error parsing released unit amount")?;
        let name = unit[2].trim();
        let name = name.strip_suffix(PEASANTRY_SUFFIX).unwrap_or(name).trim();
        action.insert(record_key(name), released);
    }

    if action.data.is_empty() {
        return Ok(Extracted::Nothing);
    }
    Ok(Extracted::Action(action))
}

fn magic(line: &str) -> Result<Extracted> {
    let Some(caps) = MAGIC.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mana = amount(&caps[2], "error parsing spell cost")?;
    Ok(Extracted::Action(
        ParsedAction::new(ActionKind::Magic).with(record_key(caps[1].trim()), mana),
    ))
}

fn bank(line: &str) -> Result<Extracted> {
    let Some(caps) = BANK.captures(line) else {
        if line.contains(TRADE_PHRASE) {
            debug!("Skipping trade with nothing received: {}", line);
        }
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Bank);
    for item in TRADED_ITEM.captures_iter(&caps[1]) {
        let given = amount(&item[1], "error parsing traded amount")?;
        action.insert(record_key(&item[2]), -given);
    }
    for item in TRADED_ITEM.captures_iter(&caps[2]) {
        let received = amount(&item[1], "error parsing received amount")?;
        action.insert(record_key(&item[2]), received);
    }

    Ok(Extracted::Action(action))
}

fn explore(line: &str) -> Result<Extracted> {
    let Some(caps) = EXPLORE.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Explore);
    add_listed_items(&mut action, &caps[1], "error parsing explored land")?;
    add_cost(&mut action, &caps, 2, "platinum_cost")?;
    add_cost(&mut action, &caps, 3, "draftee_cost")?;
    Ok(Extracted::Action(action))
}

fn daily(line: &str) -> Result<Extracted> {
    let Some(caps) = DAILY.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let awarded = amount(&caps[1], "error parsing daily bonus")?;
    Ok(Extracted::Action(
        ParsedAction::new(ActionKind::Daily).with(record_key(caps[2].trim()), awarded),
    ))
}

fn destruction(line: &str) -> Result<Extracted> {
    let Some(caps) = DESTRUCTION.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Destruction);
    add_listed_items(&mut action, &caps[1], "error parsing destroyed buildings")?;
    Ok(Extracted::Action(action))
}

fn rezone(line: &str) -> Result<Extracted> {
    let Some(caps) = REZONE.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Rezone);
    add_listed_items(&mut action, &caps[2], "error parsing rezoned land")?;
    add_cost(&mut action, &caps, 1, "platinum_cost")?;
    Ok(Extracted::Action(action))
}

fn construction(line: &str) -> Result<Extracted> {
    let Some(caps) = CONSTRUCTION.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Construction);
    add_listed_items(&mut action, &caps[1], "error parsing constructed buildings")?;
    add_cost(&mut action, &caps, 2, "platinum_cost")?;
    add_cost(&mut action, &caps, 3, "lumber_cost")?;
    Ok(Extracted::Action(action))
}

fn train(line: &str) -> Result<Extracted> {
    let Some(caps) = TRAIN.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let mut action = ParsedAction::new(ActionKind::Train);
    add_listed_items(&mut action, &caps[1], "error parsing trained units")?;
    add_cost(&mut action, &caps, 2, "platinum_cost")?;
    add_cost(&mut action, &caps, 3, "ore_cost")?;
    add_cost(&mut action, &caps, 4, "draftee_cost")?;
    add_cost(&mut action, &caps, 5, "spy_cost")?;
    add_cost(&mut action, &caps, 6, "wizard_cost")?;
    Ok(Extracted::Action(action))
}

fn invest(line: &str) -> Result<Extracted> {
    let Some(caps) = INVEST.captures(line) else {
        return Ok(Extracted::Nothing);
    };

    let invested = amount(&caps[1], "error parsing invested amount")?;
    Ok(Extracted::Action(
        ParsedAction::new(ActionKind::Invest).with(record_key(caps[3].trim()), invested),
    ))
}
