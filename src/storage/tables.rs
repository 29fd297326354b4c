//! CSV table decoding.
//!
//! A load fails only when a required column is missing from the header
//! row. Rows without their mandatory fields are dropped with a warning;
//! any other cell that fails type conversion degrades to a null (or to 0
//! for count columns, which only ever feed sums) so one bad cell never
//! aborts a load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, warn};

use crate::models::{AgentPick, Conversion, ConversionBucket, MatchRound, Outcome, Side};

use super::StorageError;

const ROUNDS_TABLE: &str = "rounds";
const PLAYERS_TABLE: &str = "players";

/// Load the round-level table from a file.
pub fn load_rounds(path: &Path) -> Result<Vec<MatchRound>, StorageError> {
    debug!("Loading round records from {:?}", path);
    read_rounds(File::open(path)?)
}

/// Load the player-level table from a file.
pub fn load_picks(path: &Path) -> Result<Vec<AgentPick>, StorageError> {
    debug!("Loading player records from {:?}", path);
    read_picks(File::open(path)?)
}

/// Decode round records from any reader.
pub fn read_rounds<R: Read>(input: R) -> Result<Vec<MatchRound>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let date_col = required_column(&headers, ROUNDS_TABLE, "Date")?;
    let map_col = required_column(&headers, ROUNDS_TABLE, "Map")?;
    let outcome_col = required_column(&headers, ROUNDS_TABLE, "Outcome")?;
    let start_col = column_index(&headers, "Start");
    let first_wr_col = column_index(&headers, "First Half WR");
    let second_wr_col = column_index(&headers, "Second Half WR");
    let first_pistol_col = column_index(&headers, "First Pistol");
    let second_pistol_col = column_index(&headers, "Second Pistol");
    let atk_second_col = column_index(&headers, "Atk 2nd");
    let def_second_col = column_index(&headers, "Def 2nd");
    let atk_pp_col = column_index(&headers, "Atk PP %");
    let def_pp_col = column_index(&headers, "Def PP %");

    let mut rounds = Vec::new();
    let mut dropped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let date = cell(&record, Some(date_col)).and_then(parse_date);
        let map = cell(&record, Some(map_col));
        let outcome = cell(&record, Some(outcome_col));

        let (Some(date), Some(map), Some(outcome)) = (date, map, outcome) else {
            dropped += 1;
            warn!("Dropping rounds row {}: missing date, map or outcome", row + 2);
            continue;
        };

        rounds.push(MatchRound {
            date,
            map: map.to_string(),
            outcome: Outcome::parse(outcome),
            starting_side: cell(&record, start_col).and_then(Side::parse),
            first_half_win_rate: cell(&record, first_wr_col).and_then(parse_unit_interval),
            second_half_win_rate: cell(&record, second_wr_col).and_then(parse_unit_interval),
            first_pistol_won: cell(&record, first_pistol_col).and_then(parse_count),
            second_pistol_won: cell(&record, second_pistol_col).and_then(parse_count),
            atk_second_round: cell(&record, atk_second_col)
                .and_then(Conversion::parse)
                .filter(|c| c.bucket() == ConversionBucket::Win),
            def_second_round: cell(&record, def_second_col)
                .and_then(Conversion::parse)
                .filter(|c| c.bucket() == ConversionBucket::Loss),
            atk_post_plant: cell(&record, atk_pp_col).and_then(parse_metric),
            def_post_plant: cell(&record, def_pp_col).and_then(parse_metric),
        });
    }

    debug!("Loaded {} round records ({} dropped)", rounds.len(), dropped);
    Ok(rounds)
}

/// Decode player records from any reader.
pub fn read_picks<R: Read>(input: R) -> Result<Vec<AgentPick>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let player_col = required_column(&headers, PLAYERS_TABLE, "Player")?;
    let agent_col = required_column(&headers, PLAYERS_TABLE, "Agent")?;
    let map_col = required_column(&headers, PLAYERS_TABLE, "Map")?;
    let date_col = required_column(&headers, PLAYERS_TABLE, "Date")?;
    let result_col = required_column(&headers, PLAYERS_TABLE, "Result")?;
    let rounds_col = column_index(&headers, "Rounds");
    let kills_col = column_index(&headers, "Kills");
    let deaths_col = column_index(&headers, "Deaths");
    let assists_col = column_index(&headers, "Assists");
    let acs_col = column_index(&headers, "ACS");
    let fk_col = column_index(&headers, "FK");
    let plants_col = column_index(&headers, "Plants");
    let fbsr_col = column_index(&headers, "FBSR");
    let fkpr_col = column_index(&headers, "FKPR");
    let kpr_col = column_index(&headers, "KPR");
    let atk_entry_col = column_index(&headers, "Atk Entry");
    let fd_col = column_index(&headers, "FD");
    let multi_kills_col = column_index(&headers, "Multi Kills");
    let anchor_time_col = column_index(&headers, "Anchor Time");

    let mut picks = Vec::new();
    let mut dropped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let player = cell(&record, Some(player_col));
        let agent = cell(&record, Some(agent_col));
        let map = cell(&record, Some(map_col));
        let date = cell(&record, Some(date_col)).and_then(parse_date);
        let result = cell(&record, Some(result_col));

        let (Some(player), Some(agent), Some(map), Some(date), Some(result)) =
            (player, agent, map, date, result)
        else {
            dropped += 1;
            warn!("Dropping players row {}: missing a mandatory field", row + 2);
            continue;
        };

        picks.push(AgentPick {
            player: player.to_string(),
            agent: agent.to_string(),
            map: map.to_string(),
            date,
            outcome: Outcome::parse(result),
            rounds: count_or_zero(&record, rounds_col),
            kills: count_or_zero(&record, kills_col),
            deaths: count_or_zero(&record, deaths_col),
            assists: count_or_zero(&record, assists_col),
            first_kills: count_or_zero(&record, fk_col),
            plants: count_or_zero(&record, plants_col),
            acs: cell(&record, acs_col).and_then(parse_metric),
            fbsr: cell(&record, fbsr_col).and_then(parse_metric),
            fkpr: cell(&record, fkpr_col).and_then(parse_metric),
            kpr: cell(&record, kpr_col).and_then(parse_metric),
            atk_entry: cell(&record, atk_entry_col).and_then(parse_metric),
            fd: cell(&record, fd_col).and_then(parse_metric),
            multi_kills: cell(&record, multi_kills_col).and_then(parse_metric),
            anchor_time: cell(&record, anchor_time_col).and_then(parse_metric),
        });
    }

    debug!("Loaded {} player records ({} dropped)", picks.len(), dropped);
    Ok(picks)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn required_column(
    headers: &StringRecord,
    table: &'static str,
    column: &'static str,
) -> Result<usize, StorageError> {
    column_index(headers, column).ok_or(StorageError::MissingColumn { table, column })
}

/// Non-empty trimmed cell content, `None` for absent columns and blanks.
fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    let raw = record.get(index?)?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn count_or_zero(record: &StringRecord, index: Option<usize>) -> u32 {
    cell(record, index).and_then(parse_count).unwrap_or(0)
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    s.replace(',', "").parse::<f64>().ok()
}

/// Numeric or percent-string cell. The `%` suffix is stripped and the
/// number kept on its source scale.
fn parse_metric(raw: &str) -> Option<f64> {
    parse_number(raw.trim().trim_end_matches('%'))
}

/// Half win rates are fractions in [0,1]. A percent-suffixed cell is
/// divided by 100; a plain value outside the interval degrades to `None`.
fn parse_unit_interval(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let value = if let Some(stripped) = trimmed.strip_suffix('%') {
        parse_number(stripped)? / 100.0
    } else {
        parse_number(trimmed)?
    };
    (0.0..=1.0).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUNDS_CSV: &str = "\
Date,Map,Outcome,Start,First Half WR,Second Half WR,First Pistol,Second Pistol,Atk 2nd,Def 2nd,Atk PP %,Def PP %
2025-07-01,Ascent,Win,Attack,0.75,0.42,1,0,WW,LW,68%,41%
2025-07-02,Bind,LOSS,Defence,33%,0.5,0,1,WL,LL,55,38
2025-07-03,Ascent,draw,,,,1,1,,,,
";

    const PICKS_CSV: &str = "\
Player,Agent,Map,Date,Result,Rounds,Kills,Deaths,Assists,ACS,FK,Plants,FBSR,KPR
ominous,Jett,Ascent,2025-07-01,Win,24,20,14,5,245,4,1,55%,0.83
frost,Omen,Ascent,2025-07-01,Win,24,15,16,9,198,1,3,,0.62
";

    #[test]
    fn test_read_rounds_typed_cells() {
        let rounds = read_rounds(ROUNDS_CSV.as_bytes()).unwrap();
        assert_eq!(rounds.len(), 3);

        let first = &rounds[0];
        assert_eq!(first.map, "Ascent");
        assert_eq!(first.outcome, Outcome::Win);
        assert_eq!(first.starting_side, Some(Side::Attack));
        assert_eq!(first.first_half_win_rate, Some(0.75));
        assert_eq!(first.first_pistol_won, Some(1));
        assert_eq!(first.atk_second_round, Some(Conversion::WW));
        assert_eq!(first.def_second_round, Some(Conversion::LW));
        assert_eq!(first.atk_post_plant, Some(68.0));
    }

    #[test]
    fn test_read_rounds_case_insensitive_outcome() {
        let rounds = read_rounds(ROUNDS_CSV.as_bytes()).unwrap();
        assert_eq!(rounds[1].outcome, Outcome::Loss);
        assert_eq!(rounds[2].outcome, Outcome::Draw);
    }

    #[test]
    fn test_read_rounds_percent_half_rate() {
        let rounds = read_rounds(ROUNDS_CSV.as_bytes()).unwrap();
        // "33%" converts to the fraction
        assert_eq!(rounds[1].first_half_win_rate, Some(0.33));
    }

    #[test]
    fn test_read_rounds_blank_cells_are_null() {
        let rounds = read_rounds(ROUNDS_CSV.as_bytes()).unwrap();
        let third = &rounds[2];
        assert_eq!(third.starting_side, None);
        assert_eq!(third.first_half_win_rate, None);
        assert_eq!(third.atk_second_round, None);
        assert_eq!(third.atk_post_plant, None);
    }

    #[test]
    fn test_read_rounds_missing_required_column() {
        let csv = "Date,Map\n2025-07-01,Ascent\n";
        let err = read_rounds(csv.as_bytes()).unwrap_err();
        match err {
            StorageError::MissingColumn { table, column } => {
                assert_eq!(table, "rounds");
                assert_eq!(column, "Outcome");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_read_rounds_drops_rows_missing_mandatory_fields() {
        let csv = "\
Date,Map,Outcome
2025-07-01,Ascent,Win
,Bind,Loss
2025-07-02,,Win
not-a-date,Haven,Win
2025-07-03,Split,Loss
";
        let rounds = read_rounds(csv.as_bytes()).unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].map, "Ascent");
        assert_eq!(rounds[1].map, "Split");
    }

    #[test]
    fn test_read_rounds_bad_cell_degrades_to_null() {
        let csv = "\
Date,Map,Outcome,Start,First Half WR,Second Half WR,First Pistol
2025-07-01,Ascent,Win,Mid,1.4,0.5,two
";
        let rounds = read_rounds(csv.as_bytes()).unwrap();
        assert_eq!(rounds.len(), 1);
        // Unknown side, out-of-range rate and non-numeric count all degrade
        assert_eq!(rounds[0].starting_side, None);
        assert_eq!(rounds[0].first_half_win_rate, None);
        assert_eq!(rounds[0].second_half_win_rate, Some(0.5));
        assert_eq!(rounds[0].first_pistol_won, None);
    }

    #[test]
    fn test_read_rounds_conversion_wrong_bucket_rejected() {
        // An LL in the attack column (or WW in the defence column) is not a
        // legal value for that side and degrades to null.
        let csv = "\
Date,Map,Outcome,Atk 2nd,Def 2nd
2025-07-01,Ascent,Win,LL,WW
";
        let rounds = read_rounds(csv.as_bytes()).unwrap();
        assert_eq!(rounds[0].atk_second_round, None);
        assert_eq!(rounds[0].def_second_round, None);
    }

    #[test]
    fn test_read_picks_typed_cells() {
        let picks = read_picks(PICKS_CSV.as_bytes()).unwrap();
        assert_eq!(picks.len(), 2);

        let jett = &picks[0];
        assert_eq!(jett.player, "ominous");
        assert_eq!(jett.agent, "Jett");
        assert_eq!(jett.outcome, Outcome::Win);
        assert_eq!(jett.rounds, 24);
        assert_eq!(jett.kills, 20);
        assert_eq!(jett.acs, Some(245.0));
        // Percent-string benchmark cell keeps its source scale
        assert_eq!(jett.fbsr, Some(55.0));
        assert_eq!(jett.kpr, Some(0.83));
        // Column absent from the table entirely
        assert_eq!(jett.anchor_time, None);

        let omen = &picks[1];
        assert_eq!(omen.fbsr, None);
    }

    #[test]
    fn test_read_picks_missing_required_column() {
        let csv = "Player,Agent,Map,Date\nominous,Jett,Ascent,2025-07-01\n";
        let err = read_picks(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StorageError::MissingColumn {
                table: "players",
                column: "Result"
            }
        ));
    }

    #[test]
    fn test_read_picks_bad_count_is_zero() {
        let csv = "\
Player,Agent,Map,Date,Result,Rounds,Kills
ominous,Jett,Ascent,2025-07-01,Win,n/a,17
";
        let picks = read_picks(csv.as_bytes()).unwrap();
        assert_eq!(picks[0].rounds, 0);
        assert_eq!(picks[0].kills, 17);
    }

    #[test]
    fn test_load_rounds_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROUNDS_CSV.as_bytes()).unwrap();

        let rounds = load_rounds(file.path()).unwrap();
        assert_eq!(rounds.len(), 3);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(
            parse_date("2025-07-01"),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
        assert_eq!(
            parse_date("01/07/2025"),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
        assert_eq!(parse_date("July 1st"), None);
    }

    #[test]
    fn test_parse_unit_interval() {
        assert_eq!(parse_unit_interval("0.55"), Some(0.55));
        assert_eq!(parse_unit_interval("55%"), Some(0.55));
        assert_eq!(parse_unit_interval("1.0"), Some(1.0));
        assert_eq!(parse_unit_interval("1.4"), None);
        assert_eq!(parse_unit_interval("-"), None);
    }
}
