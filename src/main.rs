use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrim_lens::calculate::{
    aggregate_agent_stats, aggregate_outcomes, aggregate_player_role, aggregate_round_stats,
    composition_maps, conversion_split, pistol_win_rates, radar_comparison, top_compositions,
};
use scrim_lens::config::AppConfig;
use scrim_lens::filter::{filter_by_category, filter_by_date_range, CategoryFilter};
use scrim_lens::models::{AgentPick, ConversionBucket, DateRange, MatchRound, Role};
use scrim_lens::storage::{load_picks, load_rounds, StorageConfig};

#[derive(Parser)]
#[command(name = "scrim-lens")]
#[command(about = "Local Valorant scrim analytics engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory containing the scrim CSV tables
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-map games, wins, draws, losses and win rate
    Overview {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Attack/defence round win rates and post-plant success per map
    Rounds {
        /// Map filter ("All" for every map)
        #[arg(long, default_value = "All")]
        map: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Pistol round win rates, with a second-round breakdown for one map
    Pistols {
        /// Map to break second-round conversions down for
        #[arg(long)]
        map: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Top agent compositions for a map
    Comps {
        /// Map to rank compositions on (omit to list available maps)
        map: Option<String>,

        /// How many compositions to show
        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Per-agent stat lines for a player
    Player {
        /// Player name
        name: String,

        #[arg(long, default_value = "All")]
        map: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Role benchmark comparison for a player
    Compare {
        /// Player name
        name: String,

        /// Role to benchmark against (Duelist, Initiator, Controller, Sentinel)
        #[arg(long)]
        role: String,

        #[arg(long, default_value = "All")]
        map: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, falling back to built-in defaults when no file exists
    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    // Initialize tracing
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scrim-lens v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig {
        data_dir: config.data_dir.clone(),
        rounds_file: config.rounds_file.clone(),
        players_file: config.players_file.clone(),
    };

    match cli.command {
        Commands::Overview { from, to } => {
            let rounds = apply_round_filters(
                load_rounds_or_empty(&storage),
                &date_range(&from, &to),
                &CategoryFilter::All,
            );

            let summary = aggregate_outcomes(&rounds);
            if summary.is_empty() {
                println!("No scrim data in this date range.");
                return Ok(());
            }

            println!("\n=== Map Overview ===");
            println!(
                "{:<12} {:>6} {:>5} {:>6} {:>7} {:>9}",
                "Map", "Games", "Wins", "Draws", "Losses", "Win Rate"
            );
            for row in &summary {
                println!(
                    "{:<12} {:>6} {:>5} {:>6} {:>7} {:>9}",
                    row.map,
                    row.games,
                    row.wins,
                    row.draws,
                    row.losses,
                    fmt_rate(row.win_rate)
                );
            }
        }
        Commands::Rounds { map, from, to } => {
            let rounds = apply_round_filters(
                load_rounds_or_empty(&storage),
                &date_range(&from, &to),
                &CategoryFilter::from_selection(&map),
            );

            let summary = aggregate_round_stats(&rounds);
            if summary.is_empty() {
                println!("No scrim data for these filters.");
                return Ok(());
            }

            println!("\n=== Round Insights ===");
            println!(
                "{:<12} {:>6} {:>3} {:>3} {:>3} {:>8} {:>8} {:>9} {:>11} {:>9}",
                "Map", "Games", "W", "D", "L", "Atk WR", "Def WR", "Round WR", "Post Plant", "Retakes"
            );
            for row in &summary {
                println!(
                    "{:<12} {:>6} {:>3} {:>3} {:>3} {:>8} {:>8} {:>9} {:>11} {:>9}",
                    row.map,
                    row.games,
                    row.wins,
                    row.draws,
                    row.losses,
                    fmt_rate(row.attack_win_rate),
                    fmt_rate(row.defence_win_rate),
                    fmt_rate(row.round_win_rate),
                    fmt_percent(row.atk_post_plant),
                    fmt_percent(row.def_post_plant)
                );
            }
        }
        Commands::Pistols { map, from, to } => {
            let rounds = apply_round_filters(
                load_rounds_or_empty(&storage),
                &date_range(&from, &to),
                &CategoryFilter::All,
            );

            let mut summary = pistol_win_rates(&rounds);
            if summary.is_empty() {
                println!("No scrim data in this date range.");
                return Ok(());
            }
            summary.sort_by(|a, b| {
                b.win_rate
                    .partial_cmp(&a.win_rate)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            println!("\n=== Pistol Win Rates ===");
            println!("{:<12} {:>4} {:>7} {:>9}", "Map", "Won", "Played", "Win Rate");
            for row in &summary {
                println!(
                    "{:<12} {:>4} {:>7} {:>9}",
                    row.map,
                    row.pistols_won,
                    row.pistols_played,
                    fmt_rate(row.win_rate)
                );
            }

            if let Some(map) = map {
                println!("\n=== 2nd Round Outcomes on {} ===", map);
                print_conversion(&rounds, &map, ConversionBucket::Win, "After winning pistol");
                print_conversion(&rounds, &map, ConversionBucket::Loss, "After losing pistol");
            }
        }
        Commands::Comps { map, top, from, to } => {
            let rounds = apply_round_filters(
                load_rounds_or_empty(&storage),
                &date_range(&from, &to),
                &CategoryFilter::All,
            );
            let picks = load_picks_or_empty(&storage);

            let Some(map) = map else {
                let maps = composition_maps(&picks);
                if maps.is_empty() {
                    println!("No composition data available.");
                } else {
                    println!("Maps with composition data:");
                    for map in maps {
                        println!("  {}", map);
                    }
                }
                return Ok(());
            };

            let top = top.unwrap_or(config.calibration.top_compositions);
            let stats = top_compositions(&picks, &rounds, &map, top);
            if stats.is_empty() {
                println!("No composition data available for {}.", map);
                return Ok(());
            }

            println!("\n=== Top Compositions on {} ===", map);
            for (i, stat) in stats.iter().enumerate() {
                println!(
                    "{:>2}. {:>7} ({} games)  {}",
                    i + 1,
                    fmt_rate(stat.win_rate),
                    stat.games,
                    stat.composition
                );
            }
        }
        Commands::Player { name, map, from, to } => {
            let picks = apply_pick_filters(
                load_picks_or_empty(&storage),
                &date_range(&from, &to),
                &CategoryFilter::from_selection(&map),
                &CategoryFilter::Only(name.clone()),
            );

            let lines = aggregate_agent_stats(&picks);
            if lines.is_empty() {
                println!("No data for this player in the selected filters.");
                return Ok(());
            }

            println!("\n=== Agent Performance for {} ===", name);
            println!(
                "{:<10} {:>6} {:>5} {:>6} {:>7} {:>7} {:>4} {:>6} {:>6} {:>6}",
                "Agent", "Rounds", "Kills", "Deaths", "Assists", "ACS", "FK", "Plants", "K/D", "K+A/R"
            );
            for line in &lines {
                println!(
                    "{:<10} {:>6} {:>5} {:>6} {:>7} {:>7} {:>4} {:>6} {:>6} {:>6}",
                    line.agent,
                    line.rounds,
                    line.kills,
                    line.deaths,
                    line.assists,
                    fmt_value(line.acs),
                    line.first_kills,
                    line.plants,
                    fmt_value(line.kd_ratio),
                    fmt_value(line.ka_per_round)
                );
            }
        }
        Commands::Compare {
            name,
            role,
            map,
            from,
            to,
        } => {
            let role = Role::parse(&role).unwrap_or_else(|| {
                panic!(
                    "Unknown role: {} (expected Duelist, Initiator, Controller or Sentinel)",
                    role
                )
            });

            let picks = apply_pick_filters(
                load_picks_or_empty(&storage),
                &date_range(&from, &to),
                &CategoryFilter::from_selection(&map),
                &CategoryFilter::Only(name.clone()),
            );

            let aggregate = aggregate_player_role(&picks, role, &config.calibration);
            if aggregate.rows == 0 {
                println!("No agents played in the selected role during this period.");
                return Ok(());
            }

            let Some(radar) = radar_comparison(&aggregate, &config.calibration) else {
                println!("No benchmark configured for {}.", role);
                return Ok(());
            };

            println!("\n=== {} vs Benchmark for {} ===", role, name);
            println!(
                "{:<14} {:>8} {:>8} {:>8} {:>8} {:>8}",
                "Metric", "Player", "Bench", "P(0-1)", "B(0-1)", "Delta"
            );
            for axis in &radar.axes {
                println!(
                    "{:<14} {:>8} {:>8} {:>8.2} {:>8.2} {:>+8.2}",
                    axis.metric.to_string(),
                    fmt_value(axis.player),
                    format!("{:.2}", axis.benchmark),
                    axis.player_scaled,
                    axis.benchmark_scaled,
                    axis.delta
                );
            }
        }
    }

    Ok(())
}

fn load_rounds_or_empty(storage: &StorageConfig) -> Vec<MatchRound> {
    match load_rounds(&storage.rounds_path()) {
        Ok(rounds) => rounds,
        Err(e) => {
            tracing::error!("Couldn't load {:?}: {}", storage.rounds_path(), e);
            Vec::new()
        }
    }
}

fn load_picks_or_empty(storage: &StorageConfig) -> Vec<AgentPick> {
    match load_picks(&storage.players_path()) {
        Ok(picks) => picks,
        Err(e) => {
            tracing::error!("Couldn't load {:?}: {}", storage.players_path(), e);
            Vec::new()
        }
    }
}

fn apply_round_filters(
    rounds: Vec<MatchRound>,
    range: &Option<DateRange>,
    map: &CategoryFilter,
) -> Vec<MatchRound> {
    let rounds = match range {
        Some(range) => filter_by_date_range(&rounds, range),
        None => rounds,
    };
    filter_by_category(&rounds, map, |r| r.map.as_str())
}

fn apply_pick_filters(
    picks: Vec<AgentPick>,
    range: &Option<DateRange>,
    map: &CategoryFilter,
    player: &CategoryFilter,
) -> Vec<AgentPick> {
    let picks = match range {
        Some(range) => filter_by_date_range(&picks, range),
        None => picks,
    };
    let picks = filter_by_category(&picks, map, |p| p.map.as_str());
    filter_by_category(&picks, player, |p| p.player.as_str())
}

fn print_conversion(rounds: &[MatchRound], map: &str, bucket: ConversionBucket, label: &str) {
    match conversion_split(rounds, map, bucket) {
        Some(split) => {
            let parts: Vec<String> = split
                .split
                .iter()
                .map(|c| format!("{}: {:.1}% ({})", c.outcome, c.share, c.count))
                .collect();
            println!("{}: {}", label, parts.join("   "));
        }
        None => println!("{}: no conversion data for this map.", label),
    }
}

/// Parse date range arguments; open ends fall back to the full range.
fn date_range(from: &Option<String>, to: &Option<String>) -> Option<DateRange> {
    if from.is_none() && to.is_none() {
        return None;
    }
    let from = from
        .as_deref()
        .map(parse_date_arg)
        .unwrap_or(NaiveDate::MIN);
    let to = to.as_deref().map(parse_date_arg).unwrap_or(NaiveDate::MAX);
    Some(DateRange::new(from, to))
}

fn parse_date_arg(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .unwrap_or_else(|_| panic!("Invalid date (expected YYYY-MM-DD): {}", raw))
}

/// Fraction rendered as a percentage, `-` for no data.
fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "-".to_string(),
    }
}

/// Percent-scale value rendered as-is, `-` for no data.
fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.1}%", value),
        None => "-".to_string(),
    }
}

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "-".to_string(),
    }
}
