use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mcda_rank::config::Config;
use mcda_rank::dataset::{AlternativeUpdate, CriterionUpdate, Dataset};
use mcda_rank::scoring::{Alternative, Criterion, CriterionType, Method};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank alternatives with one method (default if no subcommand)
    Rank {
        /// Method id (saw, topsis, ahp, moora, smart, wp); defaults to the configured method
        #[arg(short, long)]
        method: Option<String>,
        /// Record the result in the calculation history
        #[arg(long)]
        save: bool,
        #[arg(short, long, value_enum, default_value_t = RankFormat::Table)]
        format: RankFormat,
    },
    /// Show every alternative's rank under every method side by side
    Compare,
    /// List the available ranking methods
    Methods,
    /// Show the current criteria and alternatives
    Show,
    /// Add, update or remove criteria
    Criterion {
        #[command(subcommand)]
        action: CriterionAction,
    },
    /// Add, update or remove alternatives
    Alternative {
        #[command(subcommand)]
        action: AlternativeAction,
    },
    /// Set one alternative's value for one criterion
    Set {
        /// Alternative id or name
        alternative: String,
        /// Criterion id or name
        criterion: String,
        #[arg(allow_negative_numbers = true, value_parser = parse_finite)]
        value: f64,
    },
    /// Replace the dataset with the built-in supplier selection example
    Reset,
    /// Replace the dataset with a name-keyed YAML or JSON sheet
    Import {
        file: PathBuf,
        /// Print the imported dataset without saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Export results of every method as JSON, or one method as TSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Method for TSV export; defaults to the configured method
        #[arg(short, long)]
        method: Option<String>,
    },
    /// List or clear saved calculations
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand, Debug)]
enum CriterionAction {
    Add {
        name: String,
        #[arg(short, long, default_value_t = 1.0, value_parser = parse_finite)]
        weight: f64,
        /// benefit or cost
        #[arg(short = 't', long = "type", default_value = "benefit")]
        kind: String,
        /// Share in percent, for display only
        #[arg(long, value_parser = parse_finite)]
        percentage: Option<f64>,
    },
    Update {
        /// Criterion id or name
        criterion: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long, value_parser = parse_finite)]
        weight: Option<f64>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(long, value_parser = parse_finite)]
        percentage: Option<f64>,
    },
    /// Remove a criterion and its values from every alternative
    Remove {
        /// Criterion id or name
        criterion: String,
    },
}

#[derive(Subcommand, Debug)]
enum AlternativeAction {
    Add {
        name: String,
        /// Value as CRITERION=NUMBER (criterion id or name); repeatable
        #[arg(long = "value", value_name = "CRITERION=NUMBER")]
        values: Vec<String>,
    },
    Update {
        /// Alternative id or name
        alternative: String,
        #[arg(long)]
        name: Option<String>,
        /// Value as CRITERION=NUMBER; merged into existing values
        #[arg(long = "value", value_name = "CRITERION=NUMBER")]
        values: Vec<String>,
    },
    Remove {
        /// Alternative id or name
        alternative: String,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List saved calculations, newest first (default)
    List,
    /// Delete saved calculations
    Clear {
        /// Only delete entries older than this, e.g. "7d" or "12h"
        #[arg(long)]
        older_than: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum RankFormat {
    Table,
    Tsv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum ExportFormat {
    Json,
    Tsv,
}

#[derive(Parser, Debug)]
#[command(name = "mcda-rank")]
#[command(about = "Rank alternatives against weighted criteria with MCDA methods", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/mcda-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to dataset file (defaults to ~/.config/mcda-rank/dataset.json)
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Resolved settings shared by every command.
struct Session {
    config: Config,
    dataset_path: PathBuf,
    verbose: bool,
    use_colors: bool,
}

/// Unwrap a result or print the error chain and exit with `code`.
fn or_exit<T>(result: anyhow::Result<T>, code: i32, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {:#}", what, e);
            std::process::exit(code);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Rank {
        method: None,
        save: false,
        format: RankFormat::Table,
    });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = or_exit(mcda_rank::config::load_config(config_path), EXIT_CONFIG, "Config error");

    if let Err(errors) = mcda_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let dataset_path = match cli.dataset.as_deref().or(config.dataset.as_deref()) {
        Some(p) => mcda_rank::config::expand_home(p),
        None => mcda_rank::dataset::get_dataset_path(),
    };
    let dataset_path = or_exit(dataset_path, EXIT_CONFIG, "Config error");

    if cli.verbose {
        eprintln!("Dataset: {}", dataset_path.display());
        eprintln!(
            "Default method: {}, precision: {}",
            config.default_method(),
            config.precision()
        );
    }

    let session = Session {
        config,
        dataset_path,
        verbose: cli.verbose,
        use_colors: !cli.no_color && mcda_rank::output::should_use_colors(),
    };

    match command {
        Commands::Rank { method, save, format } => cmd_rank(&session, method.as_deref(), save, format),
        Commands::Compare => cmd_compare(&session),
        Commands::Methods => println!("{}", mcda_rank::output::format_methods(session.use_colors)),
        Commands::Show => {
            let data = load_data(&session);
            println!("{}", mcda_rank::output::format_dataset(&data, session.use_colors));
        }
        Commands::Criterion { action } => cmd_criterion(&session, action),
        Commands::Alternative { action } => cmd_alternative(&session, action),
        Commands::Set {
            alternative,
            criterion,
            value,
        } => {
            let mut data = load_data(&session);
            let alt_id = or_exit(resolve_alternative(&data, &alternative), EXIT_DATA, "Error");
            let crit_id = or_exit(resolve_criterion(&data, &criterion), EXIT_DATA, "Error");
            or_exit(data.set_value(&alt_id, &crit_id, value), EXIT_DATA, "Error");
            store_data(&session, &data);
            println!("{}", describe_set(&data, &alt_id, &crit_id, value));
        }
        Commands::Reset => {
            store_data(&session, &Dataset::sample());
            println!("Dataset reset to the sample supplier selection example");
        }
        Commands::Import { file, dry_run } => cmd_import(&session, &file, dry_run),
        Commands::Export { output, format, method } => {
            cmd_export(&session, output.as_deref(), format, method.as_deref())
        }
        Commands::History { action } => cmd_history(&session, action.unwrap_or(HistoryAction::List)),
    }

    if session.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load the dataset and print lint warnings to stderr
fn load_data(session: &Session) -> Dataset {
    let data = or_exit(
        mcda_rank::dataset::load_dataset(&session.dataset_path),
        EXIT_IO,
        "Dataset error",
    );

    if session.verbose {
        eprintln!(
            "Loaded {} criteria and {} alternatives",
            data.criteria.len(),
            data.alternatives.len()
        );
    }

    warn_invalid(&data);
    data
}

fn warn_invalid(data: &Dataset) {
    if let Err(warnings) = mcda_rank::scoring::validate_dataset(&data.criteria, &data.alternatives) {
        eprintln!("Dataset warnings:");
        for warning in warnings {
            eprintln!("  - {}", warning);
        }
    }
}

fn store_data(session: &Session, data: &Dataset) {
    or_exit(
        mcda_rank::dataset::save_dataset(&session.dataset_path, data),
        EXIT_IO,
        "Dataset error",
    );
    if session.verbose {
        eprintln!("Saved dataset to {}", session.dataset_path.display());
    }
}

fn resolve_method(session: &Session, method: Option<&str>) -> Method {
    match method {
        Some(id) => or_exit(id.parse::<Method>(), EXIT_CONFIG, "Invalid method"),
        None => session.config.default_method(),
    }
}

fn resolve_criterion(data: &Dataset, key: &str) -> anyhow::Result<String> {
    data.find_criterion_id(key)
        .ok_or_else(|| anyhow::anyhow!("No criterion with id or name '{}'", key))
}

fn resolve_alternative(data: &Dataset, key: &str) -> anyhow::Result<String> {
    data.find_alternative_id(key)
        .ok_or_else(|| anyhow::anyhow!("No alternative with id or name '{}'", key))
}

fn parse_kind(kind: &str) -> anyhow::Result<CriterionType> {
    CriterionType::parse(kind)
        .ok_or_else(|| anyhow::anyhow!("Unknown criterion type '{}' (expected benefit or cost)", kind))
}

/// Confirmation line for `set`, using display names for both ids
fn describe_set(data: &Dataset, alt_id: &str, crit_id: &str, value: f64) -> String {
    let crit_name = data.criterion(crit_id).map_or(crit_id, |c| c.name.as_str());
    format!("Set {} / {} = {}", data.alternative_name(alt_id), crit_name, value)
}

/// Parse a number, refusing `inf` and `NaN` (JSON cannot store them)
fn parse_finite(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("'{}' is not a finite number", raw.trim())),
        Err(_) => Err(format!("'{}' is not a number", raw.trim())),
    }
}

/// Parse `CRITERION=NUMBER` pairs into values keyed by criterion id
fn parse_values(data: &Dataset, pairs: &[String]) -> anyhow::Result<BTreeMap<String, f64>> {
    let mut values = BTreeMap::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            anyhow::bail!("Expected CRITERION=NUMBER, got '{}'", pair);
        };
        let id = resolve_criterion(data, key)?;
        let value = parse_finite(raw).map_err(|e| anyhow::anyhow!("Value for '{}': {}", key.trim(), e))?;
        values.insert(id, value);
    }
    Ok(values)
}

fn cmd_rank(session: &Session, method: Option<&str>, save: bool, format: RankFormat) {
    let method = resolve_method(session, method);
    let data = load_data(session);

    if data.is_insufficient() {
        eprintln!("{}", mcda_rank::output::INSUFFICIENT_DATA);
        std::process::exit(EXIT_DATA);
    }

    let calc_start = Instant::now();
    let results = mcda_rank::scoring::compute_results(method, &data.criteria, &data.alternatives);
    if session.verbose {
        eprintln!("Computed {} for {} alternatives in {:?}", method, results.len(), calc_start.elapsed());
    }

    let precision = session.config.precision();
    match format {
        RankFormat::Table => println!(
            "{}",
            mcda_rank::output::format_ranked_table(method, &results, &data, precision, session.use_colors)
        ),
        RankFormat::Tsv => println!("{}", mcda_rank::output::format_tsv(&results, &data, precision)),
        RankFormat::Json => {
            let json = or_exit(
                serde_json::to_string_pretty(&results).map_err(anyhow::Error::from),
                EXIT_IO,
                "Serialization error",
            );
            println!("{}", json);
        }
    }

    if save {
        if !session.config.history_enabled() {
            eprintln!("History is disabled in config; result not saved.");
            return;
        }
        let history_path = or_exit(mcda_rank::history::get_history_path(), EXIT_CONFIG, "Config error");
        let mut history = or_exit(mcda_rank::history::load_history(&history_path), EXIT_IO, "History error");
        if history.record(method, results) {
            history.truncate(session.config.max_history());
            or_exit(
                mcda_rank::history::save_history(&history_path, &history),
                EXIT_IO,
                "History error",
            );
            if session.verbose {
                eprintln!("Saved to history ({} entries)", history.len());
            }
        }
    }
}

fn cmd_compare(session: &Session) {
    let data = load_data(session);

    let calc_start = Instant::now();
    let all = mcda_rank::scoring::compute_all_results(&data.criteria, &data.alternatives);
    if session.verbose {
        eprintln!("Computed {} methods in {:?}", all.len(), calc_start.elapsed());
    }

    if all.is_empty() {
        eprintln!("{}", mcda_rank::output::INSUFFICIENT_DATA);
        std::process::exit(EXIT_DATA);
    }

    println!("{}", mcda_rank::output::format_comparison(&all, &data, session.use_colors));
}

fn cmd_criterion(session: &Session, action: CriterionAction) {
    let mut data = load_data(session);

    match action {
        CriterionAction::Add {
            name,
            weight,
            kind,
            percentage,
        } => {
            let kind = or_exit(parse_kind(&kind), EXIT_DATA, "Error");
            let mut criterion = Criterion::new(data.next_criterion_id(), name.trim(), weight, kind);
            criterion.percentage = percentage;
            let id = criterion.id.clone();
            or_exit(data.add_criterion(criterion), EXIT_DATA, "Error");
            store_data(session, &data);
            println!("Added criterion {} ({})", id, name.trim());
        }
        CriterionAction::Update {
            criterion,
            name,
            weight,
            kind,
            percentage,
        } => {
            let id = or_exit(resolve_criterion(&data, &criterion), EXIT_DATA, "Error");
            let kind = kind.map(|k| or_exit(parse_kind(&k), EXIT_DATA, "Error"));
            let update = CriterionUpdate {
                name,
                weight,
                kind,
                importance: None,
                percentage,
            };
            or_exit(data.update_criterion(&id, update), EXIT_DATA, "Error");
            store_data(session, &data);
            println!("Updated criterion {}", id);
        }
        CriterionAction::Remove { criterion } => {
            let id = or_exit(resolve_criterion(&data, &criterion), EXIT_DATA, "Error");
            let removed = or_exit(data.remove_criterion(&id), EXIT_DATA, "Error");
            store_data(session, &data);
            println!("Removed criterion {} ({})", removed.id, removed.name);
        }
    }
}

fn cmd_alternative(session: &Session, action: AlternativeAction) {
    let mut data = load_data(session);

    match action {
        AlternativeAction::Add { name, values } => {
            let values = or_exit(parse_values(&data, &values), EXIT_DATA, "Error");
            let mut alternative = Alternative::new(data.next_alternative_id(), name.trim());
            alternative.values = values;
            let id = alternative.id.clone();
            or_exit(data.add_alternative(alternative), EXIT_DATA, "Error");
            store_data(session, &data);
            println!("Added alternative {} ({})", id, name.trim());
        }
        AlternativeAction::Update {
            alternative,
            name,
            values,
        } => {
            let id = or_exit(resolve_alternative(&data, &alternative), EXIT_DATA, "Error");
            let values = or_exit(parse_values(&data, &values), EXIT_DATA, "Error");
            or_exit(
                data.update_alternative(&id, AlternativeUpdate { name, values }),
                EXIT_DATA,
                "Error",
            );
            store_data(session, &data);
            println!("Updated alternative {}", id);
        }
        AlternativeAction::Remove { alternative } => {
            let id = or_exit(resolve_alternative(&data, &alternative), EXIT_DATA, "Error");
            let removed = or_exit(data.remove_alternative(&id), EXIT_DATA, "Error");
            store_data(session, &data);
            println!("Removed alternative {} ({})", removed.id, removed.name);
        }
    }
}

fn cmd_import(session: &Session, file: &Path, dry_run: bool) {
    let data = or_exit(mcda_rank::dataset::import_sheet(file), EXIT_DATA, "Import error");

    if session.verbose {
        eprintln!(
            "Imported {} criteria and {} alternatives from {}",
            data.criteria.len(),
            data.alternatives.len(),
            file.display()
        );
    }
    warn_invalid(&data);

    if dry_run {
        println!("{}", mcda_rank::output::format_dataset(&data, session.use_colors));
        return;
    }

    store_data(session, &data);
    println!(
        "Imported {} criteria and {} alternatives",
        data.criteria.len(),
        data.alternatives.len()
    );
}

fn cmd_export(session: &Session, output: Option<&Path>, format: ExportFormat, method: Option<&str>) {
    let data = load_data(session);

    let contents = match format {
        ExportFormat::Json => {
            let all = mcda_rank::scoring::compute_all_results(&data.criteria, &data.alternatives);
            or_exit(mcda_rank::output::export_json(&data, &all), EXIT_IO, "Export error")
        }
        ExportFormat::Tsv => {
            let method = resolve_method(session, method);
            let results = mcda_rank::scoring::compute_results(method, &data.criteria, &data.alternatives);
            mcda_rank::output::format_tsv(&results, &data, session.config.precision())
        }
    };

    match output {
        Some(path) => {
            or_exit(mcda_rank::output::write_output(path, &contents), EXIT_IO, "Export error");
            if session.verbose {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => println!("{}", contents),
    }
}

fn cmd_history(session: &Session, action: HistoryAction) {
    let history_path = or_exit(mcda_rank::history::get_history_path(), EXIT_CONFIG, "Config error");
    let mut history = or_exit(mcda_rank::history::load_history(&history_path), EXIT_IO, "History error");

    match action {
        HistoryAction::List => {
            let data = load_data(session);
            println!(
                "{}",
                mcda_rank::output::format_history(&history, &data, session.use_colors)
            );
        }
        HistoryAction::Clear { older_than } => {
            let removed = match older_than {
                Some(age) => {
                    let age = or_exit(
                        humantime::parse_duration(&age).map_err(anyhow::Error::from),
                        EXIT_CONFIG,
                        "Invalid duration",
                    );
                    history.prune_older_than(age)
                }
                None => {
                    let count = history.len();
                    history.clear();
                    count
                }
            };
            or_exit(
                mcda_rank::history::save_history(&history_path, &history),
                EXIT_IO,
                "History error",
            );
            println!("Removed {} saved calculation(s)", removed);
        }
    }
}
