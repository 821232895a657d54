//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonQuoteAdapter;
use crate::adapters::svg_chart::SvgChartWriter;
use crate::adapters::table_writer::{CsvTableWriter, JsonTableWriter};
use crate::domain::chart_data::ChartData;
use crate::domain::config_validation::{parse_date, validate_config};
use crate::domain::error::PriceAlignError;
use crate::domain::selection::{parse_symbols, SelectionChange, SelectionError, SymbolSelection};
use crate::domain::series_store::SeriesStore;
use crate::domain::settings::{
    AnalysisSettings, OutputFormat, SourceFormat, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
};
use crate::domain::summary::SeriesSummary;
use crate::domain::time_range::TimeRange;
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "pricealign", about = "Align multi-symbol price histories for charting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where price histories come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// csv or json
    #[arg(long)]
    pub source_format: Option<String>,
}

/// Which symbols and which window.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Comma separated tickers, e.g. AAPL,MSFT
    #[arg(long)]
    pub symbols: Option<String>,
    /// 1W, 1M, 6M or 1Y
    #[arg(long)]
    pub range: Option<String>,
    /// End of the window (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the date-aligned price table
    Align {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// csv, json or svg
        #[arg(long)]
        format: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Render the aligned table as an SVG line chart
    Chart {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Print last price, change and range high/low per symbol
    Summary {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show data range for symbol(s)
    Info {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        symbols: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Values given on the command line, taking precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub source_format: Option<String>,
    pub symbols: Option<String>,
    pub range: Option<String>,
    pub as_of: Option<String>,
    pub output_format: Option<String>,
    pub output_path: Option<PathBuf>,
    pub chart_width: Option<u32>,
    pub chart_height: Option<u32>,
}

impl Overrides {
    fn from_args(source: &SourceArgs, selection: &SelectionArgs) -> Self {
        Self {
            data_dir: source.data_dir.clone(),
            source_format: source.source_format.clone(),
            symbols: selection.symbols.clone(),
            range: selection.range.clone(),
            as_of: selection.as_of.clone(),
            ..Self::default()
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Align {
            source,
            selection,
            format,
            output,
            pretty,
        } => {
            let overrides = Overrides {
                output_format: format,
                output_path: output,
                ..Overrides::from_args(&source, &selection)
            };
            run_align(source.config.as_deref(), &overrides, pretty)
        }
        Command::Chart {
            source,
            selection,
            output,
            width,
            height,
        } => {
            let overrides = Overrides {
                output_format: Some("svg".to_string()),
                output_path: output,
                chart_width: width,
                chart_height: height,
                ..Overrides::from_args(&source, &selection)
            };
            run_align(source.config.as_deref(), &overrides, false)
        }
        Command::Summary { source, selection } => run_summary(
            source.config.as_deref(),
            &Overrides::from_args(&source, &selection),
        ),
        Command::ListSymbols { source } => run_list_symbols(
            source.config.as_deref(),
            &Overrides::from_args(&source, &SelectionArgs::default()),
        ),
        Command::Info { source, symbols } => {
            let selection = SelectionArgs {
                symbols,
                ..SelectionArgs::default()
            };
            run_info(
                source.config.as_deref(),
                &Overrides::from_args(&source, &selection),
            )
        }
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

/// Load and validate the config file, or start from an empty config.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, PriceAlignError> {
    let adapter = match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| PriceAlignError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    validate_config(&adapter)?;
    Ok(adapter)
}

fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> PriceAlignError {
    PriceAlignError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Resolve the data directory and its file format.
pub fn build_source(
    config: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<(PathBuf, SourceFormat), PriceAlignError> {
    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| config.get_non_empty("data", "dir").map(PathBuf::from))
        .ok_or_else(|| PriceAlignError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;

    let source_format = match overrides
        .source_format
        .clone()
        .or_else(|| config.get_non_empty("data", "format"))
    {
        Some(s) => s
            .parse::<SourceFormat>()
            .map_err(|reason| config_invalid("data", "format", reason))?,
        None => SourceFormat::default(),
    };

    Ok((data_dir, source_format))
}

pub fn build_settings(
    config: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<AnalysisSettings, PriceAlignError> {
    let (data_dir, source_format) = build_source(config, overrides)?;

    let symbols_str = overrides
        .symbols
        .clone()
        .or_else(|| config.get_non_empty("analysis", "symbols"))
        .ok_or_else(|| PriceAlignError::ConfigMissing {
            section: "analysis".into(),
            key: "symbols".into(),
        })?;
    let symbols = parse_symbols(&symbols_str)?;

    let range = match overrides
        .range
        .clone()
        .or_else(|| config.get_non_empty("analysis", "range"))
    {
        Some(s) => s
            .parse::<TimeRange>()
            .map_err(|e| config_invalid("analysis", "range", e.to_string()))?,
        None => TimeRange::default(),
    };

    let as_of = overrides
        .as_of
        .clone()
        .or_else(|| config.get_non_empty("analysis", "as_of"))
        .map(|s| parse_date(&s, "analysis", "as_of"))
        .transpose()?;

    let output_format = match overrides
        .output_format
        .clone()
        .or_else(|| config.get_non_empty("output", "format"))
    {
        Some(s) => s
            .parse::<OutputFormat>()
            .map_err(|reason| config_invalid("output", "format", reason))?,
        None => OutputFormat::default(),
    };

    let output_path = overrides
        .output_path
        .clone()
        .or_else(|| config.get_non_empty("output", "path").map(PathBuf::from));

    let chart_width = chart_dimension(config, "width", overrides.chart_width, DEFAULT_CHART_WIDTH)?;
    let chart_height =
        chart_dimension(config, "height", overrides.chart_height, DEFAULT_CHART_HEIGHT)?;

    Ok(AnalysisSettings {
        data_dir,
        source_format,
        symbols,
        range,
        as_of,
        output_format,
        output_path,
        chart_width,
        chart_height,
    })
}

fn chart_dimension(
    config: &dyn ConfigPort,
    key: &str,
    override_value: Option<u32>,
    default: i64,
) -> Result<u32, PriceAlignError> {
    let value = override_value
        .map(i64::from)
        .unwrap_or_else(|| config.get_int("chart", key, default));
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| config_invalid("chart", key, format!("{key} must be a positive integer")))
}

pub fn make_data_port(data_dir: PathBuf, format: SourceFormat) -> Box<dyn DataPort> {
    match format {
        SourceFormat::Csv => Box::new(CsvAdapter::new(data_dir)),
        SourceFormat::Json => Box::new(JsonQuoteAdapter::new(data_dir)),
    }
}

pub fn make_chart_port(settings: &AnalysisSettings, pretty: bool) -> Box<dyn ChartPort> {
    match settings.output_format {
        OutputFormat::Csv => Box::new(CsvTableWriter),
        OutputFormat::Json => Box::new(JsonTableWriter { pretty }),
        OutputFormat::Svg => Box::new(SvgChartWriter::new(
            settings.chart_width,
            settings.chart_height,
        )),
    }
}

/// Keep requested symbols the data source knows about, in request order.
/// Unknown symbols are reported and skipped.
pub fn resolve_selection(
    data_port: &dyn DataPort,
    requested: &[String],
) -> Result<SymbolSelection, PriceAlignError> {
    let available: HashSet<String> = data_port.list_symbols()?.into_iter().collect();
    let mut selection = SymbolSelection::new();

    for symbol in requested {
        if !available.contains(symbol) {
            tracing::warn!("{}", SelectionError::UnknownSymbol(symbol.clone()));
            continue;
        }
        match selection.add(symbol)? {
            SelectionChange::Added(s) => tracing::info!(symbol = %s, "added to analysis"),
            other => tracing::debug!(?other, "selection unchanged"),
        }
    }

    if selection.is_empty() {
        return Err(PriceAlignError::NoData {
            symbol: requested.join(","),
        });
    }
    Ok(selection)
}

/// Resolve the selection, fetch every selected symbol and align.
pub fn build_chart(
    data_port: &dyn DataPort,
    settings: &AnalysisSettings,
) -> Result<(SeriesStore, ChartData), PriceAlignError> {
    let selection = resolve_selection(data_port, &settings.symbols)?;
    let store = SeriesStore::load(data_port, selection.symbols());
    let today = settings.today();

    tracing::info!(
        symbols = selection.len(),
        range = %settings.range,
        %today,
        "aligning {}",
        settings.range.label()
    );
    let chart = ChartData::build(&store, selection.symbols(), settings.range, today);
    tracing::info!(rows = chart.rows.len(), "aligned table ready");

    Ok((store, chart))
}

/// Align and render. Returns the rendered document when no output path is
/// configured; otherwise writes it and returns `None`.
pub fn run_align_pipeline(
    data_port: &dyn DataPort,
    settings: &AnalysisSettings,
    pretty: bool,
) -> Result<Option<String>, PriceAlignError> {
    let (_, chart) = build_chart(data_port, settings)?;
    let writer = make_chart_port(settings, pretty);

    match &settings.output_path {
        Some(path) => {
            writer.write(&chart, path)?;
            tracing::info!("Output written to: {}", path.display());
            Ok(None)
        }
        None => writer.render(&chart).map(Some),
    }
}

fn run_align(
    config_path: Option<&Path>,
    overrides: &Overrides,
    pretty: bool,
) -> Result<(), PriceAlignError> {
    let config = load_config(config_path)?;
    let settings = build_settings(&config, overrides)?;
    let data_port = make_data_port(settings.data_dir.clone(), settings.source_format);
    let pretty = pretty || config.get_bool("output", "pretty", false);

    if let Some(content) = run_align_pipeline(data_port.as_ref(), &settings, pretty)? {
        print!("{content}");
    }
    Ok(())
}

/// One line per selected symbol, in selection order.
pub fn format_summary_lines(
    symbols: &[String],
    store: &SeriesStore,
    settings: &AnalysisSettings,
) -> Vec<String> {
    let today = settings.today();
    symbols
        .iter()
        .map(
            |symbol| match SeriesSummary::compute(store, symbol, settings.range, today) {
                Some(s) => {
                    let sign = if s.is_up() { "+" } else { "" };
                    format!(
                        "{}: {:.2}  {}{:.2} ({}{:.2}%)  high {:.2}  low {:.2}  [{} points, {} to {}]",
                        s.symbol,
                        s.last_price,
                        sign,
                        s.change,
                        sign,
                        s.change_pct,
                        s.high,
                        s.low,
                        s.points,
                        s.first_date,
                        s.last_date,
                    )
                }
                None => format!("{}: no data ({})", symbol, settings.range.label()),
            },
        )
        .collect()
}

fn run_summary(config_path: Option<&Path>, overrides: &Overrides) -> Result<(), PriceAlignError> {
    let config = load_config(config_path)?;
    let settings = build_settings(&config, overrides)?;
    let data_port = make_data_port(settings.data_dir.clone(), settings.source_format);

    let (store, chart) = build_chart(data_port.as_ref(), &settings)?;

    println!("=== {} ===", settings.range.label());
    for line in format_summary_lines(&chart.symbols, &store, &settings) {
        println!("  {line}");
    }
    Ok(())
}

fn run_list_symbols(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<(), PriceAlignError> {
    let config = load_config(config_path)?;
    let (data_dir, format) = build_source(&config, overrides)?;
    let data_port = make_data_port(data_dir.clone(), format);

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        tracing::warn!("No symbols found in {}", data_dir.display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        tracing::info!("{} symbols found", symbols.len());
    }
    Ok(())
}

fn run_info(config_path: Option<&Path>, overrides: &Overrides) -> Result<(), PriceAlignError> {
    let config = load_config(config_path)?;
    let (data_dir, format) = build_source(&config, overrides)?;
    let data_port = make_data_port(data_dir, format);

    let symbols = match overrides
        .symbols
        .clone()
        .or_else(|| config.get_non_empty("analysis", "symbols"))
    {
        Some(s) => parse_symbols(&s)?,
        None => data_port.list_symbols()?,
    };

    for symbol in &symbols {
        match data_port.get_data_range(symbol) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} points, {} to {}", symbol, count, first, last);
            }
            Ok(None) => println!("{}: no data found", symbol),
            Err(e) => tracing::warn!("error querying {}: {}", symbol, e),
        }
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PriceAlignError> {
    let config = load_config(Some(config_path))?;
    let settings = build_settings(&config, &Overrides::default())?;

    println!("data:    {} ({:?})", settings.data_dir.display(), settings.source_format);
    println!("symbols: {}", settings.symbols.join(", "));
    println!("range:   {} ({})", settings.range, settings.range.label());
    match settings.as_of {
        Some(date) => println!("as of:   {}", date),
        None => println!("as of:   today"),
    }
    println!(
        "output:  {:?} -> {}",
        settings.output_format,
        settings
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string())
    );
    println!("chart:   {}x{}", settings.chart_width, settings.chart_height);
    println!("\nConfiguration is valid.");
    Ok(())
}
