// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use incident_insights::utils::logging::{format_heading, format_success, format_warning};
use incident_insights::{
    CategoryCounts, Config, DashboardData, DashboardPipeline, Incident, JsonExporter, KpiSummary,
    LocationCount, OperationTimer, ProgressTracker, SeverityFilter, Validator, YearFilter,
    filter_by_severity, filter_by_year, group_by_field, top_locations,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "incident_insights")]
#[command(version = "0.1.0")]
#[command(about = "Safety-incident analytics pipeline for dashboard widgets", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full dashboard report: KPIs plus every chart aggregate
    Report {
        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,
    },

    /// Headline statistics only
    Kpis {
        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,
    },

    /// Incident counts per month, chronological
    Monthly {
        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,
    },

    /// Locations ranked by incident count
    Locations {
        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Counts per value of one categorical field
    Breakdown {
        /// Field name, e.g. action_cause, region, behavior_type, job
        field: String,

        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,
    },

    /// Severity distribution per month for the stacked chart
    SeverityMatrix {
        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,
    },

    /// Selectable facet values (years and severity labels)
    Facets,

    /// Write the dashboard payload as JSON for chart widgets
    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long, default_value = "All")]
        year: YearFilter,

        #[arg(long, default_value = "All")]
        severity: SeverityFilter,
    },

    /// Dataset provenance and normalization statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    incident_insights::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Incident Insights analytics pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    let pipeline = DashboardPipeline::new(config.clone());

    match cli.command {
        Commands::Report { year, severity } => {
            cmd_report(&pipeline, &config, &year, &severity, cli.color)?;
        }
        Commands::Kpis { year, severity } => {
            let data = pipeline.run(&year, &severity)?;
            print_kpis(&data.kpis);
        }
        Commands::Monthly { year, severity } => {
            let data = pipeline.run(&year, &severity)?;
            print_monthly(&data);
        }
        Commands::Locations {
            year,
            severity,
            limit,
        } => {
            cmd_locations(&pipeline, &config, &year, &severity, limit)?;
        }
        Commands::Breakdown {
            field,
            year,
            severity,
        } => {
            cmd_breakdown(&pipeline, &config, &field, &year, &severity)?;
        }
        Commands::SeverityMatrix { year, severity } => {
            let data = pipeline.run(&year, &severity)?;
            print_matrix(&data, &config.charts.severity_display_order);
        }
        Commands::Facets => {
            let data = pipeline.run(&YearFilter::All, &SeverityFilter::All)?;
            print_facets(&data);
        }
        Commands::Export {
            output,
            pretty,
            year,
            severity,
        } => {
            cmd_export(&pipeline, output, pretty, &year, &severity)?;
        }
        Commands::Stats => {
            cmd_stats(&pipeline, cli.color)?;
        }
    }

    Ok(())
}

fn cmd_report(
    pipeline: &DashboardPipeline,
    config: &Config,
    year: &YearFilter,
    severity: &SeverityFilter,
    color: bool,
) -> Result<()> {
    let timer = OperationTimer::new("report");

    let dataset = pipeline.load()?;
    let tracker = ProgressTracker::with_color(dataset.len(), color);
    let incidents = pipeline.normalize_tracked(&dataset, &tracker);
    tracker.finish();

    let data = pipeline.build(&incidents, year, severity);
    let label_max = config.charts.label_max_len;

    print_kpis(&data.kpis);
    print_facets(&data);
    print_monthly(&data);
    print_locations(&data.top_locations, label_max);
    print_counts("Action causes", &data.by_action_cause, label_max);
    print_counts("Regions", &data.by_region, label_max);
    print_counts("Behavior types", &data.by_behavior_type, label_max);
    print_counts("Jobs", &data.by_job, label_max);
    print_matrix(&data, &config.charts.severity_display_order);

    timer.finish_with_count(incidents.len());
    Ok(())
}

fn cmd_locations(
    pipeline: &DashboardPipeline,
    config: &Config,
    year: &YearFilter,
    severity: &SeverityFilter,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(config.pipeline.top_locations_limit);
    Validator::validate_limit(limit)?;

    let dataset = pipeline.load()?;
    let incidents = pipeline.normalize(&dataset);
    let filtered = filter_by_severity(&filter_by_year(&incidents, year), severity);

    let top = top_locations(&filtered, limit);
    print_locations(&top, config.charts.label_max_len);
    Ok(())
}

fn cmd_breakdown(
    pipeline: &DashboardPipeline,
    config: &Config,
    field: &str,
    year: &YearFilter,
    severity: &SeverityFilter,
) -> Result<()> {
    let known = Incident::CATEGORY_FIELDS.iter().any(|f| *f == field) || field == "severity_label";
    if !known {
        warn!(
            "Unrecognized field '{}'; every record will bucket under the sentinel",
            field
        );
    }

    let dataset = pipeline.load()?;
    let incidents = pipeline.normalize(&dataset);
    let filtered = filter_by_severity(&filter_by_year(&incidents, year), severity);

    let counts = group_by_field(&filtered, field);
    print_counts(
        &format!("Breakdown by {}", field),
        &counts,
        config.charts.label_max_len,
    );
    Ok(())
}

fn cmd_export(
    pipeline: &DashboardPipeline,
    output: PathBuf,
    pretty: bool,
    year: &YearFilter,
    severity: &SeverityFilter,
) -> Result<()> {
    let timer = OperationTimer::new("export");

    let data = pipeline.run(year, severity)?;
    let exporter = JsonExporter::new(&output)?;
    let manifest = exporter.export(&data, pretty)?;

    println!(
        "{}",
        format_success(&format!(
            "Exported {} records to {} (export id {})",
            manifest.record_count,
            output.display(),
            manifest.export_id
        ))
    );

    timer.finish();
    Ok(())
}

fn cmd_stats(pipeline: &DashboardPipeline, color: bool) -> Result<()> {
    let dataset = pipeline.load()?;

    let tracker = ProgressTracker::with_color(dataset.len(), color);
    let _incidents = pipeline.normalize_tracked(&dataset, &tracker);
    tracker.finish();
    let stats = tracker.get_stats();

    println!("{}", format_heading("Dataset"));
    println!("  Files:         {}", dataset.sources.join(", "));
    println!("  Content hash:  {}", dataset.content_hash);
    println!("  Load id:       {}", dataset.load_id);
    println!(
        "  Loaded at:     {}",
        chrono::DateTime::from_timestamp(dataset.loaded_at as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );

    println!("{}", format_heading("Normalization"));
    println!("  Records:           {}", stats.records_processed);
    println!(
        "  Date coverage:     {:.1}% ({} undated)",
        stats.date_coverage(),
        stats.records_without_date
    );
    println!(
        "  Defaulted fields:  {} ({:.2} per record)",
        stats.fields_defaulted,
        stats.avg_defaulted_fields()
    );

    if stats.records_without_date > 0 {
        println!(
            "{}",
            format_warning("Some records have no parseable date and are excluded from month series")
        );
    }

    Ok(())
}

fn print_kpis(kpis: &KpiSummary) {
    println!("{}", format_heading("KPIs"));
    println!("  Total incidents:      {}", kpis.total_incidents);
    println!(
        "  Top severity:         {} ({} incidents)",
        kpis.highest_severity_level, kpis.highest_severity_count
    );
    println!("  Most common cause:    {}", kpis.most_common_action_cause);
    println!("  Most common location: {}", kpis.most_common_location);
}

fn print_facets(data: &DashboardData) {
    println!("{}", format_heading("Facets"));
    let years: Vec<String> = data.years.iter().map(|y| y.to_string()).collect();
    println!("  Years:      All, {}", years.join(", "));
    println!("  Severities: All, {}", data.severities.join(", "));
}

fn print_monthly(data: &DashboardData) {
    println!("{}", format_heading("Incidents per month"));
    for row in &data.monthly {
        println!("  {:<14} {}", row.month, row.count.to_string().bold());
    }
}

fn print_locations(locations: &[LocationCount], label_max: usize) {
    println!("{}", format_heading("Top locations"));
    for entry in locations {
        println!(
            "  {:<34} {}",
            Validator::truncate_label(&entry.location, label_max),
            entry.count.to_string().bold()
        );
    }
}

fn print_counts(title: &str, counts: &CategoryCounts, label_max: usize) {
    println!("{}", format_heading(title));
    for (key, count) in counts.iter() {
        println!(
            "  {:<34} {}",
            Validator::truncate_label(key, label_max),
            count.to_string().bold()
        );
    }
}

fn print_matrix(data: &DashboardData, display_order: &[String]) {
    println!("{}", format_heading("Severity by month"));

    let mut columns: Vec<&str> = display_order.iter().map(String::as_str).collect();
    if !columns.contains(&"Unknown") {
        columns.push("Unknown");
    }

    let header: Vec<String> = columns.iter().map(|c| format!("{:>9}", c)).collect();
    println!("  {:<14}{}", "Month", header.join(""));

    for row in &data.severity_by_month {
        let cells: Vec<String> = columns
            .iter()
            .map(|label| format!("{:>9}", row.count_for(label)))
            .collect();
        println!("  {:<14}{}", row.name, cells.join(""));
    }
}
