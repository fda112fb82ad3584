//! GraphFrame CLI: run graph analyses over a JSON graph file
//!
//! Without `--input` the built-in six-person graph is used.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use graphframe::algo::scores_frame;
use graphframe::{AnalysisConfig, DataFrame, DataType, GraphFrame, GraphInput, Stage, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphframe", version, about = "GraphFrame analysis CLI")]
struct Cli {
    /// Graph file: {"vertices": [[id, name, age]], "edges": [[src, dst, relationship]]}
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// YAML analysis settings
    #[arg(long, global = true, env = "GRAPHFRAME_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, clap::ValueEnum)]
enum Strategy {
    Join,
    Pattern,
}

#[derive(Clone, clap::ValueEnum)]
enum Direction {
    In,
    Out,
}

#[derive(Subcommand)]
enum Commands {
    /// List vertices older than an age
    Filter {
        /// Defaults to the configured filter.min_age
        #[arg(long)]
        min_age: Option<i64>,
    },
    /// Reconstruct (source, edge, destination) triplets
    Triplets {
        #[arg(long, default_value = "join")]
        strategy: Strategy,
    },
    /// Search for a motif such as "(a)-[e]->(b); (b)-[]->(a)"
    Find {
        pattern: String,
    },
    /// Vertex degrees
    Degrees {
        #[arg(long, default_value = "in")]
        direction: Direction,
    },
    /// Rank vertices with PageRank
    Pagerank {
        #[arg(long)]
        max_iterations: Option<usize>,

        #[arg(long)]
        reset_probability: Option<f64>,

        /// Personalise towards this vertex id
        #[arg(long)]
        source: Option<String>,
    },
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let input = match &cli.input {
        Some(path) => GraphInput::load(path)?,
        None => GraphInput::people(),
    };
    let graph = input.build()?;

    let frame = match cli.command {
        Commands::Filter { min_age } => {
            let min_age = min_age.unwrap_or(config.filter.min_age);
            graph.filter_vertices_by("age", |age| age.as_integer().map_or(false, |a| a > min_age))?
        }
        Commands::Triplets { strategy } => match strategy {
            Strategy::Join => graph.triplets_by_join()?,
            Strategy::Pattern => graph.triplets_by_pattern()?,
        },
        Commands::Find { pattern } => graph.find(&pattern)?,
        Commands::Degrees { direction } => match direction {
            Direction::In => graph.in_degrees()?,
            Direction::Out => graph.out_degrees()?,
        },
        Commands::Pagerank {
            max_iterations,
            reset_probability,
            source,
        } => {
            let mut settings = config.pagerank;
            if let Some(n) = max_iterations {
                settings.max_iterations = n;
            }
            if let Some(r) = reset_probability {
                settings.reset_probability = r;
            }
            if let Some(id) = source {
                settings.source = Some(parse_id(graph.id_type(), &id)?);
            }
            run_pagerank(&graph, &settings.to_config())?
        }
    };

    print_frame(&frame, &cli.format)
}

fn run_pagerank(graph: &GraphFrame, config: &graphframe::PageRankConfig<Value>) -> anyhow::Result<DataFrame> {
    let result = graph.page_rank_with(config)?;
    tracing::info!(iterations = result.iterations, "pagerank complete");
    Ok(scores_frame(&result, graph.id_type()).map_err(|e| e.at(Stage::PageRank))?)
}

/// Vertex ids typed on the command line take the graph's id column type
fn parse_id(id_type: DataType, raw: &str) -> anyhow::Result<Value> {
    let value = match id_type {
        DataType::Integer => Value::Integer(raw.parse()?),
        DataType::Float => Value::Float(raw.parse()?),
        DataType::Boolean => Value::Boolean(raw.parse()?),
        DataType::String => Value::from(raw),
    };
    Ok(value)
}

fn print_frame(frame: &DataFrame, format: &OutputFormat) -> anyhow::Result<()> {
    let rows = frame.collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&frame.to_json_rows()?)?);
        }
        OutputFormat::Csv => {
            let header: Vec<String> = frame.column_names().into_iter().map(csv_field).collect();
            println!("{}", header.join(","));
            for row in &rows {
                let cells: Vec<String> = row.values().iter().map(format_csv_value).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if frame.width() == 0 {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(frame.column_names());

            for row in &rows {
                let cells: Vec<String> = row.values().iter().map(|v| v.to_string()).collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }

    Ok(())
}

fn format_csv_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => csv_field(s),
        other => other.to_string(),
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_follows_column_type() {
        assert_eq!(parse_id(DataType::Integer, "5").unwrap(), Value::Integer(5));
        assert_eq!(parse_id(DataType::Float, "1.5").unwrap(), Value::Float(1.5));
        assert_eq!(parse_id(DataType::Boolean, "true").unwrap(), Value::Boolean(true));
        assert_eq!(parse_id(DataType::String, "5").unwrap(), Value::from("5"));
        assert!(parse_id(DataType::Integer, "five").is_err());
    }

    #[test]
    fn test_float_source_matches_float_ids() {
        let graph = graphframe::build_graph(
            vec![(Value::Float(1.5), "A", 1), (Value::Float(2.5), "B", 1)],
            vec![(Value::Float(1.5), Value::Float(2.5), 1)],
        )
        .unwrap();
        let config = graphframe::PageRankConfig {
            source: Some(parse_id(graph.id_type(), "1.5").unwrap()),
            ..Default::default()
        };
        assert!(graph.page_rank_with(&config).is_ok());
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(format_csv_value(&Value::Null), "");
        assert_eq!(format_csv_value(&Value::Integer(3)), "3");
    }
}
