use clap::{Parser, Subcommand};
use feature_cluster::{
    cluster_fold, clusters,
    collection::{read_feature_collection, to_geojson_string},
    create_bins, filter_properties, get_cluster, ClusterError,
};
use geojson::FeatureCollection;
use serde_json::Value;
use std::path::Path;
use std::process::exit;

/// Command line interface for grouping labeled GeoJSON features.
#[derive(Parser)]
#[command(name = "feature_cluster_cli", version)]
struct Cli {
    /// Property holding the cluster label
    #[arg(long, default_value = "cluster", global = true)]
    property: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the feature indices of every bin.
    Bins { input: String },
    /// Print the size of every cluster.
    Summary { input: String },
    /// Extract the features matching a JSON filter.
    Get {
        input: String,
        /// Inline JSON filter, e.g. '{"cluster":0}'
        #[arg(long, conflicts_with = "filter_file")]
        filter: Option<String>,
        /// Path to a JSON file holding the filter
        #[arg(long)]
        filter_file: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Write each cluster to its own GeoJSON file.
    Split { input: String, dir: String },
    /// Print selected properties of every feature as JSON lines.
    Project {
        input: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn load(path: &str) -> FeatureCollection {
    match read_feature_collection(path) {
        Ok(fc) => fc,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            exit(1);
        }
    }
}

fn read_filter(inline: Option<String>, file: Option<String>) -> Result<Value, ClusterError> {
    let (text, source) = match (inline, file) {
        (Some(text), _) => (text, "--filter".to_string()),
        (None, Some(path)) => (std::fs::read_to_string(&path)?, path),
        (None, None) => {
            return Err(ClusterError::InvalidInput(
                "one of --filter or --filter-file is required".to_string(),
            ))
        }
    };
    log::debug!("filter from {}", source);
    Ok(serde_json::from_str(&text)?)
}

/// File name for a cluster; characters unsafe in a path component become `_`.
fn cluster_file_name(key: &str) -> String {
    let safe: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("cluster-{}.geojson", safe)
}

fn write_output(path: &str, fc: &FeatureCollection) -> Result<(), ClusterError> {
    let json = to_geojson_string(fc)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Bins { input } => {
            let fc = load(&input);
            for bin in &create_bins(&fc, &cli.property) {
                let indices: Vec<String> = bin.indices.iter().map(|i| i.to_string()).collect();
                println!("{}: {}", bin.key, indices.join(", "));
            }
        }
        Commands::Summary { input } => {
            let fc = load(&input);
            let count = cluster_fold(&fc, &cli.property, 0usize, |acc, cluster, key, ordinal| {
                println!(
                    "cluster {} (#{}): {} features",
                    key,
                    ordinal,
                    cluster.features.len()
                );
                acc + 1
            });
            println!("Clusters: {}", count);
        }
        Commands::Get {
            input,
            filter,
            filter_file,
            output,
        } => {
            let fc = load(&input);
            let result = read_filter(filter, filter_file).and_then(|f| get_cluster(&fc, &f));
            let matched = match result {
                Ok(matched) => matched,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    exit(1);
                }
            };
            match output {
                Some(path) => match write_output(&path, &matched) {
                    Ok(()) => println!("Wrote {}", path),
                    Err(e) => {
                        eprintln!("Error writing {}: {}", path, e);
                        exit(1);
                    }
                },
                None => match to_geojson_string(&matched) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        exit(1);
                    }
                },
            }
        }
        Commands::Split { input, dir } => {
            let fc = load(&input);
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("Error creating {}: {}", dir, e);
                exit(1);
            }
            for cluster in clusters(&fc, &cli.property) {
                let path = Path::new(&dir).join(cluster_file_name(&cluster.key));
                let path = path.to_string_lossy().into_owned();
                match write_output(&path, &cluster.features) {
                    Ok(()) => println!("Wrote {}", path),
                    Err(e) => {
                        eprintln!("Error writing {}: {}", path, e);
                        exit(1);
                    }
                }
            }
        }
        Commands::Project { input, keys } => {
            let fc = load(&input);
            let empty = geojson::JsonObject::new();
            for feature in &fc.features {
                let props = feature.properties.as_ref().unwrap_or(&empty);
                println!("{}", Value::Object(filter_properties(props, keys.as_slice())));
            }
        }
    }
}
