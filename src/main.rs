//! Failure Predictor - command line entry point
//!
//! Usage:
//!   failure-predictor status
//!   failure-predictor validate <records.json>
//!   failure-predictor preview <records.json> [rows]
//!   failure-predictor predict <records.json> <row>...
//!   failure-predictor trends <records.json> <row>...
//!
//! Every command prints JSON on stdout and exits non-zero on failure.

use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;

use failure_predictor::api::commands;
use failure_predictor::constants;
use failure_predictor::logic::config::PredictorConfig;
use failure_predictor::logic::model::{loader, OracleSlot};
use failure_predictor::logic::records::RecordSet;
use failure_predictor::logic::schema::Schema;
use failure_predictor::logic::Pipeline;

const USAGE: &str = "usage: failure-predictor <status | validate FILE | preview FILE [ROWS] | predict FILE ROW... | trends FILE ROW...>";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

    let config = match PredictorConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let schema = Schema::machining();
    let slot = Arc::new(OracleSlot::new());
    if loader::init(&slot, &config, schema) {
        log::info!("ONNX model loaded successfully");
    } else {
        log::info!("Model not available - predictions will be refused");
    }
    let pipeline = Pipeline::new(schema, slot);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&pipeline, &config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(pipeline: &Pipeline, config: &PredictorConfig, args: &[String]) -> Result<(), String> {
    let command = args.first().map(String::as_str).ok_or(USAGE)?;

    match command {
        "status" => print_json(&commands::get_engine_status(pipeline)),
        "validate" => {
            let records = load_records(args.get(1))?;
            let response = commands::validate_records(pipeline, &records);
            print_json(&response)?;
            if response.valid {
                Ok(())
            } else {
                Err(format!("Missing required columns: {}", response.missing_fields.join(", ")))
            }
        }
        "preview" => {
            let records = load_records(args.get(1))?;
            let rows = match args.get(2) {
                Some(n) => n.parse().map_err(|_| format!("invalid row count: {}", n))?,
                None => config.preview_rows,
            };
            print_json(&commands::preview_records(&records, rows))
        }
        "predict" => {
            let records = load_records(args.get(1))?;
            let selection = parse_selection(&args[2..])?;
            match commands::run_prediction(pipeline, &records, &selection) {
                Ok(response) => print_json(&response),
                Err(payload) => {
                    print_json(&payload)?;
                    Err(payload.message)
                }
            }
        }
        "trends" => {
            let records = load_records(args.get(1))?;
            let selection = parse_selection(&args[2..])?;
            match commands::get_trends(pipeline, &records, &selection) {
                Ok(series) => print_json(&series),
                Err(payload) => {
                    print_json(&payload)?;
                    Err(payload.message)
                }
            }
        }
        other => Err(format!("unknown command: {}\n{}", other, USAGE)),
    }
}

fn load_records(path: Option<&String>) -> Result<RecordSet, String> {
    let path = path.ok_or(USAGE)?;
    RecordSet::from_json_file(path).map_err(|e| format!("{}: {}", path, e))
}

fn parse_selection(args: &[String]) -> Result<Vec<usize>, String> {
    args.iter()
        .map(|a| a.parse::<usize>().map_err(|_| format!("invalid row index: {}", a)))
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
