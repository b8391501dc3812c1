//! # DFS Resolve
//!
//! Main entry point for the path resolver host.

use dfs_resolve::{parse_args, Invocation, ResolveHost};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("dfs_resolve");

    let config = match parse_args(&args) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print_usage(program);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            process::exit(1);
        }
    };

    let host = ResolveHost::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to start: {}", e);
        process::exit(1);
    });

    match host.run() {
        Ok(paths) => match serde_json::to_string_pretty(&paths) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode result: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Resolve error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} --config <FILE> [REQUEST] [OPTIONS]", program);
    eprintln!();
    eprintln!("Request:");
    eprintln!("  --site <SITE>              Site to resolve against");
    eprintln!("  -q, --query <QUERY>        Path query, e.g. /data/logs/ or /data/logs/app");
    eprintln!("  -r, --request <JSON>       Whole request as {{\"site\":...,\"query\":...}}");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>        Site registry (JSON)");
    eprintln!("  --app-type <TYPE>          Application type to look up");
    eprintln!("  --extra-name-chars <CHARS> Extra characters allowed in name fragments");
    eprintln!("  -h, --help                 Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} -c demos/sites.json --site sandbox -q /data/logs/", program);
    eprintln!(
        "  {} -c demos/sites.json -r '{{\"site\":\"sandbox\",\"query\":\"/data/logs/app\"}}'",
        program
    );
}
