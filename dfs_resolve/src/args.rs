//! Command-line argument parsing

use crate::runtime::ResolveHostConfig;
use dfs_path::ResolveRequest;
use std::path::PathBuf;

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Resolve one request
    Run(ResolveHostConfig),
    /// Print usage and exit
    Help,
}

/// Parses `args`, where `args[0]` is the program name
pub fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut registry_path = None;
    let mut request_json = None;
    let mut site = None;
    let mut query = None;
    let mut app_type = None;
    let mut extra_name_chars = Vec::new();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                registry_path = Some(PathBuf::from(value_of(args, &mut i, "--config")?));
            }
            "--request" | "-r" => {
                request_json = Some(value_of(args, &mut i, "--request")?.to_string());
            }
            "--site" => {
                site = Some(value_of(args, &mut i, "--site")?.to_string());
            }
            "--query" | "-q" => {
                query = Some(value_of(args, &mut i, "--query")?.to_string());
            }
            "--app-type" => {
                app_type = Some(value_of(args, &mut i, "--app-type")?.to_string());
            }
            "--extra-name-chars" => {
                extra_name_chars.extend(value_of(args, &mut i, "--extra-name-chars")?.chars());
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let registry_path = registry_path.ok_or_else(|| "Missing --config".to_string())?;

    let request = match request_json {
        Some(_) if site.is_some() || query.is_some() => {
            return Err("--request cannot be combined with --site or --query".to_string());
        }
        Some(json) => ResolveRequest::from_json(json.as_bytes()).map_err(|e| e.to_string())?,
        None => ResolveRequest { site, query },
    };

    Ok(Invocation::Run(ResolveHostConfig {
        registry_path,
        request,
        app_type,
        extra_name_chars,
    }))
}

fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}
