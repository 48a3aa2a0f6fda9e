

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context};
use portal_search::toolkit::search::score_similarity;
use portal_search::utils::split_term_list;
use portal_search::{PortalSearchConfig, SearchService};
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};


#[derive(Debug, Default)]
struct Options {
    config_path: Option<PathBuf>,
    terms: Option<Vec<String>>,
    threshold: Option<f64>,
    route: Option<String>,
    site_url: Option<String>,
    suggest: Option<usize>,
    explain: bool,
    json: bool,
    words: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,portal_search=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let mut config = PortalSearchConfig::load(options.config_path.as_deref())?;
    if let Some(terms) = &options.terms {
        config.known_terms = terms.clone();
    }
    if let Some(threshold) = options.threshold {
        config.match_threshold = threshold;
    }
    if let Some(route) = &options.route {
        config.search_route = route.clone();
    }
    if let Some(site_url) = &options.site_url {
        config.site_url = Some(site_url.clone());
    }

    let service = SearchService::new(config)?;

    if !options.words.is_empty() {
        let query = options.words.join(" ");
        return run_query(&service, &query, &options);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = run_query(&service, &line, &options) {
            eprintln!("❌ {}", e);
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<Options>> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();

        match flag {
            "--config" | "-c" => {
                options.config_path = Some(PathBuf::from(take_value(args, &mut i, flag)?));
            }
            "--terms" | "-t" => {
                options.terms = Some(split_term_list(take_value(args, &mut i, flag)?));
            }
            "--threshold" => {
                let raw = take_value(args, &mut i, flag)?;
                options.threshold = Some(
                    raw.parse()
                        .with_context(|| format!("invalid --threshold '{}'", raw))?,
                );
            }
            "--route" | "-r" => options.route = Some(take_value(args, &mut i, flag)?.clone()),
            "--site-url" => options.site_url = Some(take_value(args, &mut i, flag)?.clone()),
            "--suggest" | "-s" => {
                let raw = take_value(args, &mut i, flag)?;
                options.suggest = Some(
                    raw.parse()
                        .with_context(|| format!("invalid --suggest '{}'", raw))?,
                );
            }
            "--explain" | "-e" => options.explain = true,
            "--json" => options.json = true,
            "--help" | "-h" => return Ok(None),
            "--" => {
                options.words.extend(args[i + 1..].iter().cloned());
                break;
            }
            other if other.starts_with("--") => bail!("unknown option '{}'", other),
            word => options.words.push(word.to_string()),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> anyhow::Result<&'a String> {
    *i += 1;
    args.get(*i).with_context(|| format!("{} needs a value", flag))
}

fn run_query(service: &SearchService, raw: &str, options: &Options) -> anyhow::Result<()> {
    let outcome = service.submit(raw)?;
    let suggestions = match options.suggest {
        Some(limit) => Some(service.suggest(raw, Some(limit))?),
        None => None,
    };

    let explanation: Option<Vec<_>> = options.explain.then(|| {
        service
            .vocabulary()
            .iter()
            .map(|term| (term, score_similarity(&outcome.resolution.query, term)))
            .collect()
    });

    if options.json {
        let mut value = json!({ "outcome": outcome });
        if let Some(suggestions) = &suggestions {
            value["suggestions"] = json!(suggestions);
        }
        if let Some(explanation) = &explanation {
            value["explanation"] = explanation
                .iter()
                .map(|(term, score)| json!({ "term": term, "similarity": score }))
                .collect();
        }
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }

    let resolution = &outcome.resolution;
    println!("🔍 {}", outcome.query);
    match resolution.match_kind {
        Some(kind) => {
            let kind: &'static str = kind.into();
            println!(
                "   ➜ {} (score {:.3}, {})",
                resolution.resolved_term, resolution.score, kind
            );
        }
        None => println!("   ➜ {} (no known term above threshold)", resolution.resolved_term),
    }
    println!("   🧭 {}", outcome.destination);

    if let Some(suggestions) = &suggestions {
        if suggestions.is_empty() {
            println!("   💡 no suggestions");
        }
        for (n, suggestion) in suggestions.iter().enumerate() {
            println!("   💡 {}. {} ({:.3})", n + 1, suggestion.term, suggestion.score);
        }
    }

    if let Some(explanation) = &explanation {
        for (term, score) in explanation {
            let kind: &'static str = score.kind.into();
            match score.distance {
                Some(distance) => println!(
                    "      {:<16} {:.3}  {} (distance {})",
                    term, score.score, kind, distance
                ),
                None => println!("      {:<16} {:.3}  {}", term, score.score, kind),
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("portal-search - resolve portal search queries onto known categories");
    println!();
    println!("USAGE:");
    println!("    portal-search [OPTIONS] [QUERY...]");
    println!();
    println!("With no QUERY, each non-empty stdin line is resolved.");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>      Config file (TOML/JSON/YAML)");
    println!("    -t, --terms <A,B,...>    Override the known terms");
    println!("        --threshold <X>      Match threshold in [0, 1) (default: 0.5)");
    println!("    -r, --route <PATH>       Search results route (default: /search)");
    println!("        --site-url <URL>     Build absolute destinations on this site");
    println!("    -s, --suggest <N>        Also list up to N ranked suggestions");
    println!("    -e, --explain            Show the similarity against every known term");
    println!("        --json               Print one JSON object per query");
    println!("    -h, --help               Print this help");
}
