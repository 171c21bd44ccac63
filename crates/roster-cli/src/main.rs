// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, anyhow};
use config::Config;
use roster_app::{AppState, CandidateFaker};
use roster_tui::TuiOptions;
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `roster --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_path()?;
    logging::init(&log_path, &config.log_level()).with_context(|| {
        format!(
            "start logging to {} -- if this path is wrong, set [log].path",
            log_path.display()
        )
    })?;

    let count = options.count.unwrap_or_else(|| config.candidate_count());
    let seed = options.seed.or(config.seed());
    let mut faker = match seed {
        Some(seed) => CandidateFaker::new(seed),
        None => CandidateFaker::from_entropy(),
    };
    let today = OffsetDateTime::now_utc().date();
    let candidates = faker.candidates(count, today);
    tracing::info!(count, ?seed, %today, "generated candidates");

    let mut state =
        AppState::new(candidates).with_select_visible_limit(config.select_visible_limit());
    if options.check_only {
        println!(
            "ok: {} candidates, config {}",
            state.dataset().len(),
            options.config_path.display()
        );
        return Ok(());
    }

    roster_tui::run_app(
        &mut state,
        TuiOptions {
            row_height: config.row_height(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    count: Option<usize>,
    seed: Option<u64>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        count: None,
        seed: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--count" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--count requires a number of candidates"))?;
                let count = value
                    .as_ref()
                    .parse::<usize>()
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or_else(|| {
                        anyhow!(
                            "--count expects a positive integer, got {:?}",
                            value.as_ref()
                        )
                    })?;
                options.count = Some(count);
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires a number"))?;
                let seed = value.as_ref().parse::<u64>().with_context(|| {
                    format!(
                        "--seed expects a non-negative integer, got {:?}",
                        value.as_ref()
                    )
                })?;
                options.seed = Some(seed);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("roster");
    println!("  --config <path>          Use a specific config path");
    println!("  --count <n>              Number of candidates to generate");
    println!("  --seed <n>               Generate a reproducible dataset");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config + dataset generation, then exit");
    println!("  --help                   Show this help");
}
