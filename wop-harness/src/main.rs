use anyhow::{anyhow, Result};
use clap::{arg, ArgMatches, Command};
use log::warn;
use std::fs;
use std::path::PathBuf;
use wop_harness::config::HarnessConfig;
use wop_harness::runner::{self, convergence, run_set, ScoreRecord};

fn cli() -> Command {
    Command::new("wop-harness")
        .about("Batch benchmarking harness for wave order picking solvers")
        .arg_required_else_help(true)
        .subcommand(with_dir_args(
            Command::new("run")
                .about("Runs the external solver on every instance of the given sets")
                .arg(arg!(<SETS> ... "Instance set names, e.g. a b x")
                    .value_parser(clap::value_parser!(String)))
                .arg(
                    arg!(--solver [SOLVER] "Path to the external solver executable")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--"solver-arg" [ARG] "Heuristic selector forwarded to the solver")
                    .value_parser(clap::value_parser!(String)))
                .arg(
                    arg!(--timeout [TIMEOUT] "Per-instance solver timeout in seconds")
                        .value_parser(clap::value_parser!(u64)),
                ),
        ))
        .subcommand(with_dir_args(
            Command::new("score")
                .about("Re-scores existing solver outputs without running the solver")
                .arg(arg!(<SETS> ... "Instance set names")
                    .value_parser(clap::value_parser!(String))),
        ))
        .subcommand(with_dir_args(
            Command::new("report")
                .about("Generates score tables and chart artifacts from existing outputs")
                .arg(arg!(<SETS> ... "Instance set names")
                    .value_parser(clap::value_parser!(String))),
        ))
}

fn with_dir_args(command: Command) -> Command {
    command
        .arg(
            arg!(--config [CONFIG] "Path to a harness config json file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--datasets [DIR] "Instance files root").value_parser(clap::value_parser!(PathBuf)))
        .arg(arg!(--results [DIR] "Solver outputs root").value_parser(clap::value_parser!(PathBuf)))
        .arg(
            arg!(--best [DIR] "Best-known solutions root")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--baseline [DIR] "Baseline solutions root")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--logs [DIR] "Convergence logs root").value_parser(clap::value_parser!(PathBuf)))
        .arg(arg!(--plots [DIR] "Chart artifacts root").value_parser(clap::value_parser!(PathBuf)))
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("run", sub_m)) => {
            let mut cfg = base_config(sub_m).unwrap_or_else(fatal);
            if let Some(solver) = sub_m.get_one::<PathBuf>("solver") {
                cfg.solver_path = Some(solver.clone());
            }
            if let Some(arg) = sub_m.get_one::<String>("solver-arg") {
                cfg.solver_arg = Some(arg.clone());
            }
            if let Some(timeout) = sub_m.get_one::<u64>("timeout") {
                cfg.solver_timeout_secs = Some(*timeout);
            }
            process_sets(&cfg, set_names(sub_m), true, true).await
        }
        Some(("score", sub_m)) => {
            let cfg = base_config(sub_m).unwrap_or_else(fatal);
            process_sets(&cfg, set_names(sub_m), false, false).await
        }
        Some(("report", sub_m)) => {
            let cfg = base_config(sub_m).unwrap_or_else(fatal);
            process_sets(&cfg, set_names(sub_m), false, true).await
        }
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn fatal<T>(e: anyhow::Error) -> T {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
}

fn base_config(matches: &ArgMatches) -> Result<HarnessConfig> {
    let mut cfg = match matches.get_one::<PathBuf>("config") {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("datasets") {
        cfg.datasets_dir = dir.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("results") {
        cfg.results_dir = dir.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("best") {
        cfg.best_dir = dir.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("baseline") {
        cfg.baseline_dir = dir.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("logs") {
        cfg.logs_dir = dir.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("plots") {
        cfg.plots_dir = dir.clone();
    }
    Ok(cfg)
}

fn set_names(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("SETS")
        .unwrap()
        .cloned()
        .collect()
}

/// Drives each requested set in order. Only a missing solver executable
/// aborts; a failing set is logged and the remaining sets still run.
async fn process_sets(
    cfg: &HarnessConfig,
    sets: Vec<String>,
    run_solver: bool,
    write_artifacts: bool,
) -> Result<()> {
    if run_solver {
        runner::check_solver(cfg)?;
    }

    for set_name in &sets {
        let records = match run_set::execute(cfg, set_name, run_solver).await {
            Ok(records) => records,
            Err(e) => {
                warn!("set '{}' failed: {:#}", set_name, e);
                continue;
            }
        };
        if records.is_empty() {
            continue;
        }

        println!("\n--- Set: {} ({} instances) ---", set_name, records.len());
        print!("{}", wop_report::score_table(&records));

        if write_artifacts {
            if let Err(e) = emit_artifacts(cfg, set_name, &records) {
                warn!("set '{}': failed to write artifacts: {:#}", set_name, e);
            }
        }
    }

    Ok(())
}

/// Writes the machine-readable score records, the grouped bar chart and one
/// convergence chart per instance that produced a trace.
fn emit_artifacts(cfg: &HarnessConfig, set_name: &str, records: &[ScoreRecord]) -> Result<()> {
    fs::create_dir_all(&cfg.results_dir)?;
    let scores_path = cfg.results_dir.join(format!("{}_scores.json", set_name));
    fs::write(&scores_path, serde_json::to_string_pretty(records)?)?;

    fs::create_dir_all(&cfg.plots_dir)?;
    let chart = wop_report::score_chart(set_name, records);
    wop_report::save_chart(&cfg.plots_dir.join(format!("{}.svg", set_name)), &chart)?;

    let convergence_dir = cfg.plots_dir.join("convergence").join(set_name);
    fs::create_dir_all(&convergence_dir)?;
    for record in records {
        let log_path = cfg
            .logs_dir
            .join(set_name)
            .join(format!("{}.log", record.instance_name));
        let samples = convergence::read_convergence_log(&log_path);
        if samples.is_empty() {
            continue;
        }
        let chart = wop_report::convergence_chart(&record.instance_name, &samples);
        wop_report::save_chart(
            &convergence_dir.join(format!("{}.svg", record.instance_name)),
            &chart,
        )?;
    }

    Ok(())
}
