use anyhow::{anyhow, Context, Result};
use clap::{arg, Command};
use std::{io::Read, path::PathBuf};
use wop_oracle::{parse_solution, read_instance, read_solution, Solution};

fn cli() -> Command {
    Command::new("wop-verifier")
        .about("Verifies or scores a wave order picking solution")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("verify_solution")
                .about("Checks a solution against an instance")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Path to a solution file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("score_solution")
                .about("Prints the objective value of a solution")
                .arg(
                    arg!(<INSTANCE> "Path to an instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Path to a solution file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("score_solution", sub_m)) => score_solution(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn verify_solution(instance_path: PathBuf, solution: String) -> Result<()> {
    let instance = read_instance(&instance_path)?;
    let solution = load_solution(&solution)?;

    match instance.verify_solution(&solution) {
        Ok(()) => {
            println!("Solution is valid");
            Ok(())
        }
        Err(e) => {
            eprintln!("Verification error: {}", e);
            std::process::exit(1);
        }
    }
}

fn score_solution(instance_path: PathBuf, solution: String) -> Result<()> {
    let instance = read_instance(&instance_path)?;
    let solution = load_solution(&solution)?;

    let score = match instance.verify_solution(&solution) {
        Ok(()) => instance.compute_objective(&solution),
        Err(e) => {
            eprintln!("Warning: solution is infeasible, scoring 0.0 ({})", e);
            0.0
        }
    };
    println!("{:.4}", score);
    Ok(())
}

// '-' reads the solution text from stdin; anything else is a file path.
// Either way decoding itself is fail-soft: malformed text becomes the
// empty solution and verification reports it as infeasible.
fn load_solution(solution: &str) -> Result<Solution> {
    if solution == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read solution from stdin")?;
        Ok(parse_solution(&buffer))
    } else {
        Ok(read_solution(&PathBuf::from(solution)))
    }
}
