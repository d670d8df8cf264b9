//! Line-oriented front end for the set visualizer.
//!
//! Any line not starting with `:` is taken as a new formula. Commands:
//!
//! ```text
//! :move A 1.5 0     move circle A to (1.5, 0)
//! :radius B 2       set the radius of circle B
//! :reset            restore the initial circles and formula
//! :show             draw the current result
//! :dot              print the formula tree in DOT format
//! :help             list operators and commands
//! :quit             leave
//! ```
//!
//! Run with: `cargo run --example repl -- --step 3`

use std::io::{self, BufRead, Write};

use clap::Parser;

use setviz::config::Config;
use setviz::engine::{EvaluationResult, Session};
use setviz::error::FormulaError;
use setviz::lexer::OPERATORS;
use setviz::render::{render_ascii_with_config, RenderConfig};
use setviz::types::{Point, SetName};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Samples per axis.
    #[arg(long, value_name = "INT", default_value = "100")]
    resolution: usize,

    /// Border around the circles of the sampled square.
    #[arg(long, value_name = "FLOAT")]
    margin: Option<f64>,

    /// Initial formula.
    #[arg(long, value_name = "TEXT")]
    formula: Option<String>,

    /// Draw every STEP-th sample.
    #[arg(long, value_name = "INT", default_value = "3")]
    step: usize,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

fn parse_set(word: Option<&str>) -> Option<SetName> {
    let mut chars = word?.chars();
    let name = SetName::from_char(chars.next()?)?;
    chars.next().is_none().then_some(name)
}

fn parse_f64(word: Option<&str>) -> Option<f64> {
    word?.parse().ok()
}

fn report(outcome: Result<&EvaluationResult, FormulaError>, formula: &str) {
    match outcome {
        Ok(result) => println!("{} (area ~ {:.3})", result, result.area_estimate()),
        Err(err) => {
            println!("{}", err.underline(formula));
            println!("{}", err);
        }
    }
}

fn print_help() {
    println!("Operators:");
    for (example, name, meaning) in OPERATORS {
        println!("  {:<7} {:<22} {}", example, name, meaning);
    }
    println!("Commands: :move S X Y, :radius S R, :reset, :show, :dot, :help, :quit");
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.debug {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = Config::default().with_resolution(args.resolution.max(1));
    if let Some(margin) = args.margin {
        config = config.with_margin(margin);
    }
    if let Some(formula) = args.formula {
        config = config.with_default_formula(formula);
    }
    let render_config = RenderConfig {
        step: args.step,
        ..RenderConfig::default()
    };

    let mut session = Session::new(config);
    match session.error() {
        Some(err) => println!("{}", err),
        None => println!("{}", session.result()),
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);

        let Some(command) = line.strip_prefix(':') else {
            let outcome = session.on_formula_changed(line);
            report(outcome, line);
            continue;
        };

        let mut words = command.split_whitespace();
        match words.next() {
            Some("move") => {
                let set = parse_set(words.next());
                let x = parse_f64(words.next());
                let y = parse_f64(words.next());
                match (set, x, y) {
                    (Some(set), Some(x), Some(y)) => {
                        let formula = session.formula().to_string();
                        report(session.on_circle_moved(set, Point::new(x, y)), &formula);
                    }
                    _ => println!("usage: :move A|B|C X Y"),
                }
            }
            Some("radius") => match (parse_set(words.next()), parse_f64(words.next())) {
                (Some(set), Some(r)) => {
                    let formula = session.formula().to_string();
                    report(session.on_circle_resized(set, r), &formula);
                }
                _ => println!("usage: :radius A|B|C R"),
            },
            Some("reset") => {
                let formula = session.config().default_formula.clone();
                report(session.on_reset(), &formula);
            }
            Some("show") => {
                print!(
                    "{}",
                    render_ascii_with_config(session.grid(), session.result(), &render_config)
                );
                println!("{}", session.result());
                for circle in session.circles().iter() {
                    println!("  {}: center {}, radius {}", circle.name, circle.center, circle.radius);
                }
                println!("  stats: {:?}", session.stats());
            }
            Some("dot") => match session.result().formula() {
                Some(expr) => print!("{}", expr.to_dot()?),
                None => println!("no formula"),
            },
            Some("help") => print_help(),
            Some("quit") | Some("q") => break,
            _ => println!("unknown command, try :help"),
        }
    }

    Ok(())
}
