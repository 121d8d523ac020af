use crate::config::TowerConfig;
use crate::dispatcher::Dispatcher;
use crate::feed::FeedClient;
use crate::runway::RunwayPool;
use crate::tower::{Feedback, Tower, Transition};
use clap::Parser;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tabled::settings::Style;

mod aircraft;
mod config;
mod dispatcher;
mod error;
mod feed;
mod fleet;
mod logging;
mod queue;
mod runway;
mod state;
mod tower;

#[derive(Parser)]
struct Args {
    /// Address of the controller's state feed
    #[arg(long, value_name = "ADDR", default_value = "localhost:8000")]
    feed: String,

    /// Path to a JSON fleet file; a fleet of 30 aircraft is generated when omitted
    #[arg(long, value_name = "FILE")]
    fleet: Option<PathBuf>,

    /// Length of one time unit in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    time_unit_ms: u64,

    /// Seed for fleet generation and runway occupancy
    #[arg(long)]
    seed: Option<u64>,

    /// Type state codes at a prompt instead of connecting to the feed
    #[arg(long)]
    console: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn print_feedback(feedback: Feedback) {
    match feedback {
        Feedback::State {
            transition: Transition::Retained { received, current },
            ..
        } => {
            println!(
                "{}",
                format!("State {} received, keeping current state: {}", received, current).yellow()
            );
        }
        Feedback::State {
            transition: Transition::Changed { to, .. },
            description,
        } => match description {
            Some(desc) => println!("State updated to: {} {}", to, format!("({})", desc).cyan().bold()),
            None => println!("State updated to: {}", to),
        },
        Feedback::Text(text) => println!("{}", text),
    }
}

fn console(tower: &Tower, runways: &RunwayPool) -> Result<(), error::TowerError> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "status".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match trimmed {
                    "ls" => {
                        let queued = tower.snapshot().queue;
                        if queued.is_empty() {
                            println!("No aircraft waiting.");
                        } else {
                            let mut table = tabled::Table::new(&queued);
                            table.with(Style::rounded());
                            table.with(tabled::settings::Alignment::left());
                            println!("{}", table);
                        }
                    }
                    "status" => {
                        let snapshot = tower.snapshot();
                        println!(
                            "State: {} ({})",
                            snapshot.state,
                            snapshot.state.description().unwrap_or("no description")
                        );
                        println!("Processing: {}", snapshot.processing);
                        println!("Halted: {}", snapshot.exhausted);
                        println!("Waiting: {}", snapshot.queue.len());
                        println!("Runways in use: {}/{}", runways.in_use(), runways.capacity());
                    }
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  <code>        - Apply an operating state code (0-9)");
                        println!("  ls            - List waiting aircraft in dequeue order");
                        println!("  status        - Show state, flags and runway usage");
                        println!("  help / ?      - Show this help menu");
                        println!("  exit / quit   - Exit the tower\n");
                    }
                    "exit" | "quit" => break,
                    _ => print_feedback(tower.apply_incoming_line(trimmed)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    let config = TowerConfig::with_time_unit(Duration::from_millis(args.time_unit_ms));
    let fleet = match &args.fleet {
        Some(path) => {
            println!("Tower online. Loaded fleet from {}", path.display());
            fleet::load_from_file(path)?
        }
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            println!("Tower online. Generated fleet of {} aircraft", 3 * fleet::AIRCRAFT_PER_CATEGORY);
            fleet::generate(&mut rng)
        }
    };

    let tower = Arc::new(Tower::new(fleet));
    let runways = Arc::new(RunwayPool::new(config.runways));
    let stop = Arc::new(AtomicBool::new(false));

    let dispatcher = Dispatcher::from_config(Arc::clone(&tower), Arc::clone(&runways), &config, args.seed);
    let dispatch = dispatcher.spawn(Arc::clone(&stop));

    if args.console {
        console(&tower, &runways)?;
    } else {
        FeedClient::new(args.feed, config.reconnect_delay()).run(&tower, &stop, print_feedback);
    }

    stop.store(true, Ordering::Release);
    let departed = dispatch.join().map(|d| d.len()).unwrap_or(0);
    println!("Tower offline in state {}. {} aircraft departed.", tower.state(), departed);
    Ok(())
}
