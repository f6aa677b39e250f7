use clap::{Parser, ValueEnum};
use std::path::Path;
use std::sync::Arc;
use tally::{
    encoder, DefinitionLoader, Machine, MachineCatalog, MachineConfig, MachineDefinition, Step,
};

mod menu;
mod render;

/// Upper bound on steps per run. The engine never bounds itself; a defective
/// table can loop forever and the driver is the place that pulls the plug.
const MAX_RUN_STEPS: usize = 1_000_000;
/// Cells rendered either side of the head in watch mode.
const TAPE_WINDOW: usize = 30;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The built-in machine to run
    #[clap(short, long, value_enum)]
    machine: Option<Demo>,

    /// Run a machine definition from a JSON file instead
    #[clap(short, long, conflicts_with = "machine")]
    file: Option<String>,

    /// Numeric operand, unary-encoded onto the tape (repeat for two operands)
    #[clap(short, long)]
    values: Vec<u32>,

    /// Raw word placed on the tape starting at position 0
    #[clap(short, long)]
    word: Option<String>,

    /// Render the tape after every step
    #[clap(short = 'd', long)]
    watch: bool,

    /// List the built-in machines
    #[clap(short, long)]
    list: bool,
}

/// The built-in demonstrations, one per catalog machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Demo {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Square,
    Palindrome,
    Parity,
    EvenOdd,
}

impl Demo {
    pub(crate) const ALL: [Demo; 8] = [
        Demo::Addition,
        Demo::Subtraction,
        Demo::Multiplication,
        Demo::Division,
        Demo::Square,
        Demo::Palindrome,
        Demo::Parity,
        Demo::EvenOdd,
    ];

    /// The catalog entry this demonstration runs.
    pub(crate) fn catalog_name(self) -> &'static str {
        match self {
            Demo::Addition => "Unary addition",
            Demo::Subtraction => "Unary subtraction",
            Demo::Multiplication => "Unary multiplication",
            Demo::Division => "Unary division",
            Demo::Square => "Unary square",
            Demo::Palindrome => "Palindrome check",
            Demo::Parity => "Parity check",
            Demo::EvenOdd => "Even-odd check",
        }
    }

    /// Menu title shown in the interactive loop.
    pub(crate) fn title(self) -> &'static str {
        match self {
            Demo::Addition => "Addition of two numbers",
            Demo::Subtraction => "Subtraction of two numbers",
            Demo::Multiplication => "Multiplication of two numbers",
            Demo::Division => "Division of two numbers",
            Demo::Square => "Square of a number",
            Demo::Palindrome => "Check palindrome",
            Demo::Parity => "Check parity",
            Demo::EvenOdd => "Check even/odd",
        }
    }

    /// How many numeric operands the demonstration needs; `None` means it
    /// takes a word of 0s and 1s instead.
    pub(crate) fn operand_count(self) -> Option<usize> {
        match self {
            Demo::Addition | Demo::Subtraction | Demo::Multiplication | Demo::Division => Some(2),
            Demo::Square | Demo::EvenOdd => Some(1),
            Demo::Palindrome | Demo::Parity => None,
        }
    }

    /// Builds the tape word for this demonstration from the given operands.
    pub(crate) fn input_word(self, values: &[u32], word: Option<&str>) -> Result<String, String> {
        match self {
            Demo::Addition => {
                let (a, b) = two_values(self, values)?;
                Ok(encoder::addition(a, b))
            }
            Demo::Subtraction => {
                let (a, b) = two_values(self, values)?;
                Ok(encoder::subtraction(a, b))
            }
            Demo::Multiplication => {
                let (a, b) = two_values(self, values)?;
                Ok(encoder::multiplication(a, b))
            }
            Demo::Division => {
                let (a, b) = two_values(self, values)?;
                if a.min(b) == 0 {
                    return Err("division needs two positive operands".to_string());
                }
                Ok(encoder::division(a, b))
            }
            Demo::Square => Ok(encoder::square(one_value(self, values)?)),
            Demo::EvenOdd => Ok(encoder::unary(one_value(self, values)?)),
            Demo::Palindrome | Demo::Parity => {
                let word = word
                    .ok_or_else(|| format!("{} needs --word with a string of 0s and 1s", self.catalog_name()))?;
                if !word.chars().all(|c| c == '0' || c == '1') {
                    return Err(format!("'{}' is not a word over 0 and 1", word));
                }
                Ok(word.to_string())
            }
        }
    }

    /// Turns a finished run into the demonstration's verdict line.
    pub(crate) fn verdict(self, summary: &RunSummary) -> String {
        match self {
            Demo::Palindrome => {
                if summary.accepted {
                    "Palindrome".to_string()
                } else {
                    "Not a palindrome".to_string()
                }
            }
            Demo::Parity => {
                if summary.accepted {
                    "Even parity".to_string()
                } else {
                    "Odd parity".to_string()
                }
            }
            Demo::EvenOdd => {
                if summary.accepted {
                    "Even".to_string()
                } else {
                    "Odd".to_string()
                }
            }
            _ => {
                if summary.accepted {
                    format!("Result: {}", summary.ones)
                } else {
                    "Rejected (machine halted outside an accepting state)".to_string()
                }
            }
        }
    }
}

fn one_value(demo: Demo, values: &[u32]) -> Result<u32, String> {
    match values {
        [n] => Ok(*n),
        _ => Err(format!(
            "{} needs exactly one --values operand",
            demo.catalog_name()
        )),
    }
}

fn two_values(demo: Demo, values: &[u32]) -> Result<(u32, u32), String> {
    match values {
        [a, b] => Ok((*a, *b)),
        _ => Err(format!(
            "{} needs exactly two --values operands",
            demo.catalog_name()
        )),
    }
}

/// What a completed run looked like.
pub(crate) struct RunSummary {
    pub accepted: bool,
    pub ones: usize,
    pub steps: usize,
}

/// Drives a machine to halting, rendering each step in watch mode.
pub(crate) fn run(
    definition: MachineDefinition,
    word: &str,
    watch: bool,
) -> Result<RunSummary, String> {
    let config = Arc::new(MachineConfig::compile(definition).map_err(|e| e.to_string())?);
    let mut machine = Machine::new(config);
    machine.initialize(encoder::tape_content(word));

    for _ in 0..MAX_RUN_STEPS {
        if watch {
            println!("{}", render::frame(&machine, TAPE_WINDOW));
        }

        match machine.step().map_err(|e| e.to_string())? {
            Step::Continue => {}
            Step::Halted => {
                if watch {
                    println!("{}", render::frame(&machine, TAPE_WINDOW));
                }
                return Ok(RunSummary {
                    accepted: machine.accepted_input().map_err(|e| e.to_string())?,
                    ones: encoder::ones(machine.tape()),
                    steps: machine.step_count(),
                });
            }
        }
    }

    Err(format!(
        "machine did not halt within {} steps; giving up",
        MAX_RUN_STEPS
    ))
}

/// Runs one built-in demonstration and prints its verdict.
pub(crate) fn run_demo(
    demo: Demo,
    values: &[u32],
    word: Option<&str>,
    watch: bool,
) -> Result<(), String> {
    let input = demo.input_word(values, word)?;
    let definition =
        MachineCatalog::definition_by_name(demo.catalog_name()).map_err(|e| e.to_string())?;

    let summary = run(definition, &input, watch)?;
    println!("{}", demo.verdict(&summary));
    println!("Halted after {} steps.", summary.steps);

    Ok(())
}

fn run_file(path: &str, word: Option<&str>, watch: bool) -> Result<(), String> {
    let word = word.ok_or("running a definition file needs --word")?;
    let definition =
        DefinitionLoader::load_definition(Path::new(path)).map_err(|e| e.to_string())?;

    let summary = run(definition, word, watch)?;
    if summary.accepted {
        println!("Accepted");
    } else {
        println!("Rejected");
    }
    println!(
        "Halted after {} steps with {} ones on the tape.",
        summary.steps, summary.ones
    );

    Ok(())
}

fn list_machines() {
    for index in 0..MachineCatalog::count() {
        match MachineCatalog::info(index) {
            Ok(info) => println!(
                "{:2}. {} ({} states, {} rules)",
                info.index + 1,
                info.name,
                info.state_count,
                info.rule_count
            ),
            Err(e) => eprintln!("Failed to read machine {}: {}", index, e),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        list_machines();
        return;
    }

    let result = if let Some(demo) = cli.machine {
        run_demo(demo, &cli.values, cli.word.as_deref(), cli.watch)
    } else if let Some(file) = &cli.file {
        run_file(file, cli.word.as_deref(), cli.watch)
    } else if atty::is(atty::Stream::Stdin) {
        menu::interactive_loop(cli.watch)
    } else {
        Err("no machine given; use --machine, --file, or --list".to_string())
    };

    if let Err(message) = result {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}
