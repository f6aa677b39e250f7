//! The interactive menu loop: pick a machine, enter its operands, watch it
//! run, read the verdict. Loops until the user exits.

use crate::{run_demo, Demo};
use std::io::{self, Write};

pub(crate) fn interactive_loop(watch: bool) -> Result<(), String> {
    loop {
        println!();
        println!("Available machines:");
        for (index, demo) in Demo::ALL.iter().enumerate() {
            println!("  {}. {}", index + 1, demo.title());
        }
        println!("  {}. Exit", Demo::ALL.len() + 1);

        let choice = match prompt("Enter choice: ")?.parse::<usize>() {
            Ok(choice) => choice,
            Err(_) => {
                println!("Please enter a number.");
                continue;
            }
        };

        if choice == Demo::ALL.len() + 1 {
            println!("Bye.");
            return Ok(());
        }

        let Some(&demo) = Demo::ALL.get(choice.wrapping_sub(1)) else {
            println!("No such machine.");
            continue;
        };

        if let Err(message) = run_chosen(demo, watch) {
            println!("{}", message);
        }
    }
}

fn run_chosen(demo: Demo, watch: bool) -> Result<(), String> {
    let mut values = Vec::new();
    let mut word = None;

    match demo.operand_count() {
        Some(count) => {
            for _ in 0..count {
                let value = prompt("Enter number: ")?
                    .parse::<u32>()
                    .map_err(|_| "Not a non-negative number.".to_string())?;
                values.push(value);
            }
        }
        None => {
            word = Some(prompt("Enter a word of 0s and 1s: ")?);
        }
    }

    run_demo(demo, &values, word.as_deref(), watch)
}

fn prompt(message: &str) -> Result<String, String> {
    print!("{}", message);
    io::stdout()
        .flush()
        .map_err(|e| format!("Failed to flush stdout: {}", e))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {}", e))?;

    Ok(line.trim().to_string())
}
