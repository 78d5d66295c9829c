//! Interactive menu front-end for the period history core.
//!
//! # Responsibility
//! - Drive prompt/response flows over stdin/stdout.
//! - Delegate every domain decision to `cycletrack_core`.
//!
//! # Invariants
//! - Typing `q` at any date/selection prompt cancels back to the menu.
//! - This layer never touches the history file directly.

use cycletrack_core::{
    core_version, default_log_level, format_period_date, init_logging, HistoryRepository,
    PeriodService, TextFileHistoryRepository,
};
use std::io::{self, Write};
use std::process::ExitCode;

const DEFAULT_HISTORY_FILE: &str = "periods.txt";
const LOG_DIR_ENV: &str = "CYCLETRACK_LOG_DIR";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(message) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: file logging disabled: {message}");
        }
    }

    let history_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string());
    let repo = TextFileHistoryRepository::new(&history_path);
    let mut service = match PeriodService::open(repo) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("cannot open period history `{history_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    run_menu(&mut service);
    ExitCode::SUCCESS
}

fn run_menu<R: HistoryRepository>(service: &mut PeriodService<R>) {
    loop {
        clear_screen();
        println!(
            "CycleTrack {} period tracker. Type a number and press Enter.",
            core_version()
        );
        println!("1. Add new period");
        println!("2. View previous periods");
        println!("3. Edit a period");
        println!("4. View average cycle length");
        println!("5. Predict next period");
        println!("6. Exit");

        let Some(choice) = prompt("Select an option: ") else {
            break;
        };

        match choice.as_str() {
            "1" => add_flow(service),
            "2" => view_flow(service),
            "3" => edit_flow(service),
            "4" => average_flow(service),
            "5" => predict_flow(service),
            "6" => {
                clear_screen();
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid option. Please try again.");
                pause();
            }
        }
    }
}

fn add_flow<R: HistoryRepository>(service: &mut PeriodService<R>) {
    let Some(start) =
        prompt_cancellable("Enter the start date (YYYY-MM-DD) or type 'q' to return to the menu: ")
    else {
        return;
    };
    let Some(end) =
        prompt_cancellable("Enter the end date (YYYY-MM-DD) or type 'q' to return to the menu: ")
    else {
        return;
    };

    match service.add_period(&start, &end) {
        Ok(()) => println!("Period added successfully!"),
        Err(err) => println!("Could not add period: {err}"),
    }
    pause();
}

fn view_flow<R: HistoryRepository>(service: &PeriodService<R>) {
    clear_screen();
    if service.records().is_empty() {
        println!("No periods recorded yet.");
    } else {
        println!("Previous periods:");
        for line in service.display_lines() {
            println!("{line}");
        }
    }
    pause();
}

fn edit_flow<R: HistoryRepository>(service: &mut PeriodService<R>) {
    clear_screen();
    if service.records().is_empty() {
        println!("No periods recorded yet.");
        pause();
        return;
    }

    for line in service.display_lines() {
        println!("{line}");
    }

    let Some(selection) = prompt_cancellable(
        "Select the number of the period you want to edit (or type 'q' to return to the menu): ",
    ) else {
        return;
    };
    let Some(index) = parse_selection(&selection, service.records().len()) else {
        println!("Invalid selection.");
        pause();
        return;
    };

    let Some(start) = prompt_cancellable(
        "Enter the new start date (YYYY-MM-DD) or type 'q' to return to the menu: ",
    ) else {
        return;
    };
    let Some(end) = prompt_cancellable(
        "Enter the new end date (YYYY-MM-DD) or type 'q' to return to the menu: ",
    ) else {
        return;
    };

    match service.edit_period(index, &start, &end) {
        Ok(()) => println!("Period updated successfully!"),
        Err(err) => println!("Could not update period: {err}"),
    }
    pause();
}

fn average_flow<R: HistoryRepository>(service: &PeriodService<R>) {
    clear_screen();
    match service.average_cycle_length() {
        Some(average) => println!("Average cycle length: {average:.2} days"),
        None => println!("Not enough data to calculate average cycle length."),
    }
    pause();
}

fn predict_flow<R: HistoryRepository>(service: &PeriodService<R>) {
    clear_screen();
    match service.predict_next_period() {
        Some(date) => println!(
            "Next period is predicted to start on: {}",
            format_period_date(date)
        ),
        None => println!("Not enough data to predict the next period."),
    }
    pause();
}

/// Converts a 1-based menu selection into a 0-based history index.
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let number: usize = input.parse().ok()?;
    if number == 0 || number > len {
        return None;
    }
    Some(number - 1)
}

/// Reads one trimmed input line. Returns `None` on EOF or a read error.
fn prompt(text: &str) -> Option<String> {
    print!("{text}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(_) => None,
    }
}

/// Like [`prompt`], but treats `q`/`Q` as cancellation.
fn prompt_cancellable(text: &str) -> Option<String> {
    let input = prompt(text)?;
    if input.eq_ignore_ascii_case("q") {
        return None;
    }
    Some(input)
}

fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    let _ = io::stdout().flush();
}

fn pause() {
    let _ = prompt("Press Enter to return to the menu.");
}
