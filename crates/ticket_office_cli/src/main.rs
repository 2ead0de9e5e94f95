//! Console front-end for the ticket office records.
//!
//! # Responsibility
//! - Bootstrap logging, storage and the form controller.
//! - Translate console commands into controller calls and print the view.

mod console;
mod render;

use console::{parse_command, Command, HELP};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use ticket_office_core::db::open_db;
use ticket_office_core::{
    core_version, init_logging, AppConfig, ControllerError, FormController, SqliteRecordStore,
};

fn main() -> ExitCode {
    let base_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = AppConfig::rooted_at(&base_dir);

    // Logging failures do not block startup.
    if let Err(err) = init_logging(config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }

    let mut controller = match start(&config) {
        Ok(controller) => controller,
        Err(err) => {
            error!("event=app_start module=cli status=error error={err}");
            eprintln!("cannot open {}: {err}", config.database_path.display());
            return ExitCode::FAILURE;
        }
    };

    println!("ticket office {}", core_version());
    print_view(&controller);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("input error: {err}");
                return ExitCode::FAILURE;
            }
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(console::ParseError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = run(&mut controller, command) {
            println!("error: {err}");
        }
        let _ = io::stdout().flush();
    }

    info!("event=app_stop module=cli status=ok");
    ExitCode::SUCCESS
}

fn start(
    config: &AppConfig,
) -> Result<FormController<SqliteRecordStore>, Box<dyn std::error::Error>> {
    let conn = open_db(&config.database_path)?;
    let store = SqliteRecordStore::bootstrap(conn, config.collections.as_slice())?;
    Ok(FormController::new(store)?)
}

fn run(
    controller: &mut FormController<SqliteRecordStore>,
    command: Command,
) -> Result<(), ControllerError> {
    match command {
        Command::Kinds => println!("{}", render::kinds(controller.selected_kind())),
        Command::Use(name) => {
            controller.select_collection(&name)?;
            print_view(controller);
        }
        Command::Show => print_view(controller),
        Command::Set(field, text) => {
            controller.form_mut().set_text(field, text)?;
            print!("{}", render::form(controller.form()));
        }
        Command::Pick(field, option) => {
            controller.form_mut().select_option(field, option)?;
            print!("{}", render::form(controller.form()));
        }
        Command::Clear(field) => {
            controller.form_mut().clear_selection(field)?;
            print!("{}", render::form(controller.form()));
        }
        Command::Add => {
            let id = controller.submit()?;
            println!("added {id}");
            print_view(controller);
        }
        Command::Remove(id) => {
            if controller.delete_row(id) {
                print_view(controller);
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn print_view(controller: &FormController<SqliteRecordStore>) {
    println!("{}", render::kinds(controller.selected_kind()));
    print!("{}", render::table(controller));
    print!("{}", render::form(controller.form()));
}
