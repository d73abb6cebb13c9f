use std::{
    error::Error,
    io::{self},
    path::Path,
    process::exit,
};

use clap::Parser;
use rusqlite::Connection;

use dinner_spinner::{
    DEFAULT_ADMIN_USERNAME, PasswordHash, User, delete_user_sessions, get_user_by_username,
    update_password,
};

/// A utility for changing the password of the admin account.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "dinner_spinner.db")]
    db_path: String,

    /// The account to reset.
    #[arg(long, default_value = DEFAULT_ADMIN_USERNAME)]
    username: String,
}

/// Prompt for a new password, store its hash and log the user out everywhere.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let db_path = Path::new(&args.db_path);
    validate_db_path(db_path);

    let connection = Connection::open(db_path)?;
    let user = get_user(&args.username, &connection);
    println!("Resetting password for {}", user.username);

    let password_hash = match get_new_password_hash() {
        Some(password_hash) => password_hash,
        None => return Ok(()),
    };

    update_password(&user.username, &password_hash, &connection)?;
    println!("Password updated successfully!");

    let ended_sessions = delete_user_sessions(user.id, &connection)?;
    if ended_sessions > 0 {
        println!("Logged out {ended_sessions} active session(s).");
    }

    Ok(())
}

fn get_user(username: &str, connection: &Connection) -> User {
    match get_user_by_username(username, connection) {
        Ok(user) => user,
        Err(error) => {
            print_error(format!("Could not load the user \"{username}\": {error}"));
            exit(1);
        }
    }
}

fn validate_db_path(db_path: &Path) {
    if !db_path.is_file() {
        print_error(format!("File does not exist at {db_path:#?}!"));
        exit(1);
    }
}

fn get_new_password_hash() -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = prompt("Enter a new password: ")?;

        if first_password.is_empty() {
            print_error("The password cannot be empty.");
            continue;
        }

        let second_password = prompt("Enter the same password again: ")?;

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        match PasswordHash::new(&first_password, PasswordHash::DEFAULT_COST) {
            Ok(password_hash) => return Some(password_hash),
            Err(error) => {
                print_error(format!("Could not hash password: {error}. Try again."));
            }
        }
    }
}

/// Read a password without echoing it. Returns `None` if stdin was closed or unreadable.
fn prompt(message: &str) -> Option<String> {
    match rpassword::prompt_password(message) {
        Ok(string) => Some(string),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(error) => {
            print_error(format!("Could not read password from stdin: {error}"));
            None
        }
    }
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string())
}
