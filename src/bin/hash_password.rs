use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::Password;

use orgsite::auth::password::hash_password;

const MIN_RECOMMENDED_LEN: usize = 8;

/// Generate an argon2 hash for the admin password.
///
/// Without `--password` the password is prompted for twice, without echo.
#[derive(Debug, Parser)]
#[command(name = "hash-password", version)]
struct Args {
    /// Password to hash. Prefer the prompt so it stays out of shell history.
    #[arg(long)]
    password: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let password = match args.password {
        Some(password) => password,
        None => read_confirmed_password()?,
    };

    if !check_password(&password)? {
        eprintln!(
            "Warning: password is shorter than {} characters. Consider a stronger one.",
            MIN_RECOMMENDED_LEN
        );
    }

    let hash = hash_password(&password).context("Failed to hash password")?;

    println!("Add this to your environment:");
    println!("ADMIN_PASSWORD_HASH='{}'", hash);
    Ok(())
}

/// Rejects an empty password; `Ok(false)` when it is shorter than recommended.
fn check_password(password: &str) -> anyhow::Result<bool> {
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password.chars().count() >= MIN_RECOMMENDED_LEN)
}

fn read_confirmed_password() -> anyhow::Result<String> {
    let password = Password::new()
        .with_prompt("Enter password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    Ok(password)
}
