//! Auth command handlers.

use std::io::{BufRead, Write, stdin, stderr};

use anyhow::{Context, Result};
use taleweave_core::config::Config;
use taleweave_core::session::Session;

use super::client;

pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let client = client(config)?;
    client
        .login(email, &password)
        .await
        .context("login failed")?;
    tracing::info!(%email, "signed in");
    println!("Signed in as {email}");
    Ok(())
}

pub async fn register(
    config: &Config,
    email: &str,
    name: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let client = client(config)?;
    client
        .register(name, email, &password)
        .await
        .context("registration failed")?;
    tracing::info!(%email, "account created");
    println!("Account created for {email}");
    Ok(())
}

pub fn logout() -> Result<()> {
    let session = Session::load();
    if session.clear_token().context("clear token")? {
        tracing::info!("signed out");
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

/// Reads the password from stdin when it was not passed as a flag.
fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    write!(stderr(), "Password: ").context("write prompt")?;
    stderr().flush().context("flush prompt")?;
    let mut line = String::new();
    stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    let password = line.trim_end_matches(['\n', '\r']).to_string();
    anyhow::ensure!(!password.is_empty(), "Password must not be empty");
    Ok(password)
}
