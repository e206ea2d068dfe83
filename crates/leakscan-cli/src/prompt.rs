use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use leakscan_sync::Credentials;
use std::io::{self, BufRead, ErrorKind, Write};

const TEST_ACCOUNT_NOTE: &str = "NOTE: Please run this only with a test account.";

/// Uses the flag values when non-empty and prompts for the rest.
pub fn resolve_credentials(user: Option<String>, pw: Option<String>) -> Result<Credentials> {
    let username = match non_empty(user) {
        Some(user) => user,
        None => {
            let stdin = io::stdin();
            read_username(&mut stdin.lock(), &mut io::stderr())?
        }
    };
    let password = match non_empty(pw) {
        Some(pw) => pw,
        None => read_password(|| rpassword::prompt_password("Password: "), &mut io::stderr())?,
    };
    Ok(Credentials::new(username, password))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

pub fn read_username<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    loop {
        writeln!(out, "{TEST_ACCOUNT_NOTE}")?;
        write!(out, "Please enter your username: ")?;
        out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("read username")?;
        if read == 0 {
            return Err(invalid_input("no username provided"));
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
}

/// Re-prompts until `read` yields a non-empty password.
pub fn read_password<F, W>(mut read: F, out: &mut W) -> Result<String>
where
    F: FnMut() -> io::Result<String>,
    W: Write,
{
    loop {
        let password = match read() {
            Ok(password) => password,
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                return Err(invalid_input("no password provided"));
            }
            Err(err) => return Err(err).context("read password"),
        };
        if !password.is_empty() {
            return Ok(password);
        }
        writeln!(out, "Password cannot be blank.")?;
    }
}
