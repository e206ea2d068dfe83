use anyhow::Error;
use leakscan_config::ConfigError;
use leakscan_store::error::{StoreError, StoreErrorKind};
use leakscan_sync::SyncError;
use std::process::ExitCode;
use thiserror::Error as ThisError;
use tracing::enabled;
use tracing::Level;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_AUTH_FAILED: u8 = 4;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error) {
    if is_auth_failure(err) {
        eprintln!("Invalid user credentials given.");
        return;
    }
    if enabled!(Level::DEBUG) {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

fn is_auth_failure(err: &Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<SyncError>(),
            Some(SyncError::InvalidCredentials)
        )
    })
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status_for(err))
}

fn exit_status_for(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            };
        }
        if let Some(sync_err) = cause.downcast_ref::<SyncError>() {
            return sync_exit_code(sync_err);
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return store_exit_code(store_err);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
    }
    EXIT_FAILURE
}

fn sync_exit_code(err: &SyncError) -> u8 {
    match err {
        SyncError::InvalidCredentials => EXIT_AUTH_FAILED,
        SyncError::Unavailable(_) => EXIT_INVALID_INPUT,
        SyncError::Status { .. } | SyncError::Parse(_) => EXIT_FAILURE,
        #[cfg(feature = "remote-feed")]
        SyncError::Http(_) => EXIT_FAILURE,
        #[cfg(feature = "remote-feed")]
        SyncError::Url(_) => EXIT_INVALID_INPUT,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::InvalidDataPath => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingDatabase
        | StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Sql => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidFeedUrl { .. }
        | ConfigError::InvalidPageSize(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
