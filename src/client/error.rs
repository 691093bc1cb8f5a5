//! Transport errors

use thiserror::Error;

use super::Command;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request for {command} failed: {source}")]
    Request {
        command: Command,
        #[source]
        source: reqwest::Error,
    },

    #[error("server answered {status} to {command}")]
    Status { command: Command, status: u16 },

    #[error("could not decode {command} reply: {source}")]
    Decode {
        command: Command,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not build http client: {0}")]
    Build(#[from] reqwest::Error),
}
