use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Invalid data: {0}")]
    Data(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type PairsResult<T> = Result<T, BacktestError>;
