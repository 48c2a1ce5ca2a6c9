use tfy_board::Board;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub board: Board,
}

impl AppState {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// In-memory stores configured from `config`.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let board = Board::in_memory(&config.auth, config.max_photo_bytes)?;
        Ok(Self::new(board))
    }
}
