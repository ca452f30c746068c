#[derive(thiserror::Error, Debug)]
pub enum ForkIdError {
    #[error("Failed to decode RLP fork id: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    #[error("Fork id followed by {0} trailing bytes")]
    TrailingBytes(usize),
}
