//! Error types for the node tree.
//!
//! Only the operations that talk to the layout engine return these. Tree
//! teardown and data resets never fail; anything they hit is routed through
//! [`report_exception`](crate::registry::report_exception) instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("layout engine error: {0}")]
    Layout(taffy::TaffyError),

    #[error("unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("layout node has already been freed")]
    LayoutNodeFreed,

    #[error("cannot link node {child}: {reason}")]
    InvalidLink { child: String, reason: &'static str },
}

impl From<taffy::TaffyError> for Error {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Layout(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
