//! Cross-cutting helpers

pub mod pagination;
pub mod retry;
