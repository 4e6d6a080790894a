//! Expected-failure classification
//!
//! A dev node reports an aborted contract execution with one of a few well-known
//! strings. These helpers tell "the chain rejected the call as expected" apart
//! from unrelated failures.

use crate::error::HelperError;
use std::fmt::Display;

const EXCEPTION_SIGNATURES: [&str; 3] = ["invalid opcode", "invalid JUMP", "revert"];

/// Returns true if the rendered error contains a revert/invalid-opcode/invalid-JUMP signature
pub fn is_exception<E: Display + ?Sized>(error: &E) -> bool {
    let message = error.to_string();
    EXCEPTION_SIGNATURES
        .iter()
        .any(|signature| message.contains(signature))
}

/// Like [`is_exception`], but searches the whole context chain of an `anyhow::Error`
pub fn is_exception_chain(error: &anyhow::Error) -> bool {
    is_exception(&format!("{:#}", error))
}

/// Fails with the rendered error as the message unless it is an expected chain failure
pub fn ensure_exception<E: Display + ?Sized>(error: &E) -> Result<(), HelperError> {
    if is_exception(error) {
        Ok(())
    } else {
        Err(HelperError::UnexpectedException(error.to_string()))
    }
}

/// Like [`ensure_exception`], but searches the whole context chain of an `anyhow::Error`
///
/// The failure message is the full chain (`{:#}`), so the node's message is not lost.
pub fn ensure_exception_chain(error: &anyhow::Error) -> Result<(), HelperError> {
    ensure_exception(&format!("{:#}", error))
}
