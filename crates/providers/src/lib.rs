//! Text-generation provider implementations for seteuk.
//!
//! All providers implement the `seteuk_core::TextGenerator` trait.

pub mod gemini;

pub use gemini::GeminiProvider;
