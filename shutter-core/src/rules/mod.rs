//! Rule compilation and the tiered rule store.
//!
//! `compiler` turns built-in definitions, keywords and user patterns into
//! compiled matchers. `store` holds the three tiers and answers the single
//! question the masking engine asks: is this text sensitive?

pub mod compiler;
pub mod store;
