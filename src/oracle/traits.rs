//! Oracle trait for classification backends.
//!
//! The oracle is the hosted model that actually decides what is
//! solar-related. Solsieve never reproduces that judgment; it only sends a
//! [`ClassificationRequest`] and hands back whatever text comes out. Test
//! suites plug in deterministic fakes through the same trait.
//!
//! # Contract
//!
//! - Exactly one upstream call per `classify`; implementations must not
//!   retry.
//! - No internal timeout. Callers layer one on if they want it.
//! - Every failure is reported as `SolsieveError::Communication`.
//! - A successful return is raw text. It is *not* guaranteed to be valid
//!   JSON, let alone to match the declared schema.

use async_trait::async_trait;

use crate::Result;
use crate::types::ClassificationRequest;

/// Backend that classifies a keyword batch.
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    /// Oracle name for logging/metrics.
    fn name(&self) -> &str;

    /// Perform one classification call and return the raw payload.
    async fn classify(&self, request: &ClassificationRequest) -> Result<String>;
}

