//! Upload security scanning.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::AssistError;

/// Outcome of scanning an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanVerdict {
    Clean,
    Infected,
}

/// Inspects an uploaded file before it becomes visible.
#[async_trait]
pub trait SecurityScanner: Send + Sync {
    async fn scan(&self, document_name: &str) -> Result<ScanVerdict, AssistError>;
}

/// Scanner that waits a fixed delay and passes a configurable share of files.
#[derive(Debug, Clone)]
pub struct SimulatedScanner {
    pass_rate: f64,
    delay: Duration,
}

impl SimulatedScanner {
    /// `pass_rate` is clamped into `[0, 1]`.
    pub fn new(pass_rate: f64, delay: Duration) -> Self {
        let pass_rate = if pass_rate.is_nan() { 1.0 } else { pass_rate.clamp(0.0, 1.0) };
        Self { pass_rate, delay }
    }
}

#[async_trait]
impl SecurityScanner for SimulatedScanner {
    async fn scan(&self, document_name: &str) -> Result<ScanVerdict, AssistError> {
        tokio::time::sleep(self.delay).await;
        let clean = rand::rng().random_bool(self.pass_rate);
        tracing::debug!(document = document_name, clean, "Simulated security scan finished");
        Ok(if clean { ScanVerdict::Clean } else { ScanVerdict::Infected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn full_pass_rate_always_clean() {
        let scanner = SimulatedScanner::new(1.0, Duration::ZERO);
        for _ in 0..20 {
            assert_eq!(scanner.scan("plan.pdf").await.unwrap(), ScanVerdict::Clean);
        }
    }

    #[tokio::test]
    async fn zero_pass_rate_always_infected() {
        let scanner = SimulatedScanner::new(-2.0, Duration::ZERO);
        assert_eq!(scanner.scan("plan.pdf").await.unwrap(), ScanVerdict::Infected);
    }
}
