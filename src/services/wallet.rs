//! Wallet client capability

use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{ControllerError, Result};

/// Establishes the wallet link
#[async_trait]
pub trait WalletClient: Send + Sync {
    async fn connect(&self) -> Result<()>;
}

/// Wallet that "connects" after a fixed delay, no handshake
#[derive(Debug)]
pub struct SimulatedWallet {
    delay: Duration,
    fail: AtomicBool,
    attempts: AtomicUsize,
}

impl SimulatedWallet {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: AtomicBool::new(false),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Make subsequent connections fail after the delay
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of times `connect` has been called
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletClient for SimulatedWallet {
    async fn connect(&self) -> Result<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Simulated wallet handshake #{} ({:?})", attempt, self.delay);
        sleep(self.delay).await;

        if self.fail.load(Ordering::SeqCst) {
            return Err(ControllerError::Wallet("simulated wallet refused the link".to_string()));
        }
        info!("Simulated wallet linked");
        Ok(())
    }
}
