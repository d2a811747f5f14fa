//! One-shot delayed tasks: wallet link and install prompt reveal

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, error};

use crate::state::Controller;

/// Run the wallet handshake and apply its result if the session is unchanged
pub async fn wallet_connect_task(controller: Arc<Controller>, generation: u64) {
    let result = controller.wallet().connect().await;

    if let Err(e) = controller.finish_wallet_connect(generation, result) {
        error!("Failed to apply wallet connection: {}", e);
    }
}

/// Reveal the install prompt after the profile delay
pub async fn install_prompt_task(controller: Arc<Controller>, generation: u64) {
    sleep(controller.profile.install_prompt_delay).await;

    match controller.reveal_install_prompt(generation) {
        Ok(true) => debug!("Install prompt revealed"),
        Ok(false) => debug!("Install prompt no longer relevant"),
        Err(e) => error!("Failed to reveal install prompt: {}", e),
    }
}
