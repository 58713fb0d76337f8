//! HTTP infrastructure: implements `HttpProbe` with blocking `ureq` inside
//! `spawn_blocking`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::HttpProbe;

/// Production implementation that performs real HTTP requests.
pub struct UreqHttpProbe;

impl HttpProbe for UreqHttpProbe {
    async fn get_status(&self, url: &str, timeout: Duration) -> Result<u16> {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            match agent.get(&url).call() {
                Ok(response) => Ok(response.status()),
                // Non-2xx is still a response; monitoring reports the code.
                Err(ureq::Error::Status(code, _)) => Ok(code),
                Err(ureq::Error::Transport(t)) => Err(anyhow::anyhow!("{t}")),
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}
