//! apkshare - serve a locally built Android package over the LAN
//!
//! A device on the same network downloads the APK by scanning the printed
//! URL as a QR code or typing it in. Two variants exist as separate binaries:
//! `serve_apk` (alias route with forced download headers) and `simple_share`
//! (plain static serving of the working directory).

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod net;
pub mod server;

use std::sync::Arc;

pub use crate::config::{AppState, Config, Variant};

/// Bind the listener, print the banner, and serve until interrupted.
///
/// Callers are expected to have checked the package-exists precondition
/// already; nothing is bound before this function runs.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&config)?;

    let addr = config.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let local_ip = net::local_ipv4();
    let download_url = format!(
        "http://{}:{}{}",
        local_ip,
        listener.local_addr()?.port(),
        download_path(&config)
    );
    logger::log_server_start(&addr, local_ip, &download_url, &config);

    let state = Arc::new(AppState::new(config));
    server::signal::start_signal_handler(Arc::clone(&state.shutdown));

    server::run_server_loop(listener, state).await?;
    Ok(())
}

/// Request path a device uses to fetch the package: the alias when one is
/// configured, the real sub-path otherwise. The sub-path is percent-encoded
/// and normalised to a single leading slash so the printed URL is usable
/// as typed, even for an absolute `apk_path`.
fn download_path(config: &Config) -> String {
    match &config.share.alias {
        Some(alias) => alias.clone(),
        None => format!(
            "/{}",
            http::percent::encode_path(config.share.apk_path.trim_start_matches('/'))
        ),
    }
}
