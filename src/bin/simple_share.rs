//! Simple-share variant: port 8001, plain static serving of the working
//! directory. The package is reachable only via its real sub-path.

use apkshare::{Config, Variant};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load(Variant::SimpleShare)?;

    // Fatal precondition: the package must exist before any socket is bound
    if !Path::new(&cfg.share.apk_path).exists() {
        eprintln!("APK file not found at {}", cfg.share.apk_path);
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(apkshare::run(cfg))
}
