//! QR-sharing variant: port 8081, `/app-release.apk` alias route with forced
//! download headers; everything else falls through to static serving of the
//! working directory.

use apkshare::{Config, Variant};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load(Variant::QrShare)?;

    // Fatal precondition: the package must exist before any socket is bound
    if !Path::new(&cfg.share.apk_path).exists() {
        eprintln!("APK file not found at {}", cfg.share.apk_path);
        eprintln!("Please build the APK first with: flutter build apk --release");
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(apkshare::run(cfg))
}
