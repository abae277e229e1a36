// Configuration module entry point
// Manages variant defaults, configuration loading, and runtime state

mod state;
mod types;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, RouteHandler, RoutesConfig, ServerConfig, ShareConfig};

use crate::http::mime::APK_CONTENT_TYPE;

/// Conventional output path of the external mobile build tool
pub const APK_BUILD_PATH: &str = "build/app/outputs/flutter-apk/app-release.apk";

/// The two share server variants, preserved as distinct configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Port 8081, alias route with forced download headers (QR sharing)
    QrShare,
    /// Port 8001, plain static serving of the working directory
    SimpleShare,
}

impl Variant {
    pub const fn default_port(self) -> u16 {
        match self {
            Self::QrShare => 8081,
            Self::SimpleShare => 8001,
        }
    }

    pub const fn default_alias(self) -> Option<&'static str> {
        match self {
            Self::QrShare => Some("/app-release.apk"),
            Self::SimpleShare => None,
        }
    }
}

impl Config {
    /// Load configuration for a variant
    ///
    /// Layering: variant defaults, then an optional `apkshare.toml` file,
    /// then `APKSHARE`-prefixed environment variables.
    pub fn load(variant: Variant) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("apkshare").required(false))
            .add_source(config::Environment::with_prefix("APKSHARE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(variant.default_port()))?
            .set_default("share.apk_path", APK_BUILD_PATH)?
            .set_default("share.static_root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?;

        if let Some(alias) = variant.default_alias() {
            builder = builder.set_default("share.alias", alias)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Materialise the routing table
    ///
    /// The alias, when configured, becomes a single exact-match download
    /// route; everything else falls through to static serving.
    pub fn routes(&self) -> RoutesConfig {
        let mut custom_routes = HashMap::new();

        if let Some(alias) = &self.share.alias {
            let filename = Path::new(&self.share.apk_path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("app-release.apk")
                .to_string();

            custom_routes.insert(
                alias.clone(),
                RouteHandler::Download {
                    path: self.share.apk_path.clone(),
                    filename,
                    content_type: APK_CONTENT_TYPE.to_string(),
                },
            );
        }

        RoutesConfig {
            custom_routes,
            fallback: RouteHandler::Dir {
                path: self.share.static_root.clone(),
            },
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(variant: Variant) -> Config {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: variant.default_port(),
            },
            share: ShareConfig {
                apk_path: APK_BUILD_PATH.to_string(),
                static_root: ".".to_string(),
                alias: variant.default_alias().map(ToString::to_string),
            },
            logging: LoggingConfig {
                access_log: true,
                show_headers: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        }
    }

    #[test]
    fn test_variant_defaults() {
        assert_eq!(Variant::QrShare.default_port(), 8081);
        assert_eq!(Variant::SimpleShare.default_port(), 8001);
        assert_eq!(Variant::QrShare.default_alias(), Some("/app-release.apk"));
        assert_eq!(Variant::SimpleShare.default_alias(), None);
    }

    #[test]
    fn test_qr_variant_builds_download_route() {
        let routes = config_for(Variant::QrShare).routes();
        let handler = routes.custom_routes.get("/app-release.apk").unwrap();
        assert_eq!(
            *handler,
            RouteHandler::Download {
                path: APK_BUILD_PATH.to_string(),
                filename: "app-release.apk".to_string(),
                content_type: "application/vnd.android.package-archive".to_string(),
            }
        );
    }

    #[test]
    fn test_simple_variant_has_no_custom_routes() {
        let routes = config_for(Variant::SimpleShare).routes();
        assert!(routes.custom_routes.is_empty());
        assert_eq!(
            routes.fallback,
            RouteHandler::Dir {
                path: ".".to_string()
            }
        );
    }

    #[test]
    fn test_socket_addr() {
        let addr = config_for(Variant::QrShare).get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8081);
    }
}
