use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub map: MapConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Load the built-in demo destinations/tours at boot
    pub seed_demo_data: bool,
}

/// Map feature configuration: session defaults and credential persistence
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Style reference handed to the map engine on session open
    pub style_ref: String,
    /// Fallback center used when the location list is empty
    pub default_center: (f64, f64),
    pub default_zoom: f64,
    pub default_pitch: f64,
    /// File the access credential is persisted in
    pub credential_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            map: MapConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let seed_demo_data = env::var("TOURDESK_SEED_DEMO")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            seed_demo_data,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MapConfig {
    // Aurangabad region, the product's home territory
    const DEFAULT_CENTER_LAT: f64 = 19.8762;
    const DEFAULT_CENTER_LNG: f64 = 75.3433;
    const DEFAULT_ZOOM: f64 = 9.0;
    const DEFAULT_PITCH: f64 = 0.0;

    pub fn from_env() -> Result<Self, String> {
        let style_ref = env::var("MAP_STYLE_REF")
            .unwrap_or_else(|_| "streets-v12".to_string());

        let default_center = match (env::var("MAP_CENTER_LAT"), env::var("MAP_CENTER_LNG")) {
            (Ok(lat), Ok(lng)) => {
                let lat = lat
                    .parse::<f64>()
                    .map_err(|_| "MAP_CENTER_LAT must be a valid number".to_string())?;
                let lng = lng
                    .parse::<f64>()
                    .map_err(|_| "MAP_CENTER_LNG must be a valid number".to_string())?;
                (lat, lng)
            }
            _ => (Self::DEFAULT_CENTER_LAT, Self::DEFAULT_CENTER_LNG),
        };

        let default_zoom = env::var("MAP_DEFAULT_ZOOM")
            .unwrap_or_else(|_| Self::DEFAULT_ZOOM.to_string())
            .parse::<f64>()
            .map_err(|_| "MAP_DEFAULT_ZOOM must be a valid number".to_string())?;

        let default_pitch = env::var("MAP_DEFAULT_PITCH")
            .unwrap_or_else(|_| Self::DEFAULT_PITCH.to_string())
            .parse::<f64>()
            .map_err(|_| "MAP_DEFAULT_PITCH must be a valid number".to_string())?;

        let credential_path = env::var("MAP_CREDENTIAL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".tourdesk/map_credential"));

        Ok(Self {
            style_ref,
            default_center,
            default_zoom,
            default_pitch,
            credential_path,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());

        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Tourdesk Core API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Administrative backend for the tour and car-rental product".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Basic-auth credentials in "user:password" form, when both are configured
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some(format!("{}:{}", u, p)),
            _ => None,
        }
    }
}
