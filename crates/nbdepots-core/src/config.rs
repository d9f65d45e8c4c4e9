use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn invalid(var: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse and validate configuration through an arbitrary env-var lookup so
/// tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e))
    };

    let parse_radius = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(var, "must be a positive number"));
        }
        Ok(value)
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("NBDEPOTS_ENV", "development"))?;
    let bind_addr = parse_addr("NBDEPOTS_BIND_ADDR", "0.0.0.0:4000")?;
    let log_level = or_default("NBDEPOTS_LOG_LEVEL", "info");
    let places_path = PathBuf::from(or_default("NBDEPOTS_PLACES_PATH", "./config/places.json"));

    let db_max_connections = parse_u32("NBDEPOTS_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("NBDEPOTS_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("NBDEPOTS_DB_ACQUIRE_TIMEOUT_SECS", "3")?;

    let geocoder_url = or_default(
        "NBDEPOTS_GEOCODER_URL",
        "https://nominatim.openstreetmap.org",
    );
    let oil_source_url = or_default("NBDEPOTS_OIL_SOURCE_URL", "https://nb.uoma-atlantic.com");
    let electronics_url = or_default(
        "NBDEPOTS_ELECTRONICS_URL",
        "https://www.recyclemyelectronics.ca",
    );

    let province_code = or_default("NBDEPOTS_PROVINCE_CODE", "nb");
    let province_name = or_default("NBDEPOTS_PROVINCE_NAME", "New Brunswick");
    let country = or_default("NBDEPOTS_COUNTRY", "Canada");
    let user_agent = or_default(
        "NBDEPOTS_USER_AGENT",
        "nbdepots/0.1 (recycling-depot-finder)",
    );

    let upstream_timeout_secs = parse_u64("NBDEPOTS_UPSTREAM_TIMEOUT_SECS", "3")?;
    let store_timeout_secs = parse_u64("NBDEPOTS_STORE_TIMEOUT_SECS", "3")?;
    if upstream_timeout_secs == 0 {
        return Err(invalid("NBDEPOTS_UPSTREAM_TIMEOUT_SECS", "must be at least 1"));
    }
    if store_timeout_secs == 0 {
        return Err(invalid("NBDEPOTS_STORE_TIMEOUT_SECS", "must be at least 1"));
    }

    let max_concurrent_geocodes = parse_usize("NBDEPOTS_MAX_CONCURRENT_GEOCODES", "1")?.max(1);
    let paint_radius_miles = parse_radius("NBDEPOTS_PAINT_RADIUS_MILES", "25")?;
    let electronics_radius = parse_u32("NBDEPOTS_ELECTRONICS_RADIUS", "25")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        places_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        geocoder_url,
        oil_source_url,
        electronics_url,
        province_code,
        province_name,
        country,
        user_agent,
        upstream_timeout_secs,
        store_timeout_secs,
        max_concurrent_geocodes,
        paint_radius_miles,
        electronics_radius,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid(
            "NBDEPOTS_ENV",
            format!("unknown environment \"{other}\""),
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
