/*
 * Configuration Module
 *
 * Loads steering parameters from the JSON file named by STEERING_CONFIG.
 * Missing keys keep their defaults; an unreadable or invalid file falls back
 * to the defaults with a warning.
 */

use std::env;
use std::fs;
use std::path::Path;

use steering::SteeringParams;
use tracing::{info, warn};

pub const CONFIG_ENV: &str = "STEERING_CONFIG";

pub fn load_params() -> SteeringParams {
    match env::var(CONFIG_ENV) {
        Ok(path) => load_from(Path::new(&path)),
        Err(_) => SteeringParams::default(),
    }
}

fn load_from(path: &Path) -> SteeringParams {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), %err, "Could not read parameter file, using defaults");
            return SteeringParams::default();
        }
    };

    let params: SteeringParams = match serde_json::from_str(&text) {
        Ok(params) => params,
        Err(err) => {
            warn!(path = %path.display(), %err, "Could not parse parameter file, using defaults");
            return SteeringParams::default();
        }
    };

    if let Err(err) = params.validate() {
        warn!(path = %path.display(), %err, "Invalid parameters, using defaults");
        return SteeringParams::default();
    }

    info!(path = %path.display(), "Loaded parameters");
    params
}
