use std::time::Duration;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub const BASIC_AUTH_CHALLENGE: &str = "Basic realm=\"Restricted\"";

pub const INVALID_PROJECT_DATA: &str = "Invalid project data";
pub const PROJECT_NAME_REQUIRED: &str = "Project name is required";

pub const PING_RESPONSE: &str = "pong";
