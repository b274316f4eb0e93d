#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds. Also bounds every store call made for a request.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    /// Seconds.
    pub max_lifetime: u64,
    /// Seconds.
    pub connection_timeout: u64,
}
