#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub khalti: Khalti,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// MiB
    pub body_limit: u64,
    /// Seconds
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
    pub store_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Khalti {
    pub initiate_url: String,
    pub secret_key: String,
    pub return_url: String,
    pub website_url: String,
    /// Seconds
    pub timeout_secs: u64,
}
