use anyhow::{Context, Result};

use super::{
    config_model::{Database, DotEnvyConfig, Khalti, Server},
    stage::Stage,
};

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is invalid"))
}

fn optional_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: required("SERVER_PORT")?.parse().context("SERVER_PORT is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: optional_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS is invalid")?,
        store_timeout_secs: optional_or("STORE_TIMEOUT_SECS", "5")
            .parse()
            .context("STORE_TIMEOUT_SECS is invalid")?,
    };

    let khalti = Khalti {
        initiate_url: required("KHALTI_PAYMENT_INITIATE_API")?,
        secret_key: required("KHALTI_SECRET")?,
        return_url: required("KHALTI_RETURN_URL")?,
        website_url: required("KHALTI_WEBSITE_URL")?,
        timeout_secs: optional_or("KHALTI_TIMEOUT_SECS", "15")
            .parse()
            .context("KHALTI_TIMEOUT_SECS is invalid")?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        khalti,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_parses_short_names() {
        assert_eq!(Stage::try_from(&"prod".to_string()).unwrap(), Stage::Production);
        assert_eq!(Stage::try_from(&"Development".to_string()).unwrap(), Stage::Development);
        assert!(Stage::try_from(&"".to_string()).is_err());
    }
}
