use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the dishes API; submissions go to `<url>/dishes/`
    #[serde(default = "default_dishes_api_url")]
    pub dishes_api_url: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_dishes_api_url() -> String {
    "https://umzzcc503l.execute-api.us-west-2.amazonaws.com".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
