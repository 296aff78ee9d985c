#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub fatsecret_client_id: String,
    pub fatsecret_client_secret: String,
}

impl FoodConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            fatsecret_client_id: std::env::var("FATSECRET_CLIENT_ID")
                .map_err(|_| "FATSECRET_CLIENT_ID environment variable not set".to_string())?,
            fatsecret_client_secret: std::env::var("FATSECRET_CLIENT_SECRET")
                .map_err(|_| "FATSECRET_CLIENT_SECRET environment variable not set".to_string())?,
        })
    }
}
