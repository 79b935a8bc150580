use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GRADECRAFT_API_KEY").or_else(|_| std::env::var("API_KEY"))
            && !key.trim().is_empty()
        {
            self.api_key = Some(key.trim().to_string());
        }

        if let Ok(provider) = std::env::var("GRADECRAFT_PROVIDER")
            && !provider.trim().is_empty()
        {
            self.default_provider = provider.trim().to_string();
        }

        if let Ok(model) = std::env::var("GRADECRAFT_MODEL")
            && !model.trim().is_empty()
        {
            self.default_model = model.trim().to_string();
        }

        if let Ok(temp_str) = std::env::var("GRADECRAFT_TEMPERATURE")
            && let Ok(temp) = temp_str.trim().parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.default_temperature = temp;
        }

        if let Ok(url) = std::env::var("GRADECRAFT_BASE_URL")
            && !url.trim().is_empty()
        {
            self.provider_base_url = Some(url.trim().to_string());
        }

        if let Ok(level) = std::env::var("GRADECRAFT_LOG_LEVEL")
            && !level.trim().is_empty()
        {
            self.logging.level = level.trim().to_ascii_lowercase();
        }
    }
}
