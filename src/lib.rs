pub mod api;
pub mod gui;

// Re-export the main types for convenience
pub use api::client::{ApiClientConfig, CineBotApi, HttpCineBotApi};
pub use api::error::ApiError;
pub use api::models::{
    ChatResponse, HistoryEntry, HistoryResponse, WatchTimeReport, WatchTimeResponse,
};
pub use gui::config_manager::{AppConfig, ConfigManager, WidgetSettings};
pub use gui::{bootstrap, ChatWidgetController, PageContext, WatchTimeReporter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        assert!(std::any::type_name::<HttpCineBotApi>().contains("HttpCineBotApi"));
        assert!(std::any::type_name::<ChatWidgetController>().contains("ChatWidgetController"));
    }

    #[test]
    fn test_error_types_re_exported() {
        let error = ApiError::status("chat", 404);
        assert!(error.to_string().contains("404"));
    }

    #[test]
    fn test_client_from_default_config() {
        let config = AppConfig::default();
        let client = HttpCineBotApi::new(&config.api_config());
        assert!(client.is_ok());
    }
}
