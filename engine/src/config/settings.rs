// Engine settings, loadable from a config file or environment by the host.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    /// How many cities the sales-by-city series keeps.
    pub top_cities: usize,
    /// How many models the top-models series keeps.
    pub top_models: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            top_cities: 10,
            top_models: 10,
        }
    }
}
