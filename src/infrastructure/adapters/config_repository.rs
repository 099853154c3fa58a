//! JSON 설정 저장소 어댑터.

use anyhow::Result;

use crate::application::ports::ConfigRepository;
use crate::infrastructure::config::Config;

pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Config> {
        Config::load()
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Config::inspect_pretty_json()
    }
}
