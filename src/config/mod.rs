pub mod traits;
pub mod meta;
pub mod outer;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use meta::MetaConfig;
pub use outer::OuterConfig;
pub use traits::ConfigSection;
