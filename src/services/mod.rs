pub mod config_store;
pub mod detection;
pub mod lexicon;
pub mod text_processor;

pub use config_store::{ConfigError, ConfigStore};
pub use detection::{classify, Classifier, DetectorConfig, ScoreConfig};
pub use lexicon::Lexicon;
