// src/kubeconfig/mod.rs
mod combine;
mod writer;

pub use combine::combine_kubeconfigs;
pub use writer::{write_config_file, CONFIG_FILE_NAME};
