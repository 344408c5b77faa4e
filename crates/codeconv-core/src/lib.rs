//! Core domain types, panel models and port definitions for codeconv.
//!
//! This crate has no HTTP or process code. Adapters (`codeconv-client`,
//! `codeconv-runtime`, `codeconv-cli`) implement the ports defined here and
//! drive the workflow services.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod panels;
pub mod paths;
pub mod ports;
pub mod project;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    ConversionRequest, ConversionResponse, MakeVoRequest, MakeVoResponse, Selection,
    SelectionError,
};
pub use panels::{
    ApiStatus, CodeConverterPanel, PanelCommand, PanelItem, PanelKind, RefreshSignal, RunStatus,
    ServerSnapshot, VoGeneratorPanel,
};
pub use ports::{ApiPortError, ConverterApiPort, LogSinkPort, LogSource};
pub use services::{
    ConversionService, VoGenerationService, VoOutcome, WorkflowError, refresh_api_status,
};
pub use settings::{
    DEFAULT_API_ENDPOINT, DEFAULT_TARGET_LANGUAGE, DEFAULT_TIMEOUT_MS, Settings, SettingsError,
    validate_settings,
};

// Re-export path utilities
pub use paths::{
    PathError, absolutize, data_root, env_file_path, normalize_user_path, persist_env_value,
};
