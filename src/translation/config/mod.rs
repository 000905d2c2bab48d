//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 引擎调用相关
    pub const DEFAULT_ENGINE_PATH: &str = "./translate";
    pub const DEFAULT_ENGINE_ARGS: &[&str] = &["-json"];

    // 语言设置
    pub const AUTO_LANG: &str = "auto";
    pub const DEFAULT_SOURCE_LANG: &str = "auto";
    pub const DEFAULT_TARGET_LANG: &str = "en";

    // 分段与批量相关
    pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 500;
    pub const DEFAULT_SINGLE_CALL_THRESHOLD: usize = 500;

    // 实时翻译防抖窗口
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "transflow.toml",
        "config.toml",
        ".transflow.toml",
        "~/.config/transflow/config.toml",
        "/etc/transflow/config.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS.iter().any(|path| {
        let expanded = shellexpand::tilde(path);
        std::path::Path::new(expanded.as_ref()).exists()
    })
}

/// 向后兼容的配置加载函数
///
/// 加载失败时退回默认配置，保证调用方总能拿到可用的配置。
pub fn load_translation_config(target_lang: &str, engine_path: Option<&str>) -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.create_simple_config(target_lang, engine_path),
        Err(e) => {
            tracing::warn!("创建配置管理器失败，使用默认配置: {}", e);
            TranslationConfig::default_with_lang(target_lang, engine_path)
        }
    }
}
