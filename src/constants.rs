// src/constants.rs

pub const UI_WIDTH: usize = 72;
pub const MAX_FILENAME_BYTES: usize = 200;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_SAVE_DIR: &str = "downloads";
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
pub const SERVER_ENV_VAR: &str = "TT_DL_SERVER";
pub const USER_AGENT: &str = concat!(clap::crate_name!(), "/", clap::crate_version!());

pub mod api {
    pub const DOWNLOAD_PATH: &str = "/api/v1/tiktok/download";
    pub const PROXY_PATH: &str = "/api/v1/tiktok/proxy";
    pub const FILENAME_PREFIX: &str = "tiktok_";
    pub const FILENAME_EXT: &str = ".mp4";
}

pub mod messages {
    pub const EMPTY_INPUT: &str = "Please paste a valid video URL first!";
    pub const NO_VIDEO_DATA: &str = "No video data received from server.";
    pub const SERVER_ERROR: &str = "Server error, please try again.";
    pub const CONNECTION_FAILED: &str =
        "Could not connect to server. Please check your internet connection.";
    pub const NO_CAPTION: &str = "No caption provided.";
    pub const INVALID_INPUT: &str = "Input is not valid UTF-8 text, please paste the link again.";
}

pub mod settings {
    pub const THEME_KEY: &str = "theme";
}
