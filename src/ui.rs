// src/ui.rs

use crate::{constants, settings::Theme};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    io::{self, BufRead, Write},
    sync::LazyLock,
    time::Duration,
};

pub static OK: LazyLock<ColoredString> = LazyLock::new(|| "[OK]".green());
pub static ERROR: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());
pub static INFO: LazyLock<ColoredString> = LazyLock::new(|| "[i]".cyan());
pub static WARN: LazyLock<ColoredString> = LazyLock::new(|| "[!]".yellow());
pub static CTRL_C: LazyLock<ColoredString> = LazyLock::new(|| "Ctrl+C".yellow());

/// 主题对应的配色
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn accent(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_magenta().bold(),
            Theme::Light => s.magenta().bold(),
        }
    }

    pub fn secondary(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_cyan(),
            Theme::Light => s.blue(),
        }
    }

    pub fn muted(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_black(),
            Theme::Light => s.dimmed(),
        }
    }

    pub fn link(&self, s: &str) -> ColoredString {
        self.secondary(s).underline()
    }
}

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn box_message(title: &ColoredString, content: &[String]) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", title);
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

pub fn plain(msg: &str) {
    println!("{}", msg);
}

pub fn info(msg: &str) {
    println!("{} {}", *INFO, msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", *ERROR, msg.red());
}

pub fn success(msg: &str) {
    println!("{} {}", *OK, msg.green());
}

/// 读取一行输入。到达输入末尾 (EOF) 时返回 `None`。
/// 不做 trim，原始内容交给调用方。整行总会被读走，
/// 不是合法 UTF-8 时返回 `ErrorKind::InvalidData`，下一行不受影响。
pub fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("\n>>> {}: ", message);
    io::stdout().flush()?;
    let mut raw = Vec::new();
    if io::stdin().lock().read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    let input = String::from_utf8(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn new_bytes_progress_bar(total: Option<u64>, prefix: &str) -> ProgressBar {
    let pb = match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::with_template(
                    "{prefix:.bold} [{bar:40.magenta/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{prefix:.bold} {spinner} {bytes} ({bytes_per_sec})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        }
    };
    pb.set_prefix(prefix.to_string());
    pb
}
