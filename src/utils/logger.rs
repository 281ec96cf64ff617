use chrono::Local;
use colored::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

static FILE_LOGGING: AtomicBool = AtomicBool::new(false);

pub struct Logger;

impl Logger {
    /// Mirror every console line into `logs/bot-<date>.log`. Off until enabled.
    pub fn set_file_logging(enabled: bool) {
        FILE_LOGGING.store(enabled, Ordering::Relaxed);
    }

    fn get_logs_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("logs")
    }

    fn get_log_file_name() -> PathBuf {
        let date = Local::now().format("%Y-%m-%d").to_string();
        Self::get_logs_dir().join(format!("bot-{}.log", date))
    }

    fn write_to_file(message: &str) {
        if !FILE_LOGGING.load(Ordering::Relaxed) {
            return;
        }
        let _ = (|| -> std::io::Result<()> {
            fs::create_dir_all(Self::get_logs_dir())?;
            let timestamp = Local::now().to_rfc3339();
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(Self::get_log_file_name())?;
            file.write_all(format!("[{}] {}\n", timestamp, message).as_bytes())
        })();
    }

    pub fn format_address(address: &str) -> String {
        if address.len() >= 10 {
            format!("{}...{}", &address[..6], &address[address.len() - 4..])
        } else {
            address.to_string()
        }
    }

    pub fn header(title: &str) {
        println!("\n{}", "━".repeat(70).cyan());
        println!("{}", format!("  {}", title).cyan().bold());
        println!("{}\n", "━".repeat(70).cyan());
        Self::write_to_file(&format!("HEADER: {}", title));
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
        Self::write_to_file(&format!("INFO: {}", message));
    }

    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message.green());
        Self::write_to_file(&format!("SUCCESS: {}", message));
    }

    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
        Self::write_to_file(&format!("WARNING: {}", message));
    }

    pub fn error(message: &str) {
        println!("{} {}", "✗".red(), message.red());
        Self::write_to_file(&format!("ERROR: {}", message));
    }

    pub fn balance(symbol: &str, amount: &str) {
        println!("{}", format!("  Balance {}: {}", symbol, amount.cyan()).bright_black());
        Self::write_to_file(&format!("BALANCE {}: {}", symbol, amount));
    }

    pub fn account_banner(wallet_index: usize, address: &str, total_tx: u64) {
        println!(
            "\n{}",
            format!(
                "🔁 Account {} ({}) | Total tx: {}",
                wallet_index + 1,
                Self::format_address(address),
                total_tx
            )
            .yellow()
            .bold()
        );
        println!("{}", "═".repeat(50).yellow());
        Self::write_to_file(&format!(
            "ACCOUNT {} {} | total tx {}",
            wallet_index + 1,
            address,
            total_tx
        ));
    }

    pub fn transaction(label: &str, tx_hash: &str) {
        println!("{} {}", "⛓".green(), format!("{}: {}", label, tx_hash).green());
        println!(
            "{}",
            format!("  https://polygonscan.com/tx/{}", tx_hash)
                .blue()
                .underline()
        );
        Self::write_to_file(&format!("TX {}: {}", label, tx_hash));
    }

    /// One tick of a live countdown; overwrites the current line.
    pub fn countdown(label: &str, remaining: u64) {
        print!("\r{} ", format!("⏳ {}... {}", label, remaining).blue());
        let _ = std::io::stdout().flush();
    }

    pub fn clear_line() {
        print!("\r{}\r", " ".repeat(70));
        let _ = std::io::stdout().flush();
    }

    pub fn startup(wallets: &[String], proxy_count: Option<usize>) {
        Self::header("🍵 DAILY CHECK-IN & WRAP BOT");
        println!("{}", "👛 Wallets:".cyan());
        for (index, address) in wallets.iter().enumerate() {
            println!("{}", format!("   {}. {}", index + 1, address).bright_black());
        }
        match proxy_count {
            Some(count) => println!("{}", format!("\n🌐 Proxies: {} loaded (round-robin)", count).cyan()),
            None => println!("{}", "\n🌐 Proxies: disabled (direct connection)".bright_black()),
        }
        println!();
        Self::write_to_file(&format!(
            "STARTUP: {} wallet(s), proxies: {:?}",
            wallets.len(),
            proxy_count
        ));
    }

    pub fn separator() {
        println!("{}", "─".repeat(70).bright_black());
    }
}
