//! Web 服务器主程序入口

use std::sync::Arc;

use transflow::translation::{self, TranslationService};
use transflow::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr = "127.0.0.1".to_string();
    let mut port = 7080u16;
    let mut engine_path: Option<String> = None;
    let mut target_lang = translation::constants::DEFAULT_TARGET_LANG.to_string();

    // 简单的命令行参数解析
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--engine" | "-e" => {
                if i + 1 < args.len() {
                    engine_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --engine requires a path");
                    std::process::exit(1);
                }
            }
            "--lang" | "-l" => {
                if i + 1 < args.len() {
                    target_lang = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --lang requires a language code");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    translation::init();

    // 加载配置（配置文件 + 环境变量 + 命令行覆盖）
    let config = translation::load_translation_config(&target_lang, engine_path.as_deref());
    let service = Arc::new(TranslationService::new(config)?);

    // 启动 Web 服务器
    let web_config = WebConfig { bind_addr, port };
    let server = WebServer::new(web_config, service);
    server.start().await?;

    Ok(())
}

fn print_help() {
    println!("Transflow Web Server");
    println!();
    println!("USAGE:");
    println!("    transflow-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 7080]");
    println!("    -e, --engine <PATH>      Translation engine binary [default: ./translate]");
    println!("    -l, --lang <LANG>        Default target language [default: en]");
    println!("    -h, --help               Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    transflow-web");
    println!("    transflow-web --bind 0.0.0.0 --port 3000 --engine /usr/local/bin/translate");
}
