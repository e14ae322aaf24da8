use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use paramstore::common::{
    build_system_resolver, init_logging, load_config, read_value, remote_path,
    render_environment, StartupConfig,
};

/// 参数存储命令行工具
#[derive(Parser, Debug)]
#[command(name = "paramctl")]
#[command(version)]
#[command(about = "参数存储与环境变量双源配置访问工具")]
#[command(long_about = "按覆盖值、远程参数存储、本地环境变量的顺序解析配置项")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// 日志级别
    #[arg(short, long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,

    /// 日志格式
    #[arg(long, global = true, value_parser = ["json", "pretty"])]
    log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 读取配置项
    Get {
        /// 配置键，例如 DATABASE_URL
        key: String,
    },
    /// 输出合并后的配置项 (JSON格式)
    Env,
    /// 显示配置键对应的远程路径
    Path {
        /// 配置键
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let startup_config = StartupConfig {
        config_path: cli.config,
        log_level: cli.log_level,
        log_format: cli.log_format,
    };
    let config = load_config(&startup_config)?;

    init_logging(
        &config.logging.level.to_string(),
        &config.logging.format.to_string(),
    )?;
    debug!(environment = %config.environment, "配置已加载");

    match cli.command {
        Commands::Get { key } => {
            let resolver = build_system_resolver(&config).await?;
            println!("{}", read_value(&resolver, &key).await?);
        }
        Commands::Env => {
            let resolver = build_system_resolver(&config).await?;
            println!("{}", render_environment(&resolver).await?);
        }
        Commands::Path { key } => {
            println!("{}", remote_path(&config, &key));
        }
    }

    Ok(())
}
