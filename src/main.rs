// ==========================================
// 放大预测系统 - 命令行入口
// ==========================================
// 子命令:
//   predict     单条预测
//   batch       批量文件预测 (csv / xlsx / json)
//   operations  单元操作目录
// ==========================================

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use scaleup_predictor::api::{PredictorError, ScaleUpApi};
use scaleup_predictor::config::ConfigManager;
use scaleup_predictor::i18n;
use scaleup_predictor::importer::{FieldMapper, ImportError, RawRow, RowOutcome};
use std::path::PathBuf;

/// Scale-Up Predictor - 固体制剂工艺放大参数推荐
#[derive(Parser)]
#[command(name = "scaleup-predictor")]
#[command(version)]
#[command(about = "Recommend scaled-up process parameters for pharmaceutical unit operations")]
#[command(propagate_version = true)]
struct Cli {
    /// 配置文件路径 (默认: $SCALEUP_PREDICTOR_CONFIG 或用户配置目录)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 提示信息语言 (en / zh-CN)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// 日志详细程度 (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 单条预测
    Predict(PredictArgs),
    /// 批量文件预测
    Batch {
        /// 输入文件 (.csv / .xlsx / .xls / .json)
        file: PathBuf,
        /// 输出 JSON 报告
        #[arg(long)]
        json: bool,
    },
    /// 列出单元操作及其放大模型
    Operations,
}

#[derive(clap::Args)]
struct PredictArgs {
    /// 产品名称
    #[arg(long)]
    product: String,
    /// 单元操作 (如 "Coating", "Roll Compaction")
    #[arg(long)]
    operation: String,
    /// 放大类别 (如 "Lab->Pilot")
    #[arg(long)]
    category: String,
    /// 目标规模 (Scale 2 / Scale 3 / Scale 4)
    #[arg(long)]
    scale: String,
    /// 规格
    #[arg(long)]
    strength: f64,
    /// 目标市场 (USA / EU / India / Other)
    #[arg(long)]
    market: Option<String>,
    /// 剂型 (OSD / Injectable / Liquid / Other)
    #[arg(long)]
    vertical: Option<String>,
    /// 工艺参数, 形如 sprayRate=120 (可重复)
    #[arg(long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,
    /// 输出 JSON
    #[arg(long)]
    json: bool,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("参数格式应为 key=value: {}", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    scaleup_predictor::logging::init_with_verbosity(cli.verbose, cli.log_json);

    let mut manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(locale) = cli.locale.as_deref() {
        manager.set_locale(locale)?;
    }
    i18n::set_locale(&manager.config().locale);
    tracing::info!(
        version = scaleup_predictor::VERSION,
        config = ?manager.source(),
        locale = %manager.config().locale,
        "{} 启动",
        scaleup_predictor::APP_NAME
    );

    let api = ScaleUpApi::from_manager(&manager);

    match cli.command {
        Commands::Predict(args) => run_predict(&api, args),
        Commands::Batch { file, json } => run_batch(&api, file, json),
        Commands::Operations => {
            for info in ScaleUpApi::list_operations() {
                let params = if info.modelled {
                    info.parameters.join(", ")
                } else {
                    "-".to_string()
                };
                println!("{:<36} {}", info.operation.label(), params);
            }
            Ok(())
        }
    }
}

fn run_predict(api: &ScaleUpApi, args: PredictArgs) -> anyhow::Result<()> {
    let mut row: RawRow = args.params.into_iter().collect();
    row.insert("productName".to_string(), args.product);
    row.insert("unitOperation".to_string(), args.operation);
    row.insert("category".to_string(), args.category);
    row.insert("scaleSelection".to_string(), args.scale);
    row.insert("strength".to_string(), args.strength.to_string());
    if let Some(market) = args.market {
        row.insert("market".to_string(), market);
    }
    if let Some(vertical) = args.vertical {
        row.insert("vertical".to_string(), vertical);
    }

    let record = FieldMapper.map_to_record(&row, 1)?;
    let output = api.predict_record(&record)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", output.to_table());
    }
    Ok(())
}

fn run_batch(api: &ScaleUpApi, file: PathBuf, json: bool) -> anyhow::Result<()> {
    let report = match api.predict_batch(&file) {
        Ok(report) => report,
        Err(PredictorError::Import(ImportError::FileNotFound(path))) => {
            return Err(anyhow!(i18n::translate_with_args(
                api.locale(),
                "batch.file_not_found",
                &[("path", path.as_str())]
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.summary_line(api.locale()));
    for outcome in &report.rows {
        match outcome {
            RowOutcome::Predicted {
                row,
                product_name,
                unit_operation,
                output,
            } => {
                println!("\n[row {}] {} / {}", row, product_name, unit_operation);
                print!("{}", output.to_table());
            }
            RowOutcome::Rejected { row, violations } => {
                println!("\n[row {}] rejected", row);
                for v in violations {
                    println!("  - {}: {}", v.field, v.reason);
                }
            }
        }
    }
    Ok(())
}
