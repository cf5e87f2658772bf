use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则 verbose 时为 debug，默认 info。
/// 重复调用是安全的（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n人像生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 使用的模型名称
/// - `delay_ms`: 图片之间的间隔
pub fn log_startup(model: &str, delay_ms: u64) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 顺序人像生成模式");
    info!("🤖 模型: {}", model);
    info!("⏱️ 图片间隔: {} ms", delay_ms);
    info!("{}", "=".repeat(60));
}

/// 记录图片加载信息
pub fn log_images_loaded(total: usize, folder: &str) {
    info!("✓ 在 {} 中找到 {} 张待处理的照片", folder, total);
    info!("💡 将逐张生成，任一失败即停止本批\n");
}

/// 记录批次开始信息
///
/// # 参数
/// - `total`: 图片总数
/// - `style`: 风格名称
/// - `ratio`: 画幅比例
/// - `quality`: 画质名称
pub fn log_batch_start(total: usize, style: &str, ratio: &str, quality: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始生成: 共 {} 张", total);
    info!("🎨 风格: {} | 比例: {} | 画质: {}", style, ratio, quality);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `completed`: 成功数量
/// - `total`: 图片总数
/// - `halted`: 是否因失败中止
pub fn log_batch_complete(completed: usize, total: usize, halted: bool) {
    info!("\n{}", "─".repeat(60));
    if halted {
        info!("⛔ 批次已中止: 成功 {}/{}", completed, total);
    } else {
        info!("✓ 批次完成: 成功 {}/{}", completed, total);
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `completed`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `saved`: 保存的文件数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    completed: usize,
    failed: usize,
    total: usize,
    saved: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", completed, total);
    info!("❌ 失败: {}", failed);
    info!("⏭️ 未尝试: {}", total.saturating_sub(completed + failed));
    info!("💾 已保存: {}", saved);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
