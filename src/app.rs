use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::clients::GeminiClient;
use crate::config::Config;
use crate::models::load_all_images;
use crate::orchestrator::{BatchReport, Studio};
use crate::services::RunLogWriter;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    studio: Studio<GeminiClient>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        logging::log_startup(&config.gemini_model_name, config.item_delay_ms);

        let client = GeminiClient::new(&config)?;
        let studio = Studio::from_config(Arc::new(client), &config);

        Ok(Self { config, studio })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        let files = load_all_images(&self.config.input_folder).await?;

        if files.is_empty() {
            warn!("⚠️ 没有找到待处理的照片，程序结束");
            return Ok(());
        }

        logging::log_images_loaded(files.len(), &self.config.input_folder);
        self.studio.upload(files);

        let report = self.studio.generate_all().await?;

        self.write_run_log(&report).await;
        self.log_gallery();

        let saved = if self.studio.ledger().has_completed() {
            self.studio
                .download_all(Path::new(&self.config.output_folder))
                .await
                .context("保存生成结果失败")?
        } else {
            warn!("⚠️ 没有已完成的结果可保存");
            Vec::new()
        };

        logging::print_final_stats(
            report.completed,
            report.failed(),
            report.total,
            saved.len(),
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 按提交顺序写入每张图片的结果
    async fn write_run_log(&self, report: &BatchReport) {
        let writer = RunLogWriter::with_path(&self.config.output_log_file);
        let ledger = self.studio.ledger();

        for (idx, result_id) in report.result_ids.iter().enumerate() {
            let Some(result) = ledger.get(result_id) else {
                continue;
            };
            let source_name = self
                .studio
                .images()
                .iter()
                .find(|image| image.id == result.source_image_id)
                .map(|image| image.name.as_str())
                .unwrap_or("<已移除>");
            let message = if result.is_completed() {
                None
            } else {
                report.message.as_deref()
            };

            if let Err(e) = writer.write(idx + 1, source_name, &result, message).await {
                error!("写入运行日志失败: {}", e);
            }
        }
    }

    fn log_gallery(&self) {
        info!("🖼️ 画廊（最新在前）:");
        for card in self.studio.gallery() {
            info!("  {}", card.summary());
        }
        if let Some(message) = self.studio.error() {
            warn!("🚨 {}", message);
        }
    }
}
