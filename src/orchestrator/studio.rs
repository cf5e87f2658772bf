//! 工作室 - 面向展示层的状态
//!
//! 持有上传列表、当前选择、生成器（账本 + 生成标志）和错误横幅。
//! 界面或命令行只通过这里驱动整个系统。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::ImageGenerator;
use crate::config::Config;
use crate::error::{AppResult, BatchError, FileError};
use crate::models::{AspectRatio, Quality, Selection, SourceFile, StyleType, UserImage};
use crate::orchestrator::batch_processor::{BatchOrchestrator, BatchReport};
use crate::services::gallery::{self, GalleryCard};
use crate::services::{Download, DownloadService, ResultLedger, UploadStore};

pub struct Studio<G> {
    uploads: UploadStore,
    selection: Selection,
    orchestrator: BatchOrchestrator<G>,
    downloads: DownloadService,
    error: Option<String>,
}

impl<G: ImageGenerator> Studio<G> {
    pub fn new(orchestrator: BatchOrchestrator<G>, downloads: DownloadService) -> Self {
        Self {
            uploads: UploadStore::new(),
            selection: Selection::default(),
            orchestrator,
            downloads,
            error: None,
        }
    }

    /// 按配置组装：间隔、文件名前缀和默认选择都来自配置
    pub fn from_config(generator: Arc<G>, config: &Config) -> Self {
        let orchestrator = BatchOrchestrator::new(generator, ResultLedger::new())
            .with_item_delay(config.item_delay());
        let downloads = DownloadService::new(&config.product_name, config.download_stagger());

        let mut studio = Self::new(orchestrator, downloads);
        studio.selection = config.selection();
        studio
    }

    // ========== 选择 ==========

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn select_style(&mut self, style: StyleType) {
        self.selection.style = style;
    }

    pub fn select_ratio(&mut self, ratio: AspectRatio) {
        self.selection.ratio = ratio;
    }

    pub fn select_quality(&mut self, quality: Quality) {
        self.selection.quality = quality;
    }

    // ========== 上传 ==========

    pub fn upload(&mut self, files: Vec<SourceFile>) -> Vec<String> {
        self.uploads.upload(files)
    }

    pub fn remove_image(&mut self, id: &str) -> bool {
        self.uploads.remove(id)
    }

    /// 清空上传列表并关闭错误横幅，账本中的历史记录不受影响
    pub fn clear_uploads(&mut self) {
        let released = self.uploads.clear();
        let referenced = self.ledger().sources_released(&released);
        if referenced > 0 {
            info!("🧹 已清空上传，{} 条历史结果仍保留", referenced);
        }
        self.error = None;
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub fn images(&self) -> &[UserImage] {
        self.uploads.images()
    }

    // ========== 生成 ==========

    /// 用当前选择生成全部上传的图片
    ///
    /// 开始时清除错误横幅，批次中止时设置为失败消息
    pub async fn generate_all(&mut self) -> Result<BatchReport, BatchError> {
        if self.uploads.is_empty() {
            return Err(BatchError::NoImages);
        }

        self.error = None;
        let images = self.uploads.images().to_vec();
        let report = self.orchestrator.start_batch(&images, self.selection).await?;

        if let Some(message) = &report.message {
            warn!("🚨 {}", message);
            self.error = Some(message.clone());
        }
        Ok(report)
    }

    pub fn is_generating(&self) -> bool {
        self.orchestrator.is_generating()
    }

    pub fn orchestrator(&self) -> &BatchOrchestrator<G> {
        &self.orchestrator
    }

    // ========== 画廊 ==========

    pub fn ledger(&self) -> &ResultLedger {
        self.orchestrator.ledger()
    }

    pub fn gallery(&self) -> Vec<GalleryCard> {
        gallery::cards(&self.ledger().snapshot())
    }

    pub fn clear_gallery(&mut self) {
        self.ledger().clear();
    }

    // ========== 错误横幅 ==========

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ========== 下载 ==========

    pub fn downloadable(&self, result_id: &str) -> Option<Download> {
        self.ledger()
            .get(result_id)
            .and_then(|result| self.downloads.downloadable(&result))
    }

    /// 保存单个结果
    pub async fn download(&self, result_id: &str, dir: &Path) -> AppResult<PathBuf> {
        let download = self
            .downloadable(result_id)
            .ok_or_else(|| FileError::NotDownloadable {
                result_id: result_id.to_string(),
            })?;
        self.downloads.save(dir, &download).await
    }

    pub async fn download_all(&self, dir: &Path) -> AppResult<Vec<PathBuf>> {
        self.downloads
            .download_all(&self.ledger().snapshot(), dir)
            .await
    }
}
