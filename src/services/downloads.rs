//! 下载服务 - 业务能力层
//!
//! 把已完成的结果解码为可保存的字节，文件名格式为 `<产品名>_<毫秒时间戳>.jpg`

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::GeneratedResult;
use crate::utils::image_codec;

/// 一个可保存的下载项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 下载服务
pub struct DownloadService {
    product_name: String,
    stagger: Duration,
}

impl DownloadService {
    /// 创建新的下载服务
    ///
    /// # 参数
    /// - `product_name`: 文件名前缀
    /// - `stagger`: 批量下载时相邻两个文件之间的间隔
    pub fn new(product_name: impl Into<String>, stagger: Duration) -> Self {
        Self {
            product_name: product_name.into(),
            stagger,
        }
    }

    /// 生成下载文件名
    pub fn file_name(&self, millis: i64) -> String {
        format!("{}_{}.jpg", self.product_name, millis)
    }

    /// 已完成的结果转换为下载项，其余状态返回 None
    pub fn downloadable(&self, result: &GeneratedResult) -> Option<Download> {
        if !result.is_completed() {
            return None;
        }

        let payload = image_codec::data_url_payload(&result.url)?;
        let bytes = match image_codec::decode_base64(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("结果 {} 的图片数据无法解码: {}", result.id, e);
                return None;
            }
        };
        let mime_type = image_codec::data_url_mime(&result.url)
            .unwrap_or("image/jpeg")
            .to_string();

        Some(Download {
            file_name: self.file_name(chrono::Utc::now().timestamp_millis()),
            mime_type,
            bytes,
        })
    }

    /// 保存下载项到目录，文件名冲突时追加序号
    pub async fn save(&self, dir: &Path, download: &Download) -> AppResult<PathBuf> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;

        let mut path = dir.join(&download.file_name);
        let stem = download.file_name.trim_end_matches(".jpg").to_string();
        let mut n = 1;
        while fs::try_exists(&path).await.unwrap_or(false) {
            path = dir.join(format!("{}_{}.jpg", stem, n));
            n += 1;
        }

        fs::write(&path, &download.bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("已保存: {} ({} 字节)", path.display(), download.bytes.len());
        Ok(path)
    }

    /// 下载全部已完成的结果
    ///
    /// `results` 为账本顺序（最新在前），保存时按从旧到新，相邻文件之间等待 stagger
    pub async fn download_all(
        &self,
        results: &[GeneratedResult],
        dir: &Path,
    ) -> AppResult<Vec<PathBuf>> {
        let completed: Vec<&GeneratedResult> =
            results.iter().rev().filter(|r| r.is_completed()).collect();

        let mut saved = Vec::with_capacity(completed.len());
        for (idx, result) in completed.iter().enumerate() {
            if idx > 0 && !self.stagger.is_zero() {
                tokio::time::sleep(self.stagger).await;
            }

            match self.downloadable(result) {
                Some(download) => saved.push(self.save(dir, &download).await?),
                None => warn!("⚠️ 结果 {} 无法下载，已跳过", result.id),
            }
        }

        info!("💾 已保存 {} 张图片到 {}", saved.len(), dir.display());
        Ok(saved)
    }
}
