//! 运行日志写入服务 - 业务能力层
//!
//! 只负责"把单张图片的生成结果追加到日志文件"能力，不关心流程

use anyhow::Result;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::models::GeneratedResult;

/// 运行日志写入服务
///
/// 职责：
/// - 每张图片一行：序号、源文件名、状态、机位
/// - 失败时附带用户可见的消息
pub struct RunLogWriter {
    log_file_path: String,
}

impl RunLogWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    /// 追加一条结果
    ///
    /// # 参数
    /// - `position`: 图片在批次中的序号（从1开始）
    /// - `source_name`: 源文件名
    /// - `result`: 生成结果
    /// - `message`: 失败消息（可选）
    pub async fn write(
        &self,
        position: usize,
        source_name: &str,
        result: &GeneratedResult,
        message: Option<&str>,
    ) -> Result<()> {
        debug!("写入运行日志: 图 {} | {}", position, result.status.as_str());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .await?;

        let mut line = format!(
            "图 {} | {} | {} | {} | {}",
            position,
            source_name,
            result.status.as_str(),
            result.style.key(),
            result.camera_angle
        );
        if let Some(msg) = message {
            line.push_str(&format!(" | 原因: {}", msg));
        }
        line.push('\n');

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultPatch, Selection, SourceFile, UserImage};

    #[tokio::test]
    async fn test_write_appends_lines() {
        let path = std::env::temp_dir().join(format!("portrait-run-{}.txt", uuid::Uuid::new_v4()));
        let writer = RunLogWriter::with_path(path.to_string_lossy().to_string());

        let image = UserImage {
            id: "upload-1-0".to_string(),
            url: "preview://a".to_string(),
            file: SourceFile::from_bytes("a.png", None, vec![]),
            name: "a.png".to_string(),
        };
        let mut result = GeneratedResult::pending(&image, Selection::default(), "Eye-level shot");
        writer.write(1, "a.png", &result, None).await.unwrap();
        result.apply(ResultPatch::error());
        writer.write(2, "b.png", &result, Some("quota")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("图 1 | a.png | pending | tet_mai"));
        assert!(lines[1].ends_with("原因: quota"));

        std::fs::remove_file(path).unwrap();
    }
}
