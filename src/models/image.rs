use std::path::{Path, PathBuf};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{AspectRatio, Quality, StyleType};
use crate::utils::image_codec;

/// 未知类型时使用的 MIME
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// 源文件内容所在位置
#[derive(Debug, Clone)]
pub enum SourceContent {
    /// 磁盘上的文件，生成时才读取
    Path(PathBuf),
    /// 已经在内存中的字节
    Memory(Vec<u8>),
}

/// 用户上传的原始文件句柄
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// 文件名
    pub name: String,
    /// MIME 类型（未知时为 None）
    pub mime_type: Option<String>,
    content: SourceContent,
}

impl SourceFile {
    /// 从磁盘路径创建，MIME 类型按扩展名推断
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let mime_type = image_codec::mime_from_path(&path).map(str::to_string);

        Self {
            name,
            mime_type,
            content: SourceContent::Path(path),
        }
    }

    /// 从内存字节创建
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type,
            content: SourceContent::Memory(bytes),
        }
    }

    /// 发送给远程服务的 MIME 类型
    pub fn effective_mime_type(&self) -> &str {
        match self.mime_type.as_deref() {
            Some(mime) if !mime.is_empty() => mime,
            _ => DEFAULT_MIME_TYPE,
        }
    }

    /// 磁盘路径（内存文件为 None）
    pub fn path(&self) -> Option<&Path> {
        match &self.content {
            SourceContent::Path(path) => Some(path),
            SourceContent::Memory(_) => None,
        }
    }

    /// 读取文件全部字节
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.content {
            SourceContent::Path(path) => tokio::fs::read(path).await,
            SourceContent::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// 已上传的源照片
#[derive(Debug, Clone)]
pub struct UserImage {
    pub id: String,
    /// 预览句柄，移除时释放
    pub url: String,
    pub file: SourceFile,
    pub name: String,
}

/// 生成状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pending,
    Completed,
    Error,
}

impl ResultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultStatus::Pending => "pending",
            ResultStatus::Completed => "completed",
            ResultStatus::Error => "error",
        }
    }
}

/// 一批图片共用的风格 / 比例 / 画质选择
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub style: StyleType,
    pub ratio: AspectRatio,
    pub quality: Quality,
}

impl Selection {
    pub fn new(style: StyleType, ratio: AspectRatio, quality: Quality) -> Self {
        Self {
            style,
            ratio,
            quality,
        }
    }
}

/// 一次生成尝试
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub id: String,
    pub source_image_id: String,
    /// 生成结果的 data URL，完成前为空
    pub url: String,
    pub style: StyleType,
    pub ratio: AspectRatio,
    pub quality: Quality,
    /// 创建时间（Unix 毫秒）
    pub timestamp: i64,
    pub camera_angle: String,
    pub status: ResultStatus,
}

impl GeneratedResult {
    /// 创建一条待生成记录
    pub fn pending(source: &UserImage, selection: Selection, camera_angle: impl Into<String>) -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();

        Self {
            id: format!("result-{}-{}", timestamp, suffix),
            source_image_id: source.id.clone(),
            url: String::new(),
            style: selection.style,
            ratio: selection.ratio,
            quality: selection.quality,
            timestamp,
            camera_angle: camera_angle.into(),
            status: ResultStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ResultStatus::Completed
    }

    /// 应用一次局部更新
    pub fn apply(&mut self, patch: ResultPatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// 对结果的局部更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPatch {
    pub url: Option<String>,
    pub status: Option<ResultStatus>,
}

impl ResultPatch {
    /// 标记完成并写入图片
    pub fn completed(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            status: Some(ResultStatus::Completed),
        }
    }

    /// 标记失败
    pub fn error() -> Self {
        Self {
            url: None,
            status: Some(ResultStatus::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> UserImage {
        UserImage {
            id: "upload-1-0".to_string(),
            url: "preview://x".to_string(),
            file: SourceFile::from_bytes("a.jpg", None, vec![1, 2, 3]),
            name: "a.jpg".to_string(),
        }
    }

    #[test]
    fn test_pending_result_fields() {
        let image = sample_image();
        let result = GeneratedResult::pending(&image, Selection::default(), "Eye-level shot");

        assert!(result.id.starts_with("result-"));
        assert_eq!(result.id.rsplit('-').next().map(str::len), Some(9));
        assert_eq!(result.source_image_id, "upload-1-0");
        assert!(result.url.is_empty());
        assert_eq!(result.status, ResultStatus::Pending);
        assert_eq!(result.camera_angle, "Eye-level shot");
    }

    #[test]
    fn test_apply_patch() {
        let mut result = GeneratedResult::pending(&sample_image(), Selection::default(), "a");
        result.apply(ResultPatch::completed("data:image/png;base64,AA=="));
        assert!(result.is_completed());
        assert_eq!(result.url, "data:image/png;base64,AA==");

        result.apply(ResultPatch::error());
        assert_eq!(result.status, ResultStatus::Error);
        assert_eq!(result.url, "data:image/png;base64,AA==");
    }

    #[test]
    fn test_effective_mime_type_defaults_to_png() {
        let file = SourceFile::from_bytes("blob", None, vec![]);
        assert_eq!(file.effective_mime_type(), DEFAULT_MIME_TYPE);

        let file = SourceFile::from_path("/tmp/face.JPG");
        assert_eq!(file.effective_mime_type(), "image/jpeg");
        assert_eq!(file.name, "face.JPG");
    }
}
