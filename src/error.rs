use thiserror::Error;

/// 服务繁忙（配额/限流）时展示给用户的提示
pub const BUSY_MESSAGE: &str = "Hệ thống đang bận. Vui lòng đợi 10 giây và thử lại.";

/// 无具体原因时的通用连接失败提示
pub const CONNECTION_FAILED_MESSAGE: &str = "Lỗi kết nối AI.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 批次调度错误
    #[error("批次错误: {0}")]
    Batch(#[from] BatchError),
    /// HTTP 客户端构建失败
    #[error("HTTP客户端错误: {0}")]
    Http(#[from] reqwest::Error),
}

/// 单张图片生成失败的原因
///
/// 所有失败都在单张图片的边界上被捕获，转换成一条用户可见的消息，
/// 不会向展示层继续传播。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// 源文件无法读取或编码
    #[error("源文件读取失败 ({name}): {reason}")]
    Transfer { name: String, reason: String },
    /// 远程服务限流或配额耗尽
    #[error("quota")]
    Quota,
    /// 其他远程错误
    #[error("远程服务错误: {}", message.as_deref().unwrap_or("<无消息>"))]
    Remote { message: Option<String> },
}

impl GenerationError {
    /// 创建带消息的远程错误
    pub fn remote(message: impl Into<String>) -> Self {
        GenerationError::Remote {
            message: Some(message.into()),
        }
    }

    /// 转换为展示给用户的消息
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Quota => BUSY_MESSAGE.to_string(),
            GenerationError::Transfer { .. } => CONNECTION_FAILED_MESSAGE.to_string(),
            GenerationError::Remote { message } => match message.as_deref() {
                Some(msg) if !msg.trim().is_empty() => msg.to_string(),
                _ => CONNECTION_FAILED_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_quota(&self) -> bool {
        matches!(self, GenerationError::Quota)
    }
}

/// 批次无法启动的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BatchError {
    /// 已有批次正在生成
    #[error("已有批次正在生成")]
    AlreadyGenerating,
    /// 没有上传任何图片
    #[error("没有可生成的图片")]
    NoImages,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 结果不可下载（未完成或数据损坏）
    #[error("结果不可下载: {result_id}")]
    NotDownloadable { result_id: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("配置文件读取失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 缺少 API 密钥
    #[error("缺少 API 密钥，请设置 GEMINI_API_KEY")]
    MissingApiKey,
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_maps_to_busy_message() {
        assert_eq!(GenerationError::Quota.user_message(), BUSY_MESSAGE);
        assert!(GenerationError::Quota.is_quota());
    }

    #[test]
    fn test_remote_message_is_verbatim() {
        let err = GenerationError::remote("Safety filter blocked the image");
        assert_eq!(err.user_message(), "Safety filter blocked the image");
    }

    #[test]
    fn test_remote_without_message_falls_back() {
        let err = GenerationError::Remote { message: None };
        assert_eq!(err.user_message(), CONNECTION_FAILED_MESSAGE);

        let blank = GenerationError::remote("   ");
        assert_eq!(blank.user_message(), CONNECTION_FAILED_MESSAGE);
    }

    #[test]
    fn test_transfer_error_uses_generic_message() {
        let err = GenerationError::Transfer {
            name: "a.jpg".to_string(),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.user_message(), CONNECTION_FAILED_MESSAGE);
        assert!(err.to_string().contains("a.jpg"));
    }
}
