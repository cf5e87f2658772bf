/// 远程图片生成能力
///
/// 编排层只依赖这个 trait，具体实现可以是 Gemini，也可以是测试用的脚本化实现
use async_trait::async_trait;

use crate::error::GenerationError;
use crate::models::{AspectRatio, Quality, StyleType};

/// 一次生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// 源图片（base64）
    pub image_base64: String,
    /// 源图片 MIME 类型
    pub mime_type: String,
    pub style: StyleType,
    pub ratio: AspectRatio,
    pub quality: Quality,
    /// 机位提示词
    pub camera_angle: String,
    /// 上一张生成结果（base64），批次第一张为 None
    pub continuity: Option<String>,
}

/// 图片生成器
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// 生成一张图片，成功时返回 data URL
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
