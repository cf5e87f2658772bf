/// Gemini 图片生成客户端
///
/// 封装所有与 Gemini generateContent 接口相关的调用逻辑
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::image_generator::{GenerationRequest, ImageGenerator};
use crate::config::Config;
use crate::error::{AppResult, GenerationError};
use crate::utils::image_codec;

/// 上一张结果的 MIME 类型（远程服务返回的格式）
const CONTINUITY_MIME_TYPE: &str = "image/png";

/// Gemini 客户端
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            api_base_url: config.gemini_api_base_url.trim_end_matches('/').to_string(),
            model_name: config.gemini_model_name.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model_name
        )
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!("正在调用 Gemini，模型: {}", self.model_name);
        debug!(
            "源图片 {} 字节(base64)，参考图: {}",
            request.image_base64.len(),
            request.continuity.is_some()
        );

        let body = build_request_body(request);

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini 请求发送失败: {}", e);
                GenerationError::Remote { message: None }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            warn!("读取 Gemini 响应失败: {}", e);
            GenerationError::Remote { message: None }
        })?;

        if !status.is_success() {
            warn!("Gemini 返回错误 HTTP {}", status);
            return Err(classify_error(status, &text));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| GenerationError::remote(format!("Gemini 响应解析失败: {}", e)))?;

        let url = extract_image(&value)?;
        debug!("Gemini 调用成功");
        Ok(url)
    }
}

// ========== 辅助函数 ==========

/// 构建提示词：风格 + 画质 + 机位 + 比例 + 身份保持
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "{}. {}. Camera framing: {}. Output aspect ratio {}. \
         Keep the exact face of the person in the first image: same identity, same facial structure, same skin tone.",
        request.style.prompt().trim_end_matches('.'),
        request.quality.prompt(),
        request.camera_angle,
        request.ratio.as_str()
    );

    if request.continuity.is_some() {
        prompt.push_str(
            " The second image is the previous portrait of this series: \
             keep the same person, outfit, lighting and color grading so the series stays consistent.",
        );
    }

    prompt
}

/// 构建请求体
pub fn build_request_body(request: &GenerationRequest) -> Value {
    let mut parts = vec![json!({
        "inlineData": {
            "mimeType": request.mime_type,
            "data": request.image_base64,
        }
    })];

    if let Some(previous) = &request.continuity {
        parts.push(json!({
            "inlineData": {
                "mimeType": CONTINUITY_MIME_TYPE,
                "data": previous,
            }
        }));
    }

    parts.push(json!({ "text": build_prompt(request) }));

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseModalities": ["IMAGE", "TEXT"],
            "imageConfig": { "aspectRatio": request.ratio.as_str() }
        }
    })
}

/// 非成功响应分类：限流/配额 或 普通远程错误
pub fn classify_error(status: StatusCode, body: &str) -> GenerationError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GenerationError::Quota;
    }

    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let api_status = error
        .and_then(|e| e.get("status"))
        .and_then(|s| s.as_str())
        .unwrap_or_default();
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string);

    let mentions_quota = message
        .as_deref()
        .map(|m| m.to_ascii_lowercase().contains("quota"))
        .unwrap_or(false);

    if api_status == "RESOURCE_EXHAUSTED" || mentions_quota {
        return GenerationError::Quota;
    }

    GenerationError::Remote { message }
}

/// 从响应中取出第一张图片，转换为 data URL
pub fn extract_image(value: &Value) -> Result<String, GenerationError> {
    let parts = value
        .get("candidates")
        .and_then(|c| c.as_array())
        .into_iter()
        .flatten()
        .filter_map(|cand| cand.pointer("/content/parts").and_then(|p| p.as_array()))
        .flatten();

    let mut texts = Vec::new();
    for part in parts {
        let inline = part.get("inlineData").or_else(|| part.get("inline_data"));
        if let Some(inline) = inline {
            let data = inline.get("data").and_then(|d| d.as_str()).unwrap_or_default();
            if !data.is_empty() {
                let mime = inline
                    .get("mimeType")
                    .or_else(|| inline.get("mime_type"))
                    .and_then(|m| m.as_str())
                    .unwrap_or(CONTINUITY_MIME_TYPE);
                return Ok(image_codec::to_data_url(mime, data));
            }
        }
        if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
            texts.push(text.trim().to_string());
        }
    }

    if let Some(reason) = value
        .pointer("/promptFeedback/blockReason")
        .and_then(|r| r.as_str())
    {
        return Err(GenerationError::remote(format!("Yêu cầu bị chặn: {}", reason)));
    }

    let text = texts.join(" ");
    if text.is_empty() {
        Err(GenerationError::Remote { message: None })
    } else {
        Err(GenerationError::remote(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectRatio, Quality, StyleType};

    fn request(continuity: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            image_base64: "U09VUkNF".to_string(),
            mime_type: "image/jpeg".to_string(),
            style: StyleType::Business,
            ratio: AspectRatio::Landscape,
            quality: Quality::EightK,
            camera_angle: "Eye-level shot, symmetrical composition, balanced framing".to_string(),
            continuity: continuity.map(str::to_string),
        }
    }

    #[test]
    fn test_first_request_has_single_image() {
        let body = build_request_body(&request(None));
        let parts = body.pointer("/contents/0/parts").unwrap().as_array().unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].pointer("/inlineData/mimeType").unwrap(), "image/jpeg");
        assert_eq!(parts[0].pointer("/inlineData/data").unwrap(), "U09VUkNF");
        assert_eq!(
            body.pointer("/generationConfig/imageConfig/aspectRatio").unwrap(),
            "16:9"
        );

        let prompt = parts[1].get("text").unwrap().as_str().unwrap();
        assert!(prompt.contains("corporate portrait"));
        assert!(prompt.contains("8k resolution"));
        assert!(prompt.contains("Eye-level shot"));
        assert!(!prompt.contains("previous portrait"));
    }

    #[test]
    fn test_continuity_image_is_attached() {
        let body = build_request_body(&request(Some("UFJFVg==")));
        let parts = body.pointer("/contents/0/parts").unwrap().as_array().unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].pointer("/inlineData/data").unwrap(), "UFJFVg==");
        assert!(parts[2]
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap()
            .contains("previous portrait"));
    }

    #[test]
    fn test_classify_quota() {
        assert_eq!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, ""),
            GenerationError::Quota
        );

        let body = r#"{"error":{"code":400,"status":"RESOURCE_EXHAUSTED","message":"x"}}"#;
        assert_eq!(classify_error(StatusCode::BAD_REQUEST, body), GenerationError::Quota);

        let body = r#"{"error":{"code":403,"message":"You exceeded your current quota"}}"#;
        assert_eq!(classify_error(StatusCode::FORBIDDEN, body), GenerationError::Quota);
    }

    #[test]
    fn test_classify_generic() {
        let body = r#"{"error":{"code":400,"status":"INVALID_ARGUMENT","message":"Bad image"}}"#;
        assert_eq!(
            classify_error(StatusCode::BAD_REQUEST, body),
            GenerationError::remote("Bad image")
        );
        assert_eq!(
            classify_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>"),
            GenerationError::Remote { message: None }
        );
    }

    #[test]
    fn test_extract_image() {
        let value = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here you go" },
                    { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                ]}
            }]
        });
        assert_eq!(extract_image(&value).unwrap(), "data:image/png;base64,QUJD");
    }

    #[test]
    fn test_extract_image_missing() {
        let value = json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot edit this photo." }] } }]
        });
        assert_eq!(
            extract_image(&value),
            Err(GenerationError::remote("I cannot edit this photo."))
        );

        let blocked = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(
            extract_image(&blocked),
            Err(GenerationError::Remote { message: Some(m) }) if m.contains("SAFETY")
        ));

        assert_eq!(
            extract_image(&json!({})),
            Err(GenerationError::Remote { message: None })
        );
    }
}
