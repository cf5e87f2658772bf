/// 图片传输编码工具
///
/// 远程服务只接受 base64 编码的图片，返回的结果是 data URL
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// 按扩展名推断图片 MIME 类型，非图片返回 None
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// 编码为 base64
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// 解码 base64
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(payload.trim())
}

/// 构建 data URL
pub fn to_data_url(mime_type: &str, base64_payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_payload)
}

/// 取出 data URL 逗号之后的 base64 负载
pub fn data_url_payload(url: &str) -> Option<&str> {
    if !url.starts_with("data:") {
        return None;
    }
    url.split_once(',').map(|(_, payload)| payload)
}

/// 取出 data URL 中的 MIME 类型
pub fn data_url_mime(url: &str) -> Option<&str> {
    let header = url.strip_prefix("data:")?.split_once(',')?.0;
    header.split(';').next().filter(|m| !m.is_empty())
}
