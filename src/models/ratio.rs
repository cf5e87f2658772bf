use serde::{Deserialize, Serialize};

/// 输出画幅比例
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 竖版 9:16
    #[serde(rename = "9:16")]
    Portrait,
    /// 横版 16:9
    #[serde(rename = "16:9")]
    Landscape,
    /// 方形 1:1
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Square,
    ];

    /// 比例字符串，同时也是远程服务使用的标识
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Square => "1:1",
        }
    }

    /// 从比例字符串或名称解析
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "9:16" | "portrait" => Some(AspectRatio::Portrait),
            "16:9" | "landscape" => Some(AspectRatio::Landscape),
            "1:1" | "square" => Some(AspectRatio::Square),
            _ => None,
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Portrait
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(AspectRatio::from_key("16:9"), Some(AspectRatio::Landscape));
        assert_eq!(AspectRatio::from_key(" Square "), Some(AspectRatio::Square));
        assert_eq!(AspectRatio::from_key("4:3"), None);
    }
}
