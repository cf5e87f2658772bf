use serde::{Deserialize, Serialize};

/// 输出画质档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "4k")]
    FourK,
    #[serde(rename = "8k")]
    EightK,
    #[serde(rename = "16k")]
    SixteenK,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::FourK, Quality::EightK, Quality::SixteenK];

    /// 获取界面展示名称
    pub fn label(self) -> &'static str {
        match self {
            Quality::FourK => "Chất lượng 4K",
            Quality::EightK => "Chất lượng 8K (Siêu nét)",
            Quality::SixteenK => "Chất lượng 16K (Cực hạn)",
        }
    }

    /// 画质对应的提示词片段
    pub fn prompt(self) -> &'static str {
        match self {
            Quality::FourK => "ultra detailed, 4k resolution, sharp focus, high clarity, clean texture, professional commercial photography",
            Quality::EightK => "ultimate quality, 8k resolution, hyper sharp, extreme realism, cinematic quality, ultra high definition, professional commercial photography quality",
            Quality::SixteenK => "extreme 16k resolution masterwork, infinite detail, hyper-realistic textures, microscopic clarity, legendary photography quality, flawless cinematic masterpiece",
        }
    }

    /// 画廊角标：取展示名称的第三个词，缺失时为 HD
    pub fn badge(self) -> &'static str {
        self.label().split(' ').nth(2).unwrap_or("HD")
    }

    /// 从配置键名解析
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4k" => Some(Quality::FourK),
            "8k" => Some(Quality::EightK),
            "16k" => Some(Quality::SixteenK),
            _ => None,
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::FourK
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_takes_third_word() {
        assert_eq!(Quality::FourK.badge(), "4K");
        assert_eq!(Quality::EightK.badge(), "8K");
        assert_eq!(Quality::SixteenK.badge(), "16K");
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Quality::from_key("8K"), Some(Quality::EightK));
        assert_eq!(Quality::from_key("hd"), None);
    }
}
