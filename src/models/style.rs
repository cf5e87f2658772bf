use serde::{Deserialize, Serialize};

/// 风格主题枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleType {
    /// 南方黄梅花园
    TetMai,
    /// 北方桃花园
    TetDao,
    /// 灯笼街
    TetLongDen,
    /// 阮惠步行街
    TetNguyenHue,
    /// 商务西装形象照
    ProfileVest,
    /// 职场 / 商务
    Business,
    /// 时尚 / 创意
    Fashion,
    /// 晚宴礼服
    Gala,
    /// 古典莲花
    ClassicLotus,
}

impl StyleType {
    /// 按展示顺序列出全部风格
    pub const ALL: [StyleType; 9] = [
        StyleType::TetMai,
        StyleType::TetDao,
        StyleType::TetLongDen,
        StyleType::TetNguyenHue,
        StyleType::ProfileVest,
        StyleType::Business,
        StyleType::Fashion,
        StyleType::Gala,
        StyleType::ClassicLotus,
    ];

    /// 获取界面展示名称
    pub fn label(self) -> &'static str {
        match self {
            StyleType::TetMai => "Tết: Vườn Mai Vàng (Toàn thân)",
            StyleType::TetDao => "Tết: Vườn Đào Hồng (Dáng vừa)",
            StyleType::TetLongDen => "Tết: Phố Lồng Đèn (Dạo bước)",
            StyleType::TetNguyenHue => "Tết: Phố Đi Bộ (Góc rộng)",
            StyleType::ProfileVest => "Profile: Doanh nhân (Vest Sang Trọng)",
            StyleType::Business => "Công sở / Doanh nhân",
            StyleType::Fashion => "Thời trang / Sáng tạo",
            StyleType::Gala => "Dạ hội: Đầm Sang Trọng (Gala)",
            StyleType::ClassicLotus => "Cổ điển: Mỹ nhân bên hoa sen",
        }
    }

    /// 获取配置键名
    pub fn key(self) -> &'static str {
        match self {
            StyleType::TetMai => "tet_mai",
            StyleType::TetDao => "tet_dao",
            StyleType::TetLongDen => "tet_long_den",
            StyleType::TetNguyenHue => "tet_nguyen_hue",
            StyleType::ProfileVest => "profile_vest",
            StyleType::Business => "business",
            StyleType::Fashion => "fashion",
            StyleType::Gala => "gala",
            StyleType::ClassicLotus => "classic_lotus",
        }
    }

    /// 从配置键名或展示名称解析风格
    pub fn from_key(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.key().eq_ignore_ascii_case(s) || style.label() == s)
    }

    /// 获取风格提示词
    pub fn prompt(self) -> &'static str {
        match self {
            StyleType::TetMai => "Ultra-realistic portrait, luxury Vietnamese Tet atmosphere, Southern Vietnam apricot blossom garden (vườn mai vàng), elegant traditional Ao Dai, cinematic lighting, soft golden ambient light, high-detail skin texture, photorealistic, face identity preserved, same facial structure, same skin tone, hyperrealistic, professional photography",
            StyleType::TetDao => "Ultra-realistic portrait, luxury Vietnamese Tet atmosphere, Northern Vietnam peach blossom garden (vườn đào), elegant traditional Ao Dai, cinematic lighting, soft spring mist, premium fashion photography, high-detail skin texture, photorealistic, face identity preserved, same facial structure, same skin tone",
            StyleType::TetLongDen => "Ultra-realistic portrait, luxury Vietnamese Tet atmosphere, traditional lantern street, vibrant red lanterns background, modern Ao Dai, glowing ambient light, cinematic festival mood, hyperrealistic skin detail, photorealistic, face identity preserved",
            StyleType::TetNguyenHue => "Ultra-realistic portrait, luxury Vietnamese Tet atmosphere, Saigon Nguyen Hue walking street, celebratory crowds and grand flower displays, spring fashion, professional commercial photography, high clarity, face identity preserved",
            StyleType::ProfileVest => "Ultra-realistic professional profile portrait, luxury dark blue and charcoal grey gradient background, premium tailored vest and suit, sophisticated executive look, studio rim lighting, sharp focus, cinematic masterwork, photorealistic, face identity preserved, same facial structure, same skin tone",
            StyleType::Business => "Ultra-realistic corporate portrait, professional business style, luxury office background, executive look, suit, blazer, corporate lighting, studio lighting, sharp focus, clean background, professional headshot, business magazine style, photorealistic, face identity preserved",
            StyleType::Fashion => "Ultra-realistic fashion portrait, modern creative style, stylish outfit, high-end fashion editorial look, studio lighting, artistic lighting, Vogue magazine style, dramatic shadows, premium photography, hyperrealistic skin detail, photorealistic, face identity preserved",
            StyleType::Gala => "Ultra-realistic luxury gala portrait. Wearing a high-end evening gown made of premium silk and sequins, red carpet event atmosphere, sophisticated lighting, glamorous and elegant. Subject centered, face clearly visible, professional ballroom framing, high-detail fabric and skin texture, photorealistic.",
            StyleType::ClassicLotus => "8K hyper-realistic fine art portrait of an East Asian woman around 35 years old, classical Vietnamese aesthetic. Wearing a modern-traditional \"ao yem\" made of thin light blue silk with silver sheen, exquisite white lotus embroidery. Bare shoulders, flowing silk sleeves, feminine and pure. She is sitting slightly tilted to the left, left hand touching an ancient ceramic vase, right hand holding a white lotus flower, head slightly tilted, loose hair with strands flying. Gentle, shy expression, downcast eyes, soft smile - radiating peace and grace. Background: dark brown-black, large ceramic vase with white lotuses and large leaves for depth. Studio lighting: backlight/rim light creating a halo on hair and shoulders, highlighting clear skin, dreamlike atmosphere. Framing: 3/4 view, eye-level, harmonious triangle composition between vase, face, and lotus. Full framing, no cropping of head or main features.",
        }
    }
}

impl Default for StyleType {
    fn default() -> Self {
        StyleType::TetMai
    }
}

impl std::fmt::Display for StyleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_accepts_key_and_label() {
        assert_eq!(StyleType::from_key("gala"), Some(StyleType::Gala));
        assert_eq!(StyleType::from_key("TET_DAO"), Some(StyleType::TetDao));
        assert_eq!(
            StyleType::from_key("Công sở / Doanh nhân"),
            Some(StyleType::Business)
        );
        assert_eq!(StyleType::from_key("anime"), None);
    }

    #[test]
    fn test_every_style_has_prompt() {
        for style in StyleType::ALL {
            assert!(!style.prompt().is_empty(), "{:?} 缺少提示词", style);
            assert_eq!(StyleType::from_key(style.key()), Some(style));
        }
    }
}
