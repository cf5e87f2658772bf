//! 画廊视图 - 业务能力层
//!
//! 把账本记录转换为画廊卡片，编号从最旧的一张开始计数

use crate::models::{AspectRatio, GeneratedResult, ResultStatus};
use crate::utils::logging::truncate_text;

/// 画廊卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    pub result_id: String,
    /// 场景编号，最旧的一张为 1
    pub scene_number: usize,
    pub status: ResultStatus,
    pub ratio: AspectRatio,
    /// 画质角标（4K / 8K / 16K）
    pub badge: &'static str,
    pub camera_angle: String,
}

impl GalleryCard {
    /// 场景标题，例如 `PHÂN CẢNH 03`
    pub fn scene_label(&self) -> String {
        format!("PHÂN CẢNH {:02}", self.scene_number)
    }

    /// 卡片状态说明
    pub fn caption(&self) -> String {
        match self.status {
            ResultStatus::Pending => format!("Đang kết xuất #{:02}", self.scene_number),
            ResultStatus::Error => "Kết xuất thất bại".to_string(),
            ResultStatus::Completed => "Loi AI Studio Masterpiece".to_string(),
        }
    }

    /// 单行摘要，用于日志
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.scene_label(),
            self.caption(),
            self.ratio,
            self.badge,
            truncate_text(&self.camera_angle, 48)
        )
    }
}

/// 账本记录（最新在前）转换为画廊卡片
pub fn cards(results: &[GeneratedResult]) -> Vec<GalleryCard> {
    let total = results.len();
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| GalleryCard {
            result_id: result.id.clone(),
            scene_number: total - idx,
            status: result.status,
            ratio: result.ratio,
            badge: result.quality.badge(),
            camera_angle: result.camera_angle.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quality, ResultPatch, Selection, SourceFile, StyleType, UserImage};

    fn result(status: ResultStatus) -> GeneratedResult {
        let image = UserImage {
            id: "upload-1-0".to_string(),
            url: "preview://a".to_string(),
            file: SourceFile::from_bytes("a.png", None, vec![]),
            name: "a.png".to_string(),
        };
        let selection = Selection::new(StyleType::Gala, AspectRatio::Square, Quality::SixteenK);
        let mut r = GeneratedResult::pending(&image, selection, "Eye-level shot");
        match status {
            ResultStatus::Completed => r.apply(ResultPatch::completed("data:image/png;base64,AA==")),
            ResultStatus::Error => r.apply(ResultPatch::error()),
            ResultStatus::Pending => {}
        }
        r
    }

    #[test]
    fn test_scene_numbers_count_from_oldest() {
        let results = vec![
            result(ResultStatus::Pending),
            result(ResultStatus::Completed),
            result(ResultStatus::Error),
        ];
        let cards = cards(&results);

        assert_eq!(cards[0].scene_number, 3);
        assert_eq!(cards[2].scene_number, 1);
        assert_eq!(cards[0].scene_label(), "PHÂN CẢNH 03");
        assert_eq!(cards[0].caption(), "Đang kết xuất #03");
        assert_eq!(cards[2].caption(), "Kết xuất thất bại");
        assert_eq!(cards[1].badge, "16K");
    }

    #[test]
    fn test_empty_ledger_has_no_cards() {
        assert!(cards(&[]).is_empty());
    }
}
