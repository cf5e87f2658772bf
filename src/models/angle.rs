/// 固定的机位提示词列表
///
/// 每次生成从中挑选一条，避免一批图片构图重复。
pub const CINEMATIC_ANGLES: [&str; 7] = [
    "Medium shot, subject centered, face clearly visible, professional framing",
    "Close-up portrait, focusing on facial expressions and high-detail skin texture",
    "Three-quarter view, subjects face fully within frame, artistic lighting",
    "Eye-level shot, symmetrical composition, balanced framing",
    "Cinematic portrait, subject centered, no head cropping, full view of upper body",
    "Low angle heroic shot, subject fully visible against the environment",
    "Side profile but with face turned slightly towards camera to maintain identity visibility",
];
