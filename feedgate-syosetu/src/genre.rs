//! Genre code tables.

/// Display name for a general-site genre code.
pub fn genre_name(code: u32) -> Option<&'static str> {
    let name = match code {
        101 => "異世界〔恋愛〕",
        102 => "現実世界〔恋愛〕",
        201 => "ハイファンタジー〔ファンタジー〕",
        202 => "ローファンタジー〔ファンタジー〕",
        301 => "純文学〔文芸〕",
        302 => "ヒューマンドラマ〔文芸〕",
        303 => "歴史〔文芸〕",
        304 => "推理〔文芸〕",
        305 => "ホラー〔文芸〕",
        306 => "アクション〔文芸〕",
        307 => "コメディー〔文芸〕",
        401 => "VRゲーム〔SF〕",
        402 => "宇宙〔SF〕",
        403 => "空想科学〔SF〕",
        404 => "パニック〔SF〕",
        9901 => "童話〔その他〕",
        9902 => "詩〔その他〕",
        9903 => "エッセイ〔その他〕",
        9904 => "リプレイ〔その他〕",
        9999 => "その他〔その他〕",
        9801 => "ノンジャンル〔ノンジャンル〕",
        _ => return None,
    };
    Some(name)
}

/// Display name for an adult sub-site code (`nocgenre`).
pub fn nocgenre_name(code: u32) -> Option<&'static str> {
    let name = match code {
        1 => "ノクターンノベルズ(男性向け)",
        2 => "ムーンライトノベルズ(女性向け)",
        3 => "ムーンライトノベルズ(BL)",
        4 => "ミッドナイトノベルズ(大人向け)",
        _ => return None,
    };
    Some(name)
}
