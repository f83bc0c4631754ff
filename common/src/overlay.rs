//! オーバーレイ配置
//!
//! 0〜1000正規化のバウンディングボックスを、描画された画像に対する
//! パーセント矩形に変換する。ラベルは上端に近い矩形だけ内側に置く。

use crate::types::{BoundingBox, Defect, Severity, BOX_SCALE};

/// この値(%)未満の上端オフセットではラベルを矩形内に置く
pub const LABEL_INSIDE_THRESHOLD: f64 = 8.0;

/// 通常時の矩形z-index
pub const Z_INDEX_BASE: u32 = 10;
/// ラベルのz-index
pub const Z_INDEX_LABEL: u32 = 20;
/// ホバー中の矩形z-index
pub const Z_INDEX_HOVER: u32 = 30;

/// 画像の読み込み状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoadState {
    Loading,
    Loaded,
}

/// ラベルの位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// 矩形の上辺の内側
    InsideTop,
    /// 矩形の上辺の外側（上）
    Above,
}

/// 画像ボックスに対するパーセント矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn from_bounding_box(bbox: &BoundingBox) -> Self {
        Self {
            top: bbox.ymin / BOX_SCALE * 100.0,
            left: bbox.xmin / BOX_SCALE * 100.0,
            height: (bbox.ymax - bbox.ymin) / BOX_SCALE * 100.0,
            width: (bbox.xmax - bbox.xmin) / BOX_SCALE * 100.0,
        }
    }

    pub fn label_anchor(&self) -> LabelAnchor {
        if self.top < LABEL_INSIDE_THRESHOLD {
            LabelAnchor::InsideTop
        } else {
            LabelAnchor::Above
        }
    }
}

/// 描画する1件のオーバーレイ
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// 元の欠陥リストでの位置
    pub index: usize,
    pub rect: ScreenRect,
    pub anchor: LabelAnchor,
    pub severity: Severity,
    pub label: String,
    pub tooltip: Tooltip,
}

/// ホバー時のツールチップ
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub detail: String,
    pub location: String,
}

impl Overlay {
    pub fn z_index(&self, hovered: bool) -> u32 {
        if hovered {
            Z_INDEX_HOVER
        } else {
            Z_INDEX_BASE
        }
    }
}

/// 欠陥リストからオーバーレイを配置
///
/// 画像が読み込み済みになるまでは何も返さない。
/// ボックスのない欠陥は飛ばす（所見リストには残る）。
/// 並びは欠陥リストの順で、重なりの解消はしない。
pub fn layout_overlays(defects: &[Defect], state: ImageLoadState) -> Vec<Overlay> {
    if state == ImageLoadState::Loading {
        return Vec::new();
    }

    defects
        .iter()
        .enumerate()
        .filter_map(|(index, defect)| {
            let bbox = defect.bounding_box.as_ref()?;
            let rect = ScreenRect::from_bounding_box(bbox);
            Some(Overlay {
                index,
                rect,
                anchor: rect.label_anchor(),
                severity: defect.severity,
                label: defect.defect_type.clone(),
                tooltip: Tooltip {
                    title: defect.defect_type.clone(),
                    detail: format!("{} Severity · {}% Conf.", defect.severity, defect.confidence),
                    location: defect.location.clone(),
                },
            })
        })
        .collect()
}
