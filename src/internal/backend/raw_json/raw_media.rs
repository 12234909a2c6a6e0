//! igdl 响应的原始形状与条目归一化。
//!
//! 后端字段命名不稳定：`thumb`/`thumbnail`、`isProgresser`/`isProgress`、
//! `isVideo`/`is_video` 混用。全部吸收在这里，归一化之后是唯一的
//! [`MediaEntry`] 形状。

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::internal::backend::structs::media_entry::MediaEntry;

#[derive(Debug, Clone, Deserialize)]
pub struct RawIgLinksResponse {
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub data: Option<Vec<RawMediaEntry>>,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMediaEntry {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub url: String,
    #[serde(default, rename = "isProgresser")]
    pub is_progresser: Option<bool>,
    #[serde(default, rename = "isProgress")]
    pub is_progress: Option<bool>,
    #[serde(default, rename = "carouselIndex")]
    pub carousel_index: Option<u32>,
    #[serde(default, rename = "isVideo")]
    pub is_video: Option<bool>,
    #[serde(default, rename = "is_video")]
    pub is_video_snake: Option<bool>,
}

impl RawMediaEntry {
    fn normalize(self) -> MediaEntry {
        MediaEntry {
            quality: self.quality,
            thumbnail: self.thumb.or(self.thumbnail),
            url: self.url,
            is_progress: self
                .is_progresser
                .or(self.is_progress)
                .unwrap_or(false),
            carousel_index: self.carousel_index,
            is_video: self.is_video.or(self.is_video_snake),
        }
    }

    fn thumb_key(&self) -> &str {
        self.thumb
            .as_deref()
            .or(self.thumbnail.as_deref())
            .unwrap_or("")
    }

    /// 质量排序权重：HD 优先于 SD，其余靠后；同权重保持原顺序。
    fn quality_rank(&self) -> u8 {
        let q = self.quality.as_deref().unwrap_or("");
        if q.contains("HD") {
            0
        } else if q.contains("SD") {
            1
        } else {
            2
        }
    }
}

/// 归一化 igdl 条目列表。
///
/// GraphQL 结果（URL 全部唯一且多于一条）逐条保留；snapsave 结果是
/// 同一素材的多个质量变体，按缩略图分组后每组只留最高质量的一条。
pub fn normalize_media_entries(raw: Vec<RawMediaEntry>) -> Vec<MediaEntry> {
    let unique: HashSet<&str> = raw.iter().map(|e| e.url.as_str()).collect();
    if raw.len() > 1 && unique.len() == raw.len() {
        return raw.into_iter().map(RawMediaEntry::normalize).collect();
    }

    // 按缩略图分组，保持首次出现的顺序
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RawMediaEntry>> = HashMap::new();
    for entry in raw {
        let key = entry.thumb_key().to_string();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(entry);
    }

    let mut out = Vec::with_capacity(order.len());
    for key in order {
        let Some(mut variants) = groups.remove(&key) else {
            continue;
        };
        variants.sort_by_key(RawMediaEntry::quality_rank);
        if let Some(best) = variants.into_iter().next() {
            out.push(best.normalize());
        }
    }
    out
}
