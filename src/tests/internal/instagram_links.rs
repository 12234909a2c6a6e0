//! Instagram 链接归一化测试：字段别名吸收、质量变体去重、链接清洗。

use crate::instagram::{clean_post_url, is_post_url};
use crate::raw_json::media::{RawMediaEntry, normalize_media_entries};

fn entry(url: &str, thumb: Option<&str>, quality: Option<&str>) -> RawMediaEntry {
    serde_json::from_value(serde_json::json!({
        "url": url,
        "thumb": thumb,
        "quality": quality,
    }))
    .unwrap()
}

#[test]
fn aliased_fields_are_absorbed() {
    let raw: RawMediaEntry = serde_json::from_str(
        r#"{
            "url": "https://cdn.example/a.mp4",
            "thumbnail": "https://cdn.example/a.jpg",
            "isProgresser": true,
            "carouselIndex": 2,
            "is_video": true
        }"#,
    )
    .unwrap();
    let normalized = normalize_media_entries(vec![raw]);
    assert_eq!(normalized.len(), 1);
    let item = &normalized[0];
    assert_eq!(item.thumbnail.as_deref(), Some("https://cdn.example/a.jpg"));
    assert!(item.is_progress);
    assert_eq!(item.carousel_index, Some(2));
    assert_eq!(item.is_video, Some(true));
}

#[test]
fn camel_case_variant_wins_over_snake_case() {
    let raw: RawMediaEntry = serde_json::from_str(
        r#"{"url": "u", "isVideo": false, "is_video": true}"#,
    )
    .unwrap();
    let normalized = normalize_media_entries(vec![raw]);
    assert_eq!(normalized[0].is_video, Some(false));
}

#[test]
fn unique_urls_are_kept_as_is() {
    let raw = vec![
        entry("https://cdn/a.mp4", Some("t1"), None),
        entry("https://cdn/b.mp4", Some("t2"), None),
        entry("https://cdn/c.mp4", Some("t3"), None),
    ];
    let normalized = normalize_media_entries(raw);
    assert_eq!(normalized.len(), 3);
    assert_eq!(normalized[0].url, "https://cdn/a.mp4");
    assert_eq!(normalized[2].url, "https://cdn/c.mp4");
}

#[test]
fn quality_variants_are_deduped_by_thumbnail() {
    // 同一素材的 SD/HD 变体（URL 相同）→ 每组只留最高质量
    let raw = vec![
        entry("https://cdn/a", Some("t1"), Some("SD 480p")),
        entry("https://cdn/a", Some("t1"), Some("HD 1080p")),
        entry("https://cdn/b", Some("t2"), Some("SD 480p")),
    ];
    let normalized = normalize_media_entries(raw);
    assert_eq!(normalized.len(), 2);
    assert_eq!(normalized[0].quality.as_deref(), Some("HD 1080p"));
    assert_eq!(normalized[0].thumbnail.as_deref(), Some("t1"));
    assert_eq!(normalized[1].quality.as_deref(), Some("SD 480p"));
}

#[test]
fn dedup_keeps_first_on_equal_quality() {
    let raw = vec![
        entry("https://cdn/a", Some("t"), Some("HD")),
        entry("https://cdn/a", Some("t"), Some("HD")),
    ];
    let normalized = normalize_media_entries(raw);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].url, "https://cdn/a");
}

#[test]
fn clean_post_url_strips_img_index() {
    assert_eq!(
        clean_post_url("https://www.instagram.com/p/abc/?img_index=3"),
        "https://www.instagram.com/p/abc/"
    );
    assert_eq!(
        clean_post_url(
            "https://www.instagram.com/p/abc/?igsh=xyz&img_index=2"
        ),
        "https://www.instagram.com/p/abc/?igsh=xyz"
    );
    // 解析失败时原样返回
    assert_eq!(clean_post_url("不是链接"), "不是链接");
}

#[test]
fn post_url_validation() {
    assert!(is_post_url("https://www.instagram.com/p/abc/"));
    assert!(is_post_url("https://instagram.com/reel/xyz/"));
    assert!(is_post_url("instagram.com/tv/123/"));
    assert!(is_post_url("www.instagram.com/stories/alice/456/"));

    assert!(!is_post_url(""));
    assert!(!is_post_url("https://www.instagram.com/alice/"));
    assert!(!is_post_url("https://example.com/p/abc/"));
    assert!(!is_post_url("https://www.instagram.com/p"));
}
