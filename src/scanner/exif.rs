//! EXIF撮影日時の取得

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;

/// 画像バイト列からEXIFの撮影日時を読む
///
/// DateTimeOriginal → DateTime の順に探す。EXIFがない形式は `None`。
pub fn capture_time(bytes: &[u8]) -> Option<NaiveDateTime> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    [exif::Tag::DateTimeOriginal, exif::Tag::DateTime]
        .iter()
        .filter_map(|tag| exif.get_field(*tag, exif::In::PRIMARY))
        .find_map(|field| match &field.value {
            exif::Value::Ascii(values) => values.first().and_then(|v| parse_exif_datetime(v)),
            _ => None,
        })
}

/// "YYYY:MM:DD HH:MM:SS" 形式を変換
fn parse_exif_datetime(ascii: &[u8]) -> Option<NaiveDateTime> {
    let dt = exif::DateTime::from_ascii(ascii).ok()?;
    NaiveDate::from_ymd_opt(dt.year as i32, dt.month as u32, dt.day as u32)?
        .and_hms_opt(dt.hour as u32, dt.minute as u32, dt.second as u32)
}
