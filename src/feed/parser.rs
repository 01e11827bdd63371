use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};

use crate::models::{UNKNOWN, VehicleRecord};

/// SIRI 命名空间
pub const SIRI_NS: &str = "http://www.siri.org.uk/siri";

/// SIRI-VM 车辆活动解析
///
/// 解析失败不向调用方报错：整篇文档无法解析时返回空列表，
/// 单条记录缺字段或坐标非法时跳过该条。
pub struct FeedParser;

impl FeedParser {
    pub fn parse(raw: &[u8]) -> Vec<VehicleRecord> {
        Self::parse_at(raw, Utc::now())
    }

    /// `now` 作为缺少 RecordedAtTime 的记录的观测时间
    pub fn parse_at(raw: &[u8], now: DateTime<Utc>) -> Vec<VehicleRecord> {
        let text = match std::str::from_utf8(raw) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Feed is not valid UTF-8: {}", e);
                return Vec::new();
            }
        };

        let doc = match Document::parse(text) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!("XML parse error: {}", e);
                return Vec::new();
            }
        };

        doc.descendants()
            .filter(|n| n.has_tag_name((SIRI_NS, "VehicleActivity")))
            .filter_map(|activity| parse_vehicle_activity(activity, now))
            .collect()
    }
}

fn parse_vehicle_activity(activity: Node, now: DateTime<Utc>) -> Option<VehicleRecord> {
    let vehicle_ref = find_descendant(activity, "VehicleRef")?;
    let location = find_descendant(activity, "VehicleLocation")?;

    let lat_text = child_text(location, "Latitude")?;
    let lon_text = child_text(location, "Longitude")?;

    let (latitude, longitude) = match (lat_text.parse::<f64>(), lon_text.parse::<f64>()) {
        (Ok(lat), Ok(lon)) => (lat, lon),
        _ => {
            tracing::warn!("Invalid coordinate: {}, {}", lat_text, lon_text);
            return None;
        }
    };
    if !VehicleRecord::is_valid_position(latitude, longitude) {
        tracing::warn!("Coordinate out of range: {}, {}", latitude, longitude);
        return None;
    }

    let timestamp = find_descendant(activity, "RecordedAtTime")
        .and_then(text_of)
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(now);

    Some(VehicleRecord {
        vehicle_id: text_or_unknown(Some(vehicle_ref)),
        latitude,
        longitude,
        line: text_or_unknown(find_descendant(activity, "LineRef")),
        operator: text_or_unknown(find_descendant(activity, "OperatorRef")),
        destination: text_or_unknown(find_descendant(activity, "DestinationName")),
        timestamp,
    })
}

fn find_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| n.has_tag_name((SIRI_NS, name)))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name((SIRI_NS, name)))
        .and_then(text_of)
}

fn text_of<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

fn text_or_unknown(node: Option<Node>) -> String {
    node.and_then(text_of).unwrap_or(UNKNOWN).to_string()
}
