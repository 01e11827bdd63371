use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// 会话令牌随机字节数
pub const SESSION_TOKEN_BYTES: usize = 32;

/// 生成会话令牌，32 字节随机数的 URL 安全 base64 编码
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 解析坐标参数，缺省为 0
pub fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    match raw {
        None => Some(0.0),
        Some(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}
