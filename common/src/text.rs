//! 문자열 정규화
//!
//! 원본 데이터에 섞인 보이지 않는 문자 때문에 음식명 조회가 실패하지 않도록
//! 적재 시점과 조회 시점에 같은 정규화를 적용한다.

/// 제거 대상 폭 없는 문자
const ZERO_WIDTH_CHARS: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// 줄바꿈 없는 공백
const NBSP: char = '\u{00A0}';

/// 매칭용 문자열 정규화
///
/// 1. 폭 없는 문자 제거
/// 2. NBSP → 일반 공백
/// 3. 앞뒤 공백 제거
///
/// # Examples
/// ```
/// use pairing_common::text::normalize_text;
///
/// assert_eq!(normalize_text("애플\u{200B}"), "애플");
/// assert_eq!(normalize_text("\u{00A0}김치 찌개 "), "김치 찌개");
/// ```
pub fn normalize_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !ZERO_WIDTH_CHARS.contains(c))
        .map(|c| if c == NBSP { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// 셀 문자열을 실수로 파싱
///
/// 정규화 후 빈 문자열, 파싱 불가, NaN/무한대는 None.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned = normalize_text(value);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 헤더 비교용 키 (정규화 + 소문자)
pub fn header_key(header: &str) -> String {
    normalize_text(header).to_lowercase()
}
