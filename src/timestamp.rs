//! 연도 없는 BSD 타임스탬프 처리
//!
//! RFC 3164 타임스탬프(`Mmm dd hh:mm:ss`)에는 연도가 없습니다. 송신자
//! 시계는 연말/연초 경계에서 수신자보다 앞서거나 뒤처질 수 있으므로,
//! 달력 연도를 그대로 쓰는 대신 기준 시각 "now"와의 절대 거리(초)가 가장
//! 작은 연도를 고릅니다. 후보는 now의 연도, 그 전해, 그 다음 해 셋이며
//! 동률이면 비교 순서상 먼저 오는 올해 후보가 유지됩니다.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// BSD 타임스탬프 패턴 목록 -- 두 자리 일(`Oct 11`)과 공백 패딩 일(`Oct  1`)
///
/// 순서대로 시도하며 첫 번째로 파싱되는 패턴이 승리합니다.
pub(crate) const BSD_PATTERNS: [&str; 2] = ["%b %d %H:%M:%S", "%b %e %H:%M:%S"];

/// 두 패턴 모두의 고정 폭 ("Jan 02 15:04:05")
pub(crate) const BSD_PATTERN_LEN: usize = 15;

/// 고정 폭 슬라이스를 패턴으로 파싱하여 (월, 일, 시각)을 반환합니다.
///
/// 연도가 없는 포맷이므로 임의의 윤년(2000년)을 붙여 파싱한 뒤 월/일/시각만
/// 취합니다. `Feb 29`도 이 단계에서는 통과하고 연도 해석 단계에서 후보
/// 유효성으로 판정됩니다.
pub(crate) fn parse_bsd_clock(slice: &str, pattern: &str) -> Option<(u32, u32, NaiveTime)> {
    let stamped = format!("2000 {slice}");
    let fmt = format!("%Y {pattern}");
    let dt: NaiveDateTime = NaiveDateTime::parse_from_str(&stamped, &fmt).ok()?;
    Some((dt.month(), dt.day(), dt.time()))
}

/// 월/일/시각에 대해 "now"에 가장 가까운 연도를 골라 UTC 시각을 만듭니다.
///
/// 후보는 `[now.year(), now.year()-1, now.year()+1]` 순서이며, 절대 거리가
/// 엄격히 작을 때만 교체하므로 동률에서는 올해가 유지됩니다. 세 후보 모두
/// 유효한 날짜를 만들지 못하면(윤년 밖의 `Feb 29`) `None`을 반환합니다.
pub(crate) fn resolve_year(
    month: u32,
    day: u32,
    time: NaiveTime,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let mut best: Option<DateTime<Utc>> = None;
    let mut best_distance = i64::MAX;

    for year in [now.year(), now.year() - 1, now.year() + 1] {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let candidate = Utc.from_utc_datetime(&date.and_time(time));
        let distance = (candidate - now).num_seconds().abs();
        if distance < best_distance {
            best_distance = distance;
            best = Some(candidate);
        }
    }

    best
}
