//! 시계 주입 지점 -- "현재 시각" 제공자
//!
//! 연도 추정과 센티널 메시지의 캡처 시점이 모두 "now"에 의존하므로,
//! 테스트에서 고정 기준 시각을 주입할 수 있도록 trait으로 분리합니다.

use chrono::{DateTime, Utc};

/// 현재 시각 제공자 trait
///
/// [`MultiParser`](crate::parser::MultiParser)는 파싱 시도마다 한 번
/// `now()`를 호출하여 그 값을 하위 스캐너에 전달합니다.
pub trait Clock: Send + Sync {
    /// 현재 시각 (UTC)
    fn now(&self) -> DateTime<Utc>;
}

/// 실제 벽시계 -- 기본 구현
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 고정 시계 -- 결정적 테스트용
///
/// 항상 생성 시 지정한 시각을 반환합니다.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
