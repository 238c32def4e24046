#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: 고정 순서 멀티 포맷 디스패치와 포맷별 필드 스캐너
//! - [`message`]: facility/severity 코드와 불변 메시지 값
//! - `timestamp` (내부): 연도 없는 BSD 타임스탬프의 연도 추정
//! - [`clock`]: 주입 가능한 "현재 시각" 제공자
//! - [`error`]: 스캐너 에러와 후보별 집계 에러
//!
//! # 파싱 흐름
//!
//! ```text
//! Bytes -> MultiParser -> [Rfc5424Scanner, Rfc3164Scanner] -> SyslogMessage
//!              |                 (첫 성공이 승리)                  |
//!          Clock(now)        모두 실패 시: Unparsable 센티널 + MultiParseError
//! ```

pub mod clock;
pub mod error;
pub mod message;
pub mod parser;

mod timestamp;

// --- 주요 타입 re-export ---

// 파서
pub use parser::MultiParser;

// 메시지
pub use message::{
    Facility, Priority, Rfc3164Message, Rfc5424Message, Severity, SyslogFormat, SyslogMessage,
    UnparsableMessage,
};

// 에러
pub use error::{MultiParseError, ParseError};

// 시계
pub use clock::{Clock, FixedClock, SystemClock};
