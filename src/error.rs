//! 파서 에러 타입
//!
//! [`ParseError`]는 단일 포맷 스캐너의 첫 필드 실패를 나타냅니다. 스캐너는
//! 자체 복구를 시도하지 않고 즉시 실패를 반환하며, 복구는 앙상블
//! ([`MultiParser`](crate::parser::MultiParser))이 다음 후보 포맷을 시도하는
//! 방식으로 이루어집니다.
//!
//! [`MultiParseError`]는 모든 후보가 실패했을 때 후보별 원인을 순서대로
//! 모은 진단용 에러입니다. 센티널 메시지와 함께 반환될 뿐, 최상위
//! `parse` 호출 자체를 실패시키지는 않습니다.

use std::fmt;

use crate::message::SyslogFormat;

/// 단일 포맷 스캔의 필드 실패
///
/// 각 변형은 실패가 감지된 바이트 오프셋을 진단용으로 담습니다.
/// 타임스탬프 실패의 오프셋은 마지막으로 시도한 패턴 길이(공백이 따라오면
/// +1)로 전진된 커서 위치라는 고정 관례를 따릅니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// `<PRI>` 태그가 없거나, 숫자가 아니거나, 191을 초과하거나, `>`가 닫히지 않음
    #[error("malformed priority at offset {offset}")]
    MalformedPriority {
        /// 실패 위치 (바이트 오프셋)
        offset: usize,
    },

    /// RFC 5424 버전 필드가 한 자리 숫자 + 공백 형태가 아님
    #[error("malformed version at offset {offset}")]
    MalformedVersion {
        /// 실패 위치 (바이트 오프셋)
        offset: usize,
    },

    /// 어떤 타임스탬프 패턴도 매칭되지 않음
    #[error("unknown timestamp format, cursor left at offset {offset}")]
    UnknownTimestampFormat {
        /// 진단 관례에 따라 전진된 커서 위치
        offset: usize,
    },

    /// 타임스탬프 직후에 호스트명 토큰이 없음
    #[error("missing hostname at offset {offset}")]
    MissingHostname {
        /// 실패 위치 (바이트 오프셋)
        offset: usize,
    },

    /// 필수 필드를 읽기 전에 버퍼가 소진됨
    #[error("end of input before {expected}")]
    EndOfInput {
        /// 읽으려던 필드 이름
        expected: &'static str,
    },
}

/// 모든 후보 포맷이 거부한 레코드의 집계 에러
///
/// 후보를 시도한 순서대로 (포맷, 원인) 쌍을 보존합니다. 표시 형식은
/// 요약 문자열 뒤에 원인을 쉼표로 이어 붙입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiParseError {
    /// 시도 순서대로의 후보별 실패 원인
    pub causes: Vec<(SyslogFormat, ParseError)>,
}

impl fmt::Display for MultiParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no candidate format accepted the record: ")?;
        for (i, (format, cause)) in self.causes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{format}: {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiParseError {}
