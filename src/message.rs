//! 메시지 값 타입 -- 파싱 결과로 생성되는 불변 값들
//!
//! 파싱이 성공하면 포맷별 메시지([`Rfc3164Message`], [`Rfc5424Message`])가,
//! 모든 후보 포맷이 실패하면 센티널([`UnparsableMessage`])이 생성됩니다.
//! 세 변형 모두 [`SyslogMessage`]로 감싸져 동일한 접근자 표면을 제공합니다.
//!
//! 모든 메시지는 원본 버퍼를 [`Bytes`] 핸들로 보존합니다. 복사가 아니라
//! 참조 카운트 공유이므로 파싱 성공/실패와 무관하게 원본 바이트가
//! 그대로 유지됩니다.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Syslog facility 코드 (0-23)
///
/// 로그를 생성한 서브시스템 분류입니다. 코드를 알 수 없는 경우
/// [`Facility::Unknown`](-1)을 사용합니다. 텍스트 이름 테이블은 외부
/// 협력자의 몫이며, 이 크레이트는 정수 코드만 생산/소비합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facility {
    /// 알 수 없음 (-1)
    Unknown,
    Kernel,
    User,
    Mail,
    Daemon,
    Auth,
    Syslog,
    Lpr,
    News,
    Uucp,
    Cron,
    AuthPriv,
    Ftp,
    Ntp,
    Audit,
    Alert,
    ClockDaemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    /// 정수 코드에서 facility를 생성합니다. 0-23 범위 밖이면 `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Kernel,
            1 => Self::User,
            2 => Self::Mail,
            3 => Self::Daemon,
            4 => Self::Auth,
            5 => Self::Syslog,
            6 => Self::Lpr,
            7 => Self::News,
            8 => Self::Uucp,
            9 => Self::Cron,
            10 => Self::AuthPriv,
            11 => Self::Ftp,
            12 => Self::Ntp,
            13 => Self::Audit,
            14 => Self::Alert,
            15 => Self::ClockDaemon,
            16 => Self::Local0,
            17 => Self::Local1,
            18 => Self::Local2,
            19 => Self::Local3,
            20 => Self::Local4,
            21 => Self::Local5,
            22 => Self::Local6,
            23 => Self::Local7,
            _ => Self::Unknown,
        }
    }

    /// 정수 코드를 반환합니다. `Unknown`은 -1.
    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::Kernel => 0,
            Self::User => 1,
            Self::Mail => 2,
            Self::Daemon => 3,
            Self::Auth => 4,
            Self::Syslog => 5,
            Self::Lpr => 6,
            Self::News => 7,
            Self::Uucp => 8,
            Self::Cron => 9,
            Self::AuthPriv => 10,
            Self::Ftp => 11,
            Self::Ntp => 12,
            Self::Audit => 13,
            Self::Alert => 14,
            Self::ClockDaemon => 15,
            Self::Local0 => 16,
            Self::Local1 => 17,
            Self::Local2 => 18,
            Self::Local3 => 19,
            Self::Local4 => 20,
            Self::Local5 => 21,
            Self::Local6 => 22,
            Self::Local7 => 23,
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Syslog severity 코드 (0-7)
///
/// 메시지 긴급도 분류입니다. 코드를 알 수 없는 경우
/// [`Severity::Unknown`](-1)을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// 알 수 없음 (-1)
    Unknown,
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Severity {
    /// 정수 코드에서 severity를 생성합니다. 0-7 범위 밖이면 `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Emergency,
            1 => Self::Alert,
            2 => Self::Critical,
            3 => Self::Error,
            4 => Self::Warning,
            5 => Self::Notice,
            6 => Self::Info,
            7 => Self::Debug,
            _ => Self::Unknown,
        }
    }

    /// 정수 코드를 반환합니다. `Unknown`은 -1.
    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::Emergency => 0,
            Self::Alert => 1,
            Self::Critical => 2,
            Self::Error => 3,
            Self::Warning => 4,
            Self::Notice => 5,
            Self::Info => 6,
            Self::Debug => 7,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// `<PRI>` 태그에서 디코딩된 우선순위
///
/// 불변식: `facility = raw / 8`, `severity = raw % 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    /// 원시 우선순위 값 (0-191)
    pub raw: u8,
    /// 분리된 facility
    pub facility: Facility,
    /// 분리된 severity
    pub severity: Severity,
}

impl Priority {
    /// 원시 값에서 우선순위를 생성합니다.
    ///
    /// 범위 검증(0-191)은 호출자인 우선순위 디코더가 수행합니다.
    pub fn from_raw(raw: u8) -> Self {
        Self {
            raw,
            facility: Facility::from_code(i32::from(raw / 8)),
            severity: Severity::from_code(i32::from(raw % 8)),
        }
    }
}

/// 지원하는 syslog 포맷 -- 디스패처가 시도하는 닫힌 후보 집합
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyslogFormat {
    /// RFC 5424 구조화 포맷
    Rfc5424,
    /// RFC 3164 BSD 레거시 포맷
    Rfc3164,
}

impl fmt::Display for SyslogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfc5424 => write!(f, "rfc5424"),
            Self::Rfc3164 => write!(f, "rfc3164"),
        }
    }
}

/// RFC 3164 (BSD) 포맷에서 파싱된 메시지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfc3164Message {
    /// 원본 버퍼
    pub raw: Bytes,
    /// 연도 추정을 거쳐 UTC로 해석된 타임스탬프
    pub timestamp: DateTime<Utc>,
    /// 호스트명
    pub hostname: String,
    /// 태그 (프로세스명)
    pub process: String,
    /// 대괄호에서 추출된 pid (없으면 빈 문자열)
    pub pid: String,
    /// facility 코드
    pub facility: Facility,
    /// severity 코드
    pub severity: Severity,
    /// 본문 (양끝 공백 제거)
    pub body: String,
}

/// RFC 5424 구조화 포맷에서 파싱된 메시지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfc5424Message {
    /// 원본 버퍼
    pub raw: Bytes,
    /// 프로토콜 버전 (한 자리 숫자)
    pub version: u8,
    /// ISO-8601 타임스탬프 (UTC 변환)
    pub timestamp: DateTime<Utc>,
    /// 호스트명 (`-`는 빈 문자열)
    pub hostname: String,
    /// app-name (`-`는 빈 문자열)
    pub process: String,
    /// proc-id 토큰 그대로 (`-`는 빈 문자열)
    pub pid: String,
    /// msg-id (`-`는 빈 문자열)
    pub msg_id: String,
    /// structured-data 블록 원문 (`-`는 빈 문자열, 내부 문법은 파싱하지 않음)
    pub structured_data: String,
    /// facility 코드
    pub facility: Facility,
    /// severity 코드
    pub severity: Severity,
    /// 본문
    pub body: String,
}

/// 모든 후보 포맷이 거부한 레코드의 센티널 메시지
///
/// 원본 바이트는 그대로 보존되며, 타임스탬프는 버퍼에서 추출한 값이 아니라
/// 센티널이 생성된 시점(주입된 시계의 "now", UTC)입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparsableMessage {
    /// 원본 버퍼 (그대로 보존)
    pub raw: Bytes,
    /// 캡처 시점
    pub captured_at: DateTime<Utc>,
}

impl UnparsableMessage {
    /// 센티널 메시지를 생성합니다.
    pub fn new(raw: Bytes, captured_at: DateTime<Utc>) -> Self {
        Self { raw, captured_at }
    }
}

/// 파싱 시도 한 번의 결과 메시지 -- 정확히 하나의 변형만 생성됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyslogMessage {
    /// RFC 3164 파싱 성공
    Rfc3164(Rfc3164Message),
    /// RFC 5424 파싱 성공
    Rfc5424(Rfc5424Message),
    /// 모든 후보 실패
    Unparsable(UnparsableMessage),
}

impl SyslogMessage {
    /// 원본 버퍼 참조. 파싱 성공/실패와 무관하게 입력과 동일합니다.
    pub fn raw(&self) -> &Bytes {
        match self {
            Self::Rfc3164(m) => &m.raw,
            Self::Rfc5424(m) => &m.raw,
            Self::Unparsable(m) => &m.raw,
        }
    }

    /// UTC 타임스탬프. 센티널은 캡처 시점을 반환합니다.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Rfc3164(m) => m.timestamp,
            Self::Rfc5424(m) => m.timestamp,
            Self::Unparsable(m) => m.captured_at,
        }
    }

    /// facility 코드. 센티널은 `Unknown`(-1).
    pub fn facility(&self) -> Facility {
        match self {
            Self::Rfc3164(m) => m.facility,
            Self::Rfc5424(m) => m.facility,
            Self::Unparsable(_) => Facility::Unknown,
        }
    }

    /// severity 코드. 센티널은 `Unknown`(-1).
    pub fn severity(&self) -> Severity {
        match self {
            Self::Rfc3164(m) => m.severity,
            Self::Rfc5424(m) => m.severity,
            Self::Unparsable(_) => Severity::Unknown,
        }
    }

    /// 호스트명. 센티널은 빈 문자열.
    pub fn hostname(&self) -> &str {
        match self {
            Self::Rfc3164(m) => &m.hostname,
            Self::Rfc5424(m) => &m.hostname,
            Self::Unparsable(_) => "",
        }
    }

    /// 프로세스명 (3164 태그 / 5424 app-name). 센티널은 빈 문자열.
    pub fn process(&self) -> &str {
        match self {
            Self::Rfc3164(m) => &m.process,
            Self::Rfc5424(m) => &m.process,
            Self::Unparsable(_) => "",
        }
    }

    /// pid 문자열. 숫자로 재해석하지 않고 토큰 그대로 보존합니다.
    pub fn pid(&self) -> &str {
        match self {
            Self::Rfc3164(m) => &m.pid,
            Self::Rfc5424(m) => &m.pid,
            Self::Unparsable(_) => "",
        }
    }

    /// 자유 텍스트 본문. 센티널은 빈 문자열.
    pub fn body(&self) -> &str {
        match self {
            Self::Rfc3164(m) => &m.body,
            Self::Rfc5424(m) => &m.body,
            Self::Unparsable(_) => "",
        }
    }

    /// 파싱에 성공한 포맷. 센티널은 `None`.
    pub fn format(&self) -> Option<SyslogFormat> {
        match self {
            Self::Rfc3164(_) => Some(SyslogFormat::Rfc3164),
            Self::Rfc5424(_) => Some(SyslogFormat::Rfc5424),
            Self::Unparsable(_) => None,
        }
    }

    /// RFC 5424 버전 번호. 다른 변형은 `None`.
    pub fn version(&self) -> Option<u8> {
        match self {
            Self::Rfc5424(m) => Some(m.version),
            _ => None,
        }
    }

    /// RFC 5424 msg-id. 다른 변형은 `None`.
    pub fn msg_id(&self) -> Option<&str> {
        match self {
            Self::Rfc5424(m) => Some(&m.msg_id),
            _ => None,
        }
    }

    /// RFC 5424 structured-data 블록 원문. 다른 변형은 `None`.
    pub fn structured_data(&self) -> Option<&str> {
        match self {
            Self::Rfc5424(m) => Some(&m.structured_data),
            _ => None,
        }
    }

    /// 센티널 여부
    pub fn is_unparsable(&self) -> bool {
        matches!(self, Self::Unparsable(_))
    }
}

impl fmt::Display for SyslogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {} {}: {}",
            self.facility(),
            self.severity(),
            self.hostname(),
            self.process(),
            self.body(),
        )
    }
}
