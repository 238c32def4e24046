//! RFC 3164 (BSD) 포맷 필드 스캐너
//!
//! `<PRI>Mmm dd hh:mm:ss HOSTNAME TAG[PID]: CONTENT` 형태의 버퍼를
//! 필드 순서대로 스캔합니다. 필드 경계를 넘는 백트래킹은 없으며,
//! 본문 스캔 이전의 필드 실패는 즉시 전체 스캔을 중단시킵니다.
//!
//! 태그 종료 규칙은 RFC의 영숫자 전용 규칙 대신 종결자 기반
//! (공백/`[`/`:`)을 따릅니다. 실제 송신자들은 `postfix/cleanup`처럼
//! `/`, `.`, `_`, `-`가 섞인 태그를 보냅니다.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::ParseError;
use crate::message::Rfc3164Message;
use crate::parser::scan::Scanner;
use crate::timestamp::{self, BSD_PATTERN_LEN, BSD_PATTERNS};

/// BSD 포맷 버퍼 하나를 스캔합니다.
pub(crate) fn scan(raw: &Bytes, now: DateTime<Utc>) -> Result<Rfc3164Message, ParseError> {
    let mut scanner = Rfc3164Scanner::new(raw, now);

    let priority = scanner.scan.parse_priority()?;
    let timestamp = scanner.parse_timestamp()?;
    let hostname = scanner.scan.parse_hostname()?;

    // 호스트명 뒤 구분자 하나를 건너뛴다
    scanner.scan.bump();
    if scanner.scan.is_eof() {
        return Err(ParseError::EndOfInput { expected: "tag" });
    }

    let process = scanner.parse_tag();
    let (pid, body) = scanner.parse_content();

    Ok(Rfc3164Message {
        raw: raw.clone(),
        timestamp,
        hostname,
        process,
        pid,
        facility: priority.facility,
        severity: priority.severity,
        body,
    })
}

/// 하나의 파싱 시도가 소유하는 BSD 스캐너
struct Rfc3164Scanner<'a> {
    scan: Scanner<'a>,
    now: DateTime<Utc>,
}

impl<'a> Rfc3164Scanner<'a> {
    fn new(buf: &'a [u8], now: DateTime<Utc>) -> Self {
        Self {
            scan: Scanner::new(buf),
            now,
        }
    }

    /// 고정 폭 타임스탬프 패턴들을 순서대로 시도합니다.
    ///
    /// 첫 번째로 파싱되는 패턴이 승리하며, 파싱된 월/일/시각은 연도 추정을
    /// 거쳐 UTC로 확정됩니다. 모든 패턴이 실패하면 진단 관례에 따라 커서를
    /// 마지막 시도 패턴 길이로 전진시키고(그 위치가 공백이면 한 바이트 더),
    /// [`ParseError::UnknownTimestampFormat`]을 반환합니다.
    fn parse_timestamp(&mut self) -> Result<DateTime<Utc>, ParseError> {
        for pattern in BSD_PATTERNS {
            let Some(slice) = self.scan.take_fixed(BSD_PATTERN_LEN) else {
                continue;
            };
            let Ok(text) = std::str::from_utf8(slice) else {
                continue;
            };
            let Some((month, day, time)) = timestamp::parse_bsd_clock(text, pattern) else {
                continue;
            };
            let Some(resolved) = timestamp::resolve_year(month, day, time, self.now) else {
                continue;
            };

            self.scan.advance(BSD_PATTERN_LEN);
            self.scan.bump_if(b' ');
            return Ok(resolved);
        }

        self.scan.set_cursor(BSD_PATTERN_LEN);
        self.scan.bump_if(b' ');
        Err(ParseError::UnknownTimestampFormat {
            offset: self.scan.cursor(),
        })
    }

    /// 공백/`[`/`:` 중 먼저 나오는 종결자까지를 태그로 소비합니다.
    ///
    /// 거부되는 문자는 없습니다 -- 종결자나 버퍼 끝에서 멈출 뿐입니다.
    fn parse_tag(&mut self) -> String {
        let rest = self.scan.remaining();
        let len = rest
            .iter()
            .position(|&b| b == b' ' || b == b'[' || b == b':')
            .unwrap_or(rest.len());
        let tag = String::from_utf8_lossy(&rest[..len]).into_owned();
        self.scan.advance(len);
        tag
    }

    /// pid 괄호 그룹(있다면)과 남은 본문을 소비합니다.
    ///
    /// 본문 스캔은 항상 버퍼 끝까지 도달하여 정상 종료합니다. 실패 경로가
    /// 없으므로 에러 채널 대신 값으로 반환합니다.
    fn parse_content(&mut self) -> (String, String) {
        if self.scan.is_eof() {
            return (String::new(), String::new());
        }

        let pid = self.parse_pid();

        // pid 뒤에 올 수 있는 ':'와 공백 패딩을 건너뛴다
        while let Some(b) = self.scan.peek() {
            if b != b':' && b != b' ' {
                break;
            }
            self.scan.bump();
        }

        let body = String::from_utf8_lossy(self.scan.take_rest())
            .trim_matches(' ')
            .to_owned();
        (pid, body)
    }

    /// `[digits]` 그룹에서 pid를 추출합니다.
    ///
    /// `[` 다음의 숫자 연속 뒤에 바로 `]`가 오면 그 숫자들이 pid이고 커서는
    /// `]`를 지나칩니다. 숫자가 아닌 문자를 만나거나 닫는 괄호가 끝내 없으면
    /// 아무것도 소비하지 않고 빈 문자열을 반환하여 괄호 텍스트 전체가
    /// 본문이 되게 합니다. 첫 번째 그룹만 pid 후보입니다.
    fn parse_pid(&mut self) -> String {
        if self.scan.peek() != Some(b'[') {
            return String::new();
        }

        let open = self.scan.cursor();
        let buf = self.scan.remaining();
        let mut i = 1usize;
        while i < buf.len() && buf[i].is_ascii_digit() {
            i += 1;
        }

        if i >= buf.len() || buf[i] != b']' {
            // 닫는 괄호가 없거나 숫자 아닌 문자가 끼어 있음: pid 아님
            return String::new();
        }

        let pid = String::from_utf8_lossy(&buf[1..i]).into_owned();
        self.scan.set_cursor(open + i + 1);
        pid
    }
}
