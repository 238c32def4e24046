//! RFC 5424 구조화 포맷 필드 스캐너
//!
//! `<PRI>VERSION TIMESTAMP HOSTNAME APP-NAME PROCID MSGID SD MSG` 순서로
//! 스캔합니다. 부재 마커(`-`)인 텍스트 필드는 실패가 아니라 빈 문자열로
//! 매핑됩니다. structured-data 블록은 내부 key/value 문법을 파싱하지 않고
//! 원문 그대로 포착합니다.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::ParseError;
use crate::message::Rfc5424Message;
use crate::parser::scan::Scanner;

/// 구조화 포맷 버퍼 하나를 스캔합니다.
pub(crate) fn scan(raw: &Bytes, now: DateTime<Utc>) -> Result<Rfc5424Message, ParseError> {
    let mut scanner = Rfc5424Scanner::new(raw, now);

    let priority = scanner.scan.parse_priority()?;
    let version = scanner.parse_version()?;
    let timestamp = scanner.parse_timestamp()?;
    let hostname = scanner.next_field("hostname")?;
    let process = scanner.next_field("app-name")?;
    let pid = scanner.next_field("proc-id")?;
    let msg_id = scanner.next_field("msg-id")?;
    let structured_data = scanner.parse_structured_data()?;
    let body = scanner.parse_body();

    Ok(Rfc5424Message {
        raw: raw.clone(),
        version,
        timestamp,
        hostname,
        process,
        pid,
        msg_id,
        structured_data,
        facility: priority.facility,
        severity: priority.severity,
        body,
    })
}

/// 하나의 파싱 시도가 소유하는 구조화 포맷 스캐너
struct Rfc5424Scanner<'a> {
    scan: Scanner<'a>,
    now: DateTime<Utc>,
}

impl<'a> Rfc5424Scanner<'a> {
    fn new(buf: &'a [u8], now: DateTime<Utc>) -> Self {
        Self {
            scan: Scanner::new(buf),
            now,
        }
    }

    /// 한 자리 숫자 버전과 뒤따르는 공백을 소비합니다.
    fn parse_version(&mut self) -> Result<u8, ParseError> {
        let offset = self.scan.cursor();
        match self.scan.peek() {
            None => Err(ParseError::EndOfInput {
                expected: "version",
            }),
            Some(b) if b.is_ascii_digit() => {
                self.scan.bump();
                if self.scan.peek() == Some(b' ') {
                    self.scan.bump();
                    Ok(b - b'0')
                } else {
                    Err(ParseError::MalformedVersion { offset })
                }
            }
            Some(_) => Err(ParseError::MalformedVersion { offset }),
        }
    }

    /// ISO-8601 타임스탬프를 UTC로 변환합니다.
    ///
    /// 연도가 명시되어 있으므로 연도 추정은 필요 없습니다. 부재 마커는
    /// 주입된 시계의 "now"로 대체됩니다.
    fn parse_timestamp(&mut self) -> Result<DateTime<Utc>, ParseError> {
        let offset = self.scan.cursor();
        if self.scan.is_eof() {
            return Err(ParseError::EndOfInput {
                expected: "timestamp",
            });
        }
        let token = self.scan.take_until_space();
        self.scan.bump_if(b' ');

        if token == b"-" {
            return Ok(self.now);
        }

        let text = std::str::from_utf8(token)
            .map_err(|_| ParseError::UnknownTimestampFormat { offset })?;
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ParseError::UnknownTimestampFormat { offset })
    }

    /// 공백으로 구분된 필수 텍스트 필드를 소비합니다. `-`는 빈 문자열.
    fn next_field(&mut self, expected: &'static str) -> Result<String, ParseError> {
        if self.scan.is_eof() {
            return Err(ParseError::EndOfInput { expected });
        }
        let token = self.scan.take_until_space();
        self.scan.bump_if(b' ');
        if token == b"-" {
            Ok(String::new())
        } else {
            Ok(String::from_utf8_lossy(token).into_owned())
        }
    }

    /// structured-data 스팬을 원문 그대로 포착합니다.
    ///
    /// 부재 마커(`-`)는 빈 스팬으로, `[...]` 블록(인접한 복수 블록 포함)은
    /// 따옴표/이스케이프를 존중하며 통째로 포착합니다. 둘 다 아니면 스팬 없이
    /// 남은 바이트 전체가 본문으로 넘어가고, 닫히지 않은 블록은 버퍼 끝까지
    /// 포착됩니다.
    fn parse_structured_data(&mut self) -> Result<String, ParseError> {
        if self.scan.is_eof() {
            return Err(ParseError::EndOfInput {
                expected: "structured data",
            });
        }
        if self.scan.peek() == Some(b'-') {
            self.scan.bump();
            self.scan.bump_if(b' ');
            return Ok(String::new());
        }
        if self.scan.peek() != Some(b'[') {
            return Ok(String::new());
        }

        let rest = self.scan.remaining();
        let mut depth = 0usize;
        let mut in_quote = false;
        let mut escaped = false;
        let mut end = rest.len();

        let mut i = 0usize;
        while i < rest.len() {
            let b = rest[i];
            if escaped {
                escaped = false;
                i += 1;
                continue;
            }
            match b {
                b'\\' if in_quote => escaped = true,
                b'"' => in_quote = !in_quote,
                b'[' if !in_quote => depth += 1,
                b']' if !in_quote => {
                    depth -= 1;
                    // 인접한 다음 블록이 이어지면 계속 포착한다
                    if depth == 0 && rest.get(i + 1) != Some(&b'[') {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        let span = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.scan.advance(end);
        self.scan.bump_if(b' ');
        Ok(span)
    }

    /// 남은 자유 텍스트 전체를 본문으로 소비합니다.
    fn parse_body(&mut self) -> String {
        String::from_utf8_lossy(self.scan.take_rest())
            .trim_start_matches(' ')
            .to_owned()
    }
}
