//! 바이트 커서와 공용 필드 스캐너
//!
//! [`Scanner`]는 하나의 파싱 시도가 독점 소유하는 커서입니다. 버퍼 자체는
//! 불변이며, 같은 버퍼를 여러 시도가 동시에 읽어도 각 시도는 자기 커서만
//! 움직입니다. 커서는 성공 경로에서 단조 전진하고, 타임스탬프 실패 경로에서만
//! 진단 관례에 따라 고정 길이로 앞으로 재배치됩니다.

use crate::error::ParseError;
use crate::message::Priority;

/// 우선순위 원시 값 상한 -- facility 최대 23 * 8 + severity 최대 7
const MAX_PRIORITY: u16 = 191;

/// `<PRI>` 숫자 자릿수 상한
const MAX_PRIORITY_DIGITS: usize = 3;

/// 단일 파싱 시도가 소유하는 커서
#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    buf: &'a [u8],
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, cursor: 0 }
    }

    /// 현재 커서 위치 (바이트 오프셋)
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// 진단 관례용 커서 재배치. 전진만 허용됩니다.
    pub(crate) fn set_cursor(&mut self, offset: usize) {
        debug_assert!(offset >= self.cursor);
        self.cursor = offset;
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.cursor >= self.buf.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.buf.get(self.cursor).copied()
    }

    /// 커서를 한 바이트 전진시킵니다. 버퍼 끝에서는 멈춥니다.
    pub(crate) fn bump(&mut self) {
        if self.cursor < self.buf.len() {
            self.cursor += 1;
        }
    }

    /// 커서가 `expected`를 가리키면 소비합니다.
    pub(crate) fn bump_if(&mut self, expected: u8) {
        if self.peek() == Some(expected) {
            self.cursor += 1;
        }
    }

    /// 커서부터 `len` 바이트를 빌려옵니다. 부족하면 `None`.
    pub(crate) fn take_fixed(&self, len: usize) -> Option<&'a [u8]> {
        self.buf.get(self.cursor..self.cursor + len)
    }

    /// 커서를 `len` 바이트 전진시킵니다.
    pub(crate) fn advance(&mut self, len: usize) {
        self.cursor = (self.cursor + len).min(self.buf.len());
    }

    /// 다음 공백 전까지의 토큰을 소비합니다. 커서는 공백 위에 남습니다.
    pub(crate) fn take_until_space(&mut self) -> &'a [u8] {
        let start = self.cursor;
        while self.cursor < self.buf.len() && self.buf[self.cursor] != b' ' {
            self.cursor += 1;
        }
        &self.buf[start..self.cursor]
    }

    /// 커서부터 버퍼 끝까지를 소비합니다.
    pub(crate) fn take_rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.cursor..];
        self.cursor = self.buf.len();
        rest
    }

    /// 커서 이후의 남은 바이트를 빌려옵니다 (소비하지 않음).
    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.buf[self.cursor..]
    }

    /// 선두 `<PRI>` 태그를 디코딩합니다.
    ///
    /// `<`가 없거나, 숫자가 아니거나, 자릿수가 상한을 넘거나, `>`가 닫히지
    /// 않거나, 값이 191을 초과하면 [`ParseError::MalformedPriority`]입니다.
    /// 성공 시 커서는 `>` 다음으로 전진합니다.
    pub(crate) fn parse_priority(&mut self) -> Result<Priority, ParseError> {
        let offset = self.cursor;
        if self.peek() != Some(b'<') {
            return Err(ParseError::MalformedPriority { offset });
        }
        self.cursor += 1;

        let mut value: u16 = 0;
        let mut digits = 0usize;
        loop {
            match self.peek() {
                Some(b'>') => break,
                Some(b) if b.is_ascii_digit() && digits < MAX_PRIORITY_DIGITS => {
                    value = value * 10 + u16::from(b - b'0');
                    digits += 1;
                    self.cursor += 1;
                }
                _ => return Err(ParseError::MalformedPriority { offset }),
            }
        }

        if digits == 0 || value > MAX_PRIORITY {
            return Err(ParseError::MalformedPriority { offset });
        }

        self.cursor += 1; // '>' 소비
        Ok(Priority::from_raw(value as u8))
    }

    /// 공백으로 구분된 호스트명 토큰을 소비합니다. 커서는 구분자 위에 남습니다.
    pub(crate) fn parse_hostname(&mut self) -> Result<String, ParseError> {
        let offset = self.cursor;
        let token = self.take_until_space();
        if token.is_empty() {
            return Err(ParseError::MissingHostname { offset });
        }
        Ok(String::from_utf8_lossy(token).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Facility, Severity};

    #[test]
    fn priority_valid() {
        let mut scan = Scanner::new(b"<34>rest");
        let pri = scan.parse_priority().unwrap();
        assert_eq!(pri.raw, 34);
        assert_eq!(pri.facility, Facility::Auth);
        assert_eq!(pri.severity, Severity::Critical);
        assert_eq!(scan.cursor(), 4);
    }

    #[test]
    fn priority_boundary_values() {
        let mut scan = Scanner::new(b"<0>");
        assert_eq!(scan.parse_priority().unwrap().raw, 0);

        let mut scan = Scanner::new(b"<191>");
        assert_eq!(scan.parse_priority().unwrap().raw, 191);
    }

    #[test]
    fn priority_out_of_range() {
        let mut scan = Scanner::new(b"<192>");
        assert_eq!(
            scan.parse_priority(),
            Err(ParseError::MalformedPriority { offset: 0 })
        );
    }

    #[test]
    fn priority_missing_open_bracket() {
        let mut scan = Scanner::new(b"FOO BAR BAZ");
        assert!(scan.parse_priority().is_err());
    }

    #[test]
    fn priority_non_numeric() {
        let mut scan = Scanner::new(b"<ab>");
        assert!(scan.parse_priority().is_err());
    }

    #[test]
    fn priority_empty_digits() {
        let mut scan = Scanner::new(b"<>");
        assert!(scan.parse_priority().is_err());
    }

    #[test]
    fn priority_unterminated() {
        let mut scan = Scanner::new(b"<34");
        assert!(scan.parse_priority().is_err());
    }

    #[test]
    fn priority_too_many_digits() {
        let mut scan = Scanner::new(b"<1911>");
        assert!(scan.parse_priority().is_err());
    }

    #[test]
    fn hostname_stops_at_space() {
        let mut scan = Scanner::new(b"gimli.local rest");
        assert_eq!(scan.parse_hostname().unwrap(), "gimli.local");
        assert_eq!(scan.cursor(), 11);
        assert_eq!(scan.peek(), Some(b' '));
    }

    #[test]
    fn hostname_at_end_of_buffer() {
        let mut scan = Scanner::new(b"mymachine");
        assert_eq!(scan.parse_hostname().unwrap(), "mymachine");
        assert!(scan.is_eof());
    }

    #[test]
    fn hostname_empty_token_is_missing() {
        let mut scan = Scanner::new(b" leading-space");
        assert_eq!(
            scan.parse_hostname(),
            Err(ParseError::MissingHostname { offset: 0 })
        );
    }

    #[test]
    fn bump_stops_at_end() {
        let mut scan = Scanner::new(b"a");
        scan.bump();
        scan.bump();
        assert_eq!(scan.cursor(), 1);
        assert!(scan.is_eof());
    }
}
