//! 멀티 포맷 파서 -- 고정 순서 후보 디스패치
//!
//! [`MultiParser`]는 하나의 버퍼를 후보 포맷 순서대로 각 스캐너에
//! 제안합니다. 각 시도는 같은 불변 버퍼 위에서 독립 커서로 진행되므로
//! 앞선 실패가 다음 시도에 영향을 주지 않습니다. 첫 성공이 즉시 결과가
//! 되고, 모두 실패하면 원본을 보존한 센티널 메시지와 후보별 원인을 모은
//! [`MultiParseError`]가 반환됩니다.
//!
//! 최상위 [`parse`](MultiParser::parse)는 절대 실패하지 않습니다 --
//! 수집 파이프라인이 인식 불가 입력 앞에서도 무손실로 남게 하는 계약입니다.

pub(crate) mod rfc3164;
pub(crate) mod rfc5424;
pub(crate) mod scan;

use bytes::Bytes;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{MultiParseError, ParseError};
use crate::message::{SyslogFormat, SyslogMessage, UnparsableMessage};

/// 멀티 포맷 syslog 파서
///
/// 기본 후보 순서는 더 엄격한 포맷부터: RFC 5424, 그다음 RFC 3164.
/// 순서는 고정 구성이며 버퍼 내용에 따라 달라지지 않습니다.
pub struct MultiParser {
    clock: Box<dyn Clock>,
    formats: Vec<SyslogFormat>,
}

impl MultiParser {
    /// 벽시계와 기본 후보 순서로 파서를 생성합니다.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// 주입한 시계로 파서를 생성합니다. 테스트에서 기준 시각을 고정할 때
    /// 사용합니다.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            formats: vec![SyslogFormat::Rfc5424, SyslogFormat::Rfc3164],
        }
    }

    /// 후보 포맷 순서를 교체합니다.
    pub fn with_format_order(mut self, formats: Vec<SyslogFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// 구성된 후보 순서
    pub fn formats(&self) -> &[SyslogFormat] {
        &self.formats
    }

    /// 버퍼 하나를 파싱합니다. 항상 메시지를 생성합니다.
    ///
    /// 반환된 메시지는 입력 버퍼의 참조 카운트 핸들을 보존하며, 에러는
    /// 모든 후보가 실패했을 때만 진단용으로 채워집니다. 같은 버퍼와 같은
    /// 기준 시각에 대해 결과는 결정적입니다.
    pub fn parse(&self, raw: Bytes) -> (SyslogMessage, Option<MultiParseError>) {
        let now = self.clock.now();
        let mut causes: Vec<(SyslogFormat, ParseError)> = Vec::new();

        for format in &self.formats {
            let attempt = match format {
                SyslogFormat::Rfc5424 => rfc5424::scan(&raw, now).map(SyslogMessage::Rfc5424),
                SyslogFormat::Rfc3164 => rfc3164::scan(&raw, now).map(SyslogMessage::Rfc3164),
            };
            match attempt {
                Ok(message) => return (message, None),
                Err(cause) => {
                    debug!(candidate = %format, %cause, "format scanner rejected record");
                    causes.push((*format, cause));
                }
            }
        }

        let sentinel = SyslogMessage::Unparsable(UnparsableMessage::new(raw, now));
        (sentinel, Some(MultiParseError { causes }))
    }

    /// 바이트 슬라이스만 있는 호출자를 위한 편의 메서드. 슬라이스를 한 번
    /// 복사하여 새 버퍼를 만듭니다.
    pub fn parse_slice(&self, raw: &[u8]) -> (SyslogMessage, Option<MultiParseError>) {
        self.parse(Bytes::copy_from_slice(raw))
    }
}

impl Default for MultiParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::clock::FixedClock;
    use crate::message::{Facility, Severity};

    const RFC3164_MSG: &[u8] =
        b"<94>Jun 06 20:07:15 webtest-mark simlogging[17155]: This is a log.info() message";
    const RFC5424_MSG: &[u8] = b"<94>1 2014-06-06T20:07:15.000000+00:00 webtest-mark simlogging - ID47 [exampleSDID@32473 iut=\"9\"] This is a log.info() message in a fancy format";

    fn fixed_parser() -> MultiParser {
        MultiParser::with_clock(FixedClock(
            Utc.with_ymd_and_hms(2015, 6, 6, 0, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn default_order_is_rfc5424_first() {
        let parser = MultiParser::new();
        assert_eq!(
            parser.formats(),
            &[SyslogFormat::Rfc5424, SyslogFormat::Rfc3164]
        );
    }

    #[test]
    fn parse_rfc3164_record() {
        let (msg, err) = fixed_parser().parse(Bytes::from_static(RFC3164_MSG));
        assert!(err.is_none());
        assert_eq!(msg.format(), Some(SyslogFormat::Rfc3164));
        assert_eq!(
            msg.timestamp(),
            Utc.with_ymd_and_hms(2015, 6, 6, 20, 7, 15).unwrap()
        );
        assert_eq!(msg.hostname(), "webtest-mark");
        assert_eq!(msg.process(), "simlogging");
        assert_eq!(msg.pid(), "17155");
        assert_eq!(msg.facility(), Facility::Ftp);
        assert_eq!(msg.severity(), Severity::Info);
        assert_eq!(msg.body(), "This is a log.info() message");
        assert_eq!(msg.raw().as_ref(), RFC3164_MSG);
    }

    #[test]
    fn parse_rfc5424_record() {
        let (msg, err) = fixed_parser().parse(Bytes::from_static(RFC5424_MSG));
        assert!(err.is_none());
        assert_eq!(msg.format(), Some(SyslogFormat::Rfc5424));
        assert_eq!(
            msg.timestamp(),
            Utc.with_ymd_and_hms(2014, 6, 6, 20, 7, 15).unwrap()
        );
        assert_eq!(msg.hostname(), "webtest-mark");
        assert_eq!(msg.process(), "simlogging");
        assert_eq!(msg.pid(), "");
        assert_eq!(msg.msg_id(), Some("ID47"));
        assert_eq!(msg.version(), Some(1));
        assert_eq!(
            msg.body(),
            "This is a log.info() message in a fancy format"
        );
        assert_eq!(msg.raw().as_ref(), RFC5424_MSG);
    }

    #[test]
    fn unrecognized_record_yields_sentinel_with_causes() {
        let now = Utc.with_ymd_and_hms(2015, 6, 6, 0, 0, 0).unwrap();
        let parser = MultiParser::with_clock(FixedClock(now));
        let (msg, err) = parser.parse(Bytes::from_static(b"FOO BAR BAZ"));

        assert!(msg.is_unparsable());
        assert_eq!(msg.facility().code(), -1);
        assert_eq!(msg.severity().code(), -1);
        assert_eq!(msg.hostname(), "");
        assert_eq!(msg.body(), "");
        assert_eq!(msg.timestamp(), now);
        assert_eq!(msg.raw().as_ref(), b"FOO BAR BAZ");

        let err = err.unwrap();
        assert_eq!(err.causes.len(), 2);
        assert_eq!(err.causes[0].0, SyslogFormat::Rfc5424);
        assert_eq!(err.causes[1].0, SyslogFormat::Rfc3164);
    }

    #[test]
    fn empty_buffer_yields_sentinel() {
        let (msg, err) = fixed_parser().parse(Bytes::new());
        assert!(msg.is_unparsable());
        assert!(err.is_some());
    }

    #[test]
    fn restricted_order_skips_other_formats() {
        let parser = fixed_parser().with_format_order(vec![SyslogFormat::Rfc3164]);
        let (msg, err) = parser.parse(Bytes::from_static(RFC5424_MSG));
        assert!(msg.is_unparsable());
        let err = err.unwrap();
        assert_eq!(err.causes.len(), 1);
        assert_eq!(err.causes[0].0, SyslogFormat::Rfc3164);
    }

    #[test]
    fn repeated_parse_is_deterministic() {
        let parser = fixed_parser();
        let raw = Bytes::from_static(RFC3164_MSG);
        let (first, _) = parser.parse(raw.clone());
        let (second, _) = parser.parse(raw);
        assert_eq!(first, second);

        // 센티널 타임스탬프도 고정 시계에서는 동일하다
        let (bad_first, _) = parser.parse(Bytes::from_static(b"FOO BAR BAZ"));
        let (bad_second, _) = parser.parse(Bytes::from_static(b"FOO BAR BAZ"));
        assert_eq!(bad_first, bad_second);
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MultiParser>();
    }

    #[test]
    fn parse_slice_copies_input() {
        let (msg, err) = fixed_parser().parse_slice(RFC3164_MSG);
        assert!(err.is_none());
        assert_eq!(msg.raw().as_ref(), RFC3164_MSG);
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn parse_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
                let parser = fixed_parser();
                let (msg, _) = parser.parse_slice(&bytes);
                // 어떤 입력이든 메시지는 생성되고 원본은 보존된다
                prop_assert_eq!(msg.raw().as_ref(), bytes.as_slice());
            }

            #[test]
            fn valid_priority_range_parses(pri in 0u8..=191) {
                let parser = fixed_parser();
                let raw = format!("<{pri}>1 2024-01-15T12:00:00Z host app - - - msg");
                let (msg, err) = parser.parse_slice(raw.as_bytes());
                prop_assert!(err.is_none());
                prop_assert_eq!(msg.facility().code(), i32::from(pri / 8));
                prop_assert_eq!(msg.severity().code(), i32::from(pri % 8));
            }
        }
    }
}
