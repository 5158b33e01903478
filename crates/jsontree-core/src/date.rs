//! Date strategy adapter.
//!
//! `chrono::DateTime<Utc>` does not describe its own fields like other
//! types; instead its [`Decode`]/[`Encode`] impls hand control to the
//! session's [`DateDecodingStrategy`] / [`DateEncodingStrategy`].

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::decoder::{Decode, Decoder};
use crate::encoder::{Encode, Encoder};
use crate::error::Result;
use crate::strategy::{DateDecodingStrategy, DateEncodingStrategy};
use crate::value::Value;

impl Decoder<'_> {
    /// Read the node as a date using the configured strategy.
    ///
    /// A value substituted by a recovering wrong-structure strategy becomes
    /// the Unix epoch. Numbers outside chrono's range and unparseable text
    /// fail with `DataCorrupted`.
    pub fn decode_date(&self) -> Result<DateTime<Utc>> {
        match &self.options().date {
            DateDecodingStrategy::DeferredToDate | DateDecodingStrategy::Iso8601 => {
                self.decode_date_text(|text| {
                    DateTime::parse_from_rfc3339(text)
                        .ok()
                        .map(|date| date.with_timezone(&Utc))
                })
            }
            DateDecodingStrategy::SecondsSince1970 => match self.coerce::<f64>()? {
                None => Ok(DateTime::<Utc>::UNIX_EPOCH),
                Some(seconds) => from_seconds(seconds).ok_or_else(|| {
                    self.data_corrupted(format!("{seconds} seconds is out of the date range"))
                }),
            },
            DateDecodingStrategy::MillisecondsSince1970 => match self.coerce::<f64>()? {
                None => Ok(DateTime::<Utc>::UNIX_EPOCH),
                Some(millis) => from_millis(millis).ok_or_else(|| {
                    self.data_corrupted(format!("{millis} milliseconds is out of the date range"))
                }),
            },
            DateDecodingStrategy::Formatted(pattern) => {
                self.decode_date_text(|text| parse_formatted(text, pattern))
            }
            DateDecodingStrategy::Custom(decode) => decode(self),
        }
    }

    fn decode_date_text(&self, parse: impl Fn(&str) -> Option<DateTime<Utc>>) -> Result<DateTime<Utc>> {
        let Some(text) = self.coerce::<String>()? else {
            return Ok(DateTime::<Utc>::UNIX_EPOCH);
        };
        parse(&text).ok_or_else(|| self.data_corrupted(format!("can't read date: {text}")))
    }
}

impl Encoder<'_> {
    /// Write `date` using the configured strategy.
    pub fn encode_date(&mut self, date: &DateTime<Utc>) -> Result<()> {
        match &self.options().date {
            DateEncodingStrategy::DeferredToDate => {
                self.write(Value::String(date.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
            }
            DateEncodingStrategy::SecondsSince1970 => {
                let seconds = if date.timestamp_subsec_nanos() == 0 {
                    Value::from(date.timestamp())
                } else {
                    Value::from(date.timestamp() as f64 + f64::from(date.timestamp_subsec_nanos()) / 1e9)
                };
                self.write(seconds)
            }
            DateEncodingStrategy::MillisecondsSince1970 => {
                self.write(Value::from(date.timestamp_millis()))
            }
            DateEncodingStrategy::Iso8601 => {
                self.write(Value::String(date.to_rfc3339_opts(SecondsFormat::Secs, true)))
            }
            DateEncodingStrategy::Formatted(pattern) => {
                let mut text = String::new();
                write!(text, "{}", date.format(pattern))
                    .map_err(|_| self.error(format!("invalid date format pattern: {pattern}")))?;
                self.write(Value::String(text))
            }
            DateEncodingStrategy::Custom(encode) => encode(date, self),
        }
    }
}

impl Decode for DateTime<Utc> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.decode_date()
    }
}

impl Encode for DateTime<Utc> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.encode_date(self)
    }
}

fn from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds.abs() > 1e14 {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if millis.is_finite() && millis.fract() == 0.0 && millis.abs() < 1e17 {
        return DateTime::from_timestamp_millis(millis as i64);
    }
    from_seconds(millis / 1000.0)
}

/// Try the pattern as an offset-carrying date-time, then as a naive
/// date-time in UTC, then as a date at midnight UTC.
fn parse_formatted(text: &str, pattern: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_str(text, pattern) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
