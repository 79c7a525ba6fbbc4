use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub fn from(dt: OffsetDateTime) -> Self {
        Self(dt.to_offset(UtcOffset::UTC))
    }

    /// Returns the inner UTC `OffsetDateTime` without consuming the wrapper.
    pub fn as_inner(&self) -> OffsetDateTime {
        self.0
    }

    /// RFC 3339 rendering used on the wire. Empty if the instant is unrepresentable.
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_from_with_non_utc_offset_when_called_should_store_utc_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).expect("valid offset");
        let dt = OffsetDateTime::now_utc().to_offset(offset);
        let result = Timestamp::from(dt);
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
        assert_eq!(result.as_inner().unix_timestamp(), dt.unix_timestamp());
    }

    #[test]
    fn given_known_instant_when_to_rfc3339_should_render_utc() {
        let dt = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(Timestamp::from(dt).to_rfc3339(), "1970-01-01T00:00:00Z");
    }
}
