//! Mapping between [`Temporal`] values and the chrono date-time types.
//!
//! Area/location zones resolve their long form through the IANA database
//! embedded in chrono-tz; this is the only place the crate touches a zone
//! database. Latitude/longitude zones have no chrono counterpart and refuse
//! to convert.

use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

use crate::{Error, Result, Temporal, Timezone};

impl Temporal {
    /// Converts a date value to a [`NaiveDate`].
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        let Self::Date { year, month, day } = self else {
            return Err(Error::field("kind", "value is not a date"));
        };
        naive_date(*year, *month, *day)
    }

    /// Converts a time value to a [`NaiveTime`].
    ///
    /// A leap second maps to chrono's representation: second 59 with the
    /// nanosecond field pushed past one billion.
    pub fn to_naive_time(&self) -> Result<NaiveTime> {
        let Self::Time {
            hour,
            minute,
            second,
            nanosecond,
            ..
        } = self
        else {
            return Err(Error::field("kind", "value is not a time of day"));
        };
        naive_time(*hour, *minute, *second, *nanosecond)
    }

    /// Converts a timestamp to a [`DateTime<FixedOffset>`], resolving the
    /// attached zone.
    ///
    /// Fails with [`Error::UnsupportedZone`] for latitude/longitude zones,
    /// and with [`Error::InvalidField`] when the area/location long form is
    /// not in the IANA database or the local fields do not exist in that
    /// zone (a DST gap).
    pub fn to_fixed_offset(&self) -> Result<DateTime<FixedOffset>> {
        let Self::Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            zone,
        } = self
        else {
            return Err(Error::field("kind", "value is not a timestamp"));
        };
        let naive = naive_date(*year, *month, *day)?
            .and_time(naive_time(*hour, *minute, *second, *nanosecond)?);
        match zone {
            Timezone::Utc => Ok(Utc.from_utc_datetime(&naive).fixed_offset()),
            Timezone::UtcOffset { minutes } => {
                let offset = FixedOffset::east_opt(i32::from(*minutes) * 60)
                    .ok_or_else(|| Error::out_of_range("utc offset", i64::from(*minutes), -1439, 1439))?;
                resolve_local(offset.from_local_datetime(&naive))
            }
            Timezone::AreaLocation { long, .. } => {
                let tz: Tz = long
                    .parse()
                    .map_err(|_| Error::field("area/location name", format!("{long} is not an IANA zone")))?;
                resolve_local(tz.from_local_datetime(&naive))
            }
            Timezone::Local => resolve_local(Local.from_local_datetime(&naive)),
            Timezone::LatitudeLongitude { .. } => {
                Err(Error::UnsupportedZone("latitude/longitude"))
            }
        }
    }

    /// Builds a date value from a [`NaiveDate`].
    pub fn from_naive_date(date: &NaiveDate) -> Result<Self> {
        Self::date(date.year(), date.month() as u8, date.day() as u8)
    }

    /// Builds a UTC time value from a [`NaiveTime`].
    pub fn from_naive_time(time: &NaiveTime) -> Result<Self> {
        let (second, nanosecond) = join_second(time.second(), time.nanosecond());
        Self::time(
            time.hour() as u8,
            time.minute() as u8,
            second,
            nanosecond,
            Timezone::Utc,
        )
    }

    /// Builds a UTC timestamp from a [`DateTime<Utc>`].
    pub fn from_utc(instant: &DateTime<Utc>) -> Result<Self> {
        from_fields(instant, Timezone::Utc)
    }

    /// Builds a fixed-offset timestamp from a [`DateTime<FixedOffset>`].
    ///
    /// An offset of zero collapses to UTC.
    pub fn from_fixed_offset(instant: &DateTime<FixedOffset>) -> Result<Self> {
        let seconds = instant.offset().local_minus_utc();
        if seconds % 60 != 0 {
            return Err(Error::field("utc offset", "not a whole number of minutes"));
        }
        let minutes = i16::try_from(seconds / 60)
            .map_err(|_| Error::out_of_range("utc offset", i64::from(seconds / 60), -1439, 1439))?;
        from_fields(instant, Timezone::utc_offset(minutes)?)
    }

    /// Builds an area/location timestamp from a zone-database time.
    ///
    /// The zone name runs through the usual alias collapse, so a time in
    /// `Etc/UTC` comes back as a plain UTC timestamp.
    pub fn from_zoned(instant: &DateTime<Tz>) -> Result<Self> {
        from_fields(instant, Timezone::area_location(instant.timezone().name())?)
    }

    /// Builds a timestamp in the host's local zone from a [`DateTime<Local>`].
    pub fn from_local(instant: &DateTime<Local>) -> Result<Self> {
        from_fields(instant, Timezone::Local)
    }
}

fn from_fields<Z: TimeZone>(instant: &DateTime<Z>, zone: Timezone) -> Result<Temporal> {
    let (second, nanosecond) = join_second(instant.second(), instant.nanosecond());
    Temporal::timestamp(
        instant.year(),
        instant.month() as u8,
        instant.day() as u8,
        instant.hour() as u8,
        instant.minute() as u8,
        second,
        nanosecond,
        zone,
    )
}

fn naive_date(year: i32, month: u8, day: u8) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day)).ok_or_else(|| {
        Error::field(
            "date",
            format!("{year}-{month:02}-{day:02} is not a calendar date"),
        )
    })
}

fn naive_time(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<NaiveTime> {
    // chrono spells a leap second as second 59 with nanoseconds past 10^9.
    let (second, nanosecond) = if second == 60 {
        (59, nanosecond + 1_000_000_000)
    } else {
        (u32::from(second), nanosecond)
    };
    NaiveTime::from_hms_nano_opt(u32::from(hour), u32::from(minute), second, nanosecond)
        .ok_or_else(|| Error::field("time", "fields do not form a valid time of day"))
}

/// Inverse of the leap-second spelling in [`naive_time`].
fn join_second(second: u32, nanosecond: u32) -> (u8, u32) {
    if nanosecond >= 1_000_000_000 {
        (second as u8 + 1, nanosecond - 1_000_000_000)
    } else {
        (second as u8, nanosecond)
    }
}

fn resolve_local<Z: TimeZone>(result: LocalResult<DateTime<Z>>) -> Result<DateTime<FixedOffset>> {
    // Bei DST-Überlappung nehmen wir die frühere Auslegung, wie es auch die
    // Host-Bibliotheken tun.
    result
        .earliest()
        .map(|instant| instant.fixed_offset())
        .ok_or_else(|| Error::field("local time", "does not exist in the target zone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_round_trip() {
        let date = Temporal::date(2020, 8, 30).unwrap();
        let naive = date.to_naive_date().unwrap();
        assert_eq!(naive, NaiveDate::from_ymd_opt(2020, 8, 30).unwrap());
        assert_eq!(Temporal::from_naive_date(&naive).unwrap(), date);
    }

    #[test]
    fn bce_date_converts() {
        // chrono years are astronomical, same convention as the codec.
        let date = Temporal::date(-44, 3, 15).unwrap();
        assert_eq!(date.to_naive_date().unwrap().year(), -44);
    }

    #[test]
    fn time_round_trip() {
        let time = Temporal::time(15, 33, 14, 19_577_323, Timezone::Utc).unwrap();
        let naive = time.to_naive_time().unwrap();
        assert_eq!(Temporal::from_naive_time(&naive).unwrap(), time);
    }

    /// Leap seconds survive the chrono spelling in both directions.
    #[test]
    fn leap_second_round_trip() {
        let time = Temporal::time(23, 59, 60, 500_000_000, Timezone::Utc).unwrap();
        let naive = time.to_naive_time().unwrap();
        assert_eq!(naive.second(), 59);
        assert_eq!(naive.nanosecond(), 1_500_000_000);
        assert_eq!(Temporal::from_naive_time(&naive).unwrap(), time);
    }

    #[test]
    fn utc_timestamp_converts() {
        let ts = Temporal::timestamp(2020, 8, 30, 15, 33, 14, 0, Timezone::Utc).unwrap();
        let fixed = ts.to_fixed_offset().unwrap();
        assert_eq!(fixed.offset().local_minus_utc(), 0);
        assert_eq!(fixed.hour(), 15);
        assert_eq!(Temporal::from_utc(&fixed.with_timezone(&Utc)).unwrap(), ts);
    }

    #[test]
    fn area_location_resolves_through_database() {
        let ts = Temporal::timestamp(
            2020,
            8,
            30,
            15,
            33,
            14,
            0,
            Timezone::area_location("Asia/Tokyo").unwrap(),
        )
        .unwrap();
        let fixed = ts.to_fixed_offset().unwrap();
        // Tokyo is UTC+9 year-round.
        assert_eq!(fixed.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(fixed.hour(), 15);
    }

    #[test]
    fn zoned_round_trip() {
        let zoned = chrono_tz::Asia::Tokyo
            .with_ymd_and_hms(2020, 8, 30, 15, 33, 14)
            .unwrap();
        let ts = Temporal::from_zoned(&zoned).unwrap();
        assert_eq!(
            ts.zone(),
            Some(&Timezone::area_location("Asia/Tokyo").unwrap())
        );
        assert_eq!(ts.hour(), Some(15));
    }

    /// A zone-database UTC alias comes back as plain UTC.
    #[test]
    fn zoned_utc_alias_collapses() {
        let zoned = chrono_tz::Etc::UTC
            .with_ymd_and_hms(2020, 8, 30, 15, 33, 14)
            .unwrap();
        let ts = Temporal::from_zoned(&zoned).unwrap();
        assert_eq!(ts.zone(), Some(&Timezone::Utc));
    }

    #[test]
    fn utc_offset_maps_to_fixed_offset() {
        let ts = Temporal::timestamp(
            2020,
            8,
            30,
            15,
            33,
            14,
            0,
            Timezone::utc_offset(330).unwrap(),
        )
        .unwrap();
        let fixed = ts.to_fixed_offset().unwrap();
        assert_eq!(fixed.offset().local_minus_utc(), 330 * 60);
        assert_eq!(Temporal::from_fixed_offset(&fixed).unwrap(), ts);
    }

    #[test]
    fn lat_long_is_unsupported() {
        let ts = Temporal::timestamp(
            2020,
            8,
            30,
            15,
            33,
            14,
            0,
            Timezone::lat_long(5994, 1071).unwrap(),
        )
        .unwrap();
        assert_eq!(
            ts.to_fixed_offset().unwrap_err(),
            Error::UnsupportedZone("latitude/longitude")
        );
    }

    #[test]
    fn unknown_area_location_fails_lookup() {
        let ts = Temporal::timestamp(
            2020,
            8,
            30,
            15,
            33,
            14,
            0,
            Timezone::area_location("Mars/Olympus_Mons").unwrap(),
        )
        .unwrap();
        assert!(matches!(
            ts.to_fixed_offset().unwrap_err(),
            Error::InvalidField { field: "area/location name", .. }
        ));
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let date = Temporal::date(2020, 8, 30).unwrap();
        assert!(date.to_naive_time().is_err());
        assert!(date.to_fixed_offset().is_err());
        let time = Temporal::time(1, 2, 3, 0, Timezone::Utc).unwrap();
        assert!(time.to_naive_date().is_err());
    }

    /// The zero date has no calendar representation.
    #[test]
    fn zero_date_does_not_convert() {
        assert!(Temporal::zero_date().to_naive_date().is_err());
    }
}
