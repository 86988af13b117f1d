use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::models::{PricePoint, Series};

/// Turn a decoded series into one point per hour of `reference_date`
///
/// Index `i` in the series becomes hour `i`, in input order.
pub fn build_points<Tz: TimeZone>(
    series: &Series,
    reference_date: NaiveDate,
    area: &str,
    tz: &Tz,
) -> Vec<PricePoint> {
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let hour = i as u32;
            PricePoint {
                timestamp: local_hour(reference_date, hour, tz),
                area: area.to_string(),
                hour,
                price,
            }
        })
        .collect()
}

/// Same as `build_points` in the machine's local time zone
pub fn build_points_local(series: &Series, reference_date: NaiveDate, area: &str) -> Vec<PricePoint> {
    build_points(series, reference_date, area, &Local)
}

/// Start of `hour` on `date` in `tz`
///
/// Ambiguous wall times (clocks turned back) resolve to the earlier instant.
/// Skipped wall times (clocks turned forward) move one hour ahead.
/// Hours past 23 roll over into the following days.
pub fn local_hour<Tz: TimeZone>(date: NaiveDate, hour: u32, tz: &Tz) -> DateTime<FixedOffset> {
    let naive = NaiveDateTime::new(date, NaiveTime::MIN) + Duration::hours(i64::from(hour));

    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        .fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    fn series(values: &[f64]) -> Series {
        Series {
            label: "SE3".to_string(),
            values: values.to_vec(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_three_hour_scenario() {
        let points = build_points(&series(&[1.23, 0.98, 1.50]), date(2024, 5, 1), "SE3", &Utc);

        let expected = [
            ("2024-05-01T00:00:00+00:00", 0, 1.23),
            ("2024-05-01T01:00:00+00:00", 1, 0.98),
            ("2024-05-01T02:00:00+00:00", 2, 1.50),
        ];
        assert_eq!(points.len(), expected.len());
        for (point, (ts, hour, price)) in points.iter().zip(expected) {
            assert_eq!(point.timestamp.to_rfc3339(), ts);
            assert_eq!(point.hour, hour);
            assert_eq!(point.price, price);
            assert_eq!(point.area, "SE3");
        }
    }

    #[test]
    fn test_one_point_per_hour_in_order() {
        for n in [0usize, 1, 12, 24] {
            let values: Vec<f64> = (0..n).map(|i| i as f64 / 10.0).collect();
            let points = build_points(&series(&values), date(2024, 1, 15), "SE3", &Utc);

            assert_eq!(points.len(), n);
            for (i, point) in points.iter().enumerate() {
                assert_eq!(point.hour as usize, i);
                assert_eq!(point.price, values[i]);
            }
            assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        }
    }

    #[test]
    fn test_timestamps_on_the_hour_in_zone() {
        let stockholm_summer = FixedOffset::east_opt(2 * 3600).expect("offset");
        let points = build_points(&series(&[0.5; 24]), date(2024, 5, 1), "SE3", &stockholm_summer);

        let first = &points[0];
        assert_eq!(first.timestamp.to_rfc3339(), "2024-05-01T00:00:00+02:00");
        assert_eq!(first.timestamp.with_timezone(&Utc).to_rfc3339(), "2024-04-30T22:00:00+00:00");

        for point in &points {
            assert_eq!(point.timestamp.hour(), point.hour);
            assert_eq!(point.timestamp.minute(), 0);
            assert_eq!(point.timestamp.second(), 0);
            assert_eq!(point.timestamp.date_naive(), date(2024, 5, 1));
        }
    }

    #[test]
    fn test_area_tag_is_applied() {
        let points = build_points(&series(&[1.0, 2.0]), date(2024, 5, 1), "SE4", &Utc);
        assert!(points.iter().all(|p| p.area == "SE4"));
    }

    #[test]
    fn test_hours_past_midnight_roll_over() {
        let ts = local_hour(date(2024, 5, 1), 25, &Utc);
        assert_eq!(ts.to_rfc3339(), "2024-05-02T01:00:00+00:00");
    }
}
