//! 距下一轮（本地零点）的倒计时

use chrono::{DateTime, NaiveDateTime, TimeZone};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// 距下一个本地零点的秒数
///
/// `next_midnight` 为次日 00:00:00.000（所在时区的本地时间），
/// 结果为 `round((next_midnight - now) / 1000)`，并限制在 `[0, 86399]`。
/// 夏令时导致一天超过 24 小时、或恰好在 00:00:00.000 调用时都会触到上限。
pub fn seconds_until_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let Some(midnight) = next_local_midnight(now) else {
        return 0;
    };

    let tz = now.timezone();
    let millis = match tz.from_local_datetime(&midnight).earliest() {
        Some(target) => target.signed_duration_since(now.clone()).num_milliseconds(),
        // 零点落在夏令时跳过的区间里，退回按本地钟面时间计算
        None => midnight
            .signed_duration_since(now.naive_local())
            .num_milliseconds(),
    };

    round_millis(millis).clamp(0, SECONDS_PER_DAY - 1)
}

/// 格式化为 `HH:MM:SS`
pub fn format_hms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

fn next_local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<NaiveDateTime> {
    now.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)
}

/// 毫秒转秒，四舍五入（.5 向上）
fn round_millis(millis: i64) -> i64 {
    (millis + 500).div_euclid(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Local, NaiveDate, Utc};

    fn utc(h: u32, m: u32, s: u32, ms: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, ms))
            .expect("valid time");
        Utc.from_utc_datetime(&naive)
    }

    #[test]
    fn test_noon_is_half_day() {
        assert_eq!(seconds_until_midnight(&utc(12, 0, 0, 0)), 43_200);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(seconds_until_midnight(&utc(23, 59, 59, 600)), 0);
        assert_eq!(seconds_until_midnight(&utc(23, 59, 59, 400)), 1);
        assert_eq!(seconds_until_midnight(&utc(23, 59, 58, 500)), 2);
    }

    #[test]
    fn test_exact_midnight_clamped() {
        assert_eq!(seconds_until_midnight(&utc(0, 0, 0, 0)), SECONDS_PER_DAY - 1);
        assert_eq!(seconds_until_midnight(&utc(0, 0, 0, 400)), SECONDS_PER_DAY - 1);
        assert_eq!(seconds_until_midnight(&utc(0, 0, 1, 0)), SECONDS_PER_DAY - 1);
        assert_eq!(seconds_until_midnight(&utc(0, 0, 2, 0)), SECONDS_PER_DAY - 2);
    }

    #[test]
    fn test_uses_local_calendar_day() {
        // UTC 20:00 在 +08:00 已是次日 04:00，距当地零点还有 20 小时
        let offset = FixedOffset::east_opt(8 * 3600).expect("offset");
        let now = utc(20, 0, 0, 0).with_timezone(&offset);
        assert_eq!(seconds_until_midnight(&now), 20 * 3600);
    }

    #[test]
    fn test_always_within_one_day() {
        let offset = FixedOffset::west_opt(5 * 3600).expect("offset");
        let mut now = utc(0, 0, 0, 0).with_timezone(&offset);
        for _ in 0..(24 * 60) {
            let secs = seconds_until_midnight(&now);
            assert!((0..SECONDS_PER_DAY).contains(&secs), "out of range: {}", secs);
            now += Duration::seconds(59) + Duration::milliseconds(250);
        }
    }

    #[test]
    fn test_local_now_in_range() {
        let secs = seconds_until_midnight(&Local::now());
        assert!((0..SECONDS_PER_DAY).contains(&secs));
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3_725), "01:02:05");
        assert_eq!(format_hms(SECONDS_PER_DAY - 1), "23:59:59");
        assert_eq!(format_hms(-5), "00:00:00");
    }
}
