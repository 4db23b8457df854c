//! 时间工具函数 — 业务时区转换
//!
//! 住宿日期统一使用日历日期 (`NaiveDate`)；
//! "今天" 的判定一律通过酒店业务时区计算。

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 业务时区的当前日期
pub fn today_in_tz(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// 计算住宿晚数 (check_out - check_in)
///
/// 调用方必须先保证 check_out > check_in。
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let d = parse_date("2024-05-10").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());

        assert!(parse_date("10/05/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_nights_between() {
        let check_in = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        assert_eq!(nights_between(check_in, check_out), 2);
    }
}
