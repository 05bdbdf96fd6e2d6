//! 활동 시간대/주기 계산.
//!
//! 하루 중 폴링이 허용되는 시간대(자정 넘김 포함) 판정과
//! 드리프트 보정 수면 시간 계산. 전부 순수 함수 — 타임존 변환은
//! 호출자(스케줄러)가 chrono-tz로 수행한 뒤 자정 기준 초를 넘긴다.

use std::time::Duration;

use crate::error::CoreError;

/// 하루의 초 수. `24:00` 파싱 결과이자 자정 넘김 계산의 모듈러 기준.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// `HH:MM` 문자열을 자정 기준 초로 변환한다.
///
/// `"24:00"`은 하루의 끝 센티널로 `86400`을 반환한다.
/// 콜론으로 구분된 두 정수 필드가 아니면 [`CoreError::InvalidTimeFormat`],
/// 시 0-23 / 분 0-59 범위를 벗어나면 [`CoreError::TimeOutOfRange`].
pub fn parse_time_of_day(value: &str) -> Result<u32, CoreError> {
    let value = value.trim();

    let (hour_str, minute_str) = value
        .split_once(':')
        .ok_or_else(|| CoreError::InvalidTimeFormat(format!("HH:MM 형식이 아님: {value}")))?;

    let hour: i64 = hour_str
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidTimeFormat(format!("시(hour)가 정수가 아님: {value}")))?;
    let minute: i64 = minute_str
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidTimeFormat(format!("분(minute)이 정수가 아님: {value}")))?;

    if hour == 24 && minute == 0 {
        return Ok(SECONDS_PER_DAY);
    }
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return Err(CoreError::TimeOutOfRange(format!(
            "시 0-24, 분 0-59 범위여야 함: {value}"
        )));
    }

    Ok((hour * 3600 + minute * 60) as u32)
}

/// 일일 활동 시간대.
///
/// `start`/`end`는 자정 기준 초(`0..=86400`).
/// `start <= end`이면 같은 날 `[start, end)` 구간,
/// `start > end`이면 자정을 넘겨 `[start, 86400) ∪ [0, end)` 구간.
/// `start == end`(항상/절대 활성이 모호)는 생성 시점에 거부한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    start: u32,
    end: u32,
}

impl ActiveWindow {
    /// 새 활동 시간대 생성. 범위 밖이거나 `start == end`면 설정 에러.
    pub fn new(start: u32, end: u32) -> Result<Self, CoreError> {
        if start > SECONDS_PER_DAY || end > SECONDS_PER_DAY {
            return Err(CoreError::Config(format!(
                "활동 시간대 경계는 0-86400초 범위여야 함: start={start}, end={end}"
            )));
        }
        if start == end {
            return Err(CoreError::Config(
                "활동 시간대 시작과 끝이 같을 수 없음".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// 시작 경계 (자정 기준 초)
    pub fn start(&self) -> u32 {
        self.start
    }

    /// 끝 경계 (자정 기준 초)
    pub fn end(&self) -> u32 {
        self.end
    }

    /// 현재 초(자정 기준, `0..86400`)가 활동 시간대 안인지 판정한다.
    pub fn is_active(&self, now: u32) -> bool {
        if self.start <= self.end {
            self.start <= now && now < self.end
        } else {
            // 자정 넘김 구간
            now >= self.start || now < self.end
        }
    }

    /// 다음 활동 시간대 시작까지 남은 초. 이미 활성이면 0.
    ///
    /// 같은 날/자정 넘김 모두 동일 분기: `now < start`면 오늘 열리고,
    /// 아니면 내일 `start`에 열린다. 결과는 항상 `[0, 86400)`.
    pub fn seconds_until_open(&self, now: u32) -> u32 {
        if self.is_active(now) {
            return 0;
        }
        if now < self.start {
            self.start - now
        } else {
            SECONDS_PER_DAY - now + self.start
        }
    }
}

/// 드리프트 보정 수면 시간.
///
/// `cadence - elapsed`를 0으로 클램프: 주기를 초과한 사이클은
/// 다음 사이클을 즉시 시작하고, 음수 수면으로 "따라잡기"는 하지 않는다.
pub fn next_sleep(elapsed: Duration, cadence: Duration) -> Duration {
    cadence.saturating_sub(elapsed)
}

/// 활동 시간대 개시 대기 시간을 남은 실행 예산으로 클램프한다.
///
/// 남은 예산이 소진되었으면 `None` — 루프는 수면 대신 종료한다.
pub fn window_wait(seconds_until_open: u32, remaining_run: Duration) -> Option<Duration> {
    if remaining_run.is_zero() {
        return None;
    }
    Some(remaining_run.min(Duration::from_secs(u64::from(seconds_until_open))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_regular_times() {
        assert_eq!(parse_time_of_day("05:00").unwrap(), 18_000);
        assert_eq!(parse_time_of_day("00:00").unwrap(), 0);
        assert_eq!(parse_time_of_day("23:59").unwrap(), 86_340);
        assert_eq!(parse_time_of_day(" 12:30 ").unwrap(), 45_000);
    }

    #[test]
    fn parse_end_of_day_sentinel() {
        assert_eq!(parse_time_of_day("24:00").unwrap(), SECONDS_PER_DAY);
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(matches!(
            parse_time_of_day("25:00"),
            Err(CoreError::TimeOutOfRange(_))
        ));
        assert!(matches!(
            parse_time_of_day("24:01"),
            Err(CoreError::TimeOutOfRange(_))
        ));
        assert!(matches!(
            parse_time_of_day("12:60"),
            Err(CoreError::TimeOutOfRange(_))
        ));
        assert!(matches!(
            parse_time_of_day("-1:30"),
            Err(CoreError::TimeOutOfRange(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_format() {
        assert!(matches!(
            parse_time_of_day("5"),
            Err(CoreError::InvalidTimeFormat(_))
        ));
        assert!(matches!(
            parse_time_of_day("1:2:3"),
            Err(CoreError::InvalidTimeFormat(_))
        ));
        assert!(matches!(
            parse_time_of_day("ab:cd"),
            Err(CoreError::InvalidTimeFormat(_))
        ));
        assert!(matches!(
            parse_time_of_day(""),
            Err(CoreError::InvalidTimeFormat(_))
        ));
    }

    #[test]
    fn window_rejects_equal_bounds() {
        assert!(matches!(
            ActiveWindow::new(3600, 3600),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            ActiveWindow::new(0, 90_000),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn same_day_window() {
        let w = ActiveWindow::new(18_000, SECONDS_PER_DAY).unwrap(); // 05:00-24:00
        assert!(!w.is_active(0));
        assert!(!w.is_active(17_999));
        assert!(w.is_active(18_000));
        assert!(w.is_active(86_399));
    }

    #[test]
    fn wrap_window() {
        // [05:00, 24:00) 이 자정 넘김 표현(end=0)으로 주어진 경우
        let w = ActiveWindow::new(5 * 3600, 0).unwrap();
        assert!(w.is_active(23 * 3600));
        assert!(w.is_active(5 * 3600));
        assert!(!w.is_active(3_000));
        assert!(!w.is_active(0));

        // 22:00-06:00 야간 시간대
        let night = ActiveWindow::new(22 * 3600, 6 * 3600).unwrap();
        assert!(night.is_active(23 * 3600));
        assert!(night.is_active(2 * 3600));
        assert!(!night.is_active(12 * 3600));
    }

    #[test]
    fn until_open_zero_iff_active() {
        let windows = [
            ActiveWindow::new(18_000, SECONDS_PER_DAY).unwrap(),
            ActiveWindow::new(5 * 3600, 0).unwrap(),
            ActiveWindow::new(22 * 3600, 6 * 3600).unwrap(),
        ];
        for w in windows {
            for now in (0..SECONDS_PER_DAY).step_by(61) {
                let wait = w.seconds_until_open(now);
                assert_eq!(wait == 0, w.is_active(now), "now={now}, window={w:?}");
                assert!(wait < SECONDS_PER_DAY);
                if wait > 0 {
                    // 대기 후에는 정확히 시작 경계에 도달
                    assert_eq!((now + wait) % SECONDS_PER_DAY, w.start() % SECONDS_PER_DAY);
                }
            }
        }
    }

    #[test]
    fn until_open_before_start_same_day() {
        let w = ActiveWindow::new(18_000, SECONDS_PER_DAY).unwrap();
        assert_eq!(w.seconds_until_open(10_000), 8_000);
    }

    #[test]
    fn until_open_after_close_opens_tomorrow() {
        let w = ActiveWindow::new(18_000, 20_000).unwrap();
        // 20:00 지난 뒤에는 내일 05:00까지 대기
        assert_eq!(
            w.seconds_until_open(30_000),
            SECONDS_PER_DAY - 30_000 + 18_000
        );
    }

    #[test]
    fn next_sleep_compensates_elapsed() {
        let cadence = Duration::from_secs(300);
        assert_eq!(
            next_sleep(Duration::from_secs(40), cadence),
            Duration::from_secs(260)
        );
        assert_eq!(next_sleep(Duration::ZERO, cadence), cadence);
    }

    #[test]
    fn next_sleep_clamps_overrun_to_zero() {
        let cadence = Duration::from_secs(300);
        assert_eq!(next_sleep(Duration::from_secs(400), cadence), Duration::ZERO);
    }

    #[test]
    fn window_wait_clamped_by_run_budget() {
        assert_eq!(
            window_wait(7_200, Duration::from_secs(600)),
            Some(Duration::from_secs(600))
        );
        assert_eq!(
            window_wait(120, Duration::from_secs(600)),
            Some(Duration::from_secs(120))
        );
        assert_eq!(window_wait(7_200, Duration::ZERO), None);
    }

    /// 드리프트 한계: 사이클 작업이 0~cadence/2 사이에서 변동해도
    /// 누적 시작 시각이 이상적 일정에서 한 주기 이상 벗어나지 않는다.
    #[test]
    fn drift_stays_bounded_over_100_cycles() {
        let cadence = Duration::from_secs(300);
        let mut clock = Duration::ZERO;

        // 결정적 LCG — 테스트 재현성 보장
        let mut seed: u64 = 0x5eed_cafe;
        let mut next_work = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            Duration::from_millis(seed % (cadence.as_millis() as u64 / 2))
        };

        for n in 0..100u32 {
            let ideal = cadence * n;
            let drift = clock.checked_sub(ideal).unwrap_or_else(|| ideal - clock);
            assert!(drift < cadence, "사이클 {n}에서 드리프트 {drift:?} 초과");

            let work = next_work();
            clock += work;
            clock += next_sleep(work, cadence);
        }
    }
}
