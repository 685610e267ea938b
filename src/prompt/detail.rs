//! Bulleted detail block describing a filled template.

use super::dates::{inclusive_days, render_date};
use crate::template::{
    FieldRecord, HolidayWorkFields, LeaveFields, ReportFields, Selection, TripFields,
};

/// Accumulates `- label: value` lines, skipping blank values.
#[derive(Default)]
struct DetailBlock {
    lines: Vec<String>,
}

impl DetailBlock {
    fn field(&mut self, label: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        if value.contains('\n') {
            self.lines.push(format!("- {label}:"));
            self.lines.extend(
                value
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| format!("  {line}")),
            );
        } else {
            self.lines.push(format!("- {label}: {value}"));
        }
        self
    }

    fn date(&mut self, label: &str, value: &str) -> &mut Self {
        if let Some(rendered) = render_date(value) {
            self.lines.push(format!("- {label}: {rendered}"));
        }
        self
    }

    fn date_range(&mut self, start: &str, end: &str) -> &mut Self {
        self.date("시작일", start).date("종료일", end);
        if let Some(days) = inclusive_days(start, end) {
            self.lines.push(format!("- 기간: 총 {days}일"));
        }
        self
    }

    /// One sub-bullet per non-empty line.
    fn list(&mut self, label: &str, value: &str) -> &mut Self {
        let items: Vec<&str> = value
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if !items.is_empty() {
            self.lines.push(format!("- {label}:"));
            self.lines
                .extend(items.into_iter().map(|item| format!("  - {item}")));
        }
        self
    }

    fn finish(&self) -> String {
        self.lines.join("\n")
    }
}

/// Renders the facts the email must convey.
///
/// Free-text selections are passed through verbatim.
pub fn render_details(selection: &Selection) -> String {
    match selection {
        Selection::Template(record) => render_record(record),
        Selection::FreeText(description) => description.clone(),
    }
}

fn render_record(record: &FieldRecord) -> String {
    let mut block = DetailBlock::default();
    match record {
        FieldRecord::AnnualLeave(fields) => leave(&mut block, fields, false),
        FieldRecord::HalfDayLeave(fields) => leave(&mut block, fields, true),
        FieldRecord::BusinessTrip(fields) => trip(&mut block, fields, "출장"),
        FieldRecord::Dispatch(fields) => trip(&mut block, fields, "파견"),
        FieldRecord::WorkReport(fields) | FieldRecord::WeeklyReport(fields) => {
            report(&mut block, fields);
        }
        FieldRecord::HolidayWork(fields) => holiday_work(&mut block, fields),
    }
    block.finish()
}

fn leave(block: &mut DetailBlock, fields: &LeaveFields, half_day: bool) {
    block.date_range(&fields.start_date, &fields.end_date);
    if half_day && let Some(period) = fields.period {
        block.field("반차 구분", period.label());
    }
    block.field("사유", &fields.reason);
}

fn trip(block: &mut DetailBlock, fields: &TripFields, noun: &str) {
    block
        .field(&format!("{noun}지"), &fields.destination)
        .date_range(&fields.start_date, &fields.end_date)
        .field(&format!("{noun} 목적"), &fields.purpose)
        .field("숙박 예정지", &fields.accommodation);
}

fn report(block: &mut DetailBlock, fields: &ReportFields) {
    block
        .date_range(&fields.start_date, &fields.end_date)
        .field("보고 내용", &fields.content)
        .list("관련 링크", &fields.related_links);
}

fn holiday_work(block: &mut DetailBlock, fields: &HolidayWorkFields) {
    block
        .date("근무일", &fields.work_date)
        .field("근무 시간", &fields.work_hours)
        .field("사유", &fields.reason);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::HalfDayPeriod;

    fn leave_fields(start: &str, end: &str) -> LeaveFields {
        LeaveFields {
            start_date: start.to_string(),
            end_date: end.to_string(),
            period: None,
            reason: "개인 사유".to_string(),
        }
    }

    #[test]
    fn test_leave_block_with_inclusive_duration() {
        let record = FieldRecord::AnnualLeave(leave_fields("2024-01-01", "2024-01-03"));
        assert_eq!(
            render_record(&record),
            "- 시작일: 2024년 1월 1일 (월)\n\
             - 종료일: 2024년 1월 3일 (수)\n\
             - 기간: 총 3일\n\
             - 사유: 개인 사유"
        );
    }

    #[test]
    fn test_missing_end_date_omits_duration_line() {
        let record = FieldRecord::AnnualLeave(leave_fields("2024-01-01", ""));
        let block = render_record(&record);
        assert!(!block.contains("기간"));
        assert!(!block.contains("종료일"));
        assert!(!block.contains("NaN"));
    }

    #[test]
    fn test_missing_start_date_omits_duration_line() {
        let record = FieldRecord::AnnualLeave(leave_fields("", "2024-01-03"));
        assert!(!render_record(&record).contains("기간"));
    }

    #[test]
    fn test_half_day_period_only_for_half_day_leave() {
        let mut fields = leave_fields("2024-01-02", "2024-01-02");
        fields.period = Some(HalfDayPeriod::Morning);

        let half = render_record(&FieldRecord::HalfDayLeave(fields.clone()));
        assert!(half.contains("- 반차 구분: 오전 반차"));
        assert!(half.contains("- 기간: 총 1일"));

        let annual = render_record(&FieldRecord::AnnualLeave(fields));
        assert!(!annual.contains("반차"));
    }

    #[test]
    fn test_dispatch_uses_dispatch_labels() {
        let record = FieldRecord::Dispatch(TripFields {
            start_date: "2024-03-04".to_string(),
            end_date: "2024-03-08".to_string(),
            destination: "부산 지사".to_string(),
            purpose: "현장 지원".to_string(),
            accommodation: String::new(),
        });
        let block = render_record(&record);
        assert!(block.starts_with("- 파견지: 부산 지사\n"));
        assert!(block.contains("- 파견 목적: 현장 지원"));
        assert!(block.contains("- 기간: 총 5일"));
        assert!(!block.contains("숙박"));
    }

    #[test]
    fn test_report_links_become_sub_bullets() {
        let record = FieldRecord::WeeklyReport(ReportFields {
            start_date: "2024-01-08".to_string(),
            end_date: "2024-01-12".to_string(),
            related_links: "https://a.example\n\n  https://b.example  ".to_string(),
            content: "API 개발 완료\n배포 준비".to_string(),
        });
        let block = render_record(&record);
        assert!(block.contains("- 보고 내용:\n  API 개발 완료\n  배포 준비"));
        assert!(block.ends_with("- 관련 링크:\n  - https://a.example\n  - https://b.example"));
    }

    #[test]
    fn test_holiday_work_date_has_weekday() {
        let record = FieldRecord::HolidayWork(HolidayWorkFields {
            work_date: "2024-05-05".to_string(),
            work_hours: "09:00 ~ 13:00".to_string(),
            reason: "서버 점검".to_string(),
        });
        assert_eq!(
            render_record(&record),
            "- 근무일: 2024년 5월 5일 (일)\n- 근무 시간: 09:00 ~ 13:00\n- 사유: 서버 점검"
        );
    }

    #[test]
    fn test_free_text_is_verbatim() {
        let description = "다음 주 회의실 예약을 요청합니다.\n- 인원: 8명";
        let selection = Selection::FreeText(description.to_string());
        assert_eq!(render_details(&selection), description);
    }
}
