//! Email templates and the form data each one owns.

mod closing;
mod fields;

pub use closing::ClosingRemarkTable;
pub use fields::{FieldRecord, HalfDayPeriod, HolidayWorkFields, LeaveFields, ReportFields, TripFields};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The category of email being drafted.
///
/// Each kind owns exactly one [`FieldRecord`] shape and one default closing remark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    AnnualLeave,
    HalfDayLeave,
    BusinessTrip,
    Dispatch,
    WorkReport,
    WeeklyReport,
    HolidayWork,
}

impl TemplateKind {
    /// Every template, in display order.
    pub const ALL: [Self; 7] = [
        Self::AnnualLeave,
        Self::HalfDayLeave,
        Self::BusinessTrip,
        Self::Dispatch,
        Self::WorkReport,
        Self::WeeklyReport,
        Self::HolidayWork,
    ];

    /// Stable identifier used on the command line and in persisted data.
    pub const fn id(self) -> &'static str {
        match self {
            Self::AnnualLeave => "annual_leave",
            Self::HalfDayLeave => "half_day_leave",
            Self::BusinessTrip => "business_trip",
            Self::Dispatch => "dispatch",
            Self::WorkReport => "work_report",
            Self::WeeklyReport => "weekly_report",
            Self::HolidayWork => "holiday_work",
        }
    }

    /// Korean display name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AnnualLeave => "연차 신청",
            Self::HalfDayLeave => "반차 신청",
            Self::BusinessTrip => "출장 신청",
            Self::Dispatch => "파견 신청",
            Self::WorkReport => "업무 보고",
            Self::WeeklyReport => "주간 보고",
            Self::HolidayWork => "휴일 근무 신청",
        }
    }

    /// Built-in closing sentence used until the user overrides it.
    pub const fn default_closing_remark(self) -> &'static str {
        match self {
            Self::AnnualLeave => "위와 같이 연차를 신청하오니 검토 후 승인 부탁드립니다.",
            Self::HalfDayLeave => "위와 같이 반차를 신청하오니 검토 후 승인 부탁드립니다.",
            Self::BusinessTrip => "위와 같이 출장을 신청하오니 검토 후 승인 부탁드립니다.",
            Self::Dispatch => "위와 같이 파견을 신청하오니 검토 후 승인 부탁드립니다.",
            Self::WorkReport => "이상으로 업무 보고를 마치겠습니다.",
            Self::WeeklyReport => "이상으로 주간 보고를 마치겠습니다.",
            Self::HolidayWork => "위와 같이 휴일 근무를 신청하오니 검토 후 승인 부탁드립니다.",
        }
    }

    /// Looks up a template by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown template: '{s}'\n\n\
                 Available templates: {}\n\
                 Run 'maildraft templates' to see descriptions.",
                Self::ALL.map(Self::id).join(", ")
            )
        })
    }
}

/// What the email is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A template with its form data.
    Template(FieldRecord),
    /// No template: the user's own description, used verbatim.
    FreeText(String),
}

impl Selection {
    /// The selected template, if any.
    pub const fn kind(&self) -> Option<TemplateKind> {
        match self {
            Self::Template(record) => Some(record.kind()),
            Self::FreeText(_) => None,
        }
    }

    /// Whether there is anything to write about.
    pub fn is_ready(&self) -> bool {
        match self {
            Self::Template(_) => true,
            Self::FreeText(description) => !description.trim().is_empty(),
        }
    }
}
