use serde::{Deserialize, Serialize};

use super::TemplateKind;

/// Morning or afternoon half-day leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayPeriod {
    Morning,
    Afternoon,
}

impl HalfDayPeriod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "오전 반차",
            Self::Afternoon => "오후 반차",
        }
    }
}

impl std::str::FromStr for HalfDayPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" | "am" | "오전" => Ok(Self::Morning),
            "afternoon" | "pm" | "오후" => Ok(Self::Afternoon),
            _ => anyhow::bail!("Invalid half-day period: '{s}' (expected 'morning' or 'afternoon')"),
        }
    }
}

/// Annual and half-day leave.
///
/// Dates are `YYYY-MM-DD` strings, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFields {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub period: Option<HalfDayPeriod>,
    pub reason: String,
}

/// Business trip and dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFields {
    pub start_date: String,
    pub end_date: String,
    pub destination: String,
    pub purpose: String,
    pub accommodation: String,
}

/// Work and weekly reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFields {
    pub start_date: String,
    pub end_date: String,
    /// One link per line.
    pub related_links: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayWorkFields {
    pub work_date: String,
    /// Free-form, e.g. `09:00 ~ 13:00`.
    pub work_hours: String,
    pub reason: String,
}

/// Form data for one template; the variant determines the [`TemplateKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", content = "fields", rename_all = "snake_case")]
pub enum FieldRecord {
    AnnualLeave(LeaveFields),
    HalfDayLeave(LeaveFields),
    BusinessTrip(TripFields),
    Dispatch(TripFields),
    WorkReport(ReportFields),
    WeeklyReport(ReportFields),
    HolidayWork(HolidayWorkFields),
}

impl FieldRecord {
    /// An unfilled record for the given template.
    pub fn empty(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::AnnualLeave => Self::AnnualLeave(LeaveFields::default()),
            TemplateKind::HalfDayLeave => Self::HalfDayLeave(LeaveFields::default()),
            TemplateKind::BusinessTrip => Self::BusinessTrip(TripFields::default()),
            TemplateKind::Dispatch => Self::Dispatch(TripFields::default()),
            TemplateKind::WorkReport => Self::WorkReport(ReportFields::default()),
            TemplateKind::WeeklyReport => Self::WeeklyReport(ReportFields::default()),
            TemplateKind::HolidayWork => Self::HolidayWork(HolidayWorkFields::default()),
        }
    }

    pub const fn kind(&self) -> TemplateKind {
        match self {
            Self::AnnualLeave(_) => TemplateKind::AnnualLeave,
            Self::HalfDayLeave(_) => TemplateKind::HalfDayLeave,
            Self::BusinessTrip(_) => TemplateKind::BusinessTrip,
            Self::Dispatch(_) => TemplateKind::Dispatch,
            Self::WorkReport(_) => TemplateKind::WorkReport,
            Self::WeeklyReport(_) => TemplateKind::WeeklyReport,
            Self::HolidayWork(_) => TemplateKind::HolidayWork,
        }
    }

    /// Sets a field by its camelCase form name, as a form view would on change.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not belong to this record's shape.
    pub fn set(&mut self, field: &str, value: &str) -> anyhow::Result<()> {
        let value = value.to_string();
        let slot = match (self, field) {
            (Self::AnnualLeave(f) | Self::HalfDayLeave(f), "startDate") => &mut f.start_date,
            (Self::AnnualLeave(f) | Self::HalfDayLeave(f), "endDate") => &mut f.end_date,
            (Self::AnnualLeave(f) | Self::HalfDayLeave(f), "reason") => &mut f.reason,
            (Self::HalfDayLeave(f), "period") => {
                f.period = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
                return Ok(());
            }
            (Self::BusinessTrip(f) | Self::Dispatch(f), "startDate") => &mut f.start_date,
            (Self::BusinessTrip(f) | Self::Dispatch(f), "endDate") => &mut f.end_date,
            (Self::BusinessTrip(f) | Self::Dispatch(f), "destination") => &mut f.destination,
            (Self::BusinessTrip(f) | Self::Dispatch(f), "purpose") => &mut f.purpose,
            (Self::BusinessTrip(f) | Self::Dispatch(f), "accommodation") => &mut f.accommodation,
            (Self::WorkReport(f) | Self::WeeklyReport(f), "startDate") => &mut f.start_date,
            (Self::WorkReport(f) | Self::WeeklyReport(f), "endDate") => &mut f.end_date,
            (Self::WorkReport(f) | Self::WeeklyReport(f), "relatedLinks") => &mut f.related_links,
            (Self::WorkReport(f) | Self::WeeklyReport(f), "content") => &mut f.content,
            (Self::HolidayWork(f), "workDate") => &mut f.work_date,
            (Self::HolidayWork(f), "workHours") => &mut f.work_hours,
            (Self::HolidayWork(f), "reason") => &mut f.reason,
            (record, _) => anyhow::bail!(
                "Unknown field '{field}' for template '{}'\n\nAvailable fields: {}",
                record.kind(),
                record.field_names().join(", ")
            ),
        };
        *slot = value;
        Ok(())
    }

    /// Form field names accepted by [`FieldRecord::set`].
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::AnnualLeave(_) => &["startDate", "endDate", "reason"],
            Self::HalfDayLeave(_) => &["startDate", "endDate", "period", "reason"],
            Self::BusinessTrip(_) | Self::Dispatch(_) => &[
                "startDate",
                "endDate",
                "destination",
                "purpose",
                "accommodation",
            ],
            Self::WorkReport(_) | Self::WeeklyReport(_) => {
                &["startDate", "endDate", "relatedLinks", "content"]
            }
            Self::HolidayWork(_) => &["workDate", "workHours", "reason"],
        }
    }
}
