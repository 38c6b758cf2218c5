use crate::data::DailyRecord;

/// Text content of the side panel for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub date: String,
    pub day: usize,
    pub cases: u64,
    pub deaths: u64,
    /// Cities reached so far out of the total, when onset is tracked
    pub affected: Option<(usize, usize)>,
}

impl PanelView {
    pub fn new(record: &DailyRecord, day: usize, affected: Option<(usize, usize)>) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            day,
            cases: record.cumulative_cases,
            deaths: record.cumulative_deaths,
            affected,
        }
    }

    pub fn day_text(&self) -> String {
        format_thousands(self.day as u64)
    }

    pub fn cases_text(&self) -> String {
        format_thousands(self.cases)
    }

    pub fn deaths_text(&self) -> String {
        format_thousands(self.deaths)
    }

    pub fn affected_text(&self) -> Option<String> {
        self.affected
            .map(|(reached, total)| format!("{} / {}", reached, total))
    }
}

/// Group digits in threes with commas: `1234567` -> `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
