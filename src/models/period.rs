use std::fmt;

/// Time window for the artist and track charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPeriod {
    #[default]
    SevenDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
    Overall,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 6] = [
        ChartPeriod::SevenDays,
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::TwelveMonths,
        ChartPeriod::Overall,
    ];

    /// The charts overview has no all-time option.
    pub const RECENT: [ChartPeriod; 5] = [
        ChartPeriod::SevenDays,
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::TwelveMonths,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            ChartPeriod::SevenDays => "7day",
            ChartPeriod::OneMonth => "1month",
            ChartPeriod::ThreeMonths => "3month",
            ChartPeriod::SixMonths => "6month",
            ChartPeriod::TwelveMonths => "12month",
            ChartPeriod::Overall => "overall",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartPeriod::SevenDays => "Last 7 Days",
            ChartPeriod::OneMonth => "Last Month",
            ChartPeriod::ThreeMonths => "Last 3 Months",
            ChartPeriod::SixMonths => "Last 6 Months",
            ChartPeriod::TwelveMonths => "Last 12 Months",
            ChartPeriod::Overall => "All Time",
        }
    }

    /// Steps through `options`, wrapping at both ends. A period missing from
    /// `options` restarts at the first entry.
    pub fn cycle(self, options: &[ChartPeriod], delta: isize) -> Self {
        if options.is_empty() {
            return self;
        }
        let len = options.len() as isize;
        match options.iter().position(|period| *period == self) {
            Some(idx) => options[(idx as isize + delta).rem_euclid(len) as usize],
            None => options[0],
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_in_both_directions() {
        let recent = &ChartPeriod::RECENT;
        assert_eq!(
            ChartPeriod::TwelveMonths.cycle(recent, 1),
            ChartPeriod::SevenDays
        );
        assert_eq!(
            ChartPeriod::SevenDays.cycle(recent, -1),
            ChartPeriod::TwelveMonths
        );
        assert_eq!(ChartPeriod::Overall.cycle(recent, 1), ChartPeriod::SevenDays);
    }
}
